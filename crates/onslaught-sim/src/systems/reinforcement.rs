//! Aid reinforcement dispatch.
//!
//! One allied cargo courier per completed wave, entering on the west edge
//! with undiminishing health and a randomized cargo load: each courier
//! independently rolls the rare table, picks one block type from the chosen
//! table, and loads that type's quantity payload by payload up to capacity.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use onslaught_core::components::*;
use onslaught_core::config::unit_stats;
use onslaught_core::constants::*;
use onslaught_core::enums::{Faction, UnitArchetype};
use onslaught_core::events::GameEvent;
use onslaught_core::types::{Position, Velocity};

/// Dispatch `wave_number` couriers.
#[allow(clippy::too_many_arguments)]
pub fn dispatch(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    wave_number: u32,
    tables: &onslaught_core::config::ArenaTables,
    next_unit_id: &mut u32,
    events: &mut Vec<GameEvent>,
    _world_width: f32,
    world_height: f32,
) {
    events.push(GameEvent::AidIncoming {
        couriers: wave_number,
    });

    let stats = unit_stats(UnitArchetype::Courier);

    for _ in 0..wave_number {
        let jitter: f32 = rng.gen_range(-AID_EDGE_JITTER..=AID_EDGE_JITTER);
        let y = (world_height / 2.0 + jitter)
            .clamp(SPAWN_EDGE_MARGIN, world_height - SPAWN_EDGE_MARGIN);

        // Rare table rolled independently per courier.
        let table = if rng.gen_bool(AID_RARE_CHANCE) {
            &tables.aid_cargo_rare
        } else {
            &tables.aid_cargo
        };
        let (block, quantity) = table[rng.gen_range(0..table.len())];

        let mut payloads = Vec::new();
        for _ in 0..quantity {
            if (payloads.len() as u32) < COURIER_CARGO_CAPACITY {
                payloads.push(block);
            }
        }

        let unit_id = *next_unit_id;
        *next_unit_id += 1;

        world.spawn((
            UnitId(unit_id),
            UnitKind {
                archetype: UnitArchetype::Courier,
            },
            Faction::Allied,
            Position::new(SPAWN_EDGE_MARGIN, y),
            Velocity::default(),
            Facing::default(),
            Health {
                hp: f32::MAX,
                max: f32::MAX,
            },
            Mobility {
                speed: stats.speed,
                flying: stats.flying,
            },
            Controller::Courier(CourierController::default()),
            CargoHold {
                payloads,
                capacity: COURIER_CARGO_CAPACITY,
            },
        ));
    }
}
