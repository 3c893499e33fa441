//! Wave composition and enemy spawn factories.
//!
//! Converts a wave's enemy budget into spawn orders by walking the weight
//! table in declared order: each archetype draws `remaining / weight` from
//! the shared pool and the pool shrinks by that draw before the next
//! archetype is considered. The draw is subtracted uncapped; only the spawn
//! count is clamped, and the remainder is dropped, not deferred.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use onslaught_core::components::*;
use onslaught_core::config::{unit_stats, ArenaTables};
use onslaught_core::constants::*;
use onslaught_core::enums::{Faction, UnitArchetype};
use onslaught_core::types::{Position, Velocity};

/// Compose spawn counts from a budget. Returns (archetype, spawn_count)
/// in table order with the per-type cap already applied.
pub fn compose(budget: u32, weights: &[(UnitArchetype, u32)]) -> Vec<(UnitArchetype, u32)> {
    let mut remaining = budget;
    let mut orders = Vec::with_capacity(weights.len());

    for &(archetype, weight) in weights {
        if weight == 0 {
            continue;
        }
        let type_count = remaining / weight;
        remaining -= type_count;
        orders.push((archetype, type_count.min(MAX_UNITS_PER_TYPE)));
    }

    orders
}

/// Compose and spawn one normal wave.
pub fn run_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    tables: &ArenaTables,
    budget: u32,
    scaling_factor: f32,
    next_unit_id: &mut u32,
    current_tick: u64,
    world_width: f32,
    world_height: f32,
) {
    for (archetype, count) in compose(budget, &tables.enemy_weights) {
        for _ in 0..count {
            let site = boundary_site(rng, world_width, world_height);
            spawn_enemy_at(
                world,
                rng,
                archetype,
                site,
                scaling_factor,
                next_unit_id,
                current_tick,
            );
        }
    }
}

/// Pick a spawn site on one of the four arena edges: uniform edge choice,
/// then a uniform offset along the edge within ±spread of its midpoint,
/// clamped inside the margin. Never returns a position outside bounds.
pub fn boundary_site(rng: &mut ChaCha8Rng, world_width: f32, world_height: f32) -> Position {
    let margin = SPAWN_EDGE_MARGIN;
    let spread_x = (world_width / 2.0 - margin).max(margin);
    let spread_y = (world_height / 2.0 - margin).max(margin);

    let along_x = (world_width / 2.0 + rng.gen_range(-spread_x..=spread_x))
        .clamp(margin, world_width - margin);
    let along_y = (world_height / 2.0 + rng.gen_range(-spread_y..=spread_y))
        .clamp(margin, world_height - margin);

    match rng.gen_range(0..4) {
        0 => Position::new(world_width - margin, along_y),
        1 => Position::new(along_x, world_height - margin),
        2 => Position::new(margin, along_y),
        _ => Position::new(along_x, margin),
    }
}

/// Spawn a single enemy with scaled health and a fresh AI controller.
pub fn spawn_enemy_at(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    archetype: UnitArchetype,
    position: Position,
    scaling_factor: f32,
    next_unit_id: &mut u32,
    current_tick: u64,
) -> hecs::Entity {
    let stats = unit_stats(archetype);
    let health = stats.base_health * scaling_factor / SCALING_DAMPENER;

    let unit_id = *next_unit_id;
    *next_unit_id += 1;

    // Random cadence offset so freshly spawned waves don't retarget in sync.
    let retarget_offset = rng.gen_range(0..RETARGET_INTERVAL_TICKS);

    world.spawn((
        UnitId(unit_id),
        UnitKind { archetype },
        Faction::Invader,
        position,
        Velocity::default(),
        Facing::default(),
        Health {
            hp: health,
            max: health,
        },
        Mobility {
            speed: stats.speed,
            flying: stats.flying,
        },
        Weapon {
            range: stats.weapon_range,
            targets_ground: stats.targets_ground,
            targets_air: stats.targets_air,
            aim: None,
            firing: false,
        },
        Controller::Enemy(EnemyController {
            next_retarget_tick: current_tick + retarget_offset,
            target: None,
        }),
    ))
}
