//! Snapshot assembly — the complete visible state handed to the host.

use std::collections::BTreeMap;

use hecs::World;

use onslaught_core::components::*;
use onslaught_core::constants::DT;
use onslaught_core::economy::{PlayerAccount, PlayerId};
use onslaught_core::events::GameEvent;
use onslaught_core::state::{ArenaSnapshot, PlayerView, UnitView, WaveView};
use onslaught_core::types::SimTime;

use crate::systems::director::WaveState;

/// Build the snapshot for the current tick.
pub fn build(
    world: &World,
    time: &SimTime,
    wave: &WaveState,
    pending_casts: usize,
    accounts: &BTreeMap<PlayerId, PlayerAccount>,
    events: Vec<GameEvent>,
) -> ArenaSnapshot {
    let mut units: Vec<UnitView> = world
        .query::<(
            &UnitId,
            &UnitKind,
            &onslaught_core::enums::Faction,
            &onslaught_core::types::Position,
            &Facing,
            &Health,
            &Controller,
            Option<&Weapon>,
            Option<&BossMarker>,
        )>()
        .iter()
        .map(
            |(_, (id, kind, faction, position, facing, health, controller, weapon, boss))| {
                UnitView {
                    unit_id: id.0,
                    archetype: kind.archetype,
                    faction: *faction,
                    position: *position,
                    heading: facing.heading,
                    hp: health.hp,
                    max_hp: health.max,
                    controller: controller.kind(),
                    firing: weapon.map_or(false, |w| w.firing),
                    boss: boss.is_some(),
                }
            },
        )
        .collect();
    units.sort_by_key(|u| u.unit_id);

    let players = accounts
        .values()
        .map(|account| PlayerView {
            player_id: account.player_id.clone(),
            money: account.money,
        })
        .collect();

    ArenaSnapshot {
        time: *time,
        wave: WaveView {
            wave_number: wave.wave_number,
            scaling_factor: wave.scaling_factor,
            phase: wave.phase,
            wave_active: wave.wave_active,
            next_wave_in_secs: wave
                .next_wave_at
                .map(|at| at.saturating_sub(time.tick) as f32 * DT),
            pending_casts,
        },
        units,
        players,
        events,
    }
}
