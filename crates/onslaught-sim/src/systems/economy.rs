//! Purchase application and the upgrade listing.
//!
//! Validation is pure (onslaught-core); this module computes the live
//! owned count, applies a successful quote to the account and the world,
//! and reports the outcome as events. Nothing is mutated before the quote
//! passes, so every failure leaves balance and unit counts untouched.

use std::collections::BTreeMap;

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use onslaught_core::components::*;
use onslaught_core::config::{unit_stats, ArenaTables};
use onslaught_core::constants::PURCHASE_SPAWN_JITTER;
use onslaught_core::economy::{validate_purchase, PlayerAccount, PlayerId};
use onslaught_core::enums::{Faction, UnitArchetype};
use onslaught_core::events::{GameEvent, UpgradeListEntry};
use onslaught_core::types::{Position, Velocity};

/// The player's live unit count for one archetype.
pub fn owned_count(world: &World, player_id: &str, archetype: UnitArchetype) -> u32 {
    world
        .query::<(&Owner, &UnitKind)>()
        .iter()
        .filter(|(_, (owner, kind))| {
            owner.player_id == player_id && kind.archetype == archetype
        })
        .count() as u32
}

/// The player's live unit count across all archetypes.
pub fn player_unit_count(world: &World, player_id: &str) -> u32 {
    world
        .query::<&Owner>()
        .iter()
        .filter(|(_, owner)| owner.player_id == player_id)
        .count() as u32
}

/// Handle an upgrade command.
#[allow(clippy::too_many_arguments)]
pub fn purchase(
    world: &mut World,
    accounts: &mut BTreeMap<PlayerId, PlayerAccount>,
    tables: &ArenaTables,
    rng: &mut ChaCha8Rng,
    next_unit_id: &mut u32,
    events: &mut Vec<GameEvent>,
    player_id: &str,
    archetype_name: &str,
    amount: Option<u32>,
    objective: Position,
) {
    let Some(account) = accounts.get_mut(player_id) else {
        return;
    };

    let owned = UnitArchetype::parse(archetype_name)
        .map(|archetype| owned_count(world, player_id, archetype))
        .unwrap_or(0);

    match validate_purchase(tables, archetype_name, amount, owned, account.money) {
        Ok(quote) => {
            account.money -= quote.total_cost;
            for _ in 0..quote.amount {
                spawn_defender(world, rng, quote.archetype, player_id, objective, next_unit_id);
            }
            events.push(GameEvent::PurchaseCompleted {
                player_id: player_id.to_string(),
                archetype: quote.archetype,
                amount: quote.amount,
                balance: account.money,
            });
        }
        Err(error) => {
            events.push(GameEvent::PurchaseFailed {
                player_id: player_id.to_string(),
                error,
            });
        }
    }
}

/// Handle a list-upgrades command: the cost table annotated with
/// affordability for this player.
pub fn list_upgrades(
    accounts: &BTreeMap<PlayerId, PlayerAccount>,
    tables: &ArenaTables,
    events: &mut Vec<GameEvent>,
    player_id: &str,
) {
    let Some(account) = accounts.get(player_id) else {
        return;
    };

    let entries = tables
        .upgrade_costs
        .iter()
        .map(|&(archetype, cost)| UpgradeListEntry {
            archetype,
            cost,
            affordable: account.money >= cost,
        })
        .collect();

    events.push(GameEvent::UpgradeList {
        player_id: player_id.to_string(),
        entries,
    });
}

/// Spawn one player-owned defender near the objective.
pub fn spawn_defender(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    archetype: UnitArchetype,
    player_id: &str,
    objective: Position,
    next_unit_id: &mut u32,
) -> hecs::Entity {
    let stats = unit_stats(archetype);

    let unit_id = *next_unit_id;
    *next_unit_id += 1;

    let jitter_x: f32 = rng.gen_range(-PURCHASE_SPAWN_JITTER..=PURCHASE_SPAWN_JITTER);
    let jitter_y: f32 = rng.gen_range(-PURCHASE_SPAWN_JITTER..=PURCHASE_SPAWN_JITTER);

    world.spawn((
        UnitId(unit_id),
        UnitKind { archetype },
        Faction::Defender,
        Position::new(objective.x + jitter_x, objective.y + jitter_y),
        Velocity::default(),
        Facing::default(),
        Health {
            hp: stats.base_health,
            max: stats.base_health,
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
        Controller::Player,
        Owner {
            player_id: player_id.to_string(),
        },
    ))
}
