//! Static balance configuration: per-archetype stats and the tables the
//! director, economy and reinforcement systems read. Read-only at runtime;
//! `Default` carries the shipped values.

use serde::{Deserialize, Serialize};

use crate::enums::{ResourceBlock, UnitArchetype};

/// Kinematic and combat parameters for one archetype.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UnitStats {
    pub base_health: f32,
    /// Cruise speed (world units per second).
    pub speed: f32,
    pub weapon_range: f32,
    pub flying: bool,
    pub targets_ground: bool,
    pub targets_air: bool,
}

/// Stats lookup for a unit archetype.
pub fn unit_stats(archetype: UnitArchetype) -> UnitStats {
    match archetype {
        UnitArchetype::Skitter => UnitStats {
            base_health: 120.0,
            speed: 18.0,
            weapon_range: 24.0,
            flying: false,
            targets_ground: true,
            targets_air: false,
        },
        UnitArchetype::Spitter => UnitStats {
            base_health: 200.0,
            speed: 12.0,
            weapon_range: 96.0,
            flying: false,
            targets_ground: true,
            targets_air: true,
        },
        UnitArchetype::Mauler => UnitStats {
            base_health: 520.0,
            speed: 9.0,
            weapon_range: 72.0,
            flying: false,
            targets_ground: true,
            targets_air: false,
        },
        UnitArchetype::Ravager => UnitStats {
            base_health: 1400.0,
            speed: 7.0,
            weapon_range: 120.0,
            flying: false,
            targets_ground: true,
            targets_air: true,
        },
        UnitArchetype::Wisp => UnitStats {
            base_health: 90.0,
            speed: 30.0,
            weapon_range: 56.0,
            flying: true,
            targets_ground: true,
            targets_air: true,
        },
        UnitArchetype::Talon => UnitStats {
            base_health: 260.0,
            speed: 22.0,
            weapon_range: 88.0,
            flying: true,
            targets_ground: true,
            targets_air: true,
        },
        UnitArchetype::Dreadnought => UnitStats {
            base_health: 22_000.0,
            speed: 4.0,
            weapon_range: 160.0,
            flying: true,
            targets_ground: true,
            targets_air: true,
        },
        UnitArchetype::Courier => UnitStats {
            base_health: 600.0,
            speed: 16.0,
            weapon_range: 0.0,
            flying: true,
            targets_ground: false,
            targets_air: false,
        },
        UnitArchetype::Sentinel => UnitStats {
            base_health: 140.0,
            speed: 11.0,
            weapon_range: 64.0,
            flying: false,
            targets_ground: true,
            targets_air: false,
        },
        UnitArchetype::Vanguard => UnitStats {
            base_health: 320.0,
            speed: 10.0,
            weapon_range: 88.0,
            flying: false,
            targets_ground: true,
            targets_air: true,
        },
        UnitArchetype::Bulwark => UnitStats {
            base_health: 900.0,
            speed: 8.0,
            weapon_range: 104.0,
            flying: false,
            targets_ground: true,
            targets_air: false,
        },
        UnitArchetype::Paragon => UnitStats {
            base_health: 2600.0,
            speed: 6.0,
            weapon_range: 140.0,
            flying: false,
            targets_ground: true,
            targets_air: true,
        },
    }
}

/// The arena's balance tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaTables {
    /// Wave composition weights. Order is significant: each archetype's
    /// count is drawn from (and subtracted out of) the remaining budget
    /// pool in this exact order.
    pub enemy_weights: Vec<(UnitArchetype, u32)>,
    /// Purchase costs, in listing order.
    pub upgrade_costs: Vec<(UnitArchetype, u32)>,
    /// Normal aid cargo: block type -> payload quantity.
    pub aid_cargo: Vec<(ResourceBlock, u32)>,
    /// Rare aid cargo, drawn with a fixed low chance per courier.
    pub aid_cargo_rare: Vec<(ResourceBlock, u32)>,
}

impl Default for ArenaTables {
    fn default() -> Self {
        Self {
            enemy_weights: vec![
                (UnitArchetype::Skitter, 2),
                (UnitArchetype::Spitter, 4),
                (UnitArchetype::Mauler, 8),
                (UnitArchetype::Ravager, 16),
            ],
            upgrade_costs: vec![
                (UnitArchetype::Sentinel, 50),
                (UnitArchetype::Vanguard, 120),
                (UnitArchetype::Bulwark, 250),
                (UnitArchetype::Paragon, 500),
            ],
            aid_cargo: vec![
                (ResourceBlock::Plating, 4),
                (ResourceBlock::Munitions, 3),
                (ResourceBlock::Coolant, 3),
            ],
            aid_cargo_rare: vec![
                (ResourceBlock::ReactorCore, 2),
                (ResourceBlock::PhaseConduit, 2),
            ],
        }
    }
}

impl ArenaTables {
    /// Purchase cost for an archetype, if it is purchasable.
    pub fn upgrade_cost(&self, archetype: UnitArchetype) -> Option<u32> {
        self.upgrade_costs
            .iter()
            .find(|(a, _)| *a == archetype)
            .map(|(_, cost)| *cost)
    }
}

/// Archetype a freshly joined player starts with.
pub const STARTING_ARCHETYPE: UnitArchetype = UnitArchetype::Sentinel;

/// Minion archetype spawned by boss flanking groups.
pub const BOSS_FLANK_MINION: UnitArchetype = UnitArchetype::Wisp;

/// Minion archetype spawned behind the boss.
pub const BOSS_REAR_MINION: UnitArchetype = UnitArchetype::Talon;
