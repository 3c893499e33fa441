//! Enumeration types used throughout the arena simulation.

use serde::{Deserialize, Serialize};

/// Faction ownership for every live entity in the arena.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// The players' units defending the arena objective.
    #[default]
    Defender,
    /// Wave enemies and the boss.
    Invader,
    /// Aid couriers sent to resupply the defenders.
    Allied,
}

/// Top-level session phase, owned by the wave director.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// World ready, first wave not yet launched.
    #[default]
    Setup,
    /// A composed enemy wave is live.
    NormalWave,
    /// A boss encounter is live (no composed enemies).
    BossWave,
    /// Between waves, next wave scheduled.
    Intermission,
    /// Session won (terminal).
    Victory,
    /// Session lost (terminal).
    Defeat,
}

impl GamePhase {
    /// Whether the session has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::Defeat)
    }
}

/// Every spawnable unit archetype: wave enemies, boss minions, the boss,
/// the aid courier, and the purchasable defender line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitArchetype {
    // --- Wave enemies ---
    /// Fast, fragile swarm melee unit.
    Skitter,
    /// Mid-line ranged attacker.
    Spitter,
    /// Slow heavy bruiser.
    Mauler,
    /// Late-table siege unit.
    Ravager,

    // --- Boss minions ---
    /// Light flyer summoned in flanking groups.
    Wisp,
    /// Heavier flyer summoned behind the boss.
    Talon,

    // --- Boss ---
    /// The boss-wave flagship.
    Dreadnought,

    // --- Aid ---
    /// Allied cargo carrier.
    Courier,

    // --- Purchasable defenders ---
    Sentinel,
    Vanguard,
    Bulwark,
    Paragon,
}

impl UnitArchetype {
    /// Parse a player-supplied archetype identifier (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "skitter" => Some(Self::Skitter),
            "spitter" => Some(Self::Spitter),
            "mauler" => Some(Self::Mauler),
            "ravager" => Some(Self::Ravager),
            "wisp" => Some(Self::Wisp),
            "talon" => Some(Self::Talon),
            "dreadnought" => Some(Self::Dreadnought),
            "courier" => Some(Self::Courier),
            "sentinel" => Some(Self::Sentinel),
            "vanguard" => Some(Self::Vanguard),
            "bulwark" => Some(Self::Bulwark),
            "paragon" => Some(Self::Paragon),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skitter => "skitter",
            Self::Spitter => "spitter",
            Self::Mauler => "mauler",
            Self::Ravager => "ravager",
            Self::Wisp => "wisp",
            Self::Talon => "talon",
            Self::Dreadnought => "dreadnought",
            Self::Courier => "courier",
            Self::Sentinel => "sentinel",
            Self::Vanguard => "vanguard",
            Self::Bulwark => "bulwark",
            Self::Paragon => "paragon",
        }
    }
}

/// Resource block types carried by aid couriers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceBlock {
    Plating,
    Munitions,
    Coolant,
    ReactorCore,
    PhaseConduit,
}

/// Which controller variant is attached to a unit (for views).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerKind {
    Enemy,
    Courier,
    Player,
}

/// Cargo courier behavior phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourierPhase {
    /// Flying toward the drop point.
    #[default]
    Inbound,
    /// At the drop point, unloading one payload per AI tick.
    Unloading,
    /// Cargo empty, heading back off the map.
    Departing,
}
