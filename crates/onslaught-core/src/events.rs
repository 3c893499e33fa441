//! Events emitted by the simulation for the host to render: announcements,
//! positional effects, and per-player HUD updates.

use serde::{Deserialize, Serialize};

use crate::economy::PurchaseError;
use crate::enums::*;
use crate::types::Position;

/// One-shot events drained into each snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    // --- Wave flow ---
    /// The first wave of the session has been scheduled.
    FirstWaveScheduled { delay_secs: u32 },
    /// The next wave has been scheduled after an intermission.
    NextWaveScheduled { delay_secs: u32 },
    /// A wave just launched.
    WaveStarted { wave_number: u32, boss: bool },
    /// Boss telegraph has begun.
    BossIncoming,
    /// Aid couriers are on the way.
    AidIncoming { couriers: u32 },
    /// The session ended.
    GameOver { victory: bool },

    // --- Positional effects ---
    /// One telegraph pulse of a pending cast.
    TelegraphPulse { position: Position },
    /// Heavy impact effect (boss arrival).
    ImpactEffect { position: Position },
    /// Area blast against the defenders.
    BlastEffect { position: Position, radius: f32 },
    /// A courier dropped one payload at the objective.
    CargoDelivered { position: Position, block: ResourceBlock },
    /// A unit died.
    UnitDestroyed { unit_id: u32 },

    // --- Player-facing ---
    PlayerJoined { player_id: String, returning: bool },
    /// Periodic HUD balance push.
    HudMoney { player_id: String, money: u32 },
    PurchaseCompleted {
        player_id: String,
        archetype: UnitArchetype,
        amount: u32,
        balance: u32,
    },
    PurchaseFailed {
        player_id: String,
        error: PurchaseError,
    },
    UpgradeList {
        player_id: String,
        entries: Vec<UpgradeListEntry>,
    },
}

/// One row of the upgrade listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeListEntry {
    pub archetype: UnitArchetype,
    pub cost: u32,
    pub affordable: bool,
}
