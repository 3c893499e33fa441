//! Commands sent by the host into the arena core.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// Session lifecycle hooks and player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ArenaCommand {
    // --- Session lifecycle ---
    /// The host world is loaded: reset the session and stage the first wave.
    WorldReady,
    /// A player joined, keyed by stable identity (never a connection handle).
    PlayerJoin { player_id: String },

    // --- Player actions ---
    /// Buy units. `archetype` is the player-typed identifier; a missing
    /// amount means 1.
    Upgrade {
        player_id: String,
        archetype: String,
        amount: Option<u32>,
    },
    /// List the cost table annotated with affordability.
    ListUpgrades { player_id: String },
}
