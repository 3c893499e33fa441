//! Arena snapshot — the complete visible state handed to the host each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime};

/// Complete arena state broadcast to the host after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub time: SimTime,
    pub wave: WaveView,
    pub units: Vec<UnitView>,
    pub players: Vec<PlayerView>,
    /// One-shot events since the previous snapshot.
    pub events: Vec<GameEvent>,
}

/// Wave director state for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub wave_number: u32,
    pub scaling_factor: f32,
    pub phase: GamePhase,
    pub wave_active: bool,
    /// Seconds until the next scheduled wave, if one is scheduled.
    pub next_wave_in_secs: Option<f32>,
    /// Live pending casts (boss telegraphs and volleys).
    pub pending_casts: usize,
}

/// A live unit on the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    pub unit_id: u32,
    pub archetype: UnitArchetype,
    pub faction: Faction,
    pub position: Position,
    pub heading: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub controller: ControllerKind,
    pub firing: bool,
    pub boss: bool,
}

/// Per-player HUD state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub player_id: String,
    pub money: u32,
}
