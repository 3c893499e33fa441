//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Stable per-unit identifier assigned at spawn, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// Which archetype this unit was spawned as.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UnitKind {
    pub archetype: UnitArchetype,
}

/// Hit points. Units at or below zero are despawned by cleanup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub hp: f32,
    pub max: f32,
}

/// Movement capability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Mobility {
    /// Cruise speed (world units per second).
    pub speed: f32,
    /// Flying units ignore terrain and can be hit only by air-capable weapons.
    pub flying: bool,
}

/// Weapon state. The AI sets aim and the fire gate; damage resolution
/// belongs to the host engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Weapon {
    pub range: f32,
    pub targets_ground: bool,
    pub targets_air: bool,
    /// Current aim point, if the fire gate is open.
    pub aim: Option<Position>,
    pub firing: bool,
}

/// Current facing (radians, 0 = North, clockwise).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Facing {
    pub heading: f32,
}

/// Boss armor stat.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Armor {
    pub value: f32,
}

/// Boss outgoing-damage multiplier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DamageMultiplier {
    pub value: f32,
}

/// Persistent boss status marker (drives host-side UI and behavior).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BossMarker;

/// Ownership of a purchased unit by a player account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub player_id: String,
}

/// Cargo carried by an aid courier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CargoHold {
    /// Remaining payloads, unloaded back-to-front.
    pub payloads: Vec<ResourceBlock>,
    pub capacity: u32,
}

/// Short-lived boss volley projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub ttl_ticks: u32,
    pub damage: f32,
}

/// Per-unit controller, attached at spawn and destroyed with the unit.
/// A closed set of variants rather than open virtual dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Controller {
    Enemy(EnemyController),
    Courier(CourierController),
    /// Player-owned units take their orders from the host; the core only
    /// tracks them for counts and snapshots.
    Player,
}

impl Controller {
    pub fn kind(&self) -> ControllerKind {
        match self {
            Controller::Enemy(_) => ControllerKind::Enemy,
            Controller::Courier(_) => ControllerKind::Courier,
            Controller::Player => ControllerKind::Player,
        }
    }
}

/// Enemy AI controller state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyController {
    /// Tick of the next scheduled retarget check. Seeded with a random
    /// offset at spawn so units do not retarget in lockstep.
    pub next_retarget_tick: u64,
    /// Unit id of the current target, if any.
    pub target: Option<u32>,
}

/// Cargo courier controller state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourierController {
    pub phase: CourierPhase,
}

/// A repeating boss behavior with its own cooldown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ability {
    pub kind: AbilityKind,
    pub cooldown_ticks: u32,
    pub remaining_ticks: u32,
}

/// What an ability does when its cooldown elapses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Spawn a fixed group of minions at a fixed offset from the boss.
    GroupSpawn {
        archetype: UnitArchetype,
        count: u32,
        offset: (f32, f32),
    },
    /// Start a telegraphed cast at a random defender position.
    Cast {
        pulses: u32,
        delay_ticks: u32,
        payload: CastPayload,
    },
}

/// The boss entity's ability loadout. Dies with the boss.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbilitySet {
    pub abilities: Vec<Ability>,
}

/// An independent timed sequence ending in one effect at a fixed world
/// location. Not owned by any entity: it outlives the boss that started it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossCast {
    pub target: Position,
    pub pulses_remaining: u32,
    /// Ticks from start until the payload fires.
    pub delay_ticks: u32,
    pub elapsed_ticks: u32,
    pub payload: CastPayload,
}

/// Effect executed when a cast's delay elapses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CastPayload {
    /// Impact effect, then spawn the boss at the target.
    SpawnBoss,
    /// Spawn offensive projectile entities.
    Volley(VolleyKind),
    /// Direct area damage to defending-faction units.
    AreaBlast { radius: f32, damage: f32 },
}

/// Projectile volley patterns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum VolleyKind {
    /// Even ring of projectiles radiating from the target.
    Ring { projectiles: u32, speed: f32 },
    /// Column of projectiles marching north across the target.
    Line { projectiles: u32, speed: f32 },
}
