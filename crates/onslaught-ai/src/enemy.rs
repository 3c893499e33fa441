//! Enemy unit controller logic.
//!
//! Every live enemy runs this once per simulation step: retarget on its
//! own cadence, gate the weapon on proximity, and pick a movement mode.
//! Near the arena core the unit chases its target directly; at range it
//! rides the flow field toward the defenders' objective.

use glam::Vec2;

use onslaught_core::constants::{
    CORE_CHASE_RADIUS, FIRE_RANGE_FACTOR, RETARGET_INTERVAL_TICKS, SEARCH_RANGE_FACTOR,
};
use onslaught_core::types::Position;

/// A candidate or current target as seen by one enemy.
#[derive(Debug, Clone, Copy)]
pub struct TargetInfo {
    pub unit_id: u32,
    pub position: Position,
    pub flying: bool,
}

/// Input for one enemy decision.
#[derive(Debug, Clone, Copy)]
pub struct EnemyContext {
    pub position: Position,
    pub weapon_range: f32,
    /// Current target, already re-resolved against the live world; `None`
    /// when the unit has no valid target this step.
    pub target: Option<TargetInfo>,
    /// Distance from the arena's strategic centre.
    pub dist_to_core: f32,
}

/// How the unit should move this step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOrder {
    /// Direct pursuit step (normalized direction).
    Pursue(Vec2),
    /// Follow the flow field toward the defenders' objective.
    FlowField,
}

/// Output of one enemy decision.
#[derive(Debug, Clone, Copy)]
pub struct EnemyDecision {
    /// Weapon fire gate; open only inside the fire range factor.
    pub fire: bool,
    /// Aim point when the gate is open.
    pub aim: Option<Position>,
    pub movement: MoveOrder,
    /// Point to face, regardless of movement mode.
    pub face: Option<Position>,
}

/// Whether a retarget check is due: the per-unit cadence elapsed, or the
/// current target is gone. Cadences are seeded with a random offset at
/// spawn so the herd never retargets in lockstep.
pub fn wants_retarget(current_tick: u64, next_retarget_tick: u64, target_valid: bool) -> bool {
    current_tick >= next_retarget_tick || !target_valid
}

/// Tick of the next retarget check after one fires.
pub fn next_retarget_after(current_tick: u64) -> u64 {
    current_tick + RETARGET_INTERVAL_TICKS
}

/// Radius inside which retargeting considers candidates.
pub fn search_radius(weapon_range: f32) -> f32 {
    weapon_range * SEARCH_RANGE_FACTOR
}

/// Whether a weapon with the given capabilities can engage a candidate.
pub fn can_engage(targets_ground: bool, targets_air: bool, candidate_flying: bool) -> bool {
    if candidate_flying {
        targets_air
    } else {
        targets_ground
    }
}

/// Evaluate one enemy decision.
pub fn evaluate(ctx: &EnemyContext) -> EnemyDecision {
    let in_fire_range = ctx.target.map_or(false, |t| {
        ctx.position
            .within(&t.position, ctx.weapon_range * FIRE_RANGE_FACTOR)
    });

    let (fire, aim) = if in_fire_range {
        (true, ctx.target.map(|t| t.position))
    } else {
        (false, None)
    };

    // Chase directly only when close to the core AND holding a target;
    // otherwise mass-route on the flow field.
    let movement = match ctx.target {
        Some(t) if ctx.dist_to_core < CORE_CHASE_RADIUS => {
            MoveOrder::Pursue(direction(ctx.position, t.position))
        }
        _ => MoveOrder::FlowField,
    };

    EnemyDecision {
        fire,
        aim,
        movement,
        face: ctx.target.map(|t| t.position),
    }
}

/// Normalized direction from one position toward another.
pub fn direction(from: Position, to: Position) -> Vec2 {
    (Vec2::new(to.x, to.y) - Vec2::new(from.x, from.y)).normalize_or_zero()
}
