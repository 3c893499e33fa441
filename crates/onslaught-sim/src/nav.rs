//! Step vectors toward the defenders' strategic objective.
//!
//! The host engine owns the real flow field; this module is the degenerate
//! stand-in the core routes with — a straight normalized step toward the
//! objective at the arena centre.

use glam::Vec2;

use onslaught_core::types::Position;

/// The defenders' strategic objective: the arena centre.
pub fn objective(world_width: f32, world_height: f32) -> Position {
    Position::new(world_width / 2.0, world_height / 2.0)
}

/// One flow-field step from `from` toward the objective.
pub fn flow_step(from: Position, objective: Position) -> Vec2 {
    (Vec2::new(objective.x, objective.y) - Vec2::new(from.x, from.y)).normalize_or_zero()
}
