//! Velocity integration, clamped to world bounds.

use hecs::World;

use onslaught_core::constants::DT;
use onslaught_core::types::{Position, Velocity};

/// Integrate every moving entity by one tick.
pub fn run(world: &mut World, world_width: f32, world_height: f32) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.x = (pos.x + vel.x * DT).clamp(0.0, world_width);
        pos.y = (pos.y + vel.y * DT).clamp(0.0, world_height);
    }
}
