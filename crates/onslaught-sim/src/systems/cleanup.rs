//! Despawn of dead units, expired projectiles, and departed couriers.

use hecs::{Entity, World};

use onslaught_core::components::{Controller, Health, Projectile, UnitId};
use onslaught_core::constants::SPAWN_EDGE_MARGIN;
use onslaught_core::enums::CourierPhase;
use onslaught_core::events::GameEvent;
use onslaught_core::types::Position;

/// Run one cleanup pass.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, events: &mut Vec<GameEvent>) {
    despawn_buffer.clear();

    // Dead units.
    for (entity, (id, health)) in world.query::<(&UnitId, &Health)>().iter() {
        if health.hp <= 0.0 {
            events.push(GameEvent::UnitDestroyed { unit_id: id.0 });
            despawn_buffer.push(entity);
        }
    }

    // Expired projectiles.
    for (entity, projectile) in world.query_mut::<&mut Projectile>() {
        if projectile.ttl_ticks == 0 {
            despawn_buffer.push(entity);
        } else {
            projectile.ttl_ticks -= 1;
        }
    }

    // Couriers that finished delivering and reached the boundary.
    for (entity, (pos, ctrl)) in world.query::<(&Position, &Controller)>().iter() {
        if let Controller::Courier(state) = ctrl {
            if state.phase == CourierPhase::Departing && pos.x <= SPAWN_EDGE_MARGIN {
                despawn_buffer.push(entity);
            }
        }
    }

    for entity in despawn_buffer.drain(..) {
        // Already-despawned duplicates are harmless.
        let _ = world.despawn(entity);
    }
}
