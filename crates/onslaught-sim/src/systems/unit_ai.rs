//! Unit AI driver — bridges the live world to the pure decision logic.
//!
//! Collects context per controlled unit, evaluates the matching controller
//! variant, and applies the results in a second pass (buffered to keep
//! hecs borrows disjoint). Player-controlled units are skipped: the host
//! drives those.

use hecs::{Entity, World};

use onslaught_core::components::*;
use onslaught_core::enums::{CourierPhase, Faction};
use onslaught_core::events::GameEvent;
use onslaught_core::types::{Position, Velocity};

use onslaught_ai::courier::{self, CourierContext, CourierMove};
use onslaught_ai::enemy::{self, EnemyContext, MoveOrder, TargetInfo};

use crate::nav;

struct Candidate {
    unit_id: u32,
    position: Position,
    flying: bool,
    faction: Faction,
}

enum Update {
    Enemy {
        entity: Entity,
        target: Option<u32>,
        next_retarget: Option<u64>,
        fire: bool,
        aim: Option<Position>,
        velocity: Velocity,
        heading: Option<f32>,
    },
    Courier {
        entity: Entity,
        new_phase: Option<CourierPhase>,
        velocity: Velocity,
        unload_at: Option<Position>,
    },
}

/// Run every controller once.
pub fn run(
    world: &mut World,
    current_tick: u64,
    world_width: f32,
    world_height: f32,
    events: &mut Vec<GameEvent>,
) {
    let objective = nav::objective(world_width, world_height);

    // Snapshot of every live unit, used for target resolution.
    let candidates: Vec<Candidate> = world
        .query::<(&UnitId, &Position, &Mobility, &Faction)>()
        .iter()
        .map(|(_, (id, pos, mob, faction))| Candidate {
            unit_id: id.0,
            position: *pos,
            flying: mob.flying,
            faction: *faction,
        })
        .collect();

    let mut updates: Vec<Update> = Vec::new();

    // Enemy pass.
    for (entity, (pos, mob, weapon, ctrl)) in world
        .query::<(&Position, &Mobility, &Weapon, &Controller)>()
        .iter()
    {
        let Controller::Enemy(state) = ctrl else {
            continue;
        };

        let engageable = |c: &&Candidate| {
            c.faction != Faction::Invader
                && enemy::can_engage(weapon.targets_ground, weapon.targets_air, c.flying)
        };

        // Re-resolve the held target against the live world.
        let current = state.target.and_then(|tid| {
            candidates
                .iter()
                .filter(|c| engageable(c))
                .find(|c| c.unit_id == tid)
        });

        let mut chosen = current;
        let mut next_retarget = None;
        if enemy::wants_retarget(current_tick, state.next_retarget_tick, current.is_some()) {
            next_retarget = Some(enemy::next_retarget_after(current_tick));
            let radius = enemy::search_radius(weapon.range);
            chosen = candidates
                .iter()
                .filter(|c| engageable(c))
                .filter(|c| pos.within(&c.position, radius))
                .min_by(|a, b| {
                    pos.distance_to(&a.position)
                        .partial_cmp(&pos.distance_to(&b.position))
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
        }

        let target = chosen.map(|c| TargetInfo {
            unit_id: c.unit_id,
            position: c.position,
            flying: c.flying,
        });

        let decision = enemy::evaluate(&EnemyContext {
            position: *pos,
            weapon_range: weapon.range,
            target,
            dist_to_core: pos.distance_to(&objective),
        });

        let dir = match decision.movement {
            MoveOrder::Pursue(dir) => dir,
            MoveOrder::FlowField => nav::flow_step(*pos, objective),
        };
        let velocity = Velocity::new(dir.x * mob.speed, dir.y * mob.speed);

        let heading = decision
            .face
            .map(|p| pos.heading_to(&p))
            .or_else(|| (velocity.speed() > 0.0).then(|| velocity.heading()));

        updates.push(Update::Enemy {
            entity,
            target: chosen.map(|c| c.unit_id),
            next_retarget,
            fire: decision.fire,
            aim: decision.aim,
            velocity,
            heading,
        });
    }

    // Courier pass.
    for (entity, (pos, mob, ctrl, hold)) in world
        .query::<(&Position, &Mobility, &Controller, &CargoHold)>()
        .iter()
    {
        let Controller::Courier(state) = ctrl else {
            continue;
        };

        let decision = courier::evaluate(&CourierContext {
            phase: state.phase,
            dist_to_objective: pos.distance_to(&objective),
            cargo_remaining: hold.payloads.len() as u32,
        });

        let velocity = match decision.movement {
            CourierMove::Inbound => {
                let dir = nav::flow_step(*pos, objective);
                Velocity::new(dir.x * mob.speed, dir.y * mob.speed)
            }
            CourierMove::Hold => Velocity::default(),
            // Couriers enter from the west edge and leave the way they came.
            CourierMove::Outbound => Velocity::new(-mob.speed, 0.0),
        };

        updates.push(Update::Courier {
            entity,
            new_phase: decision.phase_changed.then_some(decision.new_phase),
            velocity,
            unload_at: decision.unload_one.then_some(*pos),
        });
    }

    // Apply pass.
    for update in updates {
        match update {
            Update::Enemy {
                entity,
                target,
                next_retarget,
                fire,
                aim,
                velocity,
                heading,
            } => {
                if let Ok(mut ctrl) = world.get::<&mut Controller>(entity) {
                    if let Controller::Enemy(state) = &mut *ctrl {
                        state.target = target;
                        if let Some(next) = next_retarget {
                            state.next_retarget_tick = next;
                        }
                    }
                }
                if let Ok(mut weapon) = world.get::<&mut Weapon>(entity) {
                    weapon.firing = fire;
                    weapon.aim = aim;
                }
                if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
                    *vel = velocity;
                }
                if let Some(h) = heading {
                    if let Ok(mut facing) = world.get::<&mut Facing>(entity) {
                        facing.heading = h;
                    }
                }
            }
            Update::Courier {
                entity,
                new_phase,
                velocity,
                unload_at,
            } => {
                if let Some(phase) = new_phase {
                    if let Ok(mut ctrl) = world.get::<&mut Controller>(entity) {
                        if let Controller::Courier(state) = &mut *ctrl {
                            state.phase = phase;
                        }
                    }
                }
                if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
                    *vel = velocity;
                }
                if let Some(at) = unload_at {
                    if let Ok(mut hold) = world.get::<&mut CargoHold>(entity) {
                        if let Some(block) = hold.payloads.pop() {
                            events.push(GameEvent::CargoDelivered {
                                position: at,
                                block,
                            });
                        }
                    }
                }
            }
        }
    }
}
