//! Aid courier controller logic.
//!
//! The degenerate "deliver cargo" controller: fly in on the flow field,
//! drop one payload per step at the objective, then leave the map.

use onslaught_core::constants::COURIER_UNLOAD_RADIUS;
use onslaught_core::enums::CourierPhase;

/// Input for one courier decision.
#[derive(Debug, Clone, Copy)]
pub struct CourierContext {
    pub phase: CourierPhase,
    pub dist_to_objective: f32,
    pub cargo_remaining: u32,
}

/// How the courier should move this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourierMove {
    /// Ride the flow field toward the objective.
    Inbound,
    /// Hover over the drop point.
    Hold,
    /// Head back against the flow field; cleanup despawns at the boundary.
    Outbound,
}

/// Output of one courier decision.
#[derive(Debug, Clone, Copy)]
pub struct CourierDecision {
    pub new_phase: CourierPhase,
    pub phase_changed: bool,
    pub movement: CourierMove,
    /// Drop one payload this step.
    pub unload_one: bool,
}

/// Evaluate one courier decision.
pub fn evaluate(ctx: &CourierContext) -> CourierDecision {
    match ctx.phase {
        CourierPhase::Inbound => {
            if ctx.dist_to_objective <= COURIER_UNLOAD_RADIUS {
                CourierDecision {
                    new_phase: CourierPhase::Unloading,
                    phase_changed: true,
                    movement: CourierMove::Hold,
                    unload_one: false,
                }
            } else {
                CourierDecision {
                    new_phase: CourierPhase::Inbound,
                    phase_changed: false,
                    movement: CourierMove::Inbound,
                    unload_one: false,
                }
            }
        }
        CourierPhase::Unloading => {
            if ctx.cargo_remaining == 0 {
                CourierDecision {
                    new_phase: CourierPhase::Departing,
                    phase_changed: true,
                    movement: CourierMove::Outbound,
                    unload_one: false,
                }
            } else {
                CourierDecision {
                    new_phase: CourierPhase::Unloading,
                    phase_changed: false,
                    movement: CourierMove::Hold,
                    unload_one: true,
                }
            }
        }
        CourierPhase::Departing => CourierDecision {
            new_phase: CourierPhase::Departing,
            phase_changed: false,
            movement: CourierMove::Outbound,
            unload_one: false,
        },
    }
}
