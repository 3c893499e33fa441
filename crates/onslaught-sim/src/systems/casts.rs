//! Cast queue — the single home for every fire-and-forget boss timeline.
//!
//! Each `BossCast` is an independent record advanced once per tick: while
//! telegraph pulses remain, one fires per tick at the fixed target; when the
//! elapsed count reaches the cast's delay, the payload executes exactly once
//! and the cast is removed. Payloads run after the pass, so a payload may
//! start new casts without disturbing the iteration. Bulk `clear` cancels
//! all pending payloads without executing them.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use onslaught_core::components::{BossCast, CastPayload};
use onslaught_core::events::GameEvent;

use crate::systems::boss;

/// Shared context for payload execution.
pub struct CastCtx<'a> {
    pub rng: &'a mut ChaCha8Rng,
    pub events: &'a mut Vec<GameEvent>,
    pub next_unit_id: &'a mut u32,
    pub scaling_factor: f32,
    pub live_players: u32,
    pub current_tick: u64,
    pub world_width: f32,
    pub world_height: f32,
}

/// Collection of live cast timelines.
#[derive(Default)]
pub struct CastQueue {
    casts: Vec<BossCast>,
}

impl CastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new cast. Callable from any ability at any time.
    pub fn start(&mut self, cast: BossCast) {
        self.casts.push(cast);
    }

    /// Cancel every pending cast without executing payloads.
    pub fn clear(&mut self) {
        self.casts.clear();
    }

    pub fn len(&self) -> usize {
        self.casts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.casts.is_empty()
    }

    /// Whether a boss spawn is still in telegraph. The director holds the
    /// wave-clear check while this is true, otherwise an empty invader
    /// count during the telegraph would end the boss wave before the boss
    /// arrives.
    pub fn has_pending_spawn(&self) -> bool {
        self.casts
            .iter()
            .any(|c| matches!(c.payload, CastPayload::SpawnBoss))
    }

    /// Advance every cast by one tick.
    pub fn advance(&mut self, world: &mut World, ctx: &mut CastCtx) {
        let mut ready: Vec<BossCast> = Vec::new();

        let mut i = 0;
        while i < self.casts.len() {
            let cast = &mut self.casts[i];
            if cast.pulses_remaining > 0 {
                ctx.events.push(GameEvent::TelegraphPulse {
                    position: cast.target,
                });
                cast.pulses_remaining -= 1;
            }
            cast.elapsed_ticks += 1;
            if cast.elapsed_ticks >= cast.delay_ticks {
                ready.push(self.casts.swap_remove(i));
            } else {
                i += 1;
            }
        }

        for cast in ready {
            execute_payload(world, ctx, &cast);
        }
    }
}

fn execute_payload(world: &mut World, ctx: &mut CastCtx, cast: &BossCast) {
    match &cast.payload {
        CastPayload::SpawnBoss => {
            ctx.events.push(GameEvent::ImpactEffect {
                position: cast.target,
            });
            boss::spawn_boss(world, ctx, cast.target);
        }
        CastPayload::Volley(kind) => {
            boss::spawn_volley(world, ctx, cast.target, *kind);
        }
        CastPayload::AreaBlast { radius, damage } => {
            ctx.events.push(GameEvent::BlastEffect {
                position: cast.target,
                radius: *radius,
            });
            boss::apply_blast(world, cast.target, *radius, *damage);
        }
    }
}
