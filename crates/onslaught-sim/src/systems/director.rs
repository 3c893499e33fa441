//! Wave director — the top-level session state machine.
//!
//! Runs once per director interval (1 Hz). Owns all wave/session state in
//! one `WaveState` value: wave counter, monotonic scaling factor, phase,
//! the wave-active flag, and the next-wave deadline. The wave-active flag
//! guards the win/lose checks so the initial empty-world ticks can never
//! fire a spurious transition.

use std::collections::BTreeMap;

use hecs::World;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use onslaught_core::config::ArenaTables;
use onslaught_core::constants::*;
use onslaught_core::economy::{PlayerAccount, PlayerId};
use onslaught_core::enums::{Faction, GamePhase};
use onslaught_core::events::GameEvent;

use crate::systems::{boss, casts::CastQueue, composer, reinforcement};

/// Session state owned by the director. Mutated only on phase transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveState {
    pub wave_number: u32,
    /// Monotonic difficulty multiplier; grows every wave, never resets
    /// within a session.
    pub scaling_factor: f32,
    pub phase: GamePhase,
    /// Set when a wave launches, cleared when it resolves. Guards the
    /// win/lose checks.
    pub wave_active: bool,
    /// Tick deadline for the next wave launch, if one is scheduled.
    pub next_wave_at: Option<u64>,
    /// First-wave staging: the countdown is announced exactly once.
    pub first_wave_announced: bool,
}

impl Default for WaveState {
    fn default() -> Self {
        Self {
            wave_number: 0,
            scaling_factor: 1.0,
            phase: GamePhase::Setup,
            wave_active: false,
            next_wave_at: None,
            first_wave_announced: false,
        }
    }
}

/// One director pass.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    wave: &mut WaveState,
    casts: &mut CastQueue,
    accounts: &mut BTreeMap<PlayerId, PlayerAccount>,
    tables: &ArenaTables,
    events: &mut Vec<GameEvent>,
    next_unit_id: &mut u32,
    current_tick: u64,
    world_width: f32,
    world_height: f32,
) {
    if wave.phase.is_terminal() || accounts.is_empty() {
        return;
    }

    // First-wave staging: announce and schedule once, when players exist.
    if !wave.first_wave_announced {
        wave.first_wave_announced = true;
        wave.next_wave_at =
            Some(current_tick + FIRST_WAVE_DELAY_SECS as u64 * TICK_RATE as u64);
        events.push(GameEvent::FirstWaveScheduled {
            delay_secs: FIRST_WAVE_DELAY_SECS,
        });
    }

    // Scheduled launch.
    if let Some(at) = wave.next_wave_at {
        if current_tick >= at {
            wave.next_wave_at = None;
            start_wave(
                world,
                rng,
                wave,
                casts,
                tables,
                events,
                next_unit_id,
                accounts.len() as u32,
                current_tick,
                world_width,
                world_height,
            );
        }
    }

    let defenders = count_faction(world, Faction::Defender);
    let invaders = count_faction(world, Faction::Invader);

    // Defeat takes priority over a simultaneous wave clear.
    if defenders == 0 && wave.wave_active {
        wave.wave_active = false;
        wave.phase = GamePhase::Defeat;
        casts.clear();
        events.push(GameEvent::GameOver { victory: false });
        return;
    }

    // Wave clear. A pending boss telegraph keeps the wave alive: the
    // invader count is legitimately zero until the spawn payload fires.
    if invaders == 0 && wave.wave_active && !casts.has_pending_spawn() {
        wave.wave_active = false;
        casts.clear();

        if wave.wave_number >= VICTORY_WAVE {
            wave.phase = GamePhase::Victory;
            events.push(GameEvent::GameOver { victory: true });
            return;
        }

        wave.phase = GamePhase::Intermission;
        let mut delay_secs = WAVE_DELAY_SECS + PER_WAVE_EXTRA_DELAY_SECS * wave.wave_number;
        if wave.wave_number >= HELP_MIN_WAVE && wave.wave_number % HELP_SPACING == 0 {
            reinforcement::dispatch(
                world,
                rng,
                wave.wave_number,
                tables,
                next_unit_id,
                events,
                world_width,
                world_height,
            );
            delay_secs += HELP_EXTRA_DELAY_SECS;
        }

        for account in accounts.values_mut() {
            account.money += WAVE_INCOME_BASE + WAVE_INCOME_PER_WAVE * wave.wave_number;
        }

        events.push(GameEvent::NextWaveScheduled { delay_secs });
        wave.next_wave_at = Some(current_tick + delay_secs as u64 * TICK_RATE as u64);
    }

    // HUD balance push.
    for account in accounts.values() {
        events.push(GameEvent::HudMoney {
            player_id: account.player_id.clone(),
            money: account.money,
        });
    }
}

/// Launch the next wave: bump the counter and scaling, then either hand
/// the budget to the composer or begin a boss encounter.
#[allow(clippy::too_many_arguments)]
fn start_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    wave: &mut WaveState,
    casts: &mut CastQueue,
    tables: &ArenaTables,
    events: &mut Vec<GameEvent>,
    next_unit_id: &mut u32,
    live_players: u32,
    current_tick: u64,
    world_width: f32,
    world_height: f32,
) {
    wave.wave_active = true;
    wave.wave_number += 1;
    wave.scaling_factor += wave.wave_number as f32 / STAT_DIVISOR;

    if wave.wave_number % BOSS_WAVE_PERIOD == 0 {
        // During the boss battle no composed enemies spawn.
        wave.phase = GamePhase::BossWave;
        events.push(GameEvent::WaveStarted {
            wave_number: wave.wave_number,
            boss: true,
        });
        boss::begin_encounter(casts, events, world_width, world_height);
    } else {
        wave.phase = GamePhase::NormalWave;
        events.push(GameEvent::WaveStarted {
            wave_number: wave.wave_number,
            boss: false,
        });
        let budget = ENEMIES_BASE
            .powf(1.0 + wave.wave_number as f32 * ENEMIES_RAMP)
            .floor() as u32
            * live_players;
        composer::run_wave(
            world,
            rng,
            tables,
            budget,
            wave.scaling_factor,
            next_unit_id,
            current_tick,
            world_width,
            world_height,
        );
    }
}

/// Live unit count for a faction. Projectiles carry a faction too but are
/// not units; only entities with a `UnitId` count.
pub fn count_faction(world: &World, faction: Faction) -> u32 {
    world
        .query::<(&onslaught_core::components::UnitId, &Faction)>()
        .iter()
        .filter(|(_, (_, f))| **f == faction)
        .count() as u32
}
