//! Tests for the arena engine: wave direction, composition, boss
//! choreography, unit AI driving, reinforcements and the economy.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use onslaught_core::commands::ArenaCommand;
use onslaught_core::components::*;
use onslaught_core::config::ArenaTables;
use onslaught_core::constants::*;
use onslaught_core::economy::PurchaseError;
use onslaught_core::enums::*;
use onslaught_core::events::GameEvent;
use onslaught_core::types::{Position, Velocity};

use crate::engine::{ArenaConfig, ArenaEngine};
use crate::systems::casts::{CastCtx, CastQueue};
use crate::systems::director::count_faction;
use crate::systems::{boss, cleanup, composer, economy, reinforcement, unit_ai};

// ---- Helpers ----

fn engine_with_players(count: usize) -> ArenaEngine {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    for i in 0..count {
        engine.queue_command(ArenaCommand::PlayerJoin {
            player_id: format!("player-{i}"),
        });
    }
    engine.queue_command(ArenaCommand::WorldReady);
    engine.tick();
    engine
}

/// Run `n` ticks, collecting every emitted event.
fn run_collect(engine: &mut ArenaEngine, n: usize) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..n {
        events.extend(engine.tick().events);
    }
    events
}

/// Make the next wave due immediately and tick until it launches.
fn force_next_wave(engine: &mut ArenaEngine) -> Vec<GameEvent> {
    engine.wave_mut().first_wave_announced = true;
    engine.wave_mut().next_wave_at = Some(0);
    let mut events = Vec::new();
    for _ in 0..=DIRECTOR_INTERVAL_TICKS {
        events.extend(engine.tick().events);
        if engine.wave().wave_active {
            break;
        }
    }
    events
}

fn invader_count(engine: &ArenaEngine) -> u32 {
    count_faction(engine.world(), Faction::Invader)
}

// ---- Wave direction ----

#[test]
fn test_first_wave_scheduled_then_launched() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    engine.queue_command(ArenaCommand::PlayerJoin {
        player_id: "p1".into(),
    });
    engine.queue_command(ArenaCommand::WorldReady);

    let snap = engine.tick();
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::FirstWaveScheduled { .. })));
    assert_eq!(engine.phase(), GamePhase::Setup);

    // The first wave launches at the scheduled deadline.
    let events = run_collect(
        &mut engine,
        (FIRST_WAVE_DELAY_SECS as usize + 2) * TICK_RATE as usize,
    );
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::WaveStarted {
            wave_number: 1,
            boss: false
        }
    )));
    assert_eq!(engine.phase(), GamePhase::NormalWave);
    assert_eq!(engine.wave().wave_number, 1);
    assert!(engine.wave().wave_active);
    assert!(invader_count(&engine) > 0);
}

#[test]
fn test_no_wave_without_players() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    engine.queue_command(ArenaCommand::WorldReady);
    let events = run_collect(&mut engine, 30);
    assert!(events.is_empty());
    assert!(!engine.wave().first_wave_announced);
}

#[test]
fn test_scaling_monotonic_across_waves() {
    let mut engine = engine_with_players(1);
    let mut previous = engine.wave().scaling_factor;
    assert_eq!(previous, 1.0);

    for expected_wave in 1..=5u32 {
        force_next_wave(&mut engine);
        assert_eq!(engine.wave().wave_number, expected_wave);
        let scaling = engine.wave().scaling_factor;
        assert!(scaling >= previous, "scaling must never decrease");
        previous = scaling;

        engine.kill_faction(Faction::Invader);
        run_collect(&mut engine, DIRECTOR_INTERVAL_TICKS as usize + 1);
        assert!(!engine.wave().wave_active);
    }

    // 1 + sum(1..=5) / divisor
    let expected = 1.0 + (1 + 2 + 3 + 4 + 5) as f32 / STAT_DIVISOR;
    assert!((previous - expected).abs() < 1e-4);
}

#[test]
fn test_wave_5_is_normal_and_never_triggers_boss() {
    let mut engine = engine_with_players(3);
    engine.wave_mut().wave_number = 4;
    force_next_wave(&mut engine);

    assert_eq!(engine.wave().wave_number, 5);
    assert_eq!(engine.phase(), GamePhase::NormalWave);
    assert!(engine.casts().is_empty());
    assert!(invader_count(&engine) > 0);

    let bosses = engine.world().query::<&BossMarker>().iter().count();
    assert_eq!(bosses, 0, "no boss on a non-boss wave");
}

#[test]
fn test_wave_10_is_boss_and_skips_composer() {
    let mut engine = engine_with_players(2);
    engine.wave_mut().wave_number = 9;
    force_next_wave(&mut engine);

    assert_eq!(engine.wave().wave_number, 10);
    assert_eq!(engine.phase(), GamePhase::BossWave);
    // Composer never ran: the only pending invader is the telegraphed boss.
    assert_eq!(invader_count(&engine), 0);
    assert_eq!(engine.casts().len(), 1);
    assert!(engine.casts().has_pending_spawn());

    // Telegraph resolves into exactly one boss.
    run_collect(&mut engine, BOSS_TELEGRAPH_DELAY_TICKS as usize + 2);
    assert_eq!(invader_count(&engine), 1);
    let bosses = engine.world().query::<&BossMarker>().iter().count();
    assert_eq!(bosses, 1);
}

#[test]
fn test_boss_telegraph_does_not_end_the_wave() {
    let mut engine = engine_with_players(1);
    engine.wave_mut().wave_number = 9;
    force_next_wave(&mut engine);

    // During the telegraph the invader count is zero, but the wave must
    // stay live until the spawn payload fires.
    run_collect(&mut engine, DIRECTOR_INTERVAL_TICKS as usize + 1);
    assert_eq!(engine.phase(), GamePhase::BossWave);
    assert!(engine.wave().wave_active);
}

#[test]
fn test_boss_stats_scale_exactly() {
    let mut engine = engine_with_players(2);
    engine.wave_mut().wave_number = 9;
    force_next_wave(&mut engine);

    // Pin the scaling factor before the spawn payload executes.
    engine.wave_mut().scaling_factor = 3.0;
    run_collect(&mut engine, BOSS_TELEGRAPH_DELAY_TICKS as usize + 2);

    let mut query = engine.world().query::<(&Armor, &DamageMultiplier)>();
    let mut iter = query.iter();
    let (_, (armor, damage)) = iter.next().expect("boss should be live");
    assert_eq!(armor.value, 3.0 * 2.0 * BOSS_ARMOR_CONST);
    assert_eq!(damage.value, 3.0 * BOSS_DAMAGE_CONST);
    assert!(iter.next().is_none());
}

#[test]
fn test_defender_wipe_mid_wave_is_defeat_not_intermission() {
    let mut engine = engine_with_players(1);
    force_next_wave(&mut engine);
    assert!(engine.wave().wave_active);

    engine.kill_faction(Faction::Defender);
    let events = run_collect(&mut engine, DIRECTOR_INTERVAL_TICKS as usize + 1);

    assert_eq!(engine.phase(), GamePhase::Defeat);
    assert!(engine.casts().is_empty());
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::GameOver { victory: false })));
}

#[test]
fn test_clearing_past_victory_wave_wins() {
    let mut engine = engine_with_players(1);
    {
        let wave = engine.wave_mut();
        wave.wave_number = VICTORY_WAVE;
        wave.wave_active = true;
        wave.phase = GamePhase::NormalWave;
        wave.first_wave_announced = true;
    }

    let events = run_collect(&mut engine, DIRECTOR_INTERVAL_TICKS as usize + 1);
    assert_eq!(engine.phase(), GamePhase::Victory);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::GameOver { victory: true })));
}

#[test]
fn test_intermission_delay_and_income() {
    let mut engine = engine_with_players(1);
    force_next_wave(&mut engine);
    let money_before = engine.accounts()["player-0"].money;

    engine.kill_faction(Faction::Invader);
    let events = run_collect(&mut engine, DIRECTOR_INTERVAL_TICKS as usize + 1);

    assert_eq!(engine.phase(), GamePhase::Intermission);
    let expected_delay = WAVE_DELAY_SECS + PER_WAVE_EXTRA_DELAY_SECS;
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::NextWaveScheduled { delay_secs } if *delay_secs == expected_delay
    )));
    assert_eq!(
        engine.accounts()["player-0"].money,
        money_before + WAVE_INCOME_BASE + WAVE_INCOME_PER_WAVE
    );
    assert!(engine.wave().next_wave_at.is_some());
}

#[test]
fn test_help_wave_dispatches_couriers_and_extends_delay() {
    let mut engine = engine_with_players(1);
    {
        let wave = engine.wave_mut();
        wave.wave_number = HELP_MIN_WAVE;
        wave.wave_active = true;
        wave.phase = GamePhase::BossWave;
        wave.first_wave_announced = true;
    }

    let events = run_collect(&mut engine, DIRECTOR_INTERVAL_TICKS as usize + 1);
    assert_eq!(engine.phase(), GamePhase::Intermission);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::AidIncoming { couriers } if *couriers == HELP_MIN_WAVE
    )));
    assert_eq!(
        count_faction(engine.world(), Faction::Allied),
        HELP_MIN_WAVE
    );

    let expected_delay =
        WAVE_DELAY_SECS + PER_WAVE_EXTRA_DELAY_SECS * HELP_MIN_WAVE + HELP_EXTRA_DELAY_SECS;
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::NextWaveScheduled { delay_secs } if *delay_secs == expected_delay
    )));
}

#[test]
fn test_session_reset_clears_casts_and_accounts() {
    let mut engine = engine_with_players(2);
    engine.wave_mut().wave_number = 9;
    force_next_wave(&mut engine);
    assert!(!engine.casts().is_empty());
    if let Some(account) = engine.accounts_mut().get_mut("player-0") {
        account.money = 9_999;
    }

    engine.queue_command(ArenaCommand::WorldReady);
    engine.tick();

    assert!(engine.casts().is_empty());
    assert_eq!(engine.wave().wave_number, 0);
    assert_eq!(engine.wave().scaling_factor, 1.0);
    assert_eq!(engine.phase(), GamePhase::Setup);
    assert_eq!(engine.accounts()["player-0"].money, STARTING_MONEY);
    // One fresh starting unit per re-registered player.
    assert_eq!(count_faction(engine.world(), Faction::Defender), 2);
    assert_eq!(invader_count(&engine), 0);
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = engine_with_players(2);
    let mut engine_b = engine_with_players(2);

    for _ in 0..300 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged with same seed");
    }
}

// ---- Composition ----

#[test]
fn test_composer_shrinking_pool_order() {
    let tables = ArenaTables::default();
    let orders = composer::compose(100, &tables.enemy_weights);
    // 100/2=50 leaves 50; 50/4=12 leaves 38; 38/8=4 leaves 34; 34/16=2.
    assert_eq!(
        orders,
        vec![
            (UnitArchetype::Skitter, 50),
            (UnitArchetype::Spitter, 12),
            (UnitArchetype::Mauler, 4),
            (UnitArchetype::Ravager, 2),
        ]
    );
}

#[test]
fn test_composer_never_exceeds_per_type_cap() {
    let tables = ArenaTables::default();
    let orders = composer::compose(1_000_000, &tables.enemy_weights);
    for (archetype, count) in orders {
        assert!(
            count <= MAX_UNITS_PER_TYPE,
            "{archetype:?} exceeded the per-type cap: {count}"
        );
    }
}

#[test]
fn test_spawned_enemies_get_scaled_health_and_controller() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut next_id = 0;

    let entity = composer::spawn_enemy_at(
        &mut world,
        &mut rng,
        UnitArchetype::Skitter,
        Position::new(100.0, 100.0),
        2.5,
        &mut next_id,
        0,
    );

    let health = world.get::<&Health>(entity).unwrap();
    let expected = 120.0 * 2.5 / SCALING_DAMPENER;
    assert_eq!(health.hp, expected);
    assert_eq!(health.max, expected);
    drop(health);

    let ctrl = world.get::<&Controller>(entity).unwrap();
    assert!(matches!(&*ctrl, Controller::Enemy(_)));
}

#[test]
fn test_boundary_sites_stay_inside_margins() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for &(w, h) in &[(800.0f32, 800.0f32), (500.0, 300.0), (100.0, 60.0)] {
        for _ in 0..1000 {
            let site = composer::boundary_site(&mut rng, w, h);
            assert!(
                site.x >= SPAWN_EDGE_MARGIN && site.x <= w - SPAWN_EDGE_MARGIN,
                "x out of bounds for {w}x{h}: {site:?}"
            );
            assert!(
                site.y >= SPAWN_EDGE_MARGIN && site.y <= h - SPAWN_EDGE_MARGIN,
                "y out of bounds for {w}x{h}: {site:?}"
            );
        }
    }
}

// ---- Cast queue ----

fn cast_ctx<'a>(
    rng: &'a mut ChaCha8Rng,
    events: &'a mut Vec<GameEvent>,
    next_unit_id: &'a mut u32,
) -> CastCtx<'a> {
    CastCtx {
        rng,
        events,
        next_unit_id,
        scaling_factor: 1.0,
        live_players: 1,
        current_tick: 0,
        world_width: WORLD_WIDTH,
        world_height: WORLD_HEIGHT,
    }
}

#[test]
fn test_cast_fires_payload_exactly_once_on_third_tick() {
    let mut world = World::new();
    let target = Position::new(200.0, 200.0);
    let victim = world.spawn((
        Faction::Defender,
        target,
        Health {
            hp: 1000.0,
            max: 1000.0,
        },
    ));

    let mut queue = CastQueue::new();
    queue.start(BossCast {
        target,
        pulses_remaining: 3,
        delay_ticks: 3,
        elapsed_ticks: 0,
        payload: CastPayload::AreaBlast {
            radius: 50.0,
            damage: 100.0,
        },
    });

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut events = Vec::new();
    let mut next_id = 0;

    for advance in 1..=2 {
        let mut ctx = cast_ctx(&mut rng, &mut events, &mut next_id);
        queue.advance(&mut world, &mut ctx);
        assert_eq!(queue.len(), 1, "cast still pending after advance {advance}");
        assert_eq!(world.get::<&Health>(victim).unwrap().hp, 1000.0);
    }

    let mut ctx = cast_ctx(&mut rng, &mut events, &mut next_id);
    queue.advance(&mut world, &mut ctx);
    assert!(queue.is_empty(), "cast removed after payload");
    assert_eq!(world.get::<&Health>(victim).unwrap().hp, 900.0);

    // A fourth advance must not re-execute.
    let mut ctx = cast_ctx(&mut rng, &mut events, &mut next_id);
    queue.advance(&mut world, &mut ctx);
    assert_eq!(world.get::<&Health>(victim).unwrap().hp, 900.0);

    let pulses = events
        .iter()
        .filter(|e| matches!(e, GameEvent::TelegraphPulse { .. }))
        .count();
    assert_eq!(pulses, 3, "one pulse per tick while the telegraph runs");
    let blasts = events
        .iter()
        .filter(|e| matches!(e, GameEvent::BlastEffect { .. }))
        .count();
    assert_eq!(blasts, 1);
}

#[test]
fn test_zero_pulse_cast_degenerates_to_immediate_payload() {
    let mut world = World::new();
    let target = Position::new(50.0, 50.0);
    let victim = world.spawn((
        Faction::Defender,
        target,
        Health {
            hp: 100.0,
            max: 100.0,
        },
    ));

    let mut queue = CastQueue::new();
    queue.start(BossCast {
        target,
        pulses_remaining: 0,
        delay_ticks: 0,
        elapsed_ticks: 0,
        payload: CastPayload::AreaBlast {
            radius: 10.0,
            damage: 25.0,
        },
    });

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut events = Vec::new();
    let mut next_id = 0;
    let mut ctx = cast_ctx(&mut rng, &mut events, &mut next_id);
    queue.advance(&mut world, &mut ctx);

    assert!(queue.is_empty());
    assert_eq!(world.get::<&Health>(victim).unwrap().hp, 75.0);
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::TelegraphPulse { .. })));
}

#[test]
fn test_clear_cancels_pending_payloads() {
    let mut world = World::new();
    let target = Position::new(50.0, 50.0);
    let victim = world.spawn((
        Faction::Defender,
        target,
        Health {
            hp: 100.0,
            max: 100.0,
        },
    ));

    let mut queue = CastQueue::new();
    queue.start(BossCast {
        target,
        pulses_remaining: 1,
        delay_ticks: 1,
        elapsed_ticks: 0,
        payload: CastPayload::AreaBlast {
            radius: 10.0,
            damage: 25.0,
        },
    });
    queue.clear();

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut events = Vec::new();
    let mut next_id = 0;
    let mut ctx = cast_ctx(&mut rng, &mut events, &mut next_id);
    queue.advance(&mut world, &mut ctx);

    assert_eq!(world.get::<&Health>(victim).unwrap().hp, 100.0);
    assert!(events.is_empty());
}

#[test]
fn test_blast_damages_only_defenders_in_radius() {
    let mut world = World::new();
    let at = Position::new(100.0, 100.0);
    let near_defender = world.spawn((
        Faction::Defender,
        Position::new(110.0, 100.0),
        Health {
            hp: 500.0,
            max: 500.0,
        },
    ));
    let far_defender = world.spawn((
        Faction::Defender,
        Position::new(400.0, 400.0),
        Health {
            hp: 500.0,
            max: 500.0,
        },
    ));
    let near_invader = world.spawn((
        Faction::Invader,
        Position::new(100.0, 110.0),
        Health {
            hp: 500.0,
            max: 500.0,
        },
    ));

    boss::apply_blast(&mut world, at, 96.0, 480.0);

    assert_eq!(world.get::<&Health>(near_defender).unwrap().hp, 20.0);
    assert_eq!(world.get::<&Health>(far_defender).unwrap().hp, 500.0);
    assert_eq!(world.get::<&Health>(near_invader).unwrap().hp, 500.0);
}

#[test]
fn test_volleys_spawn_invader_projectiles() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut events = Vec::new();
    let mut next_id = 0;
    let mut ctx = cast_ctx(&mut rng, &mut events, &mut next_id);

    boss::spawn_volley(
        &mut world,
        &mut ctx,
        Position::new(300.0, 300.0),
        VolleyKind::Ring {
            projectiles: 18,
            speed: 60.0,
        },
    );

    let mut count = 0;
    for (_, (projectile, faction, vel)) in world
        .query::<(&Projectile, &Faction, &Velocity)>()
        .iter()
    {
        count += 1;
        assert_eq!(*faction, Faction::Invader);
        assert_eq!(projectile.ttl_ticks, PROJECTILE_TTL_TICKS);
        assert!((vel.speed() - 60.0).abs() < 1e-3);
    }
    assert_eq!(count, 18);
}

#[test]
fn test_projectiles_expire() {
    let mut world = World::new();
    let entity = world.spawn((
        Position::new(0.0, 0.0),
        Velocity::default(),
        Faction::Invader,
        Projectile {
            ttl_ticks: 2,
            damage: 10.0,
        },
    ));

    let mut buffer = Vec::new();
    let mut events = Vec::new();
    for _ in 0..3 {
        cleanup::run(&mut world, &mut buffer, &mut events);
    }
    assert!(!world.contains(entity));
}

// ---- Unit AI driving ----

#[test]
fn test_enemy_near_core_aims_fires_and_pursues() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut next_id = 0;

    let objective = crate::nav::objective(WORLD_WIDTH, WORLD_HEIGHT);
    economy::spawn_defender(&mut world, &mut rng, UnitArchetype::Sentinel, "p1", objective, &mut next_id);
    let enemy = composer::spawn_enemy_at(
        &mut world,
        &mut rng,
        UnitArchetype::Spitter,
        Position::new(objective.x + 40.0, objective.y),
        1.0,
        &mut next_id,
        100, // retarget overdue, so the first pass acquires immediately
    );

    let mut events = Vec::new();
    unit_ai::run(&mut world, 100, WORLD_WIDTH, WORLD_HEIGHT, &mut events);

    let weapon = world.get::<&Weapon>(enemy).unwrap();
    assert!(weapon.firing, "defender is well inside the fire gate");
    assert!(weapon.aim.is_some());
    drop(weapon);

    let vel = world.get::<&Velocity>(enemy).unwrap();
    assert!(vel.speed() > 0.0, "pursuit keeps the unit moving");
}

#[test]
fn test_enemy_without_target_rides_the_flow_field() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut next_id = 0;

    let enemy = composer::spawn_enemy_at(
        &mut world,
        &mut rng,
        UnitArchetype::Skitter,
        Position::new(SPAWN_EDGE_MARGIN, WORLD_HEIGHT / 2.0),
        1.0,
        &mut next_id,
        100,
    );

    let mut events = Vec::new();
    unit_ai::run(&mut world, 100, WORLD_WIDTH, WORLD_HEIGHT, &mut events);

    let weapon = world.get::<&Weapon>(enemy).unwrap();
    assert!(!weapon.firing);
    assert!(weapon.aim.is_none());
    drop(weapon);

    // Flow-field step: straight toward the objective (east of the spawn).
    let vel = world.get::<&Velocity>(enemy).unwrap();
    assert!(vel.x > 0.0);
    assert!(vel.y.abs() < 1e-3);
}

#[test]
fn test_ground_only_enemy_ignores_flyers() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut next_id = 0;

    // A flying courier right next to a ground-only Skitter.
    let skitter_pos = Position::new(400.0, 400.0);
    let enemy = composer::spawn_enemy_at(
        &mut world,
        &mut rng,
        UnitArchetype::Skitter,
        skitter_pos,
        1.0,
        &mut next_id,
        100,
    );
    world.spawn((
        UnitId(999),
        UnitKind {
            archetype: UnitArchetype::Courier,
        },
        Faction::Allied,
        Position::new(405.0, 400.0),
        Velocity::default(),
        Mobility {
            speed: 16.0,
            flying: true,
        },
    ));

    let mut events = Vec::new();
    unit_ai::run(&mut world, 100, WORLD_WIDTH, WORLD_HEIGHT, &mut events);

    let ctrl = world.get::<&Controller>(enemy).unwrap();
    if let Controller::Enemy(state) = &*ctrl {
        assert_eq!(state.target, None, "ground-only weapons skip flyers");
    } else {
        panic!("expected enemy controller");
    }
}

// ---- Couriers ----

#[test]
fn test_courier_unloads_then_departs() {
    let mut world = World::new();
    let objective = crate::nav::objective(WORLD_WIDTH, WORLD_HEIGHT);
    let courier = world.spawn((
        UnitId(1),
        UnitKind {
            archetype: UnitArchetype::Courier,
        },
        Faction::Allied,
        objective,
        Velocity::default(),
        Facing::default(),
        Health {
            hp: f32::MAX,
            max: f32::MAX,
        },
        Mobility {
            speed: 16.0,
            flying: true,
        },
        Controller::Courier(CourierController::default()),
        CargoHold {
            payloads: vec![ResourceBlock::Plating, ResourceBlock::Plating],
            capacity: COURIER_CARGO_CAPACITY,
        },
    ));

    let mut events = Vec::new();
    // Pass 1: arrive -> Unloading. Passes 2-3: one payload each.
    for _ in 0..3 {
        unit_ai::run(&mut world, 0, WORLD_WIDTH, WORLD_HEIGHT, &mut events);
    }
    let deliveries = events
        .iter()
        .filter(|e| matches!(e, GameEvent::CargoDelivered { .. }))
        .count();
    assert_eq!(deliveries, 2);
    assert!(world.get::<&CargoHold>(courier).unwrap().payloads.is_empty());

    // Pass 4: empty hold -> Departing, heading back west.
    unit_ai::run(&mut world, 0, WORLD_WIDTH, WORLD_HEIGHT, &mut events);
    let ctrl = world.get::<&Controller>(courier).unwrap();
    if let Controller::Courier(state) = &*ctrl {
        assert_eq!(state.phase, CourierPhase::Departing);
    } else {
        panic!("expected courier controller");
    }
    drop(ctrl);
    unit_ai::run(&mut world, 0, WORLD_WIDTH, WORLD_HEIGHT, &mut events);
    assert!(world.get::<&Velocity>(courier).unwrap().x < 0.0);
}

#[test]
fn test_reinforcement_loadout() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let tables = ArenaTables::default();
    let mut events = Vec::new();
    let mut next_id = 0;

    reinforcement::dispatch(
        &mut world,
        &mut rng,
        5,
        &tables,
        &mut next_id,
        &mut events,
        WORLD_WIDTH,
        WORLD_HEIGHT,
    );

    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::AidIncoming { couriers: 5 }
    )));

    let mut count = 0;
    for (_, (kind, faction, health, hold, ctrl, pos)) in world
        .query::<(
            &UnitKind,
            &Faction,
            &Health,
            &CargoHold,
            &Controller,
            &Position,
        )>()
        .iter()
    {
        count += 1;
        assert_eq!(kind.archetype, UnitArchetype::Courier);
        assert_eq!(*faction, Faction::Allied);
        assert_eq!(health.hp, f32::MAX, "courier health never diminishes");
        assert!(!hold.payloads.is_empty());
        assert!(hold.payloads.len() as u32 <= COURIER_CARGO_CAPACITY);
        // Every payload in one hold is the same drawn block type.
        assert!(hold.payloads.windows(2).all(|w| w[0] == w[1]));
        assert!(matches!(ctrl, Controller::Courier(_)));
        assert_eq!(pos.x, SPAWN_EDGE_MARGIN, "couriers enter on the west edge");
    }
    assert_eq!(count, 5);
}

// ---- Economy ----

#[test]
fn test_purchase_failures_leave_state_untouched() {
    let mut engine = engine_with_players(1);
    let money_before = engine.accounts()["player-0"].money;
    let units_before = count_faction(engine.world(), Faction::Defender);

    for (archetype, amount) in [
        ("paragon", Some(1)),  // insufficient funds
        ("sentinel", Some(0)), // invalid amount
        ("dagger", Some(1)),   // unknown archetype
    ] {
        engine.queue_command(ArenaCommand::Upgrade {
            player_id: "player-0".into(),
            archetype: archetype.into(),
            amount,
        });
        let snap = engine.tick();
        assert!(
            snap.events
                .iter()
                .any(|e| matches!(e, GameEvent::PurchaseFailed { .. })),
            "{archetype} should fail"
        );
        assert_eq!(engine.accounts()["player-0"].money, money_before);
        assert_eq!(
            count_faction(engine.world(), Faction::Defender),
            units_before
        );
    }
}

#[test]
fn test_purchase_unit_cap_counts_per_player_per_archetype() {
    let mut engine = engine_with_players(1);
    if let Some(account) = engine.accounts_mut().get_mut("player-0") {
        account.money = 1_000_000;
    }

    // One starting sentinel is already owned, so the cap leaves room for
    // UNIT_CAP - 1 more.
    engine.queue_command(ArenaCommand::Upgrade {
        player_id: "player-0".into(),
        archetype: "sentinel".into(),
        amount: Some(UNIT_CAP),
    });
    let snap = engine.tick();
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::PurchaseFailed {
            error: PurchaseError::UnitCapExceeded { .. },
            ..
        }
    )));

    engine.queue_command(ArenaCommand::Upgrade {
        player_id: "player-0".into(),
        archetype: "sentinel".into(),
        amount: Some(UNIT_CAP - 1),
    });
    engine.tick();
    assert_eq!(
        economy::owned_count(engine.world(), "player-0", UnitArchetype::Sentinel),
        UNIT_CAP
    );
}

#[test]
fn test_successful_purchase_decrements_balance_and_spawns() {
    let mut engine = engine_with_players(1);
    if let Some(account) = engine.accounts_mut().get_mut("player-0") {
        account.money = 1_000;
    }

    engine.queue_command(ArenaCommand::Upgrade {
        player_id: "player-0".into(),
        archetype: "vanguard".into(),
        amount: Some(3),
    });
    let snap = engine.tick();

    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::PurchaseCompleted {
            amount: 3,
            balance: 640,
            ..
        }
    )));
    assert_eq!(engine.accounts()["player-0"].money, 640);
    assert_eq!(
        economy::owned_count(engine.world(), "player-0", UnitArchetype::Vanguard),
        3
    );
}

#[test]
fn test_list_upgrades_annotates_affordability() {
    let mut engine = engine_with_players(1);
    engine.queue_command(ArenaCommand::ListUpgrades {
        player_id: "player-0".into(),
    });
    let snap = engine.tick();

    let entries = snap
        .events
        .iter()
        .find_map(|e| match e {
            GameEvent::UpgradeList { entries, .. } => Some(entries.clone()),
            _ => None,
        })
        .expect("listing expected");

    assert_eq!(entries.len(), ArenaTables::default().upgrade_costs.len());
    // Starting balance affords exactly the cheapest unit.
    for entry in entries {
        assert_eq!(entry.affordable, entry.cost <= STARTING_MONEY);
    }
}

#[test]
fn test_join_registers_account_and_starting_unit() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    engine.queue_command(ArenaCommand::PlayerJoin {
        player_id: "solo".into(),
    });
    let snap = engine.tick();

    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::PlayerJoined {
            returning: false,
            ..
        }
    )));
    assert_eq!(engine.accounts()["solo"].money, STARTING_MONEY);
    assert_eq!(economy::player_unit_count(engine.world(), "solo"), 1);

    // A rejoin keeps the account and does not duplicate the unit.
    engine.queue_command(ArenaCommand::PlayerJoin {
        player_id: "solo".into(),
    });
    let snap = engine.tick();
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::PlayerJoined {
            returning: true,
            ..
        }
    )));
    assert_eq!(economy::player_unit_count(engine.world(), "solo"), 1);
}
