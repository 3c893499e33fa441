//! Boss encounter: telegraphed arrival, stat configuration, and the
//! repeating ability loadout.
//!
//! Every ability is independent: its own cooldown, no ordering guarantee
//! among them. Group spawns place minions at fixed offsets from the boss;
//! bullet casts go through the cast queue against a random defender's
//! position.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use onslaught_core::components::*;
use onslaught_core::config::{unit_stats, BOSS_FLANK_MINION, BOSS_REAR_MINION};
use onslaught_core::constants::*;
use onslaught_core::enums::{Faction, UnitArchetype};
use onslaught_core::events::GameEvent;
use onslaught_core::types::{Position, Velocity};

use crate::nav;
use crate::systems::casts::{CastCtx, CastQueue};
use crate::systems::composer;

/// Horizontal spacing of line-volley projectiles.
const LINE_SPACING: f32 = 16.0;

/// Begin a boss encounter: a multi-pulse telegraph at the arena centre
/// whose payload spawns the boss.
pub fn begin_encounter(
    casts: &mut CastQueue,
    events: &mut Vec<GameEvent>,
    world_width: f32,
    world_height: f32,
) {
    events.push(GameEvent::BossIncoming);
    casts.start(BossCast {
        target: nav::objective(world_width, world_height),
        pulses_remaining: BOSS_TELEGRAPH_PULSES,
        delay_ticks: BOSS_TELEGRAPH_DELAY_TICKS,
        elapsed_ticks: 0,
        payload: CastPayload::SpawnBoss,
    });
}

/// Spawn the boss entity. Invoked by the telegraph cast's payload.
pub fn spawn_boss(world: &mut World, ctx: &mut CastCtx, at: Position) {
    let stats = unit_stats(UnitArchetype::Dreadnought);
    let health = stats.base_health * ctx.scaling_factor / SCALING_DAMPENER;

    let unit_id = *ctx.next_unit_id;
    *ctx.next_unit_id += 1;

    world.spawn((
        UnitId(unit_id),
        UnitKind {
            archetype: UnitArchetype::Dreadnought,
        },
        Faction::Invader,
        at,
        Velocity::default(),
        Facing::default(),
        Health {
            hp: health,
            max: health,
        },
        Mobility {
            speed: stats.speed,
            flying: stats.flying,
        },
        Weapon {
            range: stats.weapon_range,
            targets_ground: stats.targets_ground,
            targets_air: stats.targets_air,
            aim: None,
            firing: false,
        },
        Controller::Enemy(EnemyController {
            next_retarget_tick: ctx.current_tick,
            target: None,
        }),
        Armor {
            value: ctx.scaling_factor * ctx.live_players as f32 * BOSS_ARMOR_CONST,
        },
        DamageMultiplier {
            value: ctx.scaling_factor * BOSS_DAMAGE_CONST,
        },
        BossMarker,
        AbilitySet {
            abilities: default_loadout(),
        },
    ));
}

/// The boss ability loadout: flanking and rear summon groups plus six
/// independent bullet casts, one of which is the direct area blast.
fn default_loadout() -> Vec<Ability> {
    fn ability(kind: AbilityKind, cooldown_ticks: u32) -> Ability {
        Ability {
            kind,
            cooldown_ticks,
            remaining_ticks: cooldown_ticks,
        }
    }

    vec![
        ability(
            AbilityKind::GroupSpawn {
                archetype: BOSS_FLANK_MINION,
                count: 5,
                offset: (-64.0, 64.0),
            },
            120,
        ),
        ability(
            AbilityKind::GroupSpawn {
                archetype: BOSS_FLANK_MINION,
                count: 5,
                offset: (64.0, 64.0),
            },
            120,
        ),
        ability(
            AbilityKind::GroupSpawn {
                archetype: BOSS_REAR_MINION,
                count: 3,
                offset: (0.0, -96.0),
            },
            150,
        ),
        ability(
            AbilityKind::Cast {
                pulses: 2,
                delay_ticks: 2,
                payload: CastPayload::Volley(VolleyKind::Ring {
                    projectiles: 18,
                    speed: 60.0,
                }),
            },
            100,
        ),
        ability(
            AbilityKind::Cast {
                pulses: 2,
                delay_ticks: 2,
                payload: CastPayload::Volley(VolleyKind::Line {
                    projectiles: 12,
                    speed: 90.0,
                }),
            },
            300,
        ),
        ability(
            AbilityKind::Cast {
                pulses: 3,
                delay_ticks: 3,
                payload: CastPayload::Volley(VolleyKind::Ring {
                    projectiles: 10,
                    speed: 45.0,
                }),
            },
            90,
        ),
        ability(
            AbilityKind::Cast {
                pulses: 3,
                delay_ticks: 3,
                payload: CastPayload::AreaBlast {
                    radius: 96.0,
                    damage: 480.0,
                },
            },
            100,
        ),
        ability(
            AbilityKind::Cast {
                pulses: 2,
                delay_ticks: 2,
                payload: CastPayload::Volley(VolleyKind::Ring {
                    projectiles: 8,
                    speed: 120.0,
                }),
            },
            50,
        ),
        ability(
            AbilityKind::Cast {
                pulses: 4,
                delay_ticks: 4,
                payload: CastPayload::Volley(VolleyKind::Ring {
                    projectiles: 32,
                    speed: 70.0,
                }),
            },
            200,
        ),
    ]
}

/// Tick every ability on every boss; fire the ones whose cooldown elapsed.
pub fn run_abilities(
    world: &mut World,
    casts: &mut CastQueue,
    rng: &mut ChaCha8Rng,
    scaling_factor: f32,
    next_unit_id: &mut u32,
    current_tick: u64,
    world_width: f32,
    world_height: f32,
) {
    // Candidate cast targets: live defender positions.
    let defender_positions: Vec<Position> = world
        .query::<(&Faction, &Position)>()
        .iter()
        .filter(|(_, (faction, _))| **faction == Faction::Defender)
        .map(|(_, (_, pos))| *pos)
        .collect();

    // Tick cooldowns, buffering fired abilities to keep the borrow local.
    let mut fired: Vec<(Position, AbilityKind)> = Vec::new();
    for (_entity, (set, pos)) in world.query_mut::<(&mut AbilitySet, &Position)>() {
        for ability in &mut set.abilities {
            if ability.remaining_ticks == 0 {
                fired.push((*pos, ability.kind.clone()));
                ability.remaining_ticks = ability.cooldown_ticks;
            } else {
                ability.remaining_ticks -= 1;
            }
        }
    }

    for (boss_pos, kind) in fired {
        match kind {
            AbilityKind::GroupSpawn {
                archetype,
                count,
                offset,
            } => {
                let at = Position::new(boss_pos.x + offset.0, boss_pos.y + offset.1);
                for _ in 0..count {
                    composer::spawn_enemy_at(
                        world,
                        rng,
                        archetype,
                        at,
                        scaling_factor,
                        next_unit_id,
                        current_tick,
                    );
                }
            }
            AbilityKind::Cast {
                pulses,
                delay_ticks,
                payload,
            } => {
                let target = if defender_positions.is_empty() {
                    nav::objective(world_width, world_height)
                } else {
                    defender_positions[rng.gen_range(0..defender_positions.len())]
                };
                casts.start(BossCast {
                    target,
                    pulses_remaining: pulses,
                    delay_ticks,
                    elapsed_ticks: 0,
                    payload,
                });
            }
        }
    }
}

/// Spawn one volley of projectile entities at the cast target.
pub fn spawn_volley(world: &mut World, ctx: &mut CastCtx, target: Position, kind: VolleyKind) {
    let damage = PROJECTILE_BASE_DAMAGE * ctx.scaling_factor;
    match kind {
        VolleyKind::Ring { projectiles, speed } => {
            for i in 0..projectiles {
                let angle = i as f32 / projectiles as f32 * std::f32::consts::TAU;
                world.spawn((
                    target,
                    Velocity::new(angle.sin() * speed, angle.cos() * speed),
                    Faction::Invader,
                    Projectile {
                        ttl_ticks: PROJECTILE_TTL_TICKS,
                        damage,
                    },
                ));
            }
        }
        VolleyKind::Line { projectiles, speed } => {
            for i in 0..projectiles {
                let off = (i as f32 - projectiles as f32 / 2.0) * LINE_SPACING;
                world.spawn((
                    Position::new(target.x + off, target.y),
                    Velocity::new(0.0, speed),
                    Faction::Invader,
                    Projectile {
                        ttl_ticks: PROJECTILE_TTL_TICKS,
                        damage,
                    },
                ));
            }
        }
    }
}

/// Direct area damage against defending-faction units.
pub fn apply_blast(world: &mut World, at: Position, radius: f32, damage: f32) {
    for (_entity, (faction, pos, health)) in
        world.query_mut::<(&Faction, &Position, &mut Health)>()
    {
        if *faction == Faction::Defender && pos.within(&at, radius) {
            health.hp -= damage;
        }
    }
}
