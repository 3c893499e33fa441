//! Arena tuning parameters.

/// Simulation tick rate (Hz). Drives unit AI, cast progression, movement.
pub const TICK_RATE: u32 = 10;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

/// Wave director cadence: one director pass per this many ticks (1 Hz).
pub const DIRECTOR_INTERVAL_TICKS: u64 = TICK_RATE as u64;

// --- World ---

/// Default arena width in world units.
pub const WORLD_WIDTH: f32 = 800.0;

/// Default arena height in world units.
pub const WORLD_HEIGHT: f32 = 800.0;

/// Minimum distance from any edge for boundary spawns.
pub const SPAWN_EDGE_MARGIN: f32 = 20.0;

/// Radius around the arena centre inside which enemies switch from
/// flow-field routing to direct pursuit of their target.
pub const CORE_CHASE_RADIUS: f32 = 256.0;

// --- Wave pacing ---

/// Delay before the first wave after world-ready (seconds).
pub const FIRST_WAVE_DELAY_SECS: u32 = 15;

/// Base intermission delay between waves (seconds).
pub const WAVE_DELAY_SECS: u32 = 10;

/// Extra intermission delay per completed wave (seconds).
pub const PER_WAVE_EXTRA_DELAY_SECS: u32 = 1;

/// Additional delay when a reinforcement was dispatched this cycle
/// (couriers need time to deliver their cargo).
pub const HELP_EXTRA_DELAY_SECS: u32 = 15;

/// Every Nth wave is a boss wave.
pub const BOSS_WAVE_PERIOD: u32 = 10;

/// Clearing this wave (or later) ends the session in victory.
pub const VICTORY_WAVE: u32 = 50;

/// First wave at which aid reinforcements may be dispatched.
pub const HELP_MIN_WAVE: u32 = 10;

/// Reinforcements are dispatched every Nth wave past the minimum.
pub const HELP_SPACING: u32 = 5;

// --- Stat scaling ---

/// Scaling grows by wave_number / STAT_DIVISOR per wave, never resets
/// within a session.
pub const STAT_DIVISOR: f32 = 25.0;

/// Divides scaled enemy health to keep early waves survivable.
pub const SCALING_DAMPENER: f32 = 5.0;

// --- Wave composition ---

/// Base of the exponential enemy budget curve.
pub const ENEMIES_BASE: f32 = 2.0;

/// Exponent ramp per wave: budget = base ^ (1 + wave * ramp).
pub const ENEMIES_RAMP: f32 = 0.3;

/// Hard cap on spawn orders per archetype in one wave; the remainder is
/// dropped, not deferred.
pub const MAX_UNITS_PER_TYPE: u32 = 100;

// --- Boss ---

/// Boss armor = scaling * live players * this.
pub const BOSS_ARMOR_CONST: f32 = 30_000.0;

/// Boss damage multiplier = scaling * this.
pub const BOSS_DAMAGE_CONST: f32 = 10.0;

/// Telegraph pulses before the boss spawn payload fires.
pub const BOSS_TELEGRAPH_PULSES: u32 = 3;

/// Ticks from cast start until the boss spawn payload fires.
pub const BOSS_TELEGRAPH_DELAY_TICKS: u32 = 3;

// --- Projectiles ---

/// Lifetime of boss volley projectiles (ticks).
pub const PROJECTILE_TTL_TICKS: u32 = 30;

/// Volley projectile damage before boss scaling.
pub const PROJECTILE_BASE_DAMAGE: f32 = 30.0;

// --- Unit AI ---

/// Base interval between retarget checks (ticks). Each unit adds a random
/// initial offset so the herd never retargets in lockstep.
pub const RETARGET_INTERVAL_TICKS: u64 = 20;

/// Weapons fire when the target is inside range * this.
pub const FIRE_RANGE_FACTOR: f32 = 1.25;

/// Retargeting searches within range * this.
pub const SEARCH_RANGE_FACTOR: f32 = 2.0;

// --- Reinforcements ---

/// Chance per courier of drawing from the rare cargo table.
pub const AID_RARE_CHANCE: f64 = 0.05;

/// Vertical jitter around the edge midpoint for courier spawns.
pub const AID_EDGE_JITTER: f32 = 120.0;

/// Maximum payloads one courier can carry.
pub const COURIER_CARGO_CAPACITY: u32 = 12;

/// Distance from the objective at which a courier starts unloading.
pub const COURIER_UNLOAD_RADIUS: f32 = 32.0;

// --- Economy ---

/// Maximum live units of one archetype a single player may own.
pub const UNIT_CAP: u32 = 24;

/// Balance granted on first join (and on session reset).
pub const STARTING_MONEY: u32 = 50;

/// Flat income credited to every account when a wave is cleared.
pub const WAVE_INCOME_BASE: u32 = 30;

/// Additional per-wave income ramp.
pub const WAVE_INCOME_PER_WAVE: u32 = 10;

/// Spawn jitter around the objective for purchased units.
pub const PURCHASE_SPAWN_JITTER: f32 = 8.0;
