//! Arena engine — owns the world and all session state.
//!
//! The host delivers serial ticks; everything mutates inside them. One
//! fast tick per call drives abilities, casts, unit AI, movement and
//! cleanup; the wave director runs on a 1 Hz cadence derived from the
//! same counter.

use std::collections::{BTreeMap, VecDeque};

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use onslaught_core::commands::ArenaCommand;
use onslaught_core::config::{ArenaTables, STARTING_ARCHETYPE};
use onslaught_core::constants::*;
use onslaught_core::economy::{PlayerAccount, PlayerId};
use onslaught_core::enums::GamePhase;
use onslaught_core::events::GameEvent;
use onslaught_core::state::ArenaSnapshot;
use onslaught_core::types::SimTime;

use crate::nav;
use crate::systems;
use crate::systems::casts::{CastCtx, CastQueue};
use crate::systems::director::WaveState;

/// Configuration for starting a new arena session.
pub struct ArenaConfig {
    /// RNG seed for determinism. Same seed = same session.
    pub seed: u64,
    pub world_width: f32,
    pub world_height: f32,
    pub tables: ArenaTables,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            tables: ArenaTables::default(),
        }
    }
}

/// The arena engine. Owns the ECS world and all session state.
pub struct ArenaEngine {
    world: World,
    time: SimTime,
    wave: WaveState,
    rng: ChaCha8Rng,
    tables: ArenaTables,
    world_width: f32,
    world_height: f32,
    command_queue: VecDeque<ArenaCommand>,
    events: Vec<GameEvent>,
    casts: CastQueue,
    accounts: BTreeMap<PlayerId, PlayerAccount>,
    next_unit_id: u32,
    despawn_buffer: Vec<hecs::Entity>,
}

impl ArenaEngine {
    /// Create a new engine with the given config.
    pub fn new(config: ArenaConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            wave: WaveState::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            tables: config.tables,
            world_width: config.world_width,
            world_height: config.world_height,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            casts: CastQueue::new(),
            accounts: BTreeMap::new(),
            next_unit_id: 0,
            despawn_buffer: Vec::new(),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: ArenaCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = ArenaCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> ArenaSnapshot {
        self.process_commands();

        if !self.wave.phase.is_terminal() {
            self.run_systems();
            if self.time.tick % DIRECTOR_INTERVAL_TICKS == 0 {
                systems::director::run(
                    &mut self.world,
                    &mut self.rng,
                    &mut self.wave,
                    &mut self.casts,
                    &mut self.accounts,
                    &self.tables,
                    &mut self.events,
                    &mut self.next_unit_id,
                    self.time.tick,
                    self.world_width,
                    self.world_height,
                );
            }
        }

        self.time.advance();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(
            &self.world,
            &self.time,
            &self.wave,
            self.casts.len(),
            &self.accounts,
            events,
        )
    }

    /// Get the current session phase.
    pub fn phase(&self) -> GamePhase {
        self.wave.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the director's wave state.
    pub fn wave(&self) -> &WaveState {
        &self.wave
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get the live cast queue.
    pub fn casts(&self) -> &CastQueue {
        &self.casts
    }

    /// Get the player accounts.
    pub fn accounts(&self) -> &BTreeMap<PlayerId, PlayerAccount> {
        &self.accounts
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: ArenaCommand) {
        match command {
            ArenaCommand::WorldReady => self.start_session(),
            ArenaCommand::PlayerJoin { player_id } => self.join_player(player_id),
            ArenaCommand::Upgrade {
                player_id,
                archetype,
                amount,
            } => {
                let objective = nav::objective(self.world_width, self.world_height);
                systems::economy::purchase(
                    &mut self.world,
                    &mut self.accounts,
                    &self.tables,
                    &mut self.rng,
                    &mut self.next_unit_id,
                    &mut self.events,
                    &player_id,
                    &archetype,
                    amount,
                    objective,
                );
            }
            ArenaCommand::ListUpgrades { player_id } => {
                systems::economy::list_upgrades(
                    &self.accounts,
                    &self.tables,
                    &mut self.events,
                    &player_id,
                );
            }
        }
    }

    /// Reset the session: fresh world, cancelled casts, zeroed wave state,
    /// every connected player re-registered with a fresh balance and a
    /// starting unit.
    fn start_session(&mut self) {
        self.world.clear();
        self.casts.clear();
        self.next_unit_id = 0;
        self.time = SimTime::default();
        self.wave = WaveState::default();

        let ids: Vec<PlayerId> = self.accounts.keys().cloned().collect();
        for player_id in ids {
            if let Some(account) = self.accounts.get_mut(&player_id) {
                account.money = STARTING_MONEY;
            }
            self.spawn_starting_unit(&player_id);
        }
    }

    /// Register a player by stable identity, granting a starting balance
    /// and one starting unit on first join.
    fn join_player(&mut self, player_id: PlayerId) {
        let returning = self.accounts.contains_key(&player_id);
        if !returning {
            self.accounts.insert(
                player_id.clone(),
                PlayerAccount::new(player_id.clone(), STARTING_MONEY),
            );
        }
        if systems::economy::player_unit_count(&self.world, &player_id) == 0 {
            self.spawn_starting_unit(&player_id);
        }
        self.events.push(GameEvent::PlayerJoined {
            player_id,
            returning,
        });
    }

    fn spawn_starting_unit(&mut self, player_id: &str) {
        let objective = nav::objective(self.world_width, self.world_height);
        systems::economy::spawn_defender(
            &mut self.world,
            &mut self.rng,
            STARTING_ARCHETYPE,
            player_id,
            objective,
            &mut self.next_unit_id,
        );
    }

    /// Run all fast systems in order.
    fn run_systems(&mut self) {
        // 1. Boss abilities (cooldowns and fires)
        systems::boss::run_abilities(
            &mut self.world,
            &mut self.casts,
            &mut self.rng,
            self.wave.scaling_factor,
            &mut self.next_unit_id,
            self.time.tick,
            self.world_width,
            self.world_height,
        );
        // 2. Cast progression (telegraphs and payloads)
        let mut ctx = CastCtx {
            rng: &mut self.rng,
            events: &mut self.events,
            next_unit_id: &mut self.next_unit_id,
            scaling_factor: self.wave.scaling_factor,
            live_players: self.accounts.len() as u32,
            current_tick: self.time.tick,
            world_width: self.world_width,
            world_height: self.world_height,
        };
        self.casts.advance(&mut self.world, &mut ctx);
        // 3. Unit AI (retarget, aim, move)
        systems::unit_ai::run(
            &mut self.world,
            self.time.tick,
            self.world_width,
            self.world_height,
            &mut self.events,
        );
        // 4. Movement integration
        systems::movement::run(&mut self.world, self.world_width, self.world_height);
        // 5. Cleanup (dead, expired, departed)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer, &mut self.events);
    }

    // --- Test access ---

    /// Mutable world access (for tests).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Mutable wave state access (for tests).
    #[cfg(test)]
    pub fn wave_mut(&mut self) -> &mut WaveState {
        &mut self.wave
    }

    /// Mutable account access (for tests).
    #[cfg(test)]
    pub fn accounts_mut(&mut self) -> &mut BTreeMap<PlayerId, PlayerAccount> {
        &mut self.accounts
    }

    /// Despawn every unit of a faction (for tests).
    #[cfg(test)]
    pub fn kill_faction(&mut self, faction: onslaught_core::enums::Faction) {
        let entities: Vec<hecs::Entity> = self
            .world
            .query::<(&onslaught_core::components::UnitId, &onslaught_core::enums::Faction)>()
            .iter()
            .filter(|(_, (_, f))| **f == faction)
            .map(|(entity, _)| entity)
            .collect();
        for entity in entities {
            let _ = self.world.despawn(entity);
        }
    }
}
