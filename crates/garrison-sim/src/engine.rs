//! Game engine — the core of the simulation.
//!
//! `GameEngine` owns the hecs ECS world, the terrain, and the round
//! state machine. It processes queued commands at tick boundaries,
//! runs all systems in fixed order, and produces `RoundSnapshot`s.
//! Completely headless (no rendering dependency), enabling
//! deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use garrison_core::commands::{GameCommand, TankControl};
use garrison_core::components::{Eagle, EnemyTank, PlayerTank};
use garrison_core::config::GameConfig;
use garrison_core::enums::{Direction, PlayerSlot, RoundOutcome, RoundPhase};
use garrison_core::events::RoundEvent;
use garrison_core::state::{PlayerResult, RoundSnapshot, SessionResult};
use garrison_core::types::GameTime;
use garrison_terrain::{LevelGrid, LevelSet};

use crate::systems;
use crate::systems::spawner::SpawnerState;
use crate::world_setup;

/// Configuration for starting a new session.
pub struct SessionConfig {
    /// RNG seed for determinism. Same seed = same session.
    pub seed: u64,
    /// Number of player seats. Anything but 1 or 2 falls back to 1.
    pub player_count: u8,
    /// Session rules.
    pub rules: GameConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            player_count: 1,
            rules: GameConfig::default(),
        }
    }
}

/// Pressed-control state for one player seat. Directions are kept as a
/// stack: the most recently pressed key steers, and releasing it hands
/// control back to whatever is still held.
#[derive(Default)]
struct HeldControls {
    dirs: Vec<Direction>,
    fire: bool,
}

impl HeldControls {
    fn press(&mut self, control: TankControl) {
        match control.direction() {
            Some(dir) => {
                self.dirs.retain(|&d| d != dir);
                self.dirs.push(dir);
            }
            None => self.fire = true,
        }
    }

    fn release(&mut self, control: TankControl) {
        match control.direction() {
            Some(dir) => self.dirs.retain(|&d| d != dir),
            None => self.fire = false,
        }
    }

    fn motion(&self) -> Option<Direction> {
        self.dirs.last().copied()
    }
}

/// The game engine. Owns the ECS world and all session state.
pub struct GameEngine {
    world: World,
    terrain: LevelGrid,
    levels: LevelSet,
    level_index: usize,
    time: GameTime,
    phase: RoundPhase,
    /// Countdown inside timed phases (intro, cleared, lost).
    phase_ms: u32,
    rules: GameConfig,
    player_count: u8,
    rng: ChaCha8Rng,
    command_queue: VecDeque<GameCommand>,
    held: [HeldControls; 2],
    spawner: SpawnerState,
    enemies_left: u32,
    fallen: Vec<PlayerResult>,
    events: Vec<RoundEvent>,
    despawn_buffer: Vec<hecs::Entity>,
    show_targets: bool,
    finished: bool,
    outcome: Option<RoundOutcome>,
}

impl GameEngine {
    /// Create an engine over an already-validated level set.
    pub fn new(levels: LevelSet, config: SessionConfig) -> Self {
        let player_count = if (1..=2).contains(&config.player_count) {
            config.player_count
        } else {
            1
        };
        let terrain = levels.get(0).cloned().unwrap_or_else(LevelGrid::standard);

        let mut world = World::new();
        world_setup::setup_round(&mut world, &config.rules, player_count);

        let spawner = SpawnerState::new(&config.rules);
        let enemies_left = config.rules.enemies_per_round;
        let phase_ms = config.rules.intro_ms;
        log::info!(
            "session started: {} player(s), {} level(s), seed {}",
            player_count,
            levels.len(),
            config.seed
        );

        Self {
            world,
            terrain,
            levels,
            level_index: 0,
            time: GameTime::default(),
            phase: RoundPhase::LevelIntro,
            phase_ms,
            rules: config.rules,
            player_count,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            held: [HeldControls::default(), HeldControls::default()],
            spawner,
            enemies_left,
            fallen: Vec::new(),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
            show_targets: false,
            finished: false,
            outcome: None,
        }
    }

    /// Queue a command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: GameCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = GameCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one frame and return the resulting
    /// snapshot. Oversized frames (dropped to the background, debugger
    /// stops) skip the simulation step but still process commands and
    /// report state.
    pub fn update(&mut self, dt_ms: u32) -> RoundSnapshot {
        self.process_commands();

        if dt_ms > self.rules.max_frame_ms {
            log::warn!("frame of {} ms skipped", dt_ms);
        } else if !self.finished {
            self.step_phase(dt_ms);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.terrain,
            &self.time,
            self.phase,
            self.level_index,
            self.enemies_left,
            &self.rules,
            self.show_targets,
            events,
            &self.fallen,
        )
    }

    /// Get the current round phase.
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> GameTime {
        self.time
    }

    /// Zero-based index of the current level.
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// Enemies still to be destroyed this level.
    pub fn enemies_left(&self) -> u32 {
        self.enemies_left
    }

    /// Whether the session has ended.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Final standings, available once the session has ended.
    pub fn result(&self) -> Option<SessionResult> {
        let outcome = self.outcome?;
        let mut players: Vec<PlayerResult> = self
            .world
            .query::<&PlayerTank>()
            .iter()
            .map(|(_, tank)| PlayerResult {
                slot: tank.slot,
                score: tank.score,
                lives: tank.lives,
                alive: true,
            })
            .collect();
        players.extend(self.fallen.iter().cloned());
        players.sort_by_key(|p| p.slot.index());
        Some(SessionResult {
            outcome,
            level_reached: self.level_index,
            players,
        })
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a read-only reference to the terrain grid.
    pub fn terrain(&self) -> &LevelGrid {
        &self.terrain
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: GameCommand) {
        match command {
            GameCommand::Press { slot, control } => {
                if self.seat_active(slot) {
                    self.held[slot.index()].press(control);
                }
            }
            GameCommand::Release { slot, control } => {
                if self.seat_active(slot) {
                    self.held[slot.index()].release(control);
                }
            }
            GameCommand::TogglePause => match self.phase {
                RoundPhase::Active => self.phase = RoundPhase::Paused,
                RoundPhase::Paused => self.phase = RoundPhase::Active,
                _ => {}
            },
            GameCommand::QuitToMenu => {
                self.finish(RoundOutcome::Aborted);
            }
            GameCommand::NextLevel => {
                if self.phase != RoundPhase::Lost && !self.finished {
                    let last = self.levels.len().saturating_sub(1);
                    let next = (self.level_index + 1).min(last);
                    self.load_level(next);
                }
            }
            GameCommand::PreviousLevel => {
                if self.phase != RoundPhase::Lost && !self.finished {
                    self.load_level(self.level_index.saturating_sub(1));
                }
            }
            GameCommand::ToggleTargetOverlay => {
                self.show_targets = !self.show_targets;
            }
        }
    }

    /// Whether a seat belongs to this session's player count.
    fn seat_active(&self, slot: PlayerSlot) -> bool {
        slot.index() < self.player_count as usize
    }

    /// Advance the round state machine by one frame.
    fn step_phase(&mut self, dt_ms: u32) {
        match self.phase {
            RoundPhase::LevelIntro => {
                self.phase_ms = self.phase_ms.saturating_sub(dt_ms);
                if self.phase_ms == 0 {
                    self.phase = RoundPhase::Active;
                    log::info!("level {} active", self.level_index + 1);
                }
            }
            RoundPhase::Active => {
                self.run_systems(dt_ms);
                self.evaluate_round();
                self.time.advance(dt_ms);
            }
            RoundPhase::Paused => {}
            RoundPhase::LevelCleared => {
                self.phase_ms = self.phase_ms.saturating_sub(dt_ms);
                if self.phase_ms == 0 {
                    if self.level_index + 1 < self.levels.len() {
                        self.load_level(self.level_index + 1);
                    } else {
                        self.phase = RoundPhase::Won;
                        self.finish(RoundOutcome::Won);
                    }
                }
            }
            RoundPhase::Lost => {
                self.phase_ms = self.phase_ms.saturating_sub(dt_ms);
                if self.phase_ms == 0 {
                    self.finish(RoundOutcome::Lost);
                }
            }
            RoundPhase::Won => {}
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt_ms: u32) {
        // 1. Enemy and ambient bonus spawning
        systems::spawner::run(
            &mut self.world,
            &mut self.rng,
            &self.rules,
            &mut self.spawner,
            self.level_index as u32 + 1,
            self.enemies_left,
            dt_ms,
            &mut self.events,
        );
        // 2. Status, reload and bonus timers
        systems::status::run(&mut self.world, &mut self.terrain, dt_ms);
        // 3. Enemy steering decisions
        let enemy_shots = systems::enemy_ai::run(&mut self.world, &mut self.rng, dt_ms);
        // 4. Trigger state into bullets
        let fire_held = [self.held[0].fire, self.held[1].fire];
        systems::firing::run(&mut self.world, &self.rules, fire_held, &enemy_shots);
        // 5. Movement with predictive collision stopping
        let motion = [self.held[0].motion(), self.held[1].motion()];
        systems::locomotion::run(&mut self.world, &self.terrain, &self.rules, motion, dt_ms);
        // 6. Bullet collision passes
        systems::combat::run(
            &mut self.world,
            &mut self.terrain,
            &mut self.rng,
            &self.rules,
            &mut self.enemies_left,
            &mut self.events,
        );
        // 7. Bonus pickup
        systems::pickup::run(
            &mut self.world,
            &mut self.terrain,
            &mut self.rng,
            &self.rules,
            &mut self.enemies_left,
            &mut self.events,
        );
        // 8. Cleanup (spent bullets, dead tanks, stale bonuses)
        systems::cleanup::run(
            &mut self.world,
            &self.rules,
            &mut self.despawn_buffer,
            &mut self.fallen,
        );
    }

    /// Check the win and loss conditions after a simulated frame.
    fn evaluate_round(&mut self) {
        let eagle_alive = self
            .world
            .query_mut::<&Eagle>()
            .into_iter()
            .all(|(_, eagle)| eagle.alive);
        let players_alive = self.world.query_mut::<&PlayerTank>().into_iter().count();

        if !eagle_alive || players_alive == 0 {
            self.phase = RoundPhase::Lost;
            self.phase_ms = self.rules.lost_ms;
            self.events.push(RoundEvent::RoundLost);
            log::info!("round lost on level {}", self.level_index + 1);
            return;
        }

        let enemies_alive = self
            .world
            .query_mut::<&EnemyTank>()
            .into_iter()
            .count();
        if self.enemies_left == 0 && enemies_alive == 0 {
            self.phase = RoundPhase::LevelCleared;
            self.phase_ms = self.rules.cleared_ms;
            self.events.push(RoundEvent::LevelCleared {
                level: self.level_index,
            });
            log::info!("level {} cleared", self.level_index + 1);
        }
    }

    /// Load a level and reset the per-level state. Surviving players
    /// carry their lives, score and upgrades over; fallen players stay
    /// fallen.
    fn load_level(&mut self, index: usize) {
        let survivors: Vec<PlayerTank> = self
            .world
            .query_mut::<&PlayerTank>()
            .into_iter()
            .map(|(_, tank)| tank.clone())
            .collect();

        self.world.clear();
        self.terrain = self
            .levels
            .get(index)
            .cloned()
            .unwrap_or_else(LevelGrid::standard);
        self.level_index = index;

        for mut tank in survivors {
            tank.reload_ms = 0;
            world_setup::respawn_player(&mut self.world, &self.rules, tank);
        }
        world_setup::spawn_eagle(&mut self.world, &self.rules);

        self.spawner = SpawnerState::new(&self.rules);
        self.enemies_left = self.rules.enemies_per_round;
        self.phase = RoundPhase::LevelIntro;
        self.phase_ms = self.rules.intro_ms;
        log::info!("loading level {}", index + 1);
    }

    /// Mark the session finished. The first outcome wins; later calls
    /// are ignored.
    fn finish(&mut self, outcome: RoundOutcome) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.outcome = Some(outcome);
        log::info!("session finished: {:?}", outcome);
    }

    /// Spawn an enemy tank directly (for testing).
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, pos: glam::Vec2, tier: u8) -> hecs::Entity {
        world_setup::spawn_enemy(&mut self.world, &self.rules, pos, tier, false)
    }

    /// Spawn a bonus of a chosen kind directly (for testing).
    #[cfg(test)]
    pub fn spawn_test_bonus(
        &mut self,
        pos: glam::Vec2,
        kind: garrison_core::enums::BonusKind,
    ) -> hecs::Entity {
        use garrison_core::components::{Pickup, Placement};
        use garrison_core::constants::BONUS_SIZE;
        self.world.spawn((
            Placement::new(pos, glam::Vec2::splat(BONUS_SIZE), Direction::Up),
            Pickup {
                kind,
                age_ms: 0,
                taken: false,
            },
        ))
    }

    /// Skip the level intro (for tests that start in Active).
    #[cfg(test)]
    pub fn force_active(&mut self) {
        self.phase = RoundPhase::Active;
        self.phase_ms = 0;
    }

    /// Override the remaining-enemy counter (for round-end tests).
    #[cfg(test)]
    pub fn set_enemies_left(&mut self, count: u32) {
        self.enemies_left = count;
    }

    /// Get a mutable reference to the ECS world (for tests that need
    /// to poke at components directly).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
