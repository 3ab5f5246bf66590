//! Session state and core simulation types
//!
//! One `GameState` is the whole session: every entity lives here and is
//! discarded together on restart. Nothing is shared between sessions except
//! the high score and tuning, which `restart` carries over.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::clock::FrameClock;
use super::demon::DemonPool;
use super::fx::Effects;
use super::grid::{Grid, Heading, Position};
use super::serpent::Serpent;
use super::trail::TrailLedger;
use crate::consts::CELL_SIZE;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created but not started yet
    Idle,
    /// Active gameplay
    Running,
    /// Game is paused (input still read, no ticks)
    Paused,
    /// Run ended, waiting for restart
    GameOver,
}

/// Side effects the simulation asks its collaborators to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    /// Orb consumed
    Pickup,
    /// A new demon joined the hunt
    DemonSpawn,
    /// The boss woke up
    BossSpawn,
    /// Run ended
    Death,
    /// Session (re)started, ambient loop should begin
    AmbientStart,
}

impl GameEvent {
    /// Stable event name for subscribers
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Pickup => "pickup",
            GameEvent::DemonSpawn => "demon-spawn",
            GameEvent::BossSpawn => "boss-spawn",
            GameEvent::Death => "death",
            GameEvent::AmbientStart => "ambient-start",
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed this run was started with
    pub seed: u64,
    pub tuning: Tuning,
    pub grid: Grid,
    pub phase: GamePhase,
    pub score: u64,
    /// Best score seen, carried across restarts
    pub high_score: u64,
    /// Orbs eaten this run
    pub feeds: u32,
    /// Serpent ticks per second
    pub tick_rate: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub serpent: Serpent,
    pub trail: TrailLedger,
    pub demons: DemonPool,
    pub boss: Option<Boss>,
    /// `None` only when the serpent has filled every cell
    pub orb: Option<Position>,
    pub clock: FrameClock,
    /// Visual particles (not gameplay-affecting)
    pub fx: Effects,
    /// Events raised since the host last drained them
    events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create an idle session with the given seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let grid = Grid::new(tuning.grid_cols, tuning.grid_rows);
        let bounds = Vec2::new(grid.cols as f32 * CELL_SIZE, grid.rows as f32 * CELL_SIZE);
        let mut state = Self {
            seed,
            grid,
            phase: GamePhase::Idle,
            score: 0,
            high_score: 0,
            feeds: 0,
            tick_rate: tuning.base_tick_rate,
            time_ticks: 0,
            serpent: Serpent::new(grid.center(), Heading::Right),
            trail: TrailLedger::new(tuning.trail_capacity),
            demons: DemonPool::new(),
            boss: None,
            orb: None,
            clock: FrameClock::new(),
            fx: Effects::new(bounds, seed),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };
        state.orb = state.free_cell();
        state
    }

    /// Begin play from Idle
    pub fn start(&mut self) {
        if self.phase != GamePhase::Idle {
            return;
        }
        self.phase = GamePhase::Running;
        self.fx.spawn_embers();
        self.emit(GameEvent::AmbientStart);
        log::info!("Session started (seed {})", self.seed);
    }

    /// Throw away the run and start a new one with `seed`
    pub fn restart(&mut self, seed: u64) {
        let high_score = self.high_score;
        *self = Self::new(self.tuning.clone(), seed);
        self.high_score = high_score;
        self.start();
    }

    /// Flip between Running and Paused; ignored in other phases
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            other => other,
        };
    }

    /// End the run, keeping the best score
    pub fn game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.high_score = self.high_score.max(self.score);
        self.emit(GameEvent::Death);
        log::info!(
            "Game over: score {} (best {}), {} demons",
            self.score,
            self.high_score,
            self.demons.len()
        );
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand pending events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pick a random cell not covered by the serpent.
    ///
    /// Samples at random a bounded number of times, then scans the grid so a
    /// crowded board still finds the last gaps. `None` means the board is full.
    pub fn free_cell(&mut self) -> Option<Position> {
        for _ in 0..self.tuning.orb_placement_attempts {
            let cell = IVec2::new(
                self.rng.random_range(0..self.grid.cols),
                self.rng.random_range(0..self.grid.rows),
            );
            if !self.serpent.occupies(cell) {
                return Some(cell);
            }
        }

        let free: Vec<Position> = self
            .grid
            .cells()
            .filter(|&cell| !self.serpent.occupies(cell))
            .collect();
        if free.is_empty() {
            return None;
        }
        Some(free[self.rng.random_range(0..free.len())])
    }
}
