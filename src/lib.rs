//! Demonic Serpent - A grid serpent haunted by its own past
//!
//! Core modules:
//! - `sim`: Deterministic simulation (serpent, demons, boss, collisions, session)
//! - `game`: Frame driver wiring the simulation to its collaborators
//! - `renderer`: Presentation snapshot and presenters
//! - `platform`: Browser/native platform abstraction (input, storage)
//! - `persistence`: Key/value storage for the persisted scalars
//! - `tuning`: Data-driven game balance
//! - `audio`: Sound event subscribers

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield size in cells
    pub const GRID_COLS: i32 = 30;
    pub const GRID_ROWS: i32 = 30;
    /// Cell size in pixels (presentation and particle space)
    pub const CELL_SIZE: f32 = 20.0;

    /// Serpent ticks per second at the start of a run
    pub const BASE_TICK_RATE: f32 = 8.0;
    /// Tick rate added every `FEEDS_PER_SPEEDUP` feeds
    pub const TICK_RATE_STEP: f32 = 0.5;
    pub const FEEDS_PER_SPEEDUP: u32 = 5;

    /// Demons and the boss pace themselves against the serpent's tick rate
    pub const DEMON_SPEED_FACTOR: f32 = 0.7;
    pub const BOSS_SPEED_FACTOR: f32 = 0.7;

    /// Head positions remembered by the trail ledger
    pub const TRAIL_CAPACITY: usize = 500;
    /// Trail entries each demon replays
    pub const DEMON_TRAIL_LENGTH: usize = 100;

    /// Feeds before the boss wakes up
    pub const BOSS_FEED_THRESHOLD: u32 = 10;
    /// Chance per boss step to charge straight at the head
    pub const BOSS_INTERCEPT_CHANCE: f32 = 0.3;

    pub const SCORE_PER_ORB: u64 = 10;

    /// Random placement attempts before falling back to a full scan
    pub const ORB_PLACEMENT_ATTEMPTS: u32 = 64;

    /// Pickup burst
    pub const PARTICLE_BURST: usize = 18;
    pub const PARTICLE_LIFETIME_MS: f32 = 500.0;
    pub const PARTICLE_SPEED_MAX: f32 = 2.5;
    /// Ambient embers drifting over the arena
    pub const EMBER_COUNT: usize = 18;
}
