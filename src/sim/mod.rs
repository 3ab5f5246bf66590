//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Ticks are driven only by `advance_frame`/`tick`
//! - Seeded RNG only
//! - Fixed update order within a tick
//! - No rendering or platform dependencies

pub mod boss;
pub mod clock;
pub mod collision;
pub mod demon;
pub mod fx;
pub mod grid;
pub mod serpent;
pub mod state;
pub mod tick;
pub mod trail;

pub use boss::{Boss, predicted_motion};
pub use clock::{FrameClock, Pacer, tick_duration_ms};
pub use collision::{Arena, Collision, detect};
pub use demon::{Demon, DemonPool};
pub use fx::{Effects, Ember, Particle};
pub use grid::{Grid, Heading, Position};
pub use serpent::Serpent;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{FrameInput, advance_frame, tick};
pub use trail::TrailLedger;
