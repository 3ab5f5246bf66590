//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Keyboard input
//! - Storage (LocalStorage on web)

pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod storage;

pub use input::KeyboardState;
