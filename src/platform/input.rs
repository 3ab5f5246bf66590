//! Keyboard state
//!
//! Tracks held keys by their DOM `key` name and resolves them once per frame
//! into a `FrameInput`. Pause and restart are edge-triggered: one press, one
//! request, however long the key is held.

use std::collections::HashSet;

use crate::sim::{FrameInput, Heading};

/// Key names per heading, checked in priority order
const HEADING_KEYS: [(Heading, [&str; 3]); 4] = [
    (Heading::Up, ["ArrowUp", "w", "W"]),
    (Heading::Down, ["ArrowDown", "s", "S"]),
    (Heading::Left, ["ArrowLeft", "a", "A"]),
    (Heading::Right, ["ArrowRight", "d", "D"]),
];

#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<String>,
    pause_requested: bool,
    restart_requested: bool,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. Auto-repeat presses of a held key do not re-trigger edges.
    pub fn press(&mut self, key: &str) {
        let fresh = self.held.insert(key.to_string());
        if !fresh {
            return;
        }
        match key {
            "p" | "P" | " " => self.pause_requested = true,
            "r" | "R" => self.restart_requested = true,
            _ => {}
        }
    }

    pub fn release(&mut self, key: &str) {
        self.held.remove(key);
    }

    /// Forget everything (window lost focus)
    pub fn clear(&mut self) {
        self.held.clear();
        self.pause_requested = false;
        self.restart_requested = false;
    }

    /// Highest-priority heading among held keys
    pub fn heading(&self) -> Option<Heading> {
        HEADING_KEYS
            .iter()
            .find(|(_, keys)| keys.iter().any(|k| self.held.contains(*k)))
            .map(|(heading, _)| *heading)
    }

    /// Resolve this frame's input and consume the pending edges
    pub fn take_frame_input(&mut self) -> FrameInput {
        FrameInput {
            heading: self.heading(),
            pause: std::mem::take(&mut self.pause_requested),
            restart: std::mem::take(&mut self.restart_requested),
        }
    }
}
