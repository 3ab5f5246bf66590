//! Trail ledger: capped history of where the serpent's head has been
//!
//! Newest first. Demons replay slices of it and the boss reads its most
//! recent entries to guess where the serpent is going.

use std::collections::VecDeque;

use super::grid::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct TrailLedger {
    entries: VecDeque<Position>,
    capacity: usize,
}

impl TrailLedger {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Record a head position (call once per tick, before the serpent moves)
    pub fn record(&mut self, head: Position) {
        self.entries.push_front(head);
        self.entries.truncate(self.capacity);
    }

    /// Copy of the newest `n` entries (fewer if the ledger is shorter)
    pub fn take_prefix(&self, n: usize) -> Vec<Position> {
        self.entries.iter().take(n).copied().collect()
    }

    /// Most recently recorded position
    pub fn newest(&self) -> Option<Position> {
        self.entries.front().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
