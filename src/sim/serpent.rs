//! The player-controlled serpent

use std::collections::VecDeque;

use super::grid::{Heading, Position};

/// Length of a freshly spawned serpent
pub const START_LENGTH: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Serpent {
    /// Body segments (head is front, tail is back)
    segments: VecDeque<Position>,
    heading: Heading,
    /// Tail cell given up by the most recent move; restored on growth
    vacated: Option<Position>,
}

impl Serpent {
    /// Spawn a serpent with its head at `head`, body trailing opposite `heading`
    pub fn new(head: Position, heading: Heading) -> Self {
        let step = heading.vector();
        let segments = (0..START_LENGTH as i32).map(|i| head - step * i).collect();
        Self {
            segments,
            heading,
            vacated: None,
        }
    }

    pub fn head(&self) -> Position {
        // A serpent is never constructed empty and never shrinks
        self.segments[0]
    }

    pub fn segments(&self) -> &VecDeque<Position> {
        &self.segments
    }

    /// Everything except the head
    pub fn body(&self) -> impl Iterator<Item = &Position> {
        self.segments.iter().skip(1)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Change heading unless it would fold the serpent back on itself.
    /// Returns whether the heading was accepted.
    pub fn steer(&mut self, heading: Heading) -> bool {
        if heading.is_opposite(self.heading) {
            return false;
        }
        self.heading = heading;
        true
    }

    /// Step one cell along the current heading, dropping the tail
    pub fn advance(&mut self) {
        let head = self.head() + self.heading.vector();
        self.segments.push_front(head);
        self.vacated = self.segments.pop_back();
    }

    /// Keep the tail dropped by the last move (net +1 length).
    /// Returns false if there was nothing to restore this tick.
    pub fn grow(&mut self) -> bool {
        match self.vacated.take() {
            Some(tail) => {
                self.segments.push_back(tail);
                true
            }
            None => false,
        }
    }
}
