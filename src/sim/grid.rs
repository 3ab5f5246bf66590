//! Grid primitives: cell positions and cardinal headings

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A cell on the playfield (col, row)
pub type Position = IVec2;

/// Cardinal movement direction of the serpent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// Unit step for this heading (rows grow downward)
    pub fn vector(self) -> IVec2 {
        match self {
            Heading::Up => IVec2::new(0, -1),
            Heading::Down => IVec2::new(0, 1),
            Heading::Left => IVec2::new(-1, 0),
            Heading::Right => IVec2::new(1, 0),
        }
    }

    /// Check if this heading is the exact reverse of another
    pub fn is_opposite(self, other: Heading) -> bool {
        self.vector() == -other.vector()
    }
}

/// Playfield dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
}

impl Grid {
    pub fn new(cols: i32, rows: i32) -> Self {
        Self { cols, rows }
    }

    /// Whether a position lies inside [0, cols) x [0, rows)
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.cols && pos.y >= 0 && pos.y < self.rows
    }

    /// Wrap a position back onto the grid (leaving one edge re-enters at the opposite one)
    pub fn wrap(&self, pos: Position) -> Position {
        IVec2::new(pos.x.rem_euclid(self.cols), pos.y.rem_euclid(self.rows))
    }

    /// Centre cell
    pub fn center(&self) -> Position {
        IVec2::new(self.cols / 2, self.rows / 2)
    }

    /// Iterate all cells row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| IVec2::new(x, y)))
    }
}
