//! Per-tick collision detection for the serpent's head
//!
//! Checks run in a fixed precedence order and the first hit wins, so a head
//! that lands on the orb and a demon in the same tick dies instead of feeding.

use super::boss::Boss;
use super::demon::DemonPool;
use super::grid::{Grid, Position};
use super::serpent::Serpent;

/// What the serpent's head ran into this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Left the arena
    Wall,
    /// Bit its own body
    Body,
    /// Touched the demon at this pool index
    Demon(usize),
    /// Touched the boss
    Boss,
    /// Reached the orb
    Orb,
}

/// Everything the head can hit, borrowed from the session for one check
pub struct Arena<'a> {
    pub grid: &'a Grid,
    pub serpent: &'a Serpent,
    pub demons: &'a DemonPool,
    pub boss: Option<&'a Boss>,
    pub orb: Option<Position>,
}

/// Find the highest-precedence collision for the serpent's head, if any
pub fn detect(arena: &Arena<'_>) -> Option<Collision> {
    let head = arena.serpent.head();

    if !arena.grid.contains(head) {
        return Some(Collision::Wall);
    }
    if arena.serpent.body().any(|&seg| seg == head) {
        return Some(Collision::Body);
    }
    if let Some(idx) = arena.demons.occupant(head) {
        return Some(Collision::Demon(idx));
    }
    if arena.boss.is_some_and(|boss| boss.pos == head) {
        return Some(Collision::Boss);
    }
    if arena.orb == Some(head) {
        return Some(Collision::Orb);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Heading;
    use crate::sim::trail::TrailLedger;
    use glam::IVec2;

    fn grid() -> Grid {
        Grid::new(30, 30)
    }

    #[test]
    fn test_open_cell_is_clear() {
        let grid = grid();
        let serpent = Serpent::new(IVec2::new(15, 15), Heading::Right);
        let demons = DemonPool::new();
        let arena = Arena {
            grid: &grid,
            serpent: &serpent,
            demons: &demons,
            boss: None,
            orb: Some(IVec2::new(3, 3)),
        };
        assert_eq!(detect(&arena), None);
    }

    #[test]
    fn test_wall_beats_everything() {
        let grid = grid();
        let mut serpent = Serpent::new(IVec2::new(29, 5), Heading::Right);
        serpent.advance();
        let demons = DemonPool::new();
        let arena = Arena {
            grid: &grid,
            serpent: &serpent,
            demons: &demons,
            boss: None,
            orb: Some(IVec2::new(30, 5)),
        };
        assert_eq!(detect(&arena), Some(Collision::Wall));
    }

    #[test]
    fn test_demon_beats_orb() {
        let grid = grid();
        let serpent = Serpent::new(IVec2::new(15, 15), Heading::Right);
        let mut trail = TrailLedger::new(10);
        trail.record(IVec2::new(15, 15));
        let mut demons = DemonPool::new();
        demons.spawn(&trail, 100, 0.7);
        let arena = Arena {
            grid: &grid,
            serpent: &serpent,
            demons: &demons,
            boss: None,
            orb: Some(IVec2::new(15, 15)),
        };
        assert_eq!(detect(&arena), Some(Collision::Demon(0)));
    }

    #[test]
    fn test_boss_and_orb() {
        let grid = grid();
        let serpent = Serpent::new(IVec2::new(15, 15), Heading::Right);
        let demons = DemonPool::new();
        let boss = Boss::new(IVec2::new(15, 15), 0.7, 0.3);
        let arena = Arena {
            grid: &grid,
            serpent: &serpent,
            demons: &demons,
            boss: Some(&boss),
            orb: Some(IVec2::new(15, 15)),
        };
        assert_eq!(detect(&arena), Some(Collision::Boss));

        let arena = Arena { boss: None, ..arena };
        assert_eq!(detect(&arena), Some(Collision::Orb));
    }
}
