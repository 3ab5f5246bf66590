//! Demons: followers that loop over a frozen slice of the serpent's trail

use super::clock::Pacer;
use super::grid::Position;
use super::trail::TrailLedger;

/// A demon replaying a fixed slice of trail history forever
#[derive(Debug, Clone, PartialEq)]
pub struct Demon {
    /// Trail slice captured at spawn (newest first)
    path: Vec<Position>,
    /// Playback position, always in `[0, path.len())` when the path is non-empty
    index: usize,
    pacer: Pacer,
    speed_factor: f32,
}

impl Demon {
    /// Capture the newest `length` trail entries
    pub fn from_trail(trail: &TrailLedger, length: usize, speed_factor: f32) -> Self {
        Self {
            path: trail.take_prefix(length),
            index: 0,
            pacer: Pacer::default(),
            speed_factor,
        }
    }

    /// Advance playback for one simulation tick
    pub fn advance(&mut self, elapsed_ms: f64, tick_rate: f32) {
        let steps = self.pacer.advance(elapsed_ms, tick_rate, self.speed_factor);
        if self.path.is_empty() {
            return;
        }
        self.index = (self.index + steps as usize) % self.path.len();
    }

    /// Where the demon stands now; `None` means it has nothing to replay
    pub fn position(&self) -> Option<Position> {
        self.path.get(self.index).copied()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn path_len(&self) -> usize {
        self.path.len()
    }
}

/// All demons in the session; one per feed, never removed until restart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemonPool {
    demons: Vec<Demon>,
}

impl DemonPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a demon from the current trail and return its starting cell
    pub fn spawn(&mut self, trail: &TrailLedger, length: usize, speed_factor: f32) -> Option<Position> {
        let demon = Demon::from_trail(trail, length, speed_factor);
        let pos = demon.position();
        self.demons.push(demon);
        pos
    }

    pub fn advance(&mut self, elapsed_ms: f64, tick_rate: f32) {
        for demon in &mut self.demons {
            demon.advance(elapsed_ms, tick_rate);
        }
    }

    /// Positions of demons that are present this tick
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.demons.iter().filter_map(Demon::position)
    }

    /// Index of the first demon standing on `pos`
    pub fn occupant(&self, pos: Position) -> Option<usize> {
        self.demons.iter().position(|d| d.position() == Some(pos))
    }

    pub fn len(&self) -> usize {
        self.demons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    fn trail_of(n: i32) -> TrailLedger {
        let mut trail = TrailLedger::new(500);
        for x in 0..n {
            trail.record(IVec2::new(x, 3));
        }
        trail
    }

    #[test]
    fn test_snapshot_is_capped() {
        let demon = Demon::from_trail(&trail_of(150), 100, 0.7);
        assert_eq!(demon.path_len(), 100);
        assert_eq!(demon.position(), Some(IVec2::new(149, 3)));
    }

    #[test]
    fn test_snapshot_unaffected_by_later_trail() {
        let mut trail = trail_of(4);
        let demon = Demon::from_trail(&trail, 100, 0.7);
        trail.record(IVec2::new(20, 20));
        assert_eq!(demon.path_len(), 4);
        assert_eq!(demon.position(), Some(IVec2::new(3, 3)));
    }

    #[test]
    fn test_index_wraps() {
        let mut demon = Demon::from_trail(&trail_of(3), 100, 1.0);
        // Each call banks 125 * 8 * 1.0 = 1000 ms = 8 steps at 125 ms
        demon.advance(125.0, 8.0);
        assert_eq!(demon.index(), 8 % 3);
        demon.advance(125.0, 8.0);
        assert_eq!(demon.index(), 16 % 3);
    }

    #[test]
    fn test_empty_snapshot_is_absent() {
        let mut demon = Demon::from_trail(&TrailLedger::new(10), 100, 0.7);
        demon.advance(1000.0, 8.0);
        assert_eq!(demon.index(), 0);
        assert_eq!(demon.position(), None);
    }

    #[test]
    fn test_pool_occupant() {
        let mut pool = DemonPool::new();
        pool.spawn(&trail_of(5), 100, 0.7);
        pool.spawn(&TrailLedger::new(10), 100, 0.7);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.positions().count(), 1);
        assert_eq!(pool.occupant(IVec2::new(4, 3)), Some(0));
        assert_eq!(pool.occupant(IVec2::new(0, 0)), None);
    }
}
