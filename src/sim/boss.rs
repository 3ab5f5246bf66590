//! The boss: a single predictive hunter
//!
//! Each step it either reads the serpent's last few moves from the trail ledger
//! and drifts back along them, or, with a fixed chance, lunges straight at the
//! head. Unlike the
//! serpent it wraps around the arena edges instead of dying on them.

use glam::IVec2;
use rand::Rng;

use super::clock::Pacer;
use super::grid::{Grid, Position};
use super::trail::TrailLedger;

/// Trail entries considered by the motion estimate
const PREDICTION_WINDOW: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Boss {
    pub pos: Position,
    /// Last step taken; each axis in {-1, 0, 1}, may be diagonal
    pub direction: IVec2,
    pacer: Pacer,
    speed_factor: f32,
    intercept_chance: f32,
}

impl Boss {
    pub fn new(pos: Position, speed_factor: f32, intercept_chance: f32) -> Self {
        Self {
            pos,
            direction: IVec2::ZERO,
            pacer: Pacer::default(),
            speed_factor,
            intercept_chance,
        }
    }

    /// Advance for one simulation tick
    pub fn advance<R: Rng>(
        &mut self,
        elapsed_ms: f64,
        tick_rate: f32,
        trail: &TrailLedger,
        head: Position,
        grid: &Grid,
        rng: &mut R,
    ) {
        let steps = self.pacer.advance(elapsed_ms, tick_rate, self.speed_factor);
        for _ in 0..steps {
            self.step(trail, head, grid, rng);
        }
    }

    /// Choose a direction and take one step
    pub fn step<R: Rng>(&mut self, trail: &TrailLedger, head: Position, grid: &Grid, rng: &mut R) {
        self.direction = if rng.random::<f32>() < self.intercept_chance {
            (head - self.pos).signum()
        } else {
            predicted_motion(trail)
        };
        self.pos = grid.wrap(self.pos + self.direction);
    }
}

/// Per-axis sign of the mean of the pairwise differences between the newest
/// `PREDICTION_WINDOW` trail entries, each taken as older minus newer. The
/// result points back along the serpent's recent path, toward where it came
/// from.
///
/// Missing pairs count as zero vectors, so a short trail still yields a
/// direction (or none). The sign of the mean equals the sign of the sum.
pub fn predicted_motion(trail: &TrailLedger) -> IVec2 {
    let recent = trail.take_prefix(PREDICTION_WINDOW);
    let sum: IVec2 = recent.windows(2).map(|pair| pair[1] - pair[0]).sum();
    sum.signum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn trail(points: &[(i32, i32)]) -> TrailLedger {
        // Record oldest first so the ledger ends up newest first
        let mut trail = TrailLedger::new(500);
        for &(x, y) in points {
            trail.record(IVec2::new(x, y));
        }
        trail
    }

    #[test]
    fn test_prediction_points_back_along_trail() {
        // Serpent heading right along row 5
        let t = trail(&[(3, 5), (4, 5), (5, 5)]);
        assert_eq!(predicted_motion(&t), IVec2::new(-1, 0));

        // Up then right: steps (0,-1) and (1,0) reverse to (0,1) and (-1,0)
        let t = trail(&[(5, 5), (5, 4), (6, 4)]);
        assert_eq!(predicted_motion(&t), IVec2::new(-1, 1));
    }

    #[test]
    fn test_boss_drifts_against_serpent_motion() {
        let grid = Grid::new(30, 30);
        let mut rng = Pcg32::seed_from_u64(5);
        let mut boss = Boss::new(IVec2::new(20, 20), 0.7, 0.0);
        // Serpent moving down column 8
        let t = trail(&[(8, 1), (8, 2), (8, 3)]);
        boss.step(&t, IVec2::new(8, 4), &grid, &mut rng);
        assert_eq!(boss.direction, IVec2::new(0, -1));
        assert_eq!(boss.pos, IVec2::new(20, 19));
    }

    #[test]
    fn test_prediction_short_trail() {
        assert_eq!(predicted_motion(&trail(&[])), IVec2::ZERO);
        assert_eq!(predicted_motion(&trail(&[(2, 2)])), IVec2::ZERO);
        assert_eq!(predicted_motion(&trail(&[(2, 2), (2, 3)])), IVec2::new(0, -1));
    }

    #[test]
    fn test_always_intercepts_at_full_chance() {
        let grid = Grid::new(30, 30);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut boss = Boss::new(IVec2::new(10, 10), 0.7, 1.0);
        boss.step(&trail(&[]), IVec2::new(20, 4), &grid, &mut rng);
        assert_eq!(boss.direction, IVec2::new(1, -1));
        assert_eq!(boss.pos, IVec2::new(11, 9));
    }

    #[test]
    fn test_never_intercepts_at_zero_chance() {
        let grid = Grid::new(30, 30);
        let mut rng = Pcg32::seed_from_u64(2);
        let mut boss = Boss::new(IVec2::new(10, 10), 0.7, 0.0);
        let t = trail(&[(3, 3), (3, 4), (3, 5)]);
        boss.step(&t, IVec2::new(0, 0), &grid, &mut rng);
        assert_eq!(boss.pos, IVec2::new(10, 9));
    }

    #[test]
    fn test_wraps_at_edges() {
        let grid = Grid::new(30, 30);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut boss = Boss::new(IVec2::new(0, 29), 0.7, 0.0);
        let t = trail(&[(4, 8), (5, 7), (6, 6)]);
        boss.step(&t, IVec2::new(15, 15), &grid, &mut rng);
        assert_eq!(boss.pos, IVec2::new(29, 0));
    }

    #[test]
    fn test_paced_slower_than_serpent() {
        let grid = Grid::new(30, 30);
        let mut rng = Pcg32::seed_from_u64(4);
        let mut boss = Boss::new(IVec2::new(10, 10), 0.7, 0.0);
        let t = trail(&[(1, 1), (2, 1), (3, 1)]);
        // 16 ms frame: 89.6 of 125 ms banked, no step yet
        boss.advance(16.0, 8.0, &t, IVec2::ZERO, &grid, &mut rng);
        assert_eq!(boss.pos, IVec2::new(10, 10));
        boss.advance(16.0, 8.0, &t, IVec2::ZERO, &grid, &mut rng);
        assert_eq!(boss.pos, IVec2::new(9, 10));
    }
}
