//! Visual-only effects: pickup bursts and drifting embers
//!
//! Lives beside the simulation so the presenter gets everything in one
//! snapshot, but draws from its own RNG stream so gameplay stays reproducible
//! no matter how many particles are spawned.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A short-lived spark in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per millisecond
    pub vel: Vec2,
    /// Milliseconds left
    pub life: f32,
}

/// An ambient ember that respawns somewhere else when it burns out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ember {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
}

#[derive(Debug, Clone)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub embers: Vec<Ember>,
    /// Canvas size in pixels
    bounds: Vec2,
    rng: Pcg32,
}

impl Effects {
    pub fn new(bounds: Vec2, seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            embers: Vec::new(),
            bounds,
            // Separate stream from gameplay
            rng: Pcg32::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15),
        }
    }

    /// Scatter a fresh set of embers across the canvas
    pub fn spawn_embers(&mut self) {
        self.embers.clear();
        for _ in 0..EMBER_COUNT {
            let ember = Ember {
                pos: self.random_point(),
                vel: Vec2::new(
                    self.rng.random_range(-0.5..0.5),
                    self.rng.random_range(-0.5..0.5),
                ),
                life: self.rng.random_range(1000.0..2000.0),
            };
            self.embers.push(ember);
        }
    }

    /// Burst of sparks centred on a grid cell
    pub fn burst_at_cell(&mut self, col: i32, row: i32) {
        let center = Vec2::new(
            col as f32 * CELL_SIZE + CELL_SIZE / 2.0,
            row as f32 * CELL_SIZE + CELL_SIZE / 2.0,
        );
        for _ in 0..PARTICLE_BURST {
            let vel = Vec2::new(
                self.rng.random_range(-PARTICLE_SPEED_MAX..PARTICLE_SPEED_MAX),
                self.rng.random_range(-PARTICLE_SPEED_MAX..PARTICLE_SPEED_MAX),
            );
            self.particles.push(Particle {
                pos: center,
                vel,
                life: PARTICLE_LIFETIME_MS,
            });
        }
    }

    /// Animate by one frame
    pub fn update(&mut self, elapsed_ms: f32) {
        for p in self.particles.iter_mut() {
            p.pos += p.vel * elapsed_ms;
            p.life -= elapsed_ms;
        }
        self.particles.retain(|p| p.life > 0.0);

        for i in 0..self.embers.len() {
            let ember = &mut self.embers[i];
            ember.pos += ember.vel * elapsed_ms;
            ember.life -= elapsed_ms;
            if ember.life <= 0.0 {
                let pos = self.random_point();
                let life = self.rng.random_range(1000.0..2000.0);
                let ember = &mut self.embers[i];
                ember.pos = pos;
                ember.life = life;
            }
        }
    }

    fn random_point(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.random_range(0.0..self.bounds.x.max(1.0)),
            self.rng.random_range(0.0..self.bounds.y.max(1.0)),
        )
    }
}
