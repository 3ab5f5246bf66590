//! Presentation boundary
//!
//! The simulation never draws. Each frame the host captures a read-only
//! `FrameSnapshot` and hands it to a `Presenter`.

use serde::{Deserialize, Serialize};

use crate::sim::{Ember, GamePhase, GameState, Particle, Position};

pub mod ascii;
#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use ascii::AsciiPresenter;
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPresenter;

/// Everything a presenter may look at for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub tick_rate: f32,
    pub cols: i32,
    pub rows: i32,
    /// Head first
    pub segments: Vec<Position>,
    /// Followers that currently have a position
    pub demons: Vec<Position>,
    pub boss: Option<Position>,
    pub orb: Option<Position>,
    pub particles: Vec<Particle>,
    pub embers: Vec<Ember>,
    pub sound_on: bool,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState, sound_on: bool) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            high_score: state.high_score,
            tick_rate: state.tick_rate,
            cols: state.grid.cols,
            rows: state.grid.rows,
            segments: state.serpent.segments().iter().copied().collect(),
            demons: state.demons.positions().collect(),
            boss: state.boss.as_ref().map(|b| b.pos),
            orb: state.orb,
            particles: state.fx.particles.clone(),
            embers: state.fx.embers.clone(),
            sound_on,
        }
    }

    pub fn head(&self) -> Option<Position> {
        self.segments.first().copied()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            high_score: self.high_score,
            phase: self.phase,
            sound_on: self.sound_on,
        }
    }
}

/// The text state around the board. Hosts redraw their DOM only when it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub high_score: u64,
    pub phase: GamePhase,
    pub sound_on: bool,
}

impl Hud {
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn high_score_text(&self) -> String {
        format!("High Score: {}", self.high_score)
    }

    pub fn sound_icon(&self) -> &'static str {
        if self.sound_on { "\u{1F50A}" } else { "\u{1F507}" }
    }

    /// Lines for the centre overlay; title first. `None` while playing.
    pub fn overlay(&self) -> Option<Vec<String>> {
        match self.phase {
            GamePhase::Paused => Some(vec!["PAUSED".to_string()]),
            GamePhase::GameOver => Some(vec![
                "GAME OVER".to_string(),
                self.score_text(),
                self.high_score_text(),
                "Press R to restart".to_string(),
            ]),
            GamePhase::Idle | GamePhase::Running => None,
        }
    }
}

/// Scale that fits a `width` x `height` canvas into 90% of the window
pub fn fit_scale(window_w: f64, window_h: f64, width: f64, height: f64) -> f64 {
    if width <= 0.0 || height <= 0.0 {
        return 1.0;
    }
    (window_w * 0.9 / width).min(window_h * 0.9 / height)
}

/// Consumer of frame snapshots
pub trait Presenter {
    /// Draw one frame. `now_ms` drives purely cosmetic animation.
    fn present(&mut self, frame: &FrameSnapshot, now_ms: f64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_reflects_state() {
        let mut state = GameState::new(Tuning::default(), 3);
        state.start();
        state.score = 30;
        let frame = FrameSnapshot::capture(&state, false);
        assert_eq!(frame.phase, GamePhase::Running);
        assert_eq!(frame.score, 30);
        assert_eq!(frame.segments.len(), 3);
        assert_eq!(frame.head(), Some(state.serpent.head()));
        assert_eq!(frame.orb, state.orb);
        assert!(frame.demons.is_empty());
        assert_eq!(frame.boss, None);
        assert_eq!(frame.embers.len(), crate::consts::EMBER_COUNT);
        assert!(!frame.sound_on);
    }

    #[test]
    fn test_game_over_overlay_reports_final_scores() {
        let mut state = GameState::new(Tuning::default(), 3);
        state.start();
        let playing = FrameSnapshot::capture(&state, true).hud();
        assert_eq!(playing.overlay(), None);

        state.score = 40;
        state.game_over();
        let over = FrameSnapshot::capture(&state, true).hud();
        assert_ne!(over, playing);
        assert_eq!(over.high_score_text(), "High Score: 40");
        assert_eq!(
            over.overlay(),
            Some(vec![
                "GAME OVER".to_string(),
                "Score: 40".to_string(),
                "High Score: 40".to_string(),
                "Press R to restart".to_string(),
            ])
        );
    }

    #[test]
    fn test_fit_scale_uses_tighter_axis() {
        // 600x600 board in a 1000x800 window: height limits to 720 px
        assert!((fit_scale(1000.0, 800.0, 600.0, 600.0) - 1.2).abs() < 1e-9);
        assert!((fit_scale(400.0, 2000.0, 600.0, 600.0) - 0.6).abs() < 1e-9);
        assert_eq!(fit_scale(1000.0, 800.0, 0.0, 600.0), 1.0);
    }
}
