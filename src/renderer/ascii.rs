//! Text presenter for terminals and tests

use super::{FrameSnapshot, Presenter};
use crate::sim::GamePhase;

pub const EMPTY: char = '.';
pub const HEAD: char = '@';
pub const BODY: char = 'o';
pub const DEMON: char = 'd';
pub const BOSS: char = 'B';
pub const ORB: char = '*';

/// Renders frames as a grid of characters plus a status line
#[derive(Debug, Default, Clone)]
pub struct AsciiPresenter {
    last: String,
}

impl AsciiPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently presented frame
    pub fn last_frame(&self) -> &str {
        &self.last
    }

    pub fn render(frame: &FrameSnapshot) -> String {
        let cols = frame.cols.max(0) as usize;
        let rows = frame.rows.max(0) as usize;
        let mut cells = vec![vec![EMPTY; cols]; rows];
        let mut put = |pos: glam::IVec2, c: char| {
            if pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < cols && (pos.y as usize) < rows {
                cells[pos.y as usize][pos.x as usize] = c;
            }
        };

        // Later draws win
        if let Some(orb) = frame.orb {
            put(orb, ORB);
        }
        for &seg in frame.segments.iter().skip(1) {
            put(seg, BODY);
        }
        for &demon in &frame.demons {
            put(demon, DEMON);
        }
        if let Some(boss) = frame.boss {
            put(boss, BOSS);
        }
        if let Some(head) = frame.head() {
            put(head, HEAD);
        }

        let phase = match frame.phase {
            GamePhase::Idle => "READY",
            GamePhase::Running => "RUNNING",
            GamePhase::Paused => "PAUSED",
            GamePhase::GameOver => "GAME OVER",
        };
        let mut out = format!(
            "score {}  best {}  rate {:.1}  {}  sound {}\n",
            frame.score,
            frame.high_score,
            frame.tick_rate,
            phase,
            if frame.sound_on { "on" } else { "off" }
        );
        for row in cells {
            out.extend(row);
            out.push('\n');
        }
        for line in frame.hud().overlay().unwrap_or_default() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

impl Presenter for AsciiPresenter {
    fn present(&mut self, frame: &FrameSnapshot, _now_ms: f64) {
        self.last = Self::render(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    fn frame() -> FrameSnapshot {
        FrameSnapshot {
            phase: GamePhase::Running,
            score: 20,
            high_score: 50,
            tick_rate: 8.0,
            cols: 5,
            rows: 3,
            segments: vec![IVec2::new(2, 1), IVec2::new(1, 1), IVec2::new(0, 1)],
            demons: vec![IVec2::new(0, 1)],
            boss: Some(IVec2::new(4, 2)),
            orb: Some(IVec2::new(4, 0)),
            particles: Vec::new(),
            embers: Vec::new(),
            sound_on: true,
        }
    }

    #[test]
    fn test_render_layout() {
        let text = AsciiPresenter::render(&frame());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "score 20  best 50  rate 8.0  RUNNING  sound on");
        assert_eq!(lines[1], "....*");
        assert_eq!(lines[2], "do@..");
        assert_eq!(lines[3], "....B");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_offgrid_head_is_skipped() {
        let mut f = frame();
        f.phase = GamePhase::GameOver;
        f.segments[0] = IVec2::new(-1, 1);
        let text = AsciiPresenter::render(&f);
        assert!(text.starts_with("score 20  best 50  rate 8.0  GAME OVER"));
        assert!(!text.contains(HEAD));
        assert!(text.ends_with("Score: 20\nHigh Score: 50\nPress R to restart\n"));
    }

    #[test]
    fn test_present_keeps_last_frame() {
        let mut presenter = AsciiPresenter::new();
        presenter.present(&frame(), 0.0);
        let mut paused = frame();
        paused.phase = GamePhase::Paused;
        presenter.present(&paused, 16.0);
        assert!(presenter.last_frame().contains('@'));
        assert!(presenter.last_frame().contains("PAUSED"));
    }
}
