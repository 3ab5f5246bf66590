//! Host driver
//!
//! Owns one session plus the collaborators that outlive it (store, audio,
//! preferences) and runs the per-frame sequence: restart edge, simulation,
//! event dispatch, high-score persistence.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::{self, AudioSink};
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::renderer::FrameSnapshot;
use crate::settings::Settings;
use crate::sim::{FrameInput, GameEvent, GamePhase, GameState, advance_frame};
use crate::tuning::Tuning;

pub struct Game<S: KeyValueStore, A: AudioSink> {
    pub state: GameState,
    store: S,
    audio: A,
    settings: Settings,
    high_score: HighScore,
    /// Source of seeds for restarted sessions
    seeds: Pcg32,
}

impl<S: KeyValueStore, A: AudioSink> Game<S, A> {
    /// Load persisted scalars and create an idle session
    pub fn new(tuning: Tuning, seed: u64, store: S, audio: A) -> Self {
        let high_score = HighScore::load(&store);
        let settings = Settings::load(&store);
        let mut state = GameState::new(tuning, seed);
        state.high_score = high_score.best;
        Self {
            state,
            store,
            audio,
            settings,
            high_score,
            seeds: Pcg32::seed_from_u64(seed.wrapping_add(1)),
        }
    }

    pub fn start(&mut self) {
        self.state.start();
        self.flush_events();
    }

    /// Throw the current run away and begin a fresh one
    pub fn restart(&mut self) {
        let seed = self.seeds.random::<u64>();
        log::info!("Restarting (seed {seed})");
        self.state.restart(seed);
        self.flush_events();
    }

    /// Run one animation frame. Returns the number of serpent ticks executed.
    pub fn frame(&mut self, timestamp_ms: f64, input: &FrameInput) -> u32 {
        if input.restart && self.state.phase == GamePhase::GameOver {
            self.restart();
        }
        let ticks = advance_frame(&mut self.state, input, timestamp_ms);
        self.flush_events();
        ticks
    }

    /// Dispatch queued events and persist a beaten record on death
    fn flush_events(&mut self) {
        let events = self.state.drain_events();
        if events.is_empty() {
            return;
        }
        audio::dispatch(&events, self.settings.sound_on, &mut self.audio);
        if events.contains(&GameEvent::Death) && self.high_score.submit(self.state.score) {
            log::info!("New high score: {}", self.high_score.best);
            self.high_score.save(&mut self.store);
        }
    }

    /// Flip the sound preference and persist it
    pub fn toggle_sound(&mut self) -> bool {
        let on = self.settings.toggle_sound();
        if !on {
            self.audio.stop_all();
        }
        self.settings.save(&mut self.store);
        on
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state, self.settings.sound_on)
    }

    pub fn sound_on(&self) -> bool {
        self.settings.sound_on
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::persistence::{self, MemoryStore};
    use crate::sim::Heading;

    fn game() -> Game<MemoryStore, RecordingAudio> {
        Game::new(Tuning::default(), 7, MemoryStore::new(), RecordingAudio::default())
    }

    /// Drive the serpent straight up into the wall
    fn crash(game: &mut Game<MemoryStore, RecordingAudio>, mut t: f64) -> f64 {
        let up = FrameInput {
            heading: Some(Heading::Up),
            ..FrameInput::default()
        };
        while game.phase() == GamePhase::Running && t < 60_000.0 {
            game.state.orb = None;
            game.state.demons = Default::default();
            game.frame(t, &up);
            t += 125.0;
        }
        t
    }

    #[test]
    fn test_start_plays_ambient() {
        let mut game = game();
        game.start();
        assert_eq!(game.audio().played, vec![GameEvent::AmbientStart]);
    }

    #[test]
    fn test_death_persists_beaten_record() {
        let mut game = game();
        game.start();
        game.state.score = 70;
        crash(&mut game, 1000.0);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.high_score(), 70);
        assert_eq!(persistence::read_high_score(game.store()), Ok(70));
        assert_eq!(game.audio().played.last(), Some(&GameEvent::Death));
    }

    #[test]
    fn test_lower_score_keeps_record() {
        let mut store = MemoryStore::new();
        persistence::write_high_score(&mut store, 500).unwrap();
        let mut game = Game::new(Tuning::default(), 7, store, RecordingAudio::default());
        assert_eq!(game.state.high_score, 500);
        game.start();
        game.state.score = 20;
        crash(&mut game, 1000.0);
        assert_eq!(game.high_score(), 500);
        assert_eq!(persistence::read_high_score(game.store()), Ok(500));
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut game = game();
        game.start();
        let restart = FrameInput {
            restart: true,
            ..FrameInput::default()
        };
        let seed = game.state.seed;
        game.frame(1000.0, &restart);
        assert_eq!(game.state.seed, seed);

        let t = crash(&mut game, 1100.0);
        game.frame(t, &restart);
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.state.score, 0);
        assert_eq!(game.state.serpent.len(), 3);
    }

    #[test]
    fn test_sound_toggle_persists_and_mutes() {
        let mut game = game();
        assert!(!game.toggle_sound());
        assert_eq!(persistence::read_sound_pref(game.store()), Ok(false));
        assert_eq!(game.audio().stops, 1);
        game.start();
        assert!(game.audio().played.is_empty());
        assert!(!game.snapshot().sound_on);
    }
}
