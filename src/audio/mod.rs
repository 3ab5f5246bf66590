//! Audio dispatch
//!
//! The simulation only raises `GameEvent`s. Hosts plug in a sink that turns
//! them into sound; `dispatch` applies the player's sound preference so no
//! sink ever hears an event while sound is off.

use crate::sim::GameEvent;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

/// Something that can voice game events
pub trait AudioSink {
    fn play(&mut self, event: GameEvent);

    /// Silence anything long-running (the ambient loop)
    fn stop_all(&mut self) {}
}

/// Forward events to `sink`, or drop them all when sound is off
pub fn dispatch(events: &[GameEvent], sound_on: bool, sink: &mut dyn AudioSink) {
    if !sound_on {
        return;
    }
    for &event in events {
        sink.play(event);
    }
}

/// Sink for headless runs: just logs what would have played
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, event: GameEvent) {
        log::debug!("sound: {}", event.name());
    }
}

/// Sink that remembers every event it was asked to play
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingAudio {
    pub played: Vec<GameEvent>,
    pub stops: u32,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, event: GameEvent) {
        self.played.push(event);
    }

    fn stop_all(&mut self) {
        self.stops += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_in_order() {
        let mut sink = RecordingAudio::default();
        dispatch(
            &[GameEvent::DemonSpawn, GameEvent::Pickup],
            true,
            &mut sink,
        );
        assert_eq!(sink.played, vec![GameEvent::DemonSpawn, GameEvent::Pickup]);
    }

    #[test]
    fn test_sound_off_plays_nothing() {
        let mut sink = RecordingAudio::default();
        dispatch(&[GameEvent::Death, GameEvent::AmbientStart], false, &mut sink);
        assert!(sink.played.is_empty());
    }
}
