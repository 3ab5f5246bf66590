//! Web Audio sink
//!
//! Procedurally generated voices for each game event, no asset files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::AudioSink;
use crate::sim::GameEvent;

/// Web Audio backed sink
pub struct WebAudio {
    ctx: Option<AudioContext>,
    volume: f32,
    /// Oscillators of the running ambient drone
    ambient: Vec<OscillatorNode>,
}

impl Default for WebAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudio {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: 0.8,
            ambient: Vec::new(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Orb eaten - bright rising chime
    fn play_pickup(ctx: &AudioContext, vol: f32) {
        for (i, freq) in [660.0, 880.0, 1320.0].iter().enumerate() {
            let delay = i as f64 * 0.06;
            if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Demon spawn - low sawtooth growl
    fn play_growl(ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        if let Some((osc, gain)) = Self::create_osc(ctx, 90.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.45)
                .ok();
            osc.frequency().set_value_at_time(90.0, t).ok();
            osc.frequency().set_value_at_time(70.0, t + 0.1).ok();
            osc.frequency().set_value_at_time(85.0, t + 0.2).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(45.0, t + 0.45)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }
        if let Some((osc, gain)) = Self::create_osc(ctx, 45.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.35)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.4).ok();
        }
    }

    /// Boss wakes - descending dissonant pair
    fn play_boss(ctx: &AudioContext, vol: f32) {
        for freq in [220.0, 233.0] {
            if let Some((osc, gain)) = Self::create_osc(ctx, freq, OscillatorType::Triangle) {
                let t = ctx.current_time();
                gain.gain().set_value_at_time(0.01, t).ok();
                gain.gain()
                    .linear_ramp_to_value_at_time(vol * 0.3, t + 0.2)
                    .ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 1.2)
                    .ok();
                osc.frequency().set_value_at_time(freq, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(freq / 4.0, t + 1.2)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 1.3).ok();
            }
        }
    }

    /// Death - sub bass drop
    fn play_death(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = Self::create_osc(ctx, 120.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.6, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 1.5)
            .ok();
        osc.frequency().set_value_at_time(120.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(25.0, t + 1.5)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 1.6).ok();
    }

    /// Ambient - detuned drone that runs until stopped
    fn start_ambient(&mut self, vol: f32) {
        self.stop_all();
        let Some(ctx) = &self.ctx else { return };
        let t = ctx.current_time();
        for freq in [55.0, 55.7, 82.5] {
            if let Some((osc, gain)) = Self::create_osc(ctx, freq, OscillatorType::Sine) {
                gain.gain().set_value_at_time(0.001, t).ok();
                gain.gain()
                    .linear_ramp_to_value_at_time(vol * 0.08, t + 2.0)
                    .ok();
                osc.start().ok();
                self.ambient.push(osc);
            }
        }
    }
}

impl AudioSink for WebAudio {
    fn play(&mut self, event: GameEvent) {
        let vol = self.volume;
        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match event {
            GameEvent::Pickup => Self::play_pickup(ctx, vol),
            GameEvent::DemonSpawn => Self::play_growl(ctx, vol),
            GameEvent::BossSpawn => Self::play_boss(ctx, vol),
            GameEvent::Death => {
                Self::play_death(ctx, vol);
                self.stop_all();
            }
            GameEvent::AmbientStart => self.start_ambient(vol),
        }
    }

    fn stop_all(&mut self) {
        for osc in self.ambient.drain(..) {
            osc.stop().ok();
        }
    }
}
