//! Frame-to-tick conversion
//!
//! The host calls back once per animation frame with a timestamp. `FrameClock`
//! turns the elapsed milliseconds into whole simulation ticks at the current
//! tick rate; the fraction left over is carried into the next frame. The rate
//! is passed in on every drain because feeding can raise it mid-frame.
//!
//! `Pacer` is the same accumulator pattern scaled by a speed factor, used by
//! demons and the boss to move at their own pace relative to the serpent.

/// Duration of one tick in milliseconds at the given rate
#[inline]
pub fn tick_duration_ms(tick_rate: f32) -> f64 {
    1000.0 / tick_rate as f64
}

/// Converts variable frame timing into discrete ticks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
    accumulator_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame timestamp and return ms elapsed since the previous one.
    ///
    /// The first observed frame, and any timestamp that runs backwards, yields 0.
    pub fn observe(&mut self, timestamp_ms: f64) -> f64 {
        let elapsed = match self.last_timestamp {
            Some(last) => (timestamp_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);
        elapsed
    }

    /// Bank elapsed time for tick consumption
    pub fn accumulate(&mut self, elapsed_ms: f64) {
        self.accumulator_ms += elapsed_ms;
    }

    /// Consume one tick if enough time is banked
    pub fn try_consume(&mut self, tick_rate: f32) -> bool {
        let duration = tick_duration_ms(tick_rate);
        if self.accumulator_ms >= duration {
            self.accumulator_ms -= duration;
            true
        } else {
            false
        }
    }

}

/// Sub-tick accumulator for entities slower than the serpent
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pacer {
    accumulator_ms: f64,
}

impl Pacer {
    /// Bank `elapsed_ms * tick_rate * speed_factor` and return how many whole
    /// steps of `1000 / tick_rate` fit into the bank.
    pub fn advance(&mut self, elapsed_ms: f64, tick_rate: f32, speed_factor: f32) -> u32 {
        self.accumulator_ms += elapsed_ms * tick_rate as f64 * speed_factor as f64;

        let duration = tick_duration_ms(tick_rate);
        let mut steps = 0;
        while self.accumulator_ms >= duration {
            self.accumulator_ms -= duration;
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_has_no_elapsed_time() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.observe(1234.0), 0.0);
        assert_eq!(clock.observe(1250.0), 16.0);
    }

    #[test]
    fn test_backwards_timestamp_is_ignored() {
        let mut clock = FrameClock::new();
        clock.observe(500.0);
        assert_eq!(clock.observe(400.0), 0.0);
        assert_eq!(clock.observe(410.0), 10.0);
    }

    #[test]
    fn test_drain_carries_remainder() {
        let mut clock = FrameClock::new();
        // 8 ticks/s -> 125 ms per tick
        clock.accumulate(300.0);
        let mut ticks = 0;
        while clock.try_consume(8.0) {
            ticks += 1;
        }
        assert_eq!(ticks, 2);

        // 50 ms carried + 75 ms makes exactly one more tick
        clock.accumulate(75.0);
        assert!(clock.try_consume(8.0));
        assert!(!clock.try_consume(8.0));
    }

    #[test]
    fn test_rate_is_read_per_drain() {
        let mut clock = FrameClock::new();
        clock.accumulate(240.0);
        assert!(clock.try_consume(8.0)); // 125 ms
        assert!(!clock.try_consume(8.0)); // 115 left
        assert!(clock.try_consume(10.0)); // 100 ms at the faster rate
    }

    #[test]
    fn test_pacer_slower_than_player() {
        let mut pacer = Pacer::default();
        // One 16 ms frame at 8 ticks/s and factor 0.7 banks 89.6 ms of a 125 ms step
        assert_eq!(pacer.advance(16.0, 8.0, 0.7), 0);
        assert_eq!(pacer.advance(16.0, 8.0, 0.7), 1);
        // 54.2 ms carried, so a third frame (143.8) steps again
        assert_eq!(pacer.advance(16.0, 8.0, 0.7), 1);
    }

    #[test]
    fn test_pacer_multiple_steps() {
        let mut pacer = Pacer::default();
        // 125 ms * 8 * 1.0 = 1000 ms banked = 8 steps of 125 ms
        assert_eq!(pacer.advance(125.0, 8.0, 1.0), 8);
        // Nothing carried over
        assert_eq!(pacer.advance(15.0, 8.0, 1.0), 0);
    }
}
