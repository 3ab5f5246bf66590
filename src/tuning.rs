//! Data-driven game balance
//!
//! Defaults come from `consts`; a JSON document may override any subset of
//! fields. Values are checked by `validate` so a bad file is rejected as a
//! whole instead of producing a broken session.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub grid_cols: i32,
    pub grid_rows: i32,
    pub base_tick_rate: f32,
    pub tick_rate_step: f32,
    pub feeds_per_speedup: u32,
    pub demon_speed_factor: f32,
    pub boss_speed_factor: f32,
    pub trail_capacity: usize,
    pub demon_trail_length: usize,
    pub boss_feed_threshold: u32,
    pub boss_intercept_chance: f32,
    pub score_per_orb: u64,
    pub orb_placement_attempts: u32,
    /// Cap on ticks drained per frame; `None` drains everything banked
    pub max_ticks_per_frame: Option<u32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            grid_cols: GRID_COLS,
            grid_rows: GRID_ROWS,
            base_tick_rate: BASE_TICK_RATE,
            tick_rate_step: TICK_RATE_STEP,
            feeds_per_speedup: FEEDS_PER_SPEEDUP,
            demon_speed_factor: DEMON_SPEED_FACTOR,
            boss_speed_factor: BOSS_SPEED_FACTOR,
            trail_capacity: TRAIL_CAPACITY,
            demon_trail_length: DEMON_TRAIL_LENGTH,
            boss_feed_threshold: BOSS_FEED_THRESHOLD,
            boss_intercept_chance: BOSS_INTERCEPT_CHANCE,
            score_per_orb: SCORE_PER_ORB,
            orb_placement_attempts: ORB_PLACEMENT_ATTEMPTS,
            max_ticks_per_frame: None,
        }
    }
}

/// Why a tuning document was rejected
#[derive(Debug)]
pub enum TuningError {
    Parse(serde_json::Error),
    OutOfRange { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid tuning JSON: {e}"),
            Self::OutOfRange { field, reason } => write!(f, "tuning field `{field}` {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::OutOfRange { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            if ok {
                Ok(())
            } else {
                Err(TuningError::OutOfRange { field, reason })
            }
        }

        check(self.grid_cols > 0, "grid_cols", "must be positive")?;
        check(self.grid_rows > 0, "grid_rows", "must be positive")?;
        check(self.base_tick_rate > 0.0, "base_tick_rate", "must be positive")?;
        check(self.tick_rate_step >= 0.0, "tick_rate_step", "must not be negative")?;
        check(self.feeds_per_speedup > 0, "feeds_per_speedup", "must be positive")?;
        check(
            self.demon_speed_factor > 0.0 && self.demon_speed_factor <= 1.0,
            "demon_speed_factor",
            "must be in (0, 1]",
        )?;
        check(
            self.boss_speed_factor > 0.0 && self.boss_speed_factor <= 1.0,
            "boss_speed_factor",
            "must be in (0, 1]",
        )?;
        check(self.trail_capacity > 0, "trail_capacity", "must be positive")?;
        check(self.demon_trail_length > 0, "demon_trail_length", "must be positive")?;
        check(
            (0.0..=1.0).contains(&self.boss_intercept_chance),
            "boss_intercept_chance",
            "must be in [0, 1]",
        )?;
        check(
            self.max_ticks_per_frame != Some(0),
            "max_ticks_per_frame",
            "must be positive when set",
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "grid_cols": 40, "max_ticks_per_frame": 8 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.grid_cols, 40);
        assert_eq!(tuning.grid_rows, GRID_ROWS);
        assert_eq!(tuning.max_ticks_per_frame, Some(8));
        assert_eq!(tuning.demon_trail_length, DEMON_TRAIL_LENGTH);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = Tuning::from_json(r#"{ "boss_intercept_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::OutOfRange {
                field: "boss_intercept_chance",
                ..
            }
        ));
        assert!(err.to_string().contains("boss_intercept_chance"));
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Tuning::from_json("{ grid_cols: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().expect("serializes");
        assert_eq!(Tuning::from_json(&json).expect("parses"), tuning);
    }
}
