//! Motion parameters and tick geometry.

use uav_core::require_positive;

use crate::{MotionError, MotionResult};

/// Speed plus spatial resolution.
///
/// The tick interval is derived so that one tick covers at most
/// `step_length`:
///
/// ```text
/// interval_ms       = floor(step_length / speed × 1000)
/// distance_per_tick = min(step_length, speed × interval_ms / 1000)
/// ```
///
/// A step shorter than one millisecond of flight cannot be sampled on the
/// virtual clock, so such configurations are rejected.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionConfig {
    /// Units per virtual second.
    pub speed:       f64,
    /// Target distance covered per tick.
    pub step_length: f64,
}

impl MotionConfig {
    pub fn new(speed: f64, step_length: f64) -> MotionResult<Self> {
        let cfg = Self { speed, step_length };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> MotionResult<()> {
        require_positive("speed", self.speed)?;
        require_positive("step_length", self.step_length)?;
        if raw_interval_ms(self.speed, self.step_length) < 1.0 {
            return Err(MotionError::InvalidConfiguration(format!(
                "step_length {} at speed {} is under one millisecond of flight; \
                 lengthen the step or lower the speed",
                self.step_length, self.speed
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn tick_interval_ms(&self) -> u64 {
        tick_interval_ms(self.speed, self.step_length)
    }

    #[inline]
    pub fn distance_per_tick(&self) -> f64 {
        distance_per_tick(self.speed, self.step_length)
    }
}

/// Slack for quotients such as `0.3 / 0.1` landing just under an integer.
const FLOOR_SLACK_MS: f64 = 1e-6;

fn raw_interval_ms(speed: f64, step_length: f64) -> f64 {
    (step_length / speed * 1_000.0 + FLOOR_SLACK_MS).floor()
}

pub(crate) fn tick_interval_ms(speed: f64, step_length: f64) -> u64 {
    let ms = raw_interval_ms(speed, step_length);
    if ms.is_finite() && ms >= 1.0 { ms as u64 } else { 1 }
}

pub(crate) fn distance_per_tick(speed: f64, step_length: f64) -> f64 {
    (speed * tick_interval_ms(speed, step_length) as f64 / 1_000.0).min(step_length)
}
