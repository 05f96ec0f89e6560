//! Energy cost of motion.
//!
//! ```text
//! energy = distance × (per_unit + per_unit_speed × speed)
//! ```
//!
//! Linear in distance and non-decreasing in speed.  The defaults
//! (`per_unit = 1`, `per_unit_speed = 0`) make one unit of distance cost
//! one unit of capacity regardless of speed.

use crate::{EnergyError, EnergyResult};

/// Coefficients are private so every instance has passed [`ConsumptionModel::new`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawConsumption"))]
pub struct ConsumptionModel {
    per_unit:       f64,
    per_unit_speed: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawConsumption {
    per_unit:       f64,
    per_unit_speed: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawConsumption> for ConsumptionModel {
    type Error = EnergyError;

    fn try_from(raw: RawConsumption) -> EnergyResult<Self> {
        ConsumptionModel::new(raw.per_unit, raw.per_unit_speed)
    }
}

impl ConsumptionModel {
    /// Both coefficients must be finite and non-negative, and at least one
    /// must be positive.
    pub fn new(per_unit: f64, per_unit_speed: f64) -> EnergyResult<Self> {
        for (name, v) in [("energy_per_unit", per_unit), ("energy_per_unit_speed", per_unit_speed)] {
            if !v.is_finite() || v < 0.0 {
                return Err(EnergyError::InvalidConfiguration(format!(
                    "{name} must be a finite number >= 0, got {v}"
                )));
            }
        }
        if per_unit == 0.0 && per_unit_speed == 0.0 {
            return Err(EnergyError::InvalidConfiguration(
                "consumption model must cost something per unit distance".into(),
            ));
        }
        Ok(Self { per_unit, per_unit_speed })
    }

    /// Energy per unit distance.
    pub fn per_unit(&self) -> f64 {
        self.per_unit
    }

    /// Additional energy per unit distance per unit speed.
    pub fn per_unit_speed(&self) -> f64 {
        self.per_unit_speed
    }

    /// Energy per unit distance at `speed`.
    #[inline]
    pub fn rate(&self, speed: f64) -> f64 {
        self.per_unit + self.per_unit_speed * speed.max(0.0)
    }

    /// Energy to fly `distance` at `speed`.  Negative inputs count as zero.
    #[inline]
    pub fn cost(&self, distance: f64, speed: f64) -> f64 {
        distance.max(0.0) * self.rate(speed)
    }
}

impl Default for ConsumptionModel {
    fn default() -> Self {
        Self { per_unit: 1.0, per_unit_speed: 0.0 }
    }
}
