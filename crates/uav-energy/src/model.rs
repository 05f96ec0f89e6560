//! Battery state and depletion.

use uav_core::require_positive;

use crate::{ConsumptionModel, EnergyResult};

/// Remaining energy at or below `capacity × DEPLETION_EPS` counts as empty,
/// so float round-off in `consume` cannot leave a sliver that never drains.
const DEPLETION_EPS: f64 = 1e-12;

/// Energy bookkeeping for one agent.
///
/// `capacity` is the usable energy budget in the same unit as
/// [`ConsumptionModel::cost`].  `voltage` only scales
/// [`nominal_energy`](Self::nominal_energy) for reporting.
///
/// Invariants: `0 <= consumed <= capacity`, and `consumed` never decreases.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyModel {
    voltage:     f64,
    capacity:    f64,
    consumed:    f64,
    consumption: ConsumptionModel,
}

impl EnergyModel {
    /// A full battery with the default [`ConsumptionModel`].
    ///
    /// Fails unless both `voltage` and `capacity` are finite and > 0.
    pub fn new(voltage: f64, capacity: f64) -> EnergyResult<Self> {
        Ok(Self {
            voltage:     require_positive("voltage", voltage)?,
            capacity:    require_positive("capacity", capacity)?,
            consumed:    0.0,
            consumption: ConsumptionModel::default(),
        })
    }

    pub fn with_consumption(mut self, consumption: ConsumptionModel) -> Self {
        self.consumption = consumption;
        self
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Draw the energy needed to fly `distance` at `speed`.
    ///
    /// Returns the energy actually drawn, which is less than the model cost
    /// when the battery runs out part-way.
    pub fn consume(&mut self, distance: f64, speed: f64) -> f64 {
        let want = self.consumption.cost(distance, speed);
        let drawn = want.min(self.remaining_energy()).max(0.0);
        self.consumed = (self.consumed + drawn).min(self.capacity);
        if self.capacity - self.consumed <= self.capacity * DEPLETION_EPS {
            self.consumed = self.capacity;
        }
        drawn
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    #[inline]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    #[inline]
    pub fn consumed(&self) -> f64 {
        self.consumed
    }

    #[inline]
    pub fn consumption(&self) -> ConsumptionModel {
        self.consumption
    }

    #[inline]
    pub fn remaining_energy(&self) -> f64 {
        (self.capacity - self.consumed).max(0.0)
    }

    /// Remaining share of capacity, always within `[0, 1]`.
    #[inline]
    pub fn remaining_fraction(&self) -> f64 {
        (self.remaining_energy() / self.capacity).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.remaining_energy() <= self.capacity * DEPLETION_EPS
    }

    /// Distance the remaining energy covers at `speed`.
    pub fn affordable_distance(&self, speed: f64) -> f64 {
        let rate = self.consumption.rate(speed);
        if rate > 0.0 { self.remaining_energy() / rate } else { f64::INFINITY }
    }

    /// `voltage × capacity`.
    pub fn nominal_energy(&self) -> f64 {
        self.voltage * self.capacity
    }
}
