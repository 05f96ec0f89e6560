//! Append-only trajectory log.

use tracing::warn;

use uav_core::{Position, SimTime};

/// One recorded position.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectorySample {
    pub time:     SimTime,
    pub position: Position,
}

/// Ordered `(time, position)` samples with non-decreasing timestamps.
///
/// Never reorders and never deduplicates: two samples at the same place
/// are both kept.
#[derive(Clone, Debug, Default)]
pub struct TrajectoryRecorder {
    samples: Vec<TrajectorySample>,
}

impl TrajectoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample.
    ///
    /// A sample older than the last recorded one is rejected with a warning
    /// and `false`.
    pub fn record(&mut self, time: SimTime, position: Position) -> bool {
        if let Some(last) = self.samples.last() {
            if time < last.time {
                warn!(%time, last = %last.time, "dropping out-of-order trajectory sample");
                return false;
            }
        }
        self.samples.push(TrajectorySample { time, position });
        true
    }

    /// Copy of the full sample sequence.
    pub fn export(&self) -> Vec<TrajectorySample> {
        self.samples.clone()
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<TrajectorySample> {
        self.samples
    }

    pub fn last(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length of the polyline through all samples.
    pub fn total_distance(&self) -> f64 {
        self.samples
            .windows(2)
            .map(|w| w[0].position.distance(w[1].position))
            .sum()
    }
}
