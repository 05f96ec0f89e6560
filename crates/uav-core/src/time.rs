//! Virtual time model.
//!
//! # Design
//!
//! Virtual time is a monotonically increasing millisecond counter held in
//! `SimTime`.  It is advanced only by the scheduler collaborator
//! (`uav-schedule`) as it pops events; nothing in the core reads a wall
//! clock.
//!
//! Using an integer as the canonical time unit means all scheduling
//! arithmetic is exact (no floating-point drift) and comparisons are O(1).
//! Conversions to and from fractional seconds happen only at the edges:
//! configuration input and report output.

use std::fmt;

const MILLIS_PER_SEC: u64 = 1_000;

/// An absolute virtual timestamp, in milliseconds since simulation start.
///
/// Stored as `u64`: at millisecond resolution a run could last ~585
/// million years before overflow.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);
    pub const MAX: SimTime = SimTime(u64::MAX);

    #[inline]
    pub fn from_millis(ms: u64) -> SimTime {
        SimTime(ms)
    }

    /// Convert fractional seconds, rounding to the nearest millisecond.
    /// Negative and NaN inputs saturate to zero.
    pub fn from_secs_f64(secs: f64) -> SimTime {
        let ms = (secs * MILLIS_PER_SEC as f64).round();
        if ms.is_nan() || ms <= 0.0 {
            SimTime::ZERO
        } else if ms >= u64::MAX as f64 {
            SimTime::MAX
        } else {
            SimTime(ms as u64)
        }
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / MILLIS_PER_SEC as f64
    }

    /// Return the time `ms` milliseconds after `self` (saturating).
    #[inline]
    pub fn offset(self, ms: u64) -> SimTime {
        SimTime(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed from `earlier` to `self`, zero if `earlier`
    /// is in the future.
    #[inline]
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: u64) -> SimTime {
        self.offset(rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: SimTime) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}s", self.0 / MILLIS_PER_SEC, self.0 % MILLIS_PER_SEC)
    }
}
