//! Cartesian coordinate type.
//!
//! Graph coordinates are planar metres (or any consistent unit).  `z` is
//! carried for 3-D graph descriptions and defaults to `0.0`; coverage
//! binning only looks at `x` and `y`.  All components are `f64` so recorded
//! trajectories keep full precision.

/// A point in the simulation's Cartesian frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A point on the `z = 0` plane.
    #[inline]
    pub fn planar(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Position) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_sq(self, other: Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Linear interpolation: `t = 0` yields `self`, `t = 1` yields `other`.
    #[inline]
    pub fn lerp(self, other: Position, t: f64) -> Position {
        Position {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl std::fmt::Display for Position {
    /// Shortest round-trip representation of each component, so printed
    /// positions parse back to the exact same `f64`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
