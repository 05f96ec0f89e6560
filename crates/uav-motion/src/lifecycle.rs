//! Agent life cycle.
//!
//! ```text
//!            start()              pause()
//!   Idle ───────────► Moving ◄──────────────► Paused
//!    │                  │        resume()       │
//!    │ halt()           │ depleted / dead end   │ halt()
//!    │                  │ / halt()              │
//!    └──────────────► Halted ◄──────────────────┘
//! ```
//!
//! `Halted` is terminal.

use std::fmt;

use uav_core::NodeId;

/// Why the agent stopped for good.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HaltReason {
    /// The battery ran out.
    Depleted,
    /// The agent stood on this node and it had no outgoing edge.
    DeadEnd(NodeId),
    /// `halt()` was called.
    External,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lifecycle {
    #[default]
    Idle,
    Moving,
    Paused,
    Halted(HaltReason),
}

impl Lifecycle {
    #[inline]
    pub fn is_halted(self) -> bool {
        matches!(self, Lifecycle::Halted(_))
    }

    #[inline]
    pub fn is_moving(self) -> bool {
        self == Lifecycle::Moving
    }

    pub fn halt_reason(self) -> Option<HaltReason> {
        match self {
            Lifecycle::Halted(r) => Some(r),
            _ => None,
        }
    }
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HaltReason::Depleted      => f.write_str("energy depleted"),
            HaltReason::DeadEnd(node) => write!(f, "dead end at {node}"),
            HaltReason::External      => f.write_str("halted externally"),
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Idle      => f.write_str("idle"),
            Lifecycle::Moving    => f.write_str("moving"),
            Lifecycle::Paused    => f.write_str("paused"),
            Lifecycle::Halted(r) => write!(f, "halted ({r})"),
        }
    }
}
