//! Typed indices for graph elements and agents.
//!
//! Node and edge ids are dense: a graph with `n` nodes uses `NodeId(0)` to
//! `NodeId(n - 1)`, in the order the nodes were added, and likewise for
//! edges.  That lets the graph store per-element data in plain `Vec`s.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $name:ident, $prefix:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

typed_id! {
    /// An intersection.
    NodeId, "n"
}

typed_id! {
    /// One direction of a street segment.
    EdgeId, "e"
}

typed_id! {
    /// A simulated UAV.  Seeds its RNG stream.
    AgentId, "uav"
}
