//! Strategy names accepted from configuration.

use std::fmt;
use std::str::FromStr;

use uav_core::AgentId;

use crate::{LeastVisitedSelector, NextHopSelector, RandomSelector, SelectError};

/// Built-in selection strategies.
///
/// | Name              | Selector                  |
/// |-------------------|---------------------------|
/// | `"random"`        | [`RandomSelector`]        |
/// | `"least-visited"` | [`LeastVisitedSelector`]  |
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StrategyKind {
    #[default]
    Random,
    LeastVisited,
}

impl StrategyKind {
    /// Instantiate the selector for `agent`, seeded from the run seed.
    pub fn build(self, seed: u64, agent: AgentId) -> Box<dyn NextHopSelector> {
        match self {
            StrategyKind::Random       => Box::new(RandomSelector::new(seed, agent)),
            StrategyKind::LeastVisited => Box::new(LeastVisitedSelector),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Random       => "random",
            StrategyKind::LeastVisited => "least-visited",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random"                         => Ok(StrategyKind::Random),
            "least-visited" | "least_visited" => Ok(StrategyKind::LeastVisited),
            _ => Err(SelectError::UnknownStrategy(s.to_owned())),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
