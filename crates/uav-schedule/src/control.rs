//! External control commands delivered to an agent at a scheduled time.

use std::fmt;
use std::str::FromStr;

use uav_core::SimTime;

use crate::ScheduleError;

/// An external lifecycle request: what a coordinator or operator can ask of
/// a running agent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlCommand {
    Pause,
    Resume,
    Halt,
}

impl FromStr for ControlCommand {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pause"  => Ok(ControlCommand::Pause),
            "resume" => Ok(ControlCommand::Resume),
            "halt"   => Ok(ControlCommand::Halt),
            other => Err(ScheduleError::Parse(format!(
                "invalid command {other:?}: expected \"pause\", \"resume\", or \"halt\""
            ))),
        }
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ControlCommand::Pause  => "pause",
            ControlCommand::Resume => "resume",
            ControlCommand::Halt   => "halt",
        })
    }
}

/// A command paired with the virtual time it takes effect.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScheduledControl {
    pub at:      SimTime,
    pub command: ControlCommand,
}
