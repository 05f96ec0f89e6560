//! The event type carried by the mission's `EventQueue`.

use uav_motion::MotionTick;
use uav_schedule::ControlCommand;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SimEvent {
    /// A motion step the controller scheduled for itself.
    Motion(MotionTick),
    /// An external lifecycle request.
    Control(ControlCommand),
}

impl From<MotionTick> for SimEvent {
    fn from(tick: MotionTick) -> Self {
        SimEvent::Motion(tick)
    }
}

impl From<ControlCommand> for SimEvent {
    fn from(cmd: ControlCommand) -> Self {
        SimEvent::Control(cmd)
    }
}
