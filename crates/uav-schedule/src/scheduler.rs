//! The scheduling capability consumed by motion code.

use uav_core::SimTime;

/// "Run this later" plus "what time is it".
///
/// The event type is chosen by the scheduler owner; producers only need a
/// `From` conversion into it.  An event scheduled for a time earlier than
/// [`now`](Self::now) fires at `now`.
pub trait Scheduler {
    type Event;

    /// Current virtual time.
    fn now(&self) -> SimTime;

    /// Deliver `event` back to its owner at virtual time `at`.
    fn schedule_at(&mut self, at: SimTime, event: Self::Event);

    /// Deliver `event` `delay_ms` after [`now`](Self::now).
    fn schedule_in(&mut self, delay_ms: u64, event: Self::Event) {
        let at = self.now().offset(delay_ms);
        self.schedule_at(at, event);
    }
}
