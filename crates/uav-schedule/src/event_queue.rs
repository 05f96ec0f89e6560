//! `EventQueue` — deterministic virtual-time event queue.
//!
//! Events are bucketed by timestamp in a `BTreeMap`; within one timestamp
//! they pop in insertion order.  Popping advances `now` to the event's
//! time, so `now` never decreases.

use std::collections::{BTreeMap, VecDeque};

use uav_core::SimTime;

use crate::Scheduler;

pub struct EventQueue<E> {
    inner: BTreeMap<SimTime, VecDeque<E>>,
    now:   SimTime,
    /// Cached total event count for O(1) `len()`.
    total: usize,
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self::starting_at(SimTime::ZERO)
    }

    pub fn starting_at(now: SimTime) -> Self {
        Self { inner: BTreeMap::new(), now, total: 0 }
    }

    /// Enqueue `event` at `at`, or at `now` if `at` is already past.
    pub fn push(&mut self, at: SimTime, event: E) {
        let at = at.max(self.now);
        self.inner.entry(at).or_default().push_back(event);
        self.total += 1;
    }

    /// Pop the earliest event and advance `now` to its time.
    pub fn pop(&mut self) -> Option<(SimTime, E)> {
        let mut entry = self.inner.first_entry()?;
        let at = *entry.key();
        let event = entry.get_mut().pop_front();
        if entry.get().is_empty() {
            entry.remove();
        }
        let event = event?;
        self.total -= 1;
        self.now = at;
        Some((at, event))
    }

    /// Like [`pop`](Self::pop), but only if the earliest event is due at or
    /// before `horizon`.  Later events stay queued and `now` is untouched.
    pub fn pop_until(&mut self, horizon: SimTime) -> Option<(SimTime, E)> {
        match self.next_time() {
            Some(t) if t <= horizon => self.pop(),
            _ => None,
        }
    }

    /// Move `now` forward to `t` without popping anything.
    ///
    /// Used to park the clock at the horizon once no more events are due.
    /// Moving backwards is ignored.
    pub fn advance_to(&mut self, t: SimTime) {
        if t > self.now {
            self.now = t;
        }
    }

    /// The earliest queued timestamp, or `None` if empty.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Drop every pending event.  `now` is kept.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.total = 0;
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler for EventQueue<E> {
    type Event = E;

    fn now(&self) -> SimTime {
        self.now
    }

    fn schedule_at(&mut self, at: SimTime, event: E) {
        self.push(at, event);
    }
}
