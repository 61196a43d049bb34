#![forbid(unsafe_code)]

//! Logical-time timer queue.
//!
//! Every deferred continuation in the runtime (show retries, hover-intent
//! polls, close delays, desync polls) is a task in a [`Scheduler`]. Time only
//! moves when the owner calls [`pop_due`](Scheduler::pop_due) with a horizon
//! and then [`settle`](Scheduler::settle), so tests can step through a
//! sequence of timers deterministically.
//!
//! # Invariants
//!
//! 1. Tasks fire in deadline order; equal deadlines fire in scheduling order.
//! 2. A cancelled [`TimerId`] never fires, including a repeating timer
//!    cancelled from inside its own callback.
//! 3. `now()` never decreases.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Cancellation token for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw numeric value (diagnostics).
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Entry<T> {
    task: T,
    repeat: Option<Duration>,
}

/// Deterministic timer queue over tasks of type `T`.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    /// Keyed by (deadline, id); ids are monotonic so ties keep FIFO order.
    queue: BTreeMap<(Duration, TimerId), Entry<T>>,
    /// Deadline of every live timer, for cancellation.
    deadlines: HashMap<TimerId, Duration>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current logical time.
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of live timers.
    #[inline]
    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    /// Check if no timers are live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    /// Run `task` once, `delay` from now.
    pub fn schedule_once(&mut self, delay: Duration, task: T) -> TimerId {
        self.insert(self.now + delay, task, None)
    }

    /// Run `task` every `interval`, first firing one interval from now.
    ///
    /// A zero interval is clamped to one millisecond so a repeating timer
    /// cannot starve the queue.
    pub fn schedule_every(&mut self, interval: Duration, task: T) -> TimerId {
        let interval = interval.max(Duration::from_millis(1));
        self.insert(self.now + interval, task, Some(interval))
    }

    /// Cancel a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(due) => {
                self.queue.remove(&(due, id));
                tracing::trace!(timer = id.0, "timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Check whether a timer is still live.
    #[inline]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Deadline of the earliest live timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Drop every timer.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.deadlines.clear();
    }

    /// Move time forward to `until` once all due tasks have been popped.
    pub fn settle(&mut self, until: Duration) {
        if until > self.now {
            self.now = until;
        }
    }

    fn insert(&mut self, due: Duration, task: T, repeat: Option<Duration>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.insert((due, id), Entry { task, repeat });
        self.deadlines.insert(id, due);
        tracing::trace!(
            timer = id.0,
            due_ms = due.as_millis() as u64,
            repeating = repeat.is_some(),
            "timer scheduled"
        );
        id
    }
}

impl<T: Clone> Scheduler<T> {
    /// Pop the earliest task due at or before `until`, advancing `now` to its
    /// deadline.
    ///
    /// Repeating timers are re-armed under the same [`TimerId`] before being
    /// returned, so cancelling that id from the task's handler stops it.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, T)> {
        let (&(due, id), _) = self.queue.iter().next()?;
        if due > until {
            return None;
        }
        let entry = self.queue.remove(&(due, id))?;
        self.deadlines.remove(&id);
        self.now = self.now.max(due);

        if let Some(interval) = entry.repeat {
            let next = due + interval;
            self.queue.insert(
                (next, id),
                Entry {
                    task: entry.task.clone(),
                    repeat: Some(interval),
                },
            );
            self.deadlines.insert(id, next);
        }
        Some((id, entry.task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn drain(s: &mut Scheduler<&'static str>, until: Duration) -> Vec<(u64, &'static str)> {
        let mut fired = Vec::new();
        while let Some((_, task)) = s.pop_due(until) {
            fired.push((s.now().as_millis() as u64, task));
        }
        s.settle(until);
        fired
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule_once(ms(300), "c");
        s.schedule_once(ms(100), "a");
        s.schedule_once(ms(200), "b");
        assert_eq!(drain(&mut s, ms(1000)), [(100, "a"), (200, "b"), (300, "c")]);
        assert!(s.is_empty());
        assert_eq!(s.now(), ms(1000));
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut s = Scheduler::new();
        s.schedule_once(ms(100), "first");
        s.schedule_once(ms(100), "second");
        assert_eq!(drain(&mut s, ms(100)), [(100, "first"), (100, "second")]);
    }

    #[test]
    fn not_due_stays_queued() {
        let mut s = Scheduler::new();
        let id = s.schedule_once(ms(150), "later");
        assert!(drain(&mut s, ms(149)).is_empty());
        assert!(s.is_pending(id));
        assert_eq!(s.next_deadline(), Some(ms(150)));
        assert_eq!(drain(&mut s, ms(150)), [(150, "later")]);
        assert!(!s.is_pending(id));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut s = Scheduler::new();
        let id = s.schedule_once(ms(100), "x");
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert!(drain(&mut s, ms(500)).is_empty());
    }

    #[test]
    fn repeating_timer_rearms_under_same_id() {
        let mut s = Scheduler::new();
        let id = s.schedule_every(ms(500), "poll");
        assert_eq!(
            drain(&mut s, ms(1600)),
            [(500, "poll"), (1000, "poll"), (1500, "poll")]
        );
        assert!(s.is_pending(id));
        assert_eq!(s.next_deadline(), Some(ms(2000)));
    }

    #[test]
    fn repeating_timer_cancelled_from_handler_stops() {
        let mut s = Scheduler::new();
        let id = s.schedule_every(ms(500), "poll");
        let (fired, _) = s.pop_due(ms(5000)).unwrap();
        assert_eq!(fired, id);
        assert!(s.cancel(id));
        assert!(s.pop_due(ms(5000)).is_none());
    }

    #[test]
    fn zero_interval_is_clamped() {
        let mut s = Scheduler::new();
        s.schedule_every(Duration::ZERO, "spin");
        assert_eq!(drain(&mut s, ms(3)).len(), 3);
    }

    #[test]
    fn schedule_is_relative_to_now() {
        let mut s = Scheduler::new();
        s.settle(ms(1000));
        s.schedule_once(ms(100), "x");
        assert_eq!(s.next_deadline(), Some(ms(1100)));
    }

    #[test]
    fn settle_never_moves_backwards() {
        let mut s: Scheduler<()> = Scheduler::new();
        s.settle(ms(200));
        s.settle(ms(100));
        assert_eq!(s.now(), ms(200));
    }
}
