//! Virtual-Time Scheduler
//!
//! A small timer queue that every animated component runs on. Time only moves
//! when the owner calls `pop_due`/`settle`, so timer chains are deterministic
//! and a whole chain can be dropped with a single `cancel_all`.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::time::Duration;

/// Handle for a single scheduled event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<E> {
    due: Duration,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    // Reversed so the BinaryHeap pops the earliest deadline first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Timer queue driven by explicit time advancement
#[derive(Debug)]
pub struct Scheduler<E> {
    now: Duration,
    next_seq: u64,
    queue: BinaryHeap<Entry<E>>,
    cancelled: HashSet<u64>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BinaryHeap::new(),
            cancelled: HashSet::new(),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `event` to fire `delay` after the current virtual time
    pub fn schedule_in(&mut self, delay: Duration, event: E) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry {
            due: self.now + delay,
            seq,
            event,
        });
        TimerId(seq)
    }

    /// Cancel one pending event. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let pending = self.queue.iter().any(|entry| entry.seq == id.0);
        pending && self.cancelled.insert(id.0)
    }

    /// Drop every pending event at once
    pub fn cancel_all(&mut self) {
        self.queue.clear();
        self.cancelled.clear();
    }

    /// Number of live (not cancelled) pending events
    pub fn pending(&self) -> usize {
        self.queue.len() - self.cancelled.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Pop the earliest event due at or before `target`, moving the clock to its deadline.
    ///
    /// Handlers that schedule follow-up events while draining therefore schedule
    /// relative to the deadline of the event being handled, not to `target`.
    pub fn pop_due(&mut self, target: Duration) -> Option<E> {
        loop {
            let due = self.queue.peek()?.due;
            if due > target {
                return None;
            }
            let entry = self.queue.pop()?;
            if self.cancelled.remove(&entry.seq) {
                continue;
            }
            self.now = self.now.max(entry.due);
            return Some(entry.event);
        }
    }

    /// Move the clock forward to `target` once every due event has been drained
    pub fn settle(&mut self, target: Duration) {
        self.now = self.now.max(target);
    }

    /// Deadline that `dt` from now corresponds to
    pub fn deadline_after(&self, dt: Duration) -> Duration {
        self.now + dt
    }
}
