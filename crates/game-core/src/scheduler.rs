//! One-shot timers drained by the game loop.
//!
//! Events are keyed by absolute scheduler time, so an event fires exactly once
//! no matter how the elapsed time is sliced into ticks.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Entry<E> {
    due_ms: u64,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed: earliest due first, then insertion order
        other
            .due_ms
            .cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Queue of delayed events measured in milliseconds.
pub struct Scheduler<E> {
    now_ms: u64,
    next_seq: u64,
    queue: BinaryHeap<Entry<E>>,
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Current scheduler time.
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queues `event` to fire `delay_ms` from now. There is no cancel.
    pub fn schedule(&mut self, delay_ms: u32, event: E) {
        self.queue.push(Entry {
            due_ms: self.now_ms + u64::from(delay_ms),
            seq: self.next_seq,
            event,
        });
        self.next_seq += 1;
    }

    /// Moves time forward and returns every event now due, earliest first.
    pub fn advance(&mut self, elapsed_ms: u32) -> Vec<E> {
        self.now_ms += u64::from(elapsed_ms);
        let mut due = Vec::new();
        while self
            .queue
            .peek()
            .map_or(false, |entry| entry.due_ms <= self.now_ms)
        {
            if let Some(entry) = self.queue.pop() {
                due.push(entry.event);
            }
        }
        due
    }
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}
