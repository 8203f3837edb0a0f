// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred execution on the host event loop.

use alloc::boxed::Box;
use alloc::collections::BinaryHeap;
use core::cell::{Cell, RefCell};
use core::cmp::Ordering;
use core::fmt;
use core::time::Duration;

/// A unit of work run once by a [`Scheduler`].
pub type DeferredAction = Box<dyn FnOnce()>;

/// The host event loop's timer facility.
///
/// Actions must run on the same thread as the picker, after `delay` has
/// elapsed, and never from inside [`Scheduler::schedule`] itself.
pub trait Scheduler {
    /// Runs `action` once after `delay`.
    fn schedule(&self, delay: Duration, action: DeferredAction);
}

struct Entry {
    due: Duration,
    seq: u64,
    action: DeferredAction,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the earliest due time, then the oldest entry.
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A timer queue driven by explicit calls to advance time.
///
/// Hosts without a timer facility of their own call [`ManualScheduler::advance`]
/// from their frame loop; tests use it to step through settle delays
/// deterministically. Actions with equal due times run in the order they were
/// scheduled. Actions may schedule further actions; those run in the same
/// `advance` call if they fall due within it.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    next_seq: Cell<u64>,
    queue: RefCell<BinaryHeap<Entry>>,
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("now", &self.now.get())
            .field("next_seq", &self.next_seq.get())
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

impl ManualScheduler {
    /// Creates an empty queue at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since creation, as advanced so far.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Number of actions not yet run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Moves time forward by `by` and runs every action that falls due.
    ///
    /// Returns the number of actions run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now.get().saturating_add(by);
        let mut ran = 0;
        while let Some(entry) = self.pop_due(target) {
            self.now.set(entry.due.max(self.now.get()));
            (entry.action)();
            ran += 1;
        }
        self.now.set(target);
        if ran > 0 {
            tracing::trace!(target: "understory_picker::scheduler", ran, "ran deferred actions");
        }
        ran
    }

    /// Runs every pending action, advancing time to the last due time.
    ///
    /// Returns the number of actions run.
    pub fn run_all(&self) -> usize {
        let mut ran = 0;
        loop {
            let next_due = self.queue.borrow().peek().map(|e| e.due);
            let Some(due) = next_due else {
                return ran;
            };
            ran += self.advance(due.saturating_sub(self.now.get()));
        }
    }

    fn pop_due(&self, target: Duration) -> Option<Entry> {
        let mut queue = self.queue.borrow_mut();
        if queue.peek().is_some_and(|e| e.due <= target) {
            queue.pop()
        } else {
            None
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, action: DeferredAction) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        let due = self.now.get().saturating_add(delay);
        self.queue.borrow_mut().push(Entry { due, seq, action });
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use core::time::Duration;

    use super::{ManualScheduler, Scheduler};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn actions_run_only_once_due() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&log);
        scheduler.schedule(ms(100), Box::new(move || l.borrow_mut().push(1)));

        assert_eq!(scheduler.advance(ms(99)), 0);
        assert!(log.borrow().is_empty());
        assert_eq!(scheduler.advance(ms(1)), 1);
        assert_eq!(*log.borrow(), [1]);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.now(), ms(100));
    }

    #[test]
    fn equal_due_times_run_in_schedule_order() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..4 {
            let l = Rc::clone(&log);
            let delay = if i == 0 { ms(50) } else { ms(10) };
            scheduler.schedule(delay, Box::new(move || l.borrow_mut().push(i)));
        }
        scheduler.advance(ms(60));
        assert_eq!(*log.borrow(), [1, 2, 3, 0]);
    }

    #[test]
    fn actions_may_schedule_more_work() {
        let scheduler = Rc::new(ManualScheduler::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let (s, l) = (Rc::clone(&scheduler), Rc::clone(&log));
        scheduler.schedule(
            ms(10),
            Box::new(move || {
                l.borrow_mut().push("outer");
                let l = Rc::clone(&l);
                s.schedule(ms(10), Box::new(move || l.borrow_mut().push("inner")));
            }),
        );

        assert_eq!(scheduler.advance(ms(15)), 1);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.run_all(), 1);
        assert_eq!(*log.borrow(), ["outer", "inner"]);
        assert_eq!(scheduler.now(), ms(20));
    }
}
