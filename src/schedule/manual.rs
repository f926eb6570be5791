use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::Scheduler;

struct Entry {
    due: u64,
    seq: u64,
    cancelled: Rc<Cell<bool>>,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: u64,
    seq: u64,
    queue: Vec<Entry>,
}

/// Deterministic virtual-time scheduler for tests and headless runs.
///
/// Tasks run only when time is advanced. Ties on the due time run in scheduling order,
/// matching the browser timer queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

/// Cancels its task when dropped.
#[derive(Debug)]
pub struct ManualTask {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for ManualTask {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    /// Number of tasks still waiting to run.
    pub fn pending(&self) -> usize {
        self.clock
            .borrow()
            .queue
            .iter()
            .filter(|entry| !entry.cancelled.get())
            .count()
    }

    /// Moves time forward by `ms`, running every task that falls due on the way.
    pub fn advance(&self, ms: u64) {
        let target = self.clock.borrow().now + ms;
        while let Some(entry) = self.pop_due(target) {
            if !entry.cancelled.get() {
                (entry.task)();
            }
        }
        self.clock.borrow_mut().now = target;
    }

    /// Runs tasks until none remain, including ones scheduled by running tasks.
    pub fn run_until_idle(&self) {
        loop {
            let next = {
                let clock = self.clock.borrow();
                clock
                    .queue
                    .iter()
                    .filter(|entry| !entry.cancelled.get())
                    .map(|entry| entry.due)
                    .min()
            };
            let Some(due) = next else {
                self.clock.borrow_mut().queue.clear();
                return;
            };
            let now = self.now();
            self.advance(due.saturating_sub(now));
        }
    }

    fn pop_due(&self, target: u64) -> Option<Entry> {
        let mut clock = self.clock.borrow_mut();
        let index = clock
            .queue
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= target)
            .min_by_key(|(_, entry)| (entry.due, entry.seq))
            .map(|(index, _)| index)?;
        let entry = clock.queue.swap_remove(index);
        clock.now = clock.now.max(entry.due);
        Some(entry)
    }
}

impl Scheduler for ManualScheduler {
    type Task = ManualTask;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualTask {
        let cancelled = Rc::new(Cell::new(false));
        let mut clock = self.clock.borrow_mut();
        let seq = clock.seq;
        clock.seq += 1;
        let due = clock.now + u64::from(delay_ms);
        clock.queue.push(Entry {
            due,
            seq,
            cancelled: Rc::clone(&cancelled),
            task,
        });
        ManualTask { cancelled }
    }
}
