//! One-shot delayed tasks.
//!
//! Stagger effects and the resize debounce run through a [`Scheduler`] so they can be
//! cancelled. Dropping the returned task handle cancels the task if it has not run yet,
//! the same contract as `gloo::timers::callback::Timeout`.

use std::cell::Cell;
use std::rc::Rc;

pub mod manual;

pub trait Scheduler {
    /// Pending-task handle; dropping it cancels the task.
    type Task: 'static;

    #[must_use = "dropping the task handle cancels the task"]
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Task;

    /// Like [`Scheduler::schedule`], but the handle reports whether the task has run.
    #[must_use = "dropping the task handle cancels the task"]
    fn schedule_tracked(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Tracked<Self::Task> {
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let handle = self.schedule(
            delay_ms,
            Box::new(move || {
                flag.set(true);
                task();
            }),
        );
        Tracked {
            fired,
            _handle: handle,
        }
    }
}

/// A task handle that knows whether its task already ran.
///
/// Holders that accumulate handles prune the fired ones with [`Tracked::is_pending`].
#[derive(Debug)]
pub struct Tracked<T> {
    fired: Rc<Cell<bool>>,
    _handle: T,
}

impl<T> Tracked<T> {
    pub fn is_pending(&self) -> bool {
        !self.fired.get()
    }
}
