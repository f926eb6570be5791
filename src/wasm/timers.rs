use gloo::timers::callback::Timeout;

use crate::schedule::Scheduler;

/// Browser timers. A dropped [`Timeout`] is cleared.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Task = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}
