//! Collapses bursts of calls into one.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::schedule::Scheduler;

/// Which end of a burst fires the callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Fire on the first call, then ignore calls until `wait` passes with no calls.
    Leading,
    /// Fire once, `wait` after the last call of the burst, with that call's argument.
    Trailing,
}

struct Inner<S: Scheduler, A> {
    scheduler: S,
    wait_ms: u32,
    edge: Edge,
    callback: RefCell<Box<dyn FnMut(A)>>,
    pending: RefCell<Option<S::Task>>,
}

/// A debounced callback. Dropping it cancels a pending trailing call.
pub struct Debounced<S: Scheduler, A: 'static> {
    inner: Rc<Inner<S, A>>,
}

impl<S, A> Debounced<S, A>
where
    S: Scheduler + 'static,
    A: 'static,
{
    pub fn new(scheduler: S, wait_ms: u32, edge: Edge, callback: impl FnMut(A) + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                scheduler,
                wait_ms,
                edge,
                callback: RefCell::new(Box::new(callback)),
                pending: RefCell::new(None),
            }),
        }
    }

    pub fn call(&self, arg: A) {
        let inner = &self.inner;
        let (call_now, deferred) = match inner.edge {
            Edge::Leading => {
                let idle = inner.pending.borrow().is_none();
                (idle.then_some(arg), None)
            }
            Edge::Trailing => (None, Some(arg)),
        };

        let weak: Weak<Inner<S, A>> = Rc::downgrade(inner);
        let task = inner.scheduler.schedule(
            inner.wait_ms,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let _fired = inner.pending.borrow_mut().take();
                if let Some(arg) = deferred {
                    (inner.callback.borrow_mut())(arg);
                }
            }),
        );
        // Replacing the handle cancels the previous quiet-period timer.
        let previous = inner.pending.borrow_mut().replace(task);
        drop(previous);

        if let Some(arg) = call_now {
            (inner.callback.borrow_mut())(arg);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.inner.pending.borrow().is_some()
    }
}
