use std::cell::RefCell;
use std::rc::Rc;

use scrollstory::debounce::{Debounced, Edge};
use scrollstory::schedule::manual::ManualScheduler;

fn recorder() -> (Rc<RefCell<Vec<(u32, u64)>>>, ManualScheduler) {
    (Rc::new(RefCell::new(Vec::new())), ManualScheduler::new())
}

fn build(
    edge: Edge,
    wait_ms: u32,
    calls: &Rc<RefCell<Vec<(u32, u64)>>>,
    scheduler: &ManualScheduler,
) -> Debounced<ManualScheduler, u32> {
    let sink = Rc::clone(calls);
    let clock = scheduler.clone();
    Debounced::new(scheduler.clone(), wait_ms, edge, move |arg: u32| {
        sink.borrow_mut().push((arg, clock.now()));
    })
}

#[test]
fn leading_burst_fires_once_on_the_first_call() {
    let (calls, scheduler) = recorder();
    let debounced = build(Edge::Leading, 100, &calls, &scheduler);

    for arg in 1..=5 {
        debounced.call(arg);
        scheduler.advance(10);
    }
    scheduler.run_until_idle();

    assert_eq!(*calls.borrow(), vec![(1, 0)]);
}

#[test]
fn trailing_burst_fires_once_with_the_last_argument() {
    let (calls, scheduler) = recorder();
    let debounced = build(Edge::Trailing, 100, &calls, &scheduler);

    for arg in 1..=5 {
        debounced.call(arg);
        scheduler.advance(10);
    }
    assert!(calls.borrow().is_empty());

    // Last call at t=40; it fires at t=140.
    scheduler.advance(89);
    assert!(calls.borrow().is_empty());
    scheduler.advance(1);
    assert_eq!(*calls.borrow(), vec![(5, 140)]);

    scheduler.run_until_idle();
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn separated_bursts_fire_separately() {
    let (calls, scheduler) = recorder();
    let debounced = build(Edge::Trailing, 50, &calls, &scheduler);

    debounced.call(1);
    debounced.call(2);
    scheduler.advance(60);
    debounced.call(3);
    scheduler.advance(60);

    let args: Vec<u32> = calls.borrow().iter().map(|(arg, _)| *arg).collect();
    assert_eq!(args, vec![2, 3]);
}

#[test]
fn dropping_the_debouncer_cancels_a_pending_trailing_call() {
    let (calls, scheduler) = recorder();
    let debounced = build(Edge::Trailing, 50, &calls, &scheduler);

    debounced.call(7);
    drop(debounced);
    scheduler.run_until_idle();

    assert!(calls.borrow().is_empty());
}
