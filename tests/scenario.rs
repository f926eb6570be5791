use std::rc::Rc;

use scrollstory::band::{IntersectionTracker, Span};
use scrollstory::config::StoryConfig;
use scrollstory::schedule::manual::ManualScheduler;
use scrollstory::storyboard::{Routine, ACTIVE};
use scrollstory::surface::memory::{MemNode, MemorySurface};
use scrollstory::surface::{Selector, Surface};
use scrollstory::{ScrollController, Storyboard};

const VIEWPORT: f64 = 1_000.0;
const STEP_HEIGHT: f64 = 300.0;

/// Three markers laid out one viewport apart, starting one viewport down.
fn layout(markers: &[MemNode], scroll: f64) -> Vec<(MemNode, Span)> {
    markers
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let page_top = VIEWPORT * (i as f64 + 1.0);
            (*node, Span::new(page_top - scroll, STEP_HEIGHT))
        })
        .collect()
}

fn three_step_story() -> Storyboard {
    const ITEM: Selector = Selector::classes(&["item"]);
    Storyboard::from_entries([
        (
            1,
            Routine::Reveal {
                chart: "chart-1",
                firsts: &[ITEM],
            },
        ),
        (
            2,
            Routine::Stagger {
                chart: "chart-1",
                items: ITEM,
                companions: None,
                limit: Some(2),
                only_tagged: Some("tagged"),
                step_ms: 100,
                mark: ACTIVE,
                activate_chart: true,
            },
        ),
        (
            3,
            Routine::Stagger {
                chart: "chart-1",
                items: ITEM,
                companions: None,
                limit: None,
                only_tagged: None,
                step_ms: 100,
                mark: ACTIVE,
                activate_chart: false,
            },
        ),
    ])
}

#[test]
fn scrolling_marker_two_into_band_activates_it_and_its_subset() {
    let surface = Rc::new(MemorySurface::new());
    let body = surface.root();
    let markers: Vec<MemNode> = ["1", "2", "3"]
        .iter()
        .map(|n| surface.append(body, "div", "step", &[("data-step", *n)]))
        .collect();
    let chart = surface.append(body, "div", "chart", &[("id", "chart-1")]);
    let items: Vec<MemNode> = (0..3)
        .map(|_| surface.append(chart, "div", "item tagged", &[]))
        .collect();

    let scheduler = ManualScheduler::new();
    let config = StoryConfig::default();
    let mut controller = ScrollController::new(
        Rc::clone(&surface),
        scheduler.clone(),
        three_step_story(),
        &config,
    );
    let mut tracker = IntersectionTracker::new(controller.band());

    // Initial report: nothing inside the 400..600 band.
    let batch = tracker.update(layout(&markers, 0.0), VIEWPORT);
    assert_eq!(batch.len(), 3);
    controller.on_observations(&batch);
    assert_eq!(controller.current_step(), None);

    // Marker 2 sits at 2000 on the page; scroll so its top is at 450 in the viewport.
    let batch = tracker.update(layout(&markers, 1_550.0), VIEWPORT);
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].target, markers[1]);
    controller.on_observations(&batch);
    scheduler.run_until_idle();

    assert_eq!(controller.current_step(), Some(2));
    let marker_flags: Vec<bool> = markers.iter().map(|m| surface.has_class(m, ACTIVE)).collect();
    assert_eq!(marker_flags, vec![false, true, false]);
    assert!(surface.has_class(&chart, ACTIVE));
    let item_flags: Vec<bool> = items.iter().map(|i| surface.has_class(i, ACTIVE)).collect();
    assert_eq!(item_flags, vec![true, true, false]);

    // Leaving the band reports a non-intersecting change, which activates nothing.
    let batch = tracker.update(layout(&markers, 2_300.0), VIEWPORT);
    assert!(batch.iter().all(|obs| !obs.is_intersecting));
    controller.on_observations(&batch);
    assert_eq!(controller.current_step(), Some(2));
}

#[test]
fn fast_scroll_through_several_markers_ends_on_the_last() {
    let surface = Rc::new(MemorySurface::new());
    let body = surface.root();
    let markers: Vec<MemNode> = (1..=16)
        .map(|n: u32| surface.append(body, "div", "step", &[("data-step", n.to_string().as_str())]))
        .collect();

    let mut controller = ScrollController::new(
        Rc::clone(&surface),
        ManualScheduler::new(),
        Storyboard::empire(),
        &StoryConfig::default(),
    );

    let tall: Vec<(MemNode, Span)> = markers
        .iter()
        .map(|m| (*m, Span::new(450.0, 50.0)))
        .collect();
    let mut tracker = IntersectionTracker::new(controller.band());
    let batch = tracker.update(tall, VIEWPORT);
    controller.on_observations(&batch);

    assert_eq!(controller.current_step(), Some(16));
    let active = markers.iter().filter(|m| surface.has_class(m, ACTIVE)).count();
    assert_eq!(active, 1);
}
