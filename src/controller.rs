//! Maps scroll position to the current narrative step.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::animation;
use crate::band::{ActivationBand, Observation};
use crate::config::{StaggerPolicy, StoryConfig};
use crate::schedule::{Scheduler, Tracked};
use crate::storyboard::{Storyboard, ACTIVE};
use crate::surface::{Selector, Surface};

pub const STEP: Selector = Selector::classes(&["step"]);
pub const STEP_ATTRIBUTE: &str = "data-step";
pub const HERO: Selector = Selector::classes(&["hero"]);
pub const SCROLL_INDICATOR: Selector = Selector::classes(&["scroll-indicator"]);

/// Reads a step ordinal from its leading decimal digits, so `"2a"` is step 2.
///
/// Leading whitespace and a `+` sign are skipped. Negative or digit-less values have no
/// ordinal.
pub fn parse_ordinal(raw: &str) -> Option<u32> {
    let rest = raw.trim_start();
    let rest = rest.strip_prefix('+').unwrap_or(rest);
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// Scroll effects on top of the step routines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEffects {
    pub parallax_rate: f64,
    pub fade_distance: f64,
}

impl Default for ScrollEffects {
    fn default() -> Self {
        Self {
            parallax_rate: 0.5,
            fade_distance: 500.0,
        }
    }
}

impl ScrollEffects {
    pub fn hero_transform(&self, offset: f64) -> String {
        format!("translate3d(0, {}px, 0)", offset * self.parallax_rate)
    }

    pub fn indicator_opacity(&self, offset: f64) -> f64 {
        (1.0 - offset / self.fade_distance).max(0.0)
    }
}

/// Observes step markers, keeps exactly one active, and plays its chart routine.
pub struct ScrollController<S: Surface, T: Scheduler> {
    surface: Rc<S>,
    scheduler: T,
    storyboard: Storyboard,
    steps: Vec<S::Node>,
    current_step: Option<u32>,
    band: ActivationBand,
    effects: ScrollEffects,
    policy: StaggerPolicy,
    in_flight: HashMap<u32, Vec<Tracked<T::Task>>>,
}

impl<S, T> ScrollController<S, T>
where
    S: Surface + 'static,
    T: Scheduler,
{
    /// Collects the step markers present now; markers added later are not observed.
    pub fn new(surface: Rc<S>, scheduler: T, storyboard: Storyboard, config: &StoryConfig) -> Self {
        let steps = surface.query_all(None, &STEP);
        debug!(steps = steps.len(), routines = storyboard.len(), "scroll controller created");
        Self {
            surface,
            scheduler,
            storyboard,
            steps,
            current_step: None,
            band: ActivationBand::new(config.band_inset_percent),
            effects: ScrollEffects {
                parallax_rate: config.parallax_rate,
                fade_distance: config.indicator_fade_distance,
            },
            policy: config.stagger_policy,
            in_flight: HashMap::new(),
        }
    }

    pub fn steps(&self) -> &[S::Node] {
        &self.steps
    }

    pub fn band(&self) -> ActivationBand {
        self.band
    }

    pub fn current_step(&self) -> Option<u32> {
        self.current_step
    }

    /// Reveals the hero once the page is ready.
    pub fn on_load(&self) {
        if let Some(hero) = self.surface.query_first(None, &HERO) {
            self.surface.set_style(&hero, "opacity", "1");
        }
    }

    /// Handles one observer batch: every entry that is now intersecting activates.
    pub fn on_observations(&mut self, batch: &[Observation<S::Node>]) {
        for entry in batch.iter().filter(|entry| entry.is_intersecting) {
            self.activate_step(&entry.target);
        }
    }

    pub fn activate_step(&mut self, step: &S::Node) {
        for marker in &self.steps {
            self.surface.remove_class(marker, ACTIVE);
        }
        self.surface.add_class(step, ACTIVE);

        let raw = self.surface.attribute(step, STEP_ATTRIBUTE);
        let Some(ordinal) = raw.as_deref().and_then(parse_ordinal) else {
            warn!(value = ?raw, "step marker has no numeric ordinal");
            self.current_step = None;
            return;
        };
        self.current_step = Some(ordinal);
        self.trigger(ordinal);
    }

    /// Plays the routine for `ordinal`.
    pub fn trigger(&mut self, ordinal: u32) {
        let routine = self.storyboard.routine(ordinal);
        trace!(ordinal, ?routine, "trigger step");
        let tasks = animation::play(&routine, &self.surface, &self.scheduler);
        match self.policy {
            StaggerPolicy::CancelOnReplay => {
                // Dropping the previous handles cancels whatever they still had pending.
                self.in_flight.insert(ordinal, tasks);
            }
            StaggerPolicy::Overlap => {
                let slot = self.in_flight.entry(ordinal).or_default();
                slot.retain(Tracked::is_pending);
                slot.extend(tasks);
            }
        }
    }

    /// Handles held for stagger tasks, fired or not, across every step.
    pub fn in_flight(&self) -> usize {
        self.in_flight.values().map(Vec::len).sum()
    }

    /// Parallax on the hero and fade on the scroll indicator. Runs on every scroll event.
    pub fn handle_scroll(&self, offset: f64) {
        if let Some(hero) = self.surface.query_first(None, &HERO) {
            self.surface
                .set_style(&hero, "transform", &self.effects.hero_transform(offset));
        }
        if let Some(indicator) = self.surface.query_first(None, &SCROLL_INDICATOR) {
            let opacity = self.effects.indicator_opacity(offset);
            self.surface
                .set_style(&indicator, "opacity", &opacity.to_string());
        }
    }

    /// Smooth-scrolls to the element a same-page `href` points at.
    ///
    /// Returns `false` when the fragment is empty or names no element.
    pub fn follow_anchor(&self, href: &str) -> bool {
        let Some(id) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
            return false;
        };
        match self.surface.element_by_id(id) {
            Some(target) => {
                self.surface.scroll_into_view(&target);
                true
            }
            None => false,
        }
    }

    /// Cancels every pending stagger task.
    pub fn teardown(&mut self) {
        debug!(steps = self.in_flight.len(), "scroll controller teardown");
        self.in_flight.clear();
    }
}
