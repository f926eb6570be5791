//! Runs a [`Routine`] against a surface.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::schedule::{Scheduler, Tracked};
use crate::storyboard::{Mutation, Routine, ACTIVE};
use crate::surface::Surface;

/// Delay for the child at `index`; saturates instead of wrapping.
pub fn stagger_delay(step_ms: u32, index: usize) -> u32 {
    step_ms.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

/// Applies `routine`'s immediate effects and schedules its staggered ones.
///
/// Returns the handles of the scheduled tasks; dropping them cancels whatever has not
/// fired yet. A missing chart container makes the routine a no-op.
pub fn play<S, T>(routine: &Routine, surface: &Rc<S>, scheduler: &T) -> Vec<Tracked<T::Task>>
where
    S: Surface + 'static,
    T: Scheduler,
{
    let Some(chart_id) = routine.chart() else {
        return Vec::new();
    };
    let Some(chart) = surface.element_by_id(chart_id) else {
        debug!(chart = chart_id, "chart container missing; skipping routine");
        return Vec::new();
    };

    match *routine {
        Routine::Noop => Vec::new(),
        Routine::Reveal { firsts, .. } => {
            surface.add_class(&chart, ACTIVE);
            for selector in firsts {
                if let Some(first) = surface.query_first(Some(&chart), selector) {
                    surface.add_class(&first, ACTIVE);
                }
            }
            Vec::new()
        }
        Routine::Stagger {
            items,
            companions,
            limit,
            only_tagged,
            step_ms,
            mark,
            activate_chart,
            ..
        } => {
            if activate_chart {
                surface.add_class(&chart, ACTIVE);
            }
            let children = surface.query_all(Some(&chart), &items);
            let partners = companions
                .map(|selector| surface.query_all(Some(&chart), &selector))
                .unwrap_or_default();
            let take = limit.unwrap_or(children.len());

            let mut tasks = Vec::new();
            for (index, child) in children.into_iter().enumerate().take(take) {
                if let Some(tag) = only_tagged {
                    if !surface.has_class(&child, tag) {
                        continue;
                    }
                }
                let partner = partners.get(index).cloned();
                let surface = Rc::clone(surface);
                let delay = stagger_delay(step_ms, index);
                trace!(chart = chart_id, index, delay, "schedule stagger");
                tasks.push(scheduler.schedule_tracked(
                    delay,
                    Box::new(move || {
                        surface.add_class(&child, mark);
                        if let Some(partner) = partner {
                            surface.add_class(&partner, mark);
                        }
                    }),
                ));
            }
            tasks
        }
        Routine::Highlight {
            items, mutation, ..
        } => {
            for child in surface.query_all(Some(&chart), &items) {
                match mutation {
                    Mutation::AddClass(class) => surface.add_class(&child, class),
                    Mutation::Style { property, value } => {
                        surface.set_style(&child, property, value)
                    }
                    Mutation::Attributes(pairs) => {
                        for (name, value) in pairs {
                            surface.set_attribute(&child, name, value);
                        }
                    }
                }
            }
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::stagger_delay;

    #[test]
    fn delay_scales_with_index_and_saturates() {
        assert_eq!(stagger_delay(150, 0), 0);
        assert_eq!(stagger_delay(150, 3), 450);
        assert_eq!(stagger_delay(200, 30_000_000), u32::MAX);
        assert_eq!(stagger_delay(1, usize::MAX), u32::MAX);
    }
}
