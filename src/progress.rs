//! Reading-progress bar pinned to the top of the page.

use std::rc::Rc;

use tracing::trace;

use crate::error::{StoryError, StoryResult};
use crate::surface::Surface;

pub const PROGRESS_BAR_ID: &str = "progress-bar";

const BAR_STYLE: &str = "position: fixed; top: 0; left: 0; width: 0%; height: 4px; \
background: linear-gradient(90deg, #667eea, #764ba2); z-index: 9999; \
transition: width 0.2s ease;";

/// Scroll geometry sampled on a scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub offset: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn scrollable(&self) -> f64 {
        self.document_height - self.viewport_height
    }
}

/// Completion in percent, clamped to `[0, 100]`.
///
/// `None` when the document does not scroll (its height fits the viewport).
pub fn progress_percent(metrics: ScrollMetrics) -> Option<f64> {
    let scrollable = metrics.scrollable();
    if scrollable.is_nan() || scrollable <= 0.0 {
        return None;
    }
    let percent = metrics.offset / scrollable * 100.0;
    percent.is_finite().then(|| percent.clamp(0.0, 100.0))
}

/// The page's single progress bar. One per page: installing a second one fails.
pub struct ProgressIndicator<S: Surface> {
    surface: Rc<S>,
    bar: S::Node,
}

impl<S: Surface> ProgressIndicator<S> {
    pub fn install(surface: Rc<S>) -> StoryResult<Self> {
        if surface.element_by_id(PROGRESS_BAR_ID).is_some() {
            return Err(StoryError::DuplicateIndicator {
                id: PROGRESS_BAR_ID.to_owned(),
            });
        }
        let bar = surface
            .create_overlay(PROGRESS_BAR_ID, BAR_STYLE)
            .ok_or(StoryError::MissingBody)?;
        Ok(Self { surface, bar })
    }

    pub fn bar(&self) -> &S::Node {
        &self.bar
    }

    /// Writes the bar width for `metrics`. A non-scrolling document leaves it untouched.
    pub fn update(&self, metrics: ScrollMetrics) -> Option<f64> {
        let percent = progress_percent(metrics)?;
        trace!(percent, "progress");
        self.surface
            .set_style(&self.bar, "width", &format!("{percent}%"));
        Some(percent)
    }
}
