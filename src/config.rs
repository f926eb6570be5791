//! Page-level tuning for the story, read from `<body data-story-config='…'>`.

use serde::{Deserialize, Serialize};

use crate::error::{StoryError, StoryResult};

/// Data attribute on `<body>` that may carry a JSON [`StoryConfig`].
pub const CONFIG_ATTRIBUTE: &str = "data-story-config";

/// Which hand-authored storyboard drives the charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryVariant {
    /// Sixteen steps over five charts: timeline, territory, battles, reforms, decline.
    #[default]
    Empire,
    /// Nine steps over three charts: network nodes, bars, circles.
    Network,
}

/// What happens to a step's in-flight stagger timers when that step activates again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerPolicy {
    /// Pending timers from the previous activation of the same step are cancelled.
    #[default]
    CancelOnReplay,
    /// Every activation keeps its timers; settling order follows the timer queue.
    Overlap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    pub variant: StoryVariant,
    /// How far the top and bottom of the activation band are pulled toward the
    /// viewport centre, in percent of the viewport height.
    pub band_inset_percent: f64,
    pub parallax_rate: f64,
    /// Scroll offset in pixels at which the scroll indicator is fully transparent.
    pub indicator_fade_distance: f64,
    pub resize_debounce_ms: u32,
    pub stagger_policy: StaggerPolicy,
    pub lazy_images: bool,
    pub log_level: String,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            variant: StoryVariant::Empire,
            band_inset_percent: 40.0,
            parallax_rate: 0.5,
            indicator_fade_distance: 500.0,
            resize_debounce_ms: 250,
            stagger_policy: StaggerPolicy::CancelOnReplay,
            lazy_images: true,
            log_level: "info".to_owned(),
        }
    }
}

impl StoryConfig {
    /// Parses and validates a config document. Missing fields take their defaults.
    pub fn from_json(raw: &str) -> StoryResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> StoryResult<()> {
        if !self.band_inset_percent.is_finite()
            || !(0.0..50.0).contains(&self.band_inset_percent)
        {
            return Err(StoryError::InvalidConfig(format!(
                "band_inset_percent must be in [0, 50), got {}",
                self.band_inset_percent
            )));
        }
        if !self.parallax_rate.is_finite() {
            return Err(StoryError::InvalidConfig(
                "parallax_rate must be finite".to_owned(),
            ));
        }
        if !self.indicator_fade_distance.is_finite() || self.indicator_fade_distance <= 0.0 {
            return Err(StoryError::InvalidConfig(format!(
                "indicator_fade_distance must be positive, got {}",
                self.indicator_fade_distance
            )));
        }
        if self.log_level.trim().is_empty() {
            return Err(StoryError::InvalidConfig(
                "log_level must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}
