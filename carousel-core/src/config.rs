//! Static configuration for a carousel instance.

use std::time::Duration;

use crate::constants::{geometry, gesture, timing};
use crate::error::ConfigError;

/// Behavior and layout knobs for a [`CarouselController`](crate::CarouselController).
///
/// Built from compiled defaults and usually overridden by the layered loader
/// in `carousel-config`. Construct-then-validate: fields are public so callers
/// can adjust individual values, and [`CarouselConfig::validate`] guards the
/// arithmetic the controller relies on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    /// Slides visible at once.
    pub visible_window: usize,
    /// Gap (px) added to the measured slide width to form one step.
    pub slide_gap: f32,
    /// Step (px) used when slide geometry is unavailable.
    pub fallback_step: f32,
    /// Strict swipe threshold (px); a delta must exceed it to count.
    pub swipe_threshold: f32,
    /// Auto-advance cadence.
    pub auto_advance_interval: Duration,
    /// When false, starting auto-advance is a no-op.
    pub auto_advance_enabled: bool,
    /// Quiescence window for resize coalescing.
    pub resize_debounce: Duration,
    /// Restart auto-advance when a touch is released while not hovered.
    pub resume_on_touch_end: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::gallery_defaults()
    }
}

impl CarouselConfig {
    /// Defaults for the three-up gallery strip.
    pub const fn gallery_defaults() -> Self {
        Self {
            visible_window: geometry::VISIBLE_WINDOW,
            slide_gap: geometry::SLIDE_GAP,
            fallback_step: geometry::FALLBACK_STEP,
            swipe_threshold: gesture::SWIPE_THRESHOLD,
            auto_advance_interval: Duration::from_millis(
                timing::AUTO_ADVANCE_INTERVAL_MS,
            ),
            auto_advance_enabled: true,
            resize_debounce: Duration::from_millis(timing::RESIZE_DEBOUNCE_MS),
            resume_on_touch_end: false,
        }
    }

    /// Reject values that would break bounds arithmetic or timer scheduling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.visible_window == 0 {
            return Err(ConfigError::EmptyVisibleWindow);
        }
        if !self.slide_gap.is_finite() || self.slide_gap < 0.0 {
            return Err(ConfigError::InvalidSlideGap(self.slide_gap));
        }
        if !self.fallback_step.is_finite() || self.fallback_step <= 0.0 {
            return Err(ConfigError::InvalidFallbackStep(self.fallback_step));
        }
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(ConfigError::InvalidSwipeThreshold(
                self.swipe_threshold,
            ));
        }
        if self.auto_advance_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}
