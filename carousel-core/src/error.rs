//! Configuration errors.

use thiserror::Error;

/// Configuration values the controller cannot operate with.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("visible window must contain at least one slide")]
    /// `visible_window` is zero.
    EmptyVisibleWindow,
    #[error("slide gap must be a finite, non-negative length (got {0})")]
    /// Negative or non-finite gap.
    InvalidSlideGap(f32),
    #[error("fallback step must be a finite, positive length (got {0})")]
    /// Non-positive or non-finite fallback step.
    InvalidFallbackStep(f32),
    #[error("swipe threshold must be a finite, non-negative length (got {0})")]
    /// Negative or non-finite swipe threshold.
    InvalidSwipeThreshold(f32),
    #[error("auto-advance interval must be non-zero")]
    /// Auto-advance interval of zero.
    ZeroInterval,
}
