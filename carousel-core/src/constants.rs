//! Carousel constants
//!
//! Compiled defaults for slider geometry, gestures, and timing. Tuning should
//! happen here so every consumer of [`CarouselConfig`](crate::CarouselConfig)
//! updates consistently.

/// Geometry defaults used when deriving the per-advance step.
pub mod geometry {
    /// Number of slides visible at once; determines the terminal bound.
    pub const VISIBLE_WINDOW: usize = 3;
    /// Fixed gap (px) added to the measured slide width to form one step.
    pub const SLIDE_GAP: f32 = 30.0;
    /// Step (px) used when no slide width can be measured.
    pub const FALLBACK_STEP: f32 = 400.0;
}

/// Touch gesture defaults.
pub mod gesture {
    /// Horizontal travel (device-independent px) a touch must exceed to count as a swipe.
    pub const SWIPE_THRESHOLD: f32 = 50.0;
}

/// Timer cadence defaults.
pub mod timing {
    /// Auto-advance interval (ms).
    pub const AUTO_ADVANCE_INTERVAL_MS: u64 = 5_000;
    /// Quiescence window (ms) before a burst of resize events triggers a re-measure.
    pub const RESIZE_DEBOUNCE_MS: u64 = 250;
}
