//! Touch swipe classification.

/// Direction of a recognised swipe, named by finger travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved toward the start of the screen; reveals later slides.
    Left,
    /// Finger moved toward the end of the screen; reveals earlier slides.
    Right,
}

/// Classify a horizontal delta (`start_x - end_x`).
///
/// The threshold is strict: a delta equal to it is still a tap.
pub fn classify(delta: f32, threshold: f32) -> Option<SwipeDirection> {
    if !delta.is_finite() || delta.abs() <= threshold {
        return None;
    }
    if delta > 0.0 {
        Some(SwipeDirection::Left)
    } else {
        Some(SwipeDirection::Right)
    }
}

/// Records the touch-start coordinate until the matching touch-end.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    start_x: Option<f32>,
}

impl SwipeTracker {
    /// Tracker with no gesture in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the touch-start coordinate.
    pub fn begin(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Whether a touch-start is waiting for its touch-end.
    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }

    /// Close the gesture. Returns `None` for taps and for a touch-end with no
    /// recorded start.
    pub fn finish(&mut self, x: f32, threshold: f32) -> Option<SwipeDirection> {
        let start = self.start_x.take()?;
        classify(start - x, threshold)
    }
}
