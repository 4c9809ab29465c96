//! The render seam between the controller and the host's track element.

use std::fmt;

/// Horizontal translation applied to the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Offset in px; never positive.
    pub offset_x: f32,
}

impl Transform {
    /// `translateX(offset_x px)`.
    pub fn translate_x(offset_x: f32) -> Self {
        Self { offset_x }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translateX({}px)", self.offset_x)
    }
}

/// Receives every position write. Implemented by whatever owns the track.
pub trait TrackSink {
    /// Apply one offset write to the track.
    fn apply(&mut self, transform: Transform);
}

/// Records transforms in order; useful for tests and replay.
impl TrackSink for Vec<Transform> {
    fn apply(&mut self, transform: Transform) {
        self.push(transform);
    }
}

impl<S: TrackSink + ?Sized> TrackSink for Box<S> {
    fn apply(&mut self, transform: Transform) {
        (**self).apply(transform);
    }
}
