//! Slide geometry and the bounds derived from it.

use crate::config::CarouselConfig;

/// Measured layout of the slide set, as reported by the host after layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SlideGeometry {
    /// Rendered width of the first slide, or `None` before layout.
    pub first_slide_width: Option<f32>,
    /// Total number of slides in the track.
    pub slide_count: usize,
}

impl SlideGeometry {
    /// Geometry with a measured first-slide width.
    pub fn new(first_slide_width: f32, slide_count: usize) -> Self {
        Self {
            first_slide_width: Some(first_slide_width),
            slide_count,
        }
    }

    /// Geometry reported before the track has been laid out.
    pub fn unmeasured(slide_count: usize) -> Self {
        Self {
            first_slide_width: None,
            slide_count,
        }
    }

    /// Usable measured width, if any.
    fn measured_width(&self) -> Option<f32> {
        if self.slide_count == 0 {
            return None;
        }
        self.first_slide_width
            .filter(|w| w.is_finite() && *w > 0.0)
    }
}

/// Step and terminal bound derived from geometry and the visible window.
///
/// The upper bound is always `0`; `lower_bound` is never positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackMetrics {
    /// Distance moved per advance (slide width + gap).
    pub step: f32,
    /// Most negative permissible offset.
    pub lower_bound: f32,
    /// Steps between rest and `lower_bound`.
    pub hidden: usize,
    /// Slide count the metrics were derived from.
    pub slide_count: usize,
    /// True when the step came from `fallback_step`.
    pub fallback: bool,
}

impl TrackMetrics {
    /// Derive metrics from a measurement.
    ///
    /// Unavailable geometry (no slides, or no usable width) falls back to the
    /// configured default step with `lower_bound == 0`, which disables
    /// scrolling rather than multiplying an undefined width. So does a width
    /// large enough that the track length overflows `f32`. Slide sets that
    /// fit entirely inside the visible window also pin `lower_bound` to `0`.
    pub fn measure(geometry: SlideGeometry, config: &CarouselConfig) -> Self {
        let hidden = geometry.slide_count.saturating_sub(config.visible_window);
        let measured = geometry
            .measured_width()
            .map(|width| width + config.slide_gap)
            .filter(|step| step.is_finite() && (step * hidden as f32).is_finite());

        let Some(step) = measured else {
            log::warn!(
                "Carousel geometry unavailable (width={:?}, slides={}); using fallback step {}",
                geometry.first_slide_width,
                geometry.slide_count,
                config.fallback_step
            );
            return Self {
                step: config.fallback_step,
                lower_bound: 0.0,
                hidden: 0,
                slide_count: geometry.slide_count,
                fallback: true,
            };
        };

        let mut metrics = Self {
            step,
            lower_bound: 0.0,
            hidden,
            slide_count: geometry.slide_count,
            fallback: false,
        };
        metrics.lower_bound = metrics.offset_at(hidden);
        metrics
    }

    /// Offset of the track after `index` steps from rest. `offset_at(hidden)`
    /// is exactly `lower_bound`.
    pub fn offset_at(&self, index: usize) -> f32 {
        if index == 0 {
            0.0
        } else {
            -(self.step * index.min(self.hidden) as f32)
        }
    }

    /// Whether any scrolling is possible at all.
    #[inline]
    pub fn is_scrollable(&self) -> bool {
        self.lower_bound < 0.0
    }
}
