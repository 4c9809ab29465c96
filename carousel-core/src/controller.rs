//! CarouselController: position state machine for the gallery track
//!
//! The controller owns the track offset, the bounds it is clamped to, and the
//! auto-advance timer. Every input channel (controls, arrow keys, swipes, the
//! timer) funnels into [`CarouselController::advance`] or
//! [`CarouselController::retreat`], so no channel can write the position
//! behind the others' backs.
//!
//! Offsets are non-positive: `0` shows the first slide and `lower_bound`
//! leaves the last visible window flush with the end of the track.

use std::time::Instant;

use crate::config::CarouselConfig;
use crate::error::ConfigError;
use crate::geometry::{SlideGeometry, TrackMetrics};
use crate::input::{InputEvent, Intent};
use crate::render::{TrackSink, Transform};
use crate::swipe::{SwipeDirection, SwipeTracker};
use crate::timer::{AutoAdvanceTimer, TimerHandle};

/// Read-only view of the controller for observers and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselSnapshot {
    /// Rendered track offset.
    pub position: f32,
    /// Steps taken from rest, `0..=hidden`.
    pub index: usize,
    /// Distance per advance.
    pub step: f32,
    /// Terminal offset.
    pub lower_bound: f32,
    /// Slides in the track.
    pub slide_count: usize,
    /// Pointer is over the gallery.
    pub hovered: bool,
    /// Live auto-advance timer, if any.
    pub timer: Option<TimerHandle>,
    /// Deadline of the live timer.
    pub next_tick: Option<Instant>,
}

/// Gallery track position plus the timer and gesture state that drive it.
#[derive(Debug)]
pub struct CarouselController<S> {
    config: CarouselConfig,
    metrics: TrackMetrics,
    /// Single source of truth for the rendered offset. The offset itself is
    /// always derived through [`TrackMetrics::offset_at`].
    index: usize,
    timer: AutoAdvanceTimer,
    swipe: SwipeTracker,
    hovered: bool,
    sink: S,
}

impl<S: TrackSink> CarouselController<S> {
    /// Create a controller from an initial measurement. The position starts at
    /// rest and the timer is stopped; the host starts it once the page is live.
    pub fn new(config: CarouselConfig, geometry: SlideGeometry, sink: S) -> Self {
        let metrics = TrackMetrics::measure(geometry, &config);
        log::debug!(
            "Carousel initialised: step={} lower_bound={} slides={} window={}",
            metrics.step,
            metrics.lower_bound,
            metrics.slide_count,
            config.visible_window
        );
        Self {
            timer: AutoAdvanceTimer::new(config.auto_advance_interval),
            config,
            metrics,
            index: 0,
            swipe: SwipeTracker::new(),
            hovered: false,
            sink,
        }
    }

    /// Validate `config` before building the controller.
    pub fn try_new(
        config: CarouselConfig,
        geometry: SlideGeometry,
        sink: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, geometry, sink))
    }

    /// Current track offset, in `[lower_bound, 0]`.
    pub fn position(&self) -> f32 {
        self.metrics.offset_at(self.index)
    }

    /// Steps taken from rest.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Distance moved per advance.
    pub fn step(&self) -> f32 {
        self.metrics.step
    }

    /// Most negative offset.
    pub fn lower_bound(&self) -> f32 {
        self.metrics.lower_bound
    }

    /// Metrics from the latest measurement.
    pub fn metrics(&self) -> &TrackMetrics {
        &self.metrics
    }

    /// Configuration the controller was built with.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Whether the pointer is over the gallery.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// True at rest (offset `0`).
    pub fn is_at_start(&self) -> bool {
        self.index == 0
    }

    /// True at the terminal bound. A track that cannot scroll is at both ends.
    pub fn is_at_end(&self) -> bool {
        self.index >= self.metrics.hidden
    }

    /// Borrow the render sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutably borrow the render sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the controller and hand back the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Copy out the observable state.
    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            position: self.position(),
            index: self.index,
            step: self.metrics.step,
            lower_bound: self.metrics.lower_bound,
            slide_count: self.metrics.slide_count,
            hovered: self.hovered,
            timer: self.timer.handle(),
            next_tick: self.timer.deadline(),
        }
    }

    /// Move one step toward the end, wrapping to the start once the terminal
    /// bound has been reached. Returns the new offset.
    pub fn advance(&mut self) -> f32 {
        if self.is_at_end() {
            self.index = 0;
            log::debug!("Carousel wrapped to start");
        } else {
            self.index += 1;
            log::debug!("Carousel advanced to {}", self.position());
        }
        self.render()
    }

    /// Move one step toward the start, wrapping to the terminal bound when
    /// already at rest. Returns the new offset.
    pub fn retreat(&mut self) -> f32 {
        if self.is_at_start() {
            self.index = self.metrics.hidden;
            log::debug!("Carousel wrapped to end ({})", self.position());
        } else {
            self.index -= 1;
            log::debug!("Carousel retreated to {}", self.position());
        }
        self.render()
    }

    /// Jump to rest without touching the timer.
    pub fn go_to_start(&mut self) {
        self.index = 0;
        self.render();
    }

    /// Jump to the terminal bound without touching the timer.
    pub fn go_to_end(&mut self) {
        self.index = self.metrics.hidden;
        self.render();
    }

    /// Re-derive step and bounds from a fresh measurement and return to rest.
    pub fn recompute_bounds(&mut self, geometry: SlideGeometry) {
        self.metrics = TrackMetrics::measure(geometry, &self.config);
        self.index = 0;
        log::debug!(
            "Carousel bounds recomputed: step={} lower_bound={} slides={}",
            self.metrics.step,
            self.metrics.lower_bound,
            self.metrics.slide_count
        );
        self.render();
    }

    /// Start the auto-advance timer. A running timer is left untouched, so
    /// there is never more than one cadence.
    pub fn start_auto_advance(&mut self, now: Instant) -> Option<TimerHandle> {
        if !self.config.auto_advance_enabled {
            log::trace!("Carousel auto-advance disabled; start ignored");
            return None;
        }
        let already = self.timer.is_running();
        let handle = self.timer.start(now);
        if !already {
            log::debug!(
                "Carousel auto-advance started ({:?}, every {:?})",
                handle,
                self.timer.interval()
            );
        }
        Some(handle)
    }

    /// Cancel the live timer, returning its handle. No-op when idle.
    pub fn stop_auto_advance(&mut self) -> Option<TimerHandle> {
        let stopped = self.timer.stop();
        if let Some(handle) = stopped {
            log::debug!("Carousel auto-advance stopped ({:?})", handle);
        }
        stopped
    }

    /// Stop any live timer, then start a fresh one with a full countdown.
    pub fn restart_auto_advance(&mut self, now: Instant) -> Option<TimerHandle> {
        self.stop_auto_advance();
        self.start_auto_advance(now)
    }

    /// Whether a timer is live.
    pub fn is_auto_advancing(&self) -> bool {
        self.timer.is_running()
    }

    /// Instant the host should next call [`poll_auto_advance`](Self::poll_auto_advance).
    pub fn next_tick(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Fire the timer if its deadline has passed. Returns true if it advanced.
    pub fn poll_auto_advance(&mut self, now: Instant) -> bool {
        if self.timer.poll(now) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Route one input event. Returns the intent that moved the track, if any.
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> Option<Intent> {
        match event {
            InputEvent::NextControl => Some(self.on_next_control()),
            InputEvent::PreviousControl => Some(self.on_previous_control()),
            InputEvent::KeyDown(key) => match key.as_control() {
                Some(control) => self.handle_input(control, now),
                None => {
                    log::trace!("Carousel ignoring key {:?}", key);
                    None
                }
            },
            InputEvent::PointerEnter => {
                self.hovered = true;
                self.stop_auto_advance();
                None
            }
            InputEvent::PointerLeave => {
                self.hovered = false;
                self.restart_auto_advance(now);
                None
            }
            InputEvent::TouchStart { x } => {
                self.swipe.begin(x);
                self.stop_auto_advance();
                None
            }
            InputEvent::TouchEnd { x } => {
                let intent = self.on_touch_end(x);
                if self.config.resume_on_touch_end && !self.hovered {
                    self.restart_auto_advance(now);
                }
                intent
            }
        }
    }

    fn on_next_control(&mut self) -> Intent {
        self.advance();
        Intent::Advance
    }

    fn on_previous_control(&mut self) -> Intent {
        self.retreat();
        Intent::Retreat
    }

    /// Swipes never wrap: a swipe toward a bound the track already sits on is
    /// dropped.
    fn on_touch_end(&mut self, x: f32) -> Option<Intent> {
        let direction = self.swipe.finish(x, self.config.swipe_threshold)?;
        log::debug!("Carousel swipe {:?} released at {}", direction, x);
        match direction {
            SwipeDirection::Left if !self.is_at_end() => {
                self.advance();
                Some(Intent::Advance)
            }
            SwipeDirection::Right if !self.is_at_start() => {
                self.retreat();
                Some(Intent::Retreat)
            }
            _ => {
                log::trace!(
                    "Carousel swipe {:?} dropped at bound (position={})",
                    direction,
                    self.position()
                );
                None
            }
        }
    }

    fn render(&mut self) -> f32 {
        let position = self.position();
        self.sink.apply(Transform::translate_x(position));
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use std::time::Duration;

    const INTERVAL: Duration = Duration::from_millis(5_000);

    fn gallery() -> CarouselController<Vec<Transform>> {
        // 400px slides + 30px gap, five slides, three visible.
        CarouselController::new(
            CarouselConfig::default(),
            SlideGeometry::new(400.0, 5),
            Vec::new(),
        )
    }

    fn assert_in_bounds(c: &CarouselController<Vec<Transform>>) {
        assert!(
            c.lower_bound() <= c.position() && c.position() <= 0.0,
            "position {} escaped [{}, 0]",
            c.position(),
            c.lower_bound()
        );
    }

    #[test]
    fn advance_steps_then_wraps_at_bound() {
        let mut c = gallery();
        assert_eq!(c.step(), 430.0);
        assert_eq!(c.lower_bound(), -860.0);

        assert_eq!(c.advance(), -430.0);
        assert_eq!(c.advance(), -860.0);
        assert_eq!(c.advance(), 0.0);
    }

    #[test]
    fn retreat_from_rest_wraps_to_end_and_back() {
        let mut c = gallery();
        assert_eq!(c.retreat(), -860.0);
        assert_eq!(c.advance(), 0.0);
    }

    #[test]
    fn retreat_steps_toward_start() {
        let mut c = gallery();
        c.go_to_end();
        assert_eq!(c.retreat(), -430.0);
        assert_eq!(c.retreat(), 0.0);
        assert_eq!(c.retreat(), -860.0);
    }

    #[test]
    fn go_to_start_and_end_jump_to_the_bounds() {
        let mut c = gallery();
        c.go_to_end();
        assert_eq!(c.position(), -860.0);
        assert!(c.is_at_end());
        c.go_to_start();
        assert_eq!(c.position(), 0.0);
        assert!(c.is_at_start());
        assert_eq!(c.advance(), -430.0);

        let rendered: Vec<String> = c.sink().iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["translateX(-860px)", "translateX(0px)", "translateX(-430px)"]
        );
    }

    #[test]
    fn fractional_widths_wrap_exactly_at_the_bound() {
        for (width, count) in [(300.1, 6), (300.1, 9), (333.3, 7), (417.7, 11)] {
            let mut c = CarouselController::new(
                CarouselConfig::default(),
                SlideGeometry::new(width, count),
                Vec::new(),
            );
            let hidden = count - 3;

            for i in 1..=hidden {
                let p = c.advance();
                assert!(p < 0.0, "{width}x{count}: early wrap at advance {i}");
            }
            assert_eq!(c.position(), c.lower_bound(), "{width}x{count}");
            assert_eq!(c.advance(), 0.0, "{width}x{count}: late wrap");

            assert_eq!(c.retreat(), c.lower_bound());
            for _ in 0..hidden {
                c.retreat();
            }
            assert_eq!(c.position(), 0.0, "{width}x{count}: residual offset");
            assert_eq!(
                c.sink().last().map(ToString::to_string).as_deref(),
                Some("translateX(0px)")
            );
            assert_eq!(c.retreat(), c.lower_bound(), "{width}x{count}: late wrap");
        }
    }

    #[test]
    fn wrap_cadence_holds_across_width_sweep() {
        for tenths in 3_000..5_000u32 {
            let width = tenths as f32 / 10.0;
            for count in 4..=11usize {
                let mut c = CarouselController::new(
                    CarouselConfig::default(),
                    SlideGeometry::new(width, count),
                    Vec::new(),
                );
                let hidden = count - 3;
                let forward = (0..=hidden).take_while(|_| c.advance() != 0.0).count();
                assert_eq!(forward, hidden, "advance cadence at {width}x{count}");
                c.go_to_end();
                let back = (0..=hidden).take_while(|_| c.retreat() != c.lower_bound()).count();
                assert_eq!(back, hidden, "retreat cadence at {width}x{count}");
            }
        }
    }

    #[test]
    fn every_write_reaches_the_sink() {
        let mut c = gallery();
        c.advance();
        c.advance();
        c.advance();
        let rendered: Vec<String> = c.sink().iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["translateX(-430px)", "translateX(-860px)", "translateX(0px)"]
        );
    }

    #[test]
    fn recompute_bounds_resets_position() {
        let mut c = gallery();
        c.advance();
        c.advance();
        c.recompute_bounds(SlideGeometry::new(300.0, 6));
        assert_eq!(c.position(), 0.0);
        assert_eq!(c.step(), 330.0);
        assert_eq!(c.lower_bound(), -990.0);
    }

    #[test]
    fn unavailable_geometry_disables_scrolling() {
        let mut c = CarouselController::new(
            CarouselConfig::default(),
            SlideGeometry::unmeasured(0),
            Vec::new(),
        );
        assert_eq!(c.step(), 400.0);
        assert_eq!(c.lower_bound(), 0.0);
        assert_eq!(c.advance(), 0.0);
        assert_eq!(c.retreat(), 0.0);
        assert_eq!(c.advance(), 0.0);
    }

    #[test]
    fn arrow_keys_match_controls() {
        let now = Instant::now();
        let mut c = gallery();
        assert_eq!(
            c.handle_input(InputEvent::KeyDown(Key::ArrowRight), now),
            Some(Intent::Advance)
        );
        assert_eq!(c.position(), -430.0);
        assert_eq!(
            c.handle_input(InputEvent::KeyDown(Key::ArrowLeft), now),
            Some(Intent::Retreat)
        );
        assert_eq!(c.position(), 0.0);
        assert_eq!(c.handle_input(InputEvent::KeyDown(Key::Other), now), None);
        assert_eq!(c.position(), 0.0);
    }

    #[test]
    fn swipe_threshold_is_exclusive() {
        let now = Instant::now();
        let mut c = gallery();

        c.handle_input(InputEvent::TouchStart { x: 300.0 }, now);
        assert_eq!(c.handle_input(InputEvent::TouchEnd { x: 251.0 }, now), None);
        assert_eq!(c.position(), 0.0);

        c.handle_input(InputEvent::TouchStart { x: 300.0 }, now);
        assert_eq!(
            c.handle_input(InputEvent::TouchEnd { x: 249.0 }, now),
            Some(Intent::Advance)
        );
        assert_eq!(c.position(), -430.0);

        c.handle_input(InputEvent::TouchStart { x: 249.0 }, now);
        assert_eq!(
            c.handle_input(InputEvent::TouchEnd { x: 300.0 }, now),
            Some(Intent::Retreat)
        );
        assert_eq!(c.position(), 0.0);
    }

    #[test]
    fn swipes_do_not_wrap() {
        let now = Instant::now();
        let mut c = gallery();

        c.handle_input(InputEvent::TouchStart { x: 0.0 }, now);
        assert_eq!(c.handle_input(InputEvent::TouchEnd { x: 200.0 }, now), None);
        assert_eq!(c.position(), 0.0);

        c.go_to_end();
        c.handle_input(InputEvent::TouchStart { x: 200.0 }, now);
        assert_eq!(c.handle_input(InputEvent::TouchEnd { x: 0.0 }, now), None);
        assert_eq!(c.position(), -860.0);
    }

    #[test]
    fn touch_end_without_start_is_ignored() {
        let now = Instant::now();
        let mut c = gallery();
        assert_eq!(c.handle_input(InputEvent::TouchEnd { x: 0.0 }, now), None);
        assert_eq!(c.position(), 0.0);
        assert!(c.sink().is_empty());
    }

    #[test]
    fn double_start_advances_once_per_interval() {
        let t0 = Instant::now();
        let mut c = gallery();
        let first = c.start_auto_advance(t0);
        let second = c.start_auto_advance(t0);
        assert_eq!(first, second);

        assert!(c.poll_auto_advance(t0 + INTERVAL));
        assert!(!c.poll_auto_advance(t0 + INTERVAL));
        assert_eq!(c.position(), -430.0);
    }

    #[test]
    fn hover_suspends_and_leave_restarts_fresh() {
        let t0 = Instant::now();
        let mut c = gallery();
        c.start_auto_advance(t0);

        let enter = t0 + Duration::from_millis(3_000);
        c.handle_input(InputEvent::PointerEnter, enter);
        assert!(c.is_hovered());
        assert!(!c.is_auto_advancing());
        for secs in [5, 10, 60] {
            assert!(!c.poll_auto_advance(t0 + Duration::from_secs(secs)));
        }
        assert_eq!(c.position(), 0.0);

        let leave = t0 + Duration::from_secs(61);
        c.handle_input(InputEvent::PointerLeave, leave);
        assert!(!c.poll_auto_advance(leave + INTERVAL - Duration::from_millis(1)));
        assert!(c.poll_auto_advance(leave + INTERVAL));
        assert_eq!(c.position(), -430.0);
    }

    #[test]
    fn repeated_leave_never_stacks_timers() {
        let t0 = Instant::now();
        let mut c = gallery();
        c.start_auto_advance(t0);
        c.handle_input(InputEvent::PointerLeave, t0);
        c.handle_input(InputEvent::PointerLeave, t0);
        let handle = c.snapshot().timer;
        assert!(handle.is_some());

        assert!(c.poll_auto_advance(t0 + INTERVAL));
        assert!(!c.poll_auto_advance(t0 + INTERVAL));
        assert_eq!(c.position(), -430.0);
    }

    #[test]
    fn touch_start_pauses_without_resume_by_default() {
        let t0 = Instant::now();
        let mut c = gallery();
        c.start_auto_advance(t0);
        c.handle_input(InputEvent::TouchStart { x: 100.0 }, t0);
        c.handle_input(InputEvent::TouchEnd { x: 100.0 }, t0);
        assert!(!c.is_auto_advancing());
        assert!(!c.poll_auto_advance(t0 + INTERVAL * 4));
    }

    #[test]
    fn touch_end_resumes_when_configured() {
        let t0 = Instant::now();
        let config = CarouselConfig {
            resume_on_touch_end: true,
            ..CarouselConfig::default()
        };
        let mut c = CarouselController::new(config, SlideGeometry::new(400.0, 5), Vec::new());
        c.start_auto_advance(t0);
        c.handle_input(InputEvent::TouchStart { x: 100.0 }, t0);
        let release = t0 + Duration::from_millis(700);
        c.handle_input(InputEvent::TouchEnd { x: 100.0 }, release);
        assert!(c.is_auto_advancing());
        assert_eq!(c.next_tick(), Some(release + INTERVAL));
    }

    #[test]
    fn disabled_auto_advance_never_starts() {
        let t0 = Instant::now();
        let config = CarouselConfig {
            auto_advance_enabled: false,
            ..CarouselConfig::default()
        };
        let mut c = CarouselController::new(config, SlideGeometry::new(400.0, 5), Vec::new());
        assert_eq!(c.start_auto_advance(t0), None);
        c.handle_input(InputEvent::PointerLeave, t0);
        assert!(!c.poll_auto_advance(t0 + INTERVAL));
        assert_eq!(c.position(), 0.0);
    }

    #[test]
    fn try_new_rejects_invalid_config() {
        let config = CarouselConfig {
            visible_window: 0,
            ..CarouselConfig::default()
        };
        let result = CarouselController::try_new(config, SlideGeometry::new(400.0, 5), Vec::new());
        assert!(matches!(result, Err(ConfigError::EmptyVisibleWindow)));
    }

    #[test]
    fn random_walk_stays_in_bounds() {
        let t0 = Instant::now();
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut c = gallery();
        c.start_auto_advance(t0);

        for i in 0..2_000u64 {
            let now = t0 + Duration::from_millis(i * 700);
            match rng.random_range(0..8) {
                0 => {
                    c.advance();
                }
                1 => {
                    c.retreat();
                }
                2 => {
                    let x: f32 = rng.random_range(0.0..400.0);
                    c.handle_input(InputEvent::TouchStart { x }, now);
                    let end: f32 = rng.random_range(0.0..400.0);
                    c.handle_input(InputEvent::TouchEnd { x: end }, now);
                }
                3 => {
                    let width: f32 = rng.random_range(0.0..600.0);
                    let count = rng.random_range(0..9);
                    c.recompute_bounds(SlideGeometry::new(width, count));
                    assert_eq!(c.position(), 0.0);
                }
                4 => {
                    c.handle_input(InputEvent::PointerEnter, now);
                }
                5 => {
                    c.handle_input(InputEvent::PointerLeave, now);
                }
                _ => {
                    c.poll_auto_advance(now);
                }
            }
            assert_in_bounds(&c);
        }
    }
}
