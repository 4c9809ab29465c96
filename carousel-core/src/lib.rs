//! Position controller for an auto-advancing image carousel.
//!
//! The crate is sans-IO: nothing here reads the clock, touches a DOM, or
//! spawns tasks. Hosts feed [`InputEvent`]s and the current [`Instant`], sleep
//! until [`CarouselController::next_tick`], and receive every offset write
//! through a [`TrackSink`].
//!
//! [`Instant`]: std::time::Instant

pub mod config;
pub mod constants;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod geometry;
pub mod input;
pub mod render;
pub mod swipe;
pub mod timer;

pub use config::CarouselConfig;
pub use controller::{CarouselController, CarouselSnapshot};
pub use debounce::ResizeDebouncer;
pub use error::ConfigError;
pub use geometry::{SlideGeometry, TrackMetrics};
pub use input::{InputEvent, Intent, Key};
pub use render::{TrackSink, Transform};
pub use swipe::{SwipeDirection, SwipeTracker};
pub use timer::{AutoAdvanceTimer, TimerHandle};
