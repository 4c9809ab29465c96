//! Tokio host for the carousel controller.
//!
//! [`CarouselRuntime::spawn`] moves a controller onto its own task and hands
//! back a [`CarouselHandle`] for feeding inputs and resizes. The `script`
//! module drives the `carousel-player` binary.

pub mod runtime;
pub mod script;
pub mod sink;

pub use runtime::{CarouselHandle, CarouselRuntime, RuntimeError};
pub use script::{ScriptCommand, ScriptError, parse_script};
pub use sink::{PrintSink, WatchSink};
