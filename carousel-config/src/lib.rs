//! Configuration loading for the carousel.
//!
//! Values are layered: compiled defaults, then a `[carousel]` table from a
//! TOML file, then a `.env` file, then the process environment. The result is
//! a validated [`CarouselConfig`] plus any non-fatal warnings.

pub mod error;
pub mod loader;
pub mod sources;
pub mod validation;

pub use carousel_core::CarouselConfig;
pub use error::ConfigLoadError;
pub use loader::{ConfigLoad, ConfigLoader, ConfigLoaderOptions};
pub use validation::{ConfigWarning, ConfigWarnings};
