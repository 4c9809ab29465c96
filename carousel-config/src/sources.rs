use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub carousel: FileCarouselConfig,
}

/// The `[carousel]` table. Durations are human-readable (`"5s"`, `"250ms"`).
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileCarouselConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_window: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_gap: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_step: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swipe_threshold: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_advance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_advance_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize_debounce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_on_touch_end: Option<bool>,
}

pub const ENV_CONFIG_PATH: &str = "CAROUSEL_CONFIG";
pub const ENV_VISIBLE_WINDOW: &str = "CAROUSEL_VISIBLE_WINDOW";
pub const ENV_SLIDE_GAP: &str = "CAROUSEL_SLIDE_GAP";
pub const ENV_FALLBACK_STEP: &str = "CAROUSEL_FALLBACK_STEP";
pub const ENV_SWIPE_THRESHOLD: &str = "CAROUSEL_SWIPE_THRESHOLD";
pub const ENV_AUTO_ADVANCE: &str = "CAROUSEL_AUTO_ADVANCE";
pub const ENV_AUTO_ADVANCE_ENABLED: &str = "CAROUSEL_AUTO_ADVANCE_ENABLED";
pub const ENV_RESIZE_DEBOUNCE: &str = "CAROUSEL_RESIZE_DEBOUNCE";
pub const ENV_RESUME_ON_TOUCH_END: &str = "CAROUSEL_RESUME_ON_TOUCH_END";

/// Environment-derived values, kept as raw strings until composition so
/// malformed values surface as errors naming the variable.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub visible_window: Option<String>,
    pub slide_gap: Option<String>,
    pub fallback_step: Option<String>,
    pub swipe_threshold: Option<String>,
    pub auto_advance: Option<String>,
    pub auto_advance_enabled: Option<String>,
    pub resize_debounce: Option<String>,
    pub resume_on_touch_end: Option<String>,
}

impl EnvConfig {
    /// Read from the process environment, falling back to `dotenv` entries
    /// for variables the process does not define.
    pub fn gather(dotenv: &HashMap<String, String>) -> Self {
        Self::from_lookup(|key| {
            std::env::var(key).ok().or_else(|| dotenv.get(key).cloned())
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            config_path: var(ENV_CONFIG_PATH).map(PathBuf::from),
            visible_window: var(ENV_VISIBLE_WINDOW),
            slide_gap: var(ENV_SLIDE_GAP),
            fallback_step: var(ENV_FALLBACK_STEP),
            swipe_threshold: var(ENV_SWIPE_THRESHOLD),
            auto_advance: var(ENV_AUTO_ADVANCE),
            auto_advance_enabled: var(ENV_AUTO_ADVANCE_ENABLED),
            resize_debounce: var(ENV_RESIZE_DEBOUNCE),
            resume_on_touch_end: var(ENV_RESUME_ON_TOUCH_END),
        }
    }
}

pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
