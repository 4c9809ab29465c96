use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use carousel_core::CarouselConfig;
use tracing::{debug, info, warn};

use crate::{
    error::ConfigLoadError,
    sources::{self, EnvConfig, FileCarouselConfig, FileConfig},
    validation::{self, ConfigWarnings},
};

const DEFAULT_CONFIG_LOCATIONS: [&str; 2] =
    ["carousel.toml", "config/carousel.toml"];
const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    /// Replaces the process environment (and the default `.env` lookup)
    /// when set.
    pub env_override: Option<HashMap<String, String>>,
}

/// Composed configuration with the warnings raised while building it.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CarouselConfig,
    pub warnings: ConfigWarnings,
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.options.env_override = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();

        let dotenv = self.read_env_file(&mut warnings)?;
        let env = match &self.options.env_override {
            Some(vars) => EnvConfig::from_lookup(|key| {
                vars.get(key).or_else(|| dotenv.get(key)).cloned()
            }),
            None => EnvConfig::gather(&dotenv),
        };

        let (file, config_path) = self.load_file_config(&env, &mut warnings)?;
        let config = compose(CarouselConfig::default(), &file.carousel, &env)?;
        config.validate()?;
        warnings.extend(validation::lint(&config));

        for warning in &warnings.items {
            warn!(hint = ?warning.hint, "{}", warning.message);
        }
        info!(
            path = ?config_path,
            interval = ?config.auto_advance_interval,
            window = config.visible_window,
            "carousel configuration loaded"
        );

        Ok(ConfigLoad {
            config,
            warnings,
            config_path,
        })
    }

    /// Parse `.env` entries without touching the process environment.
    fn read_env_file(
        &self,
        warnings: &mut ConfigWarnings,
    ) -> Result<HashMap<String, String>, ConfigLoadError> {
        let (path, explicit) = match &self.options.env_file {
            Some(path) => (path.clone(), true),
            None if self.options.env_override.is_some() => {
                return Ok(HashMap::new());
            }
            None => (PathBuf::from(DEFAULT_ENV_FILE), false),
        };

        let iter = match dotenvy::from_path_iter(&path) {
            Ok(iter) => iter,
            Err(dotenvy::Error::Io(_)) => {
                if explicit {
                    warnings.push(format!(
                        "env file {} not found; continuing without it",
                        path.display()
                    ));
                }
                return Ok(HashMap::new());
            }
            Err(err) => return Err(err.into()),
        };

        let mut vars = HashMap::new();
        for entry in iter {
            let (key, value) = entry?;
            vars.insert(key, value);
        }
        debug!(path = %path.display(), entries = vars.len(), "read env file");
        Ok(vars)
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
        warnings: &mut ConfigWarnings,
    ) -> Result<(FileConfig, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
            {
                Some(path) => path,
                None => {
                    warnings.push_with_hint(
                        "No carousel.toml detected; using defaults and environment",
                        "Pass --config or set CAROUSEL_CONFIG to load a file",
                    );
                    return Ok((FileConfig::default(), None));
                }
            },
        };

        let file = read_file_config(&path)?;
        Ok((file, Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply file values, then environment values, over `base`.
fn compose(
    base: CarouselConfig,
    file: &FileCarouselConfig,
    env: &EnvConfig,
) -> Result<CarouselConfig, ConfigLoadError> {
    let mut config = base;

    if let Some(v) = file.visible_window {
        config.visible_window = v;
    }
    if let Some(v) = file.slide_gap {
        config.slide_gap = v;
    }
    if let Some(v) = file.fallback_step {
        config.fallback_step = v;
    }
    if let Some(v) = file.swipe_threshold {
        config.swipe_threshold = v;
    }
    if let Some(raw) = &file.auto_advance {
        config.auto_advance_interval = parse_duration("carousel.auto_advance", raw)?;
    }
    if let Some(v) = file.auto_advance_enabled {
        config.auto_advance_enabled = v;
    }
    if let Some(raw) = &file.resize_debounce {
        config.resize_debounce = parse_duration("carousel.resize_debounce", raw)?;
    }
    if let Some(v) = file.resume_on_touch_end {
        config.resume_on_touch_end = v;
    }

    if let Some(raw) = &env.visible_window {
        config.visible_window = parse_value(sources::ENV_VISIBLE_WINDOW, raw)?;
    }
    if let Some(raw) = &env.slide_gap {
        config.slide_gap = parse_value(sources::ENV_SLIDE_GAP, raw)?;
    }
    if let Some(raw) = &env.fallback_step {
        config.fallback_step = parse_value(sources::ENV_FALLBACK_STEP, raw)?;
    }
    if let Some(raw) = &env.swipe_threshold {
        config.swipe_threshold = parse_value(sources::ENV_SWIPE_THRESHOLD, raw)?;
    }
    if let Some(raw) = &env.auto_advance {
        config.auto_advance_interval =
            parse_duration(sources::ENV_AUTO_ADVANCE, raw)?;
    }
    if let Some(raw) = &env.auto_advance_enabled {
        config.auto_advance_enabled =
            parse_flag(sources::ENV_AUTO_ADVANCE_ENABLED, raw)?;
    }
    if let Some(raw) = &env.resize_debounce {
        config.resize_debounce =
            parse_duration(sources::ENV_RESIZE_DEBOUNCE, raw)?;
    }
    if let Some(raw) = &env.resume_on_touch_end {
        config.resume_on_touch_end =
            parse_flag(sources::ENV_RESUME_ON_TOUCH_END, raw)?;
    }

    Ok(config)
}

fn parse_duration(key: &str, raw: &str) -> Result<Duration, ConfigLoadError> {
    humantime::parse_duration(raw.trim()).map_err(|source| {
        ConfigLoadError::InvalidDuration {
            key: key.to_string(),
            value: raw.to_string(),
            source,
        }
    })
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigLoadError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigLoadError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigLoadError> {
    sources::parse_bool(raw).ok_or_else(|| ConfigLoadError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}
