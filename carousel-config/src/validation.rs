//! Non-fatal findings collected while composing the configuration.

use carousel_core::CarouselConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

/// Flag values that are legal but almost certainly unintended.
pub fn lint(config: &CarouselConfig) -> ConfigWarnings {
    let mut warnings = ConfigWarnings::default();

    if config.resize_debounce >= config.auto_advance_interval {
        warnings.push_with_hint(
            "resize debounce is not shorter than the auto-advance interval",
            "auto-advance may fire against stale bounds while a resize settles",
        );
    }

    if config.swipe_threshold == 0.0 {
        warnings.push("swipe threshold is zero; any horizontal jitter counts as a swipe");
    }

    warnings
}
