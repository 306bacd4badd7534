//! Enhancer configuration.
//!
//! Defaults match the stock page layout. Numeric thresholds can be
//! overridden through environment variables:
//!
//! - `PAGE_ENHANCER_SCROLL_OFFSET`: fixed header height subtracted when
//!   scrolling to an anchor (default `70`)
//! - `PAGE_ENHANCER_BACK_TO_TOP_THRESHOLD`: scroll offset past which the
//!   back-to-top button shows (default `300`)
//! - `PAGE_ENHANCER_LONG_CONTENT_THRESHOLD`: character count past which a
//!   counter turns into its warning state (default `1000`)

use std::str::FromStr;
use thiserror::Error;

pub const SCROLL_OFFSET_VAR: &str = "PAGE_ENHANCER_SCROLL_OFFSET";
pub const BACK_TO_TOP_THRESHOLD_VAR: &str = "PAGE_ENHANCER_BACK_TO_TOP_THRESHOLD";
pub const LONG_CONTENT_THRESHOLD_VAR: &str = "PAGE_ENHANCER_LONG_CONTENT_THRESHOLD";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnhancerConfig {
    pub scroll_offset: f64,
    pub back_to_top_threshold: f64,
    pub long_content_threshold: usize,
    /// Classes that together mark the main content region.
    pub main_content_classes: Vec<String>,
    /// Prompt for `form[data-confirm]` when the attribute is empty.
    pub delete_confirm_message: String,
    /// Prompt for `button[data-confirm]` and `a[data-confirm]` when the attribute is empty.
    pub action_confirm_message: String,
    pub back_to_top_label: String,
    pub counter_suffix: String,
    pub icons_stylesheet_url: String,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            scroll_offset: 70.0,
            back_to_top_threshold: 300.0,
            long_content_threshold: 1000,
            main_content_classes: vec!["container".to_string(), "mt-4".to_string()],
            delete_confirm_message: "Are you sure you want to delete this item?".to_string(),
            action_confirm_message: "Are you sure you want to continue?".to_string(),
            back_to_top_label: "Back to top".to_string(),
            counter_suffix: "characters".to_string(),
            icons_stylesheet_url:
                "https://cdn.jsdelivr.net/npm/bootstrap-icons@1.10.0/font/bootstrap-icons.css"
                    .to_string(),
        }
    }
}

impl EnhancerConfig {
    /// Returns the defaults with any environment overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set but does not
    /// parse as a finite, non-negative number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(offset) = read_env(SCROLL_OFFSET_VAR)? {
            config.scroll_offset = offset;
        }
        if let Some(threshold) = read_env(BACK_TO_TOP_THRESHOLD_VAR)? {
            config.back_to_top_threshold = threshold;
        }
        if let Some(threshold) = read_env(LONG_CONTENT_THRESHOLD_VAR)? {
            config.long_content_threshold = threshold;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(?config, "enhancer configuration loaded");

        Ok(config)
    }
}

/// A numeric override read from the environment.
trait Setting: FromStr {
    fn is_acceptable(&self) -> bool;
}

impl Setting for f64 {
    fn is_acceptable(&self) -> bool {
        self.is_finite() && *self >= 0.0
    }
}

impl Setting for usize {
    fn is_acceptable(&self) -> bool {
        true
    }
}

fn read_env<T: Setting>(key: &'static str) -> Result<Option<T>, ConfigError> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(None);
    };
    let invalid = || ConfigError::InvalidValue {
        key,
        value: raw.clone(),
    };
    let value: T = raw.trim().parse().map_err(|_| invalid())?;
    if !value.is_acceptable() {
        return Err(invalid());
    }
    Ok(Some(value))
}
