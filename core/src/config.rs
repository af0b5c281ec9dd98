//! TOML Configuration File Support
//!
//! Centralized configuration loading, supporting a TOML file at
//! `~/.config/cospal/config.toml`.
//!
//! # Configuration Priority
//!
//! Values are loaded with the following priority (highest first):
//! 1. CLI arguments (applied by the caller)
//! 2. `COSPAL_CONFIG` environment variable (alternate file path)
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [animation]
//! randomize_duration_ms = 500
//! easing = "ease-in-out"
//! frame_rate = 30
//!
//! [persist]
//! enabled = true
//! debounce_ms = 500
//!
//! [ui]
//! sample_capacity = 15
//! color_format = "hex"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::ColorFormat;
use crate::easing::EasingFunction;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Animation section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationToml {
    /// Randomize transition duration in milliseconds
    pub randomize_duration_ms: Option<u64>,

    /// Easing curve for the randomize transition
    pub easing: Option<EasingFunction>,

    /// Target frame rate for the event loop
    pub frame_rate: Option<u32>,
}

/// Persistence section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistToml {
    /// Whether the palette is saved across sessions
    pub enabled: Option<bool>,

    /// Quiescence delay before saving, in milliseconds
    pub debounce_ms: Option<u64>,
}

/// UI section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiToml {
    /// Maximum number of sampled colors retained
    pub sample_capacity: Option<usize>,

    /// Initial display format for sampled colors
    pub color_format: Option<ColorFormat>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CospalToml {
    /// Animation configuration section
    pub animation: AnimationToml,

    /// Persistence configuration section
    pub persist: PersistToml,

    /// UI configuration section
    pub ui: UiToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved application configuration
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Randomize transition duration
    pub randomize_duration: Duration,

    /// Easing curve for the randomize transition
    pub easing: EasingFunction,

    /// Target frame rate for the event loop
    pub frame_rate: u32,

    /// Whether the palette is saved across sessions
    pub persist_enabled: bool,

    /// Quiescence delay before saving
    pub persist_debounce: Duration,

    /// Maximum number of sampled colors retained
    pub sample_capacity: usize,

    /// Initial display format for sampled colors
    pub color_format: ColorFormat,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            randomize_duration: crate::transition::RANDOMIZE_DURATION,
            easing: EasingFunction::EaseInOut,
            frame_rate: 30,
            persist_enabled: true,
            persist_debounce: crate::debounce::PERSIST_DELAY,
            sample_capacity: crate::samples::SAMPLE_CAPACITY,
            color_format: ColorFormat::Hex,
            config_file_path: None,
        }
    }
}

impl AppConfig {
    /// Check resolved values for nonsense that would break the loop.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for a frame rate outside
    /// `1..=240`, a zero animation duration, or a zero sample capacity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 {
            return Err(ConfigError::ValidationError(
                "animation.frame_rate must be at least 1".to_string(),
            ));
        }
        // past this the frame period rounds toward zero and the loop
        // stops yielding between frames
        if self.frame_rate > 240 {
            return Err(ConfigError::ValidationError(
                "animation.frame_rate must be at most 240".to_string(),
            ));
        }
        if self.randomize_duration.is_zero() {
            return Err(ConfigError::ValidationError(
                "animation.randomize_duration_ms must be at least 1".to_string(),
            ));
        }
        if self.sample_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "ui.sample_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/cospal/config.toml` or
/// `~/.config/cospal/config.toml` if `XDG_CONFIG_HOME` is not set.
/// The `COSPAL_CONFIG` environment variable overrides both.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("COSPAL_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|p| p.join("cospal").join("config.toml"))
}

/// Load configuration from the default path
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed or
/// fails validation. A missing config file is not an error (defaults
/// are used).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or
/// parsed, or if the resolved values fail validation.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: CospalToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    config.validate()?;
    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut AppConfig, toml: &CospalToml) {
    if let Some(duration) = toml.animation.randomize_duration_ms {
        config.randomize_duration = Duration::from_millis(duration);
    }
    if let Some(easing) = toml.animation.easing {
        config.easing = easing;
    }
    if let Some(rate) = toml.animation.frame_rate {
        config.frame_rate = rate;
    }

    if let Some(enabled) = toml.persist.enabled {
        config.persist_enabled = enabled;
    }
    if let Some(delay) = toml.persist.debounce_ms {
        config.persist_debounce = Duration::from_millis(delay);
    }

    if let Some(capacity) = toml.ui.sample_capacity {
        config.sample_capacity = capacity;
    }
    if let Some(format) = toml.ui.color_format {
        config.color_format = format;
    }
}
