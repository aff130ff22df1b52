//! Runtime configuration for gesture recognition and logging.
//!
//! # Responsibility
//! - Hold density-independent gesture thresholds and the display density
//!   that scales them.
//! - Load host-supplied JSON with every field optional.
//!
//! # Invariants
//! - A config that passed `validate()` never yields a non-positive slop,
//!   niche or row-relative ratio.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_TOUCH_SLOP_DP: f32 = 8.0;
pub const DEFAULT_NICHE_DP: f32 = 66.0;
pub const DEFAULT_PULL_ACTIVATION_PX: f32 = 10.0;
pub const DEFAULT_LONG_PRESS_TIMEOUT_MS: u64 = 500;

/// Error for config parsing and validation.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid config `{field}`: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Thresholds used by `gesture::GestureController`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Physical pixels per density-independent pixel.
    pub density: f32,
    pub touch_slop_dp: f32,
    /// Width of the icon zone revealed behind a swiped row; also the commit
    /// threshold of a swipe.
    pub niche_dp: f32,
    /// Downward travel at the top of the list that starts pull-to-create.
    pub pull_activation_px: f32,
    pub long_press_timeout_ms: u64,
    /// Fraction of a row height the dragged row must travel before a
    /// reorder is considered.
    pub reorder_hysteresis: f32,
    /// Fraction of the view height past which an over-pull starts folding
    /// the placeholder away.
    pub pull_exit_baseline_ratio: f32,
    /// Fraction of a row height past the exit baseline that flips the pull
    /// into cancel.
    pub pull_cancel_ratio: f32,
    /// Rotation (degrees) under which the placeholder shows the release hint.
    pub pull_hint_release_rotation: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            touch_slop_dp: DEFAULT_TOUCH_SLOP_DP,
            niche_dp: DEFAULT_NICHE_DP,
            pull_activation_px: DEFAULT_PULL_ACTIVATION_PX,
            long_press_timeout_ms: DEFAULT_LONG_PRESS_TIMEOUT_MS,
            reorder_hysteresis: 0.5,
            pull_exit_baseline_ratio: 0.4,
            pull_cancel_ratio: 0.7,
            pull_hint_release_rotation: 15.0,
        }
    }
}

impl GestureConfig {
    /// Default thresholds for a display of the given density.
    pub fn with_density(density: f32) -> Self {
        Self {
            density,
            ..Self::default()
        }
    }

    pub fn touch_slop(&self) -> f32 {
        self.touch_slop_dp * self.density
    }

    pub fn niche(&self) -> f32 {
        self.niche_dp * self.density
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("density", self.density)?;
        positive("touch_slop_dp", self.touch_slop_dp)?;
        positive("niche_dp", self.niche_dp)?;
        non_negative("pull_activation_px", self.pull_activation_px)?;
        unit_ratio("reorder_hysteresis", self.reorder_hysteresis)?;
        unit_ratio("pull_exit_baseline_ratio", self.pull_exit_baseline_ratio)?;
        unit_ratio("pull_cancel_ratio", self.pull_cancel_ratio)?;
        if !(0.0..=90.0).contains(&self.pull_hint_release_rotation) {
            return Err(ConfigError::Invalid {
                field: "pull_hint_release_rotation",
                reason: format!(
                    "expected degrees in 0..=90, got {}",
                    self.pull_hint_release_rotation
                ),
            });
        }
        Ok(())
    }
}

/// Rolling file log settings handed to `logging::init_logging`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Absolute directory for log files; `None` leaves logging off.
    pub log_dir: Option<String>,
    pub max_file_bytes: u64,
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: None,
            max_file_bytes: 10 * 1024 * 1024,
            max_files: 5,
        }
    }
}

/// Top-level host configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub gesture: GestureConfig,
    pub logging: LoggingConfig,
}

impl CoreConfig {
    /// Parses and validates JSON; missing fields take their defaults and an
    /// empty or blank string yields the default config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gesture.validate()?;
        if self.logging.max_files == 0 {
            return Err(ConfigError::Invalid {
                field: "logging.max_files",
                reason: "must keep at least one file".to_string(),
            });
        }
        if self.logging.max_file_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "logging.max_file_bytes",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(ConfigError::Invalid {
        field,
        reason: format!("expected a positive number, got {value}"),
    })
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(ConfigError::Invalid {
        field,
        reason: format!("expected a non-negative number, got {value}"),
    })
}

fn unit_ratio(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        return Ok(());
    }
    Err(ConfigError::Invalid {
        field,
        reason: format!("expected a ratio in (0, 1], got {value}"),
    })
}
