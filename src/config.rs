//! Construction-time configuration for the grid widget.
//!
//! Every live-mutable parameter of [`crate::GridEdit`] has a field here with a documented
//! default, plus the auto-pan driver settings. Configs load from JSON; missing fields take
//! their defaults.

use crate::constants;
use crate::error::{ConfigError, GridError};
use crate::types::{validate_line_width, validate_spacing, Color};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Grid widget configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridEditConfig {
    /// Base spacing in logical units (default 20)
    pub grid_spacing: f64,
    /// Minor cells per major cell (default 5)
    pub major_interval: u32,
    /// Master visibility switch
    pub show_grid: bool,
    /// Minor tier visibility
    pub show_minor_grid: bool,
    /// Major tier visibility
    pub show_major_grid: bool,
    /// Fill behind the grid (default white)
    pub background_color: Color,
    /// Minor stroke width in device pixels (default 0.5)
    pub minor_line_width: f64,
    /// Major stroke width in device pixels (default 1.0)
    pub major_line_width: f64,
    /// Minor stroke color (default light gray)
    pub minor_line_stroke: Color,
    /// Major stroke color (default gray)
    pub major_line_stroke: Color,
    /// Stored scale multiplier (default 3.0)
    pub grid_scale: f64,
    /// Initial horizontal viewport offset
    pub offset_x: f64,
    /// Initial vertical viewport offset
    pub offset_y: f64,
    /// Content layer size relative to the visible bounds (default 3)
    pub oversize_factor: f64,
    /// Automatic panning
    pub auto_pan: AutoPanConfig,
}

impl Default for GridEditConfig {
    fn default() -> Self {
        Self {
            grid_spacing: constants::GRID_SPACING,
            major_interval: constants::MAJOR_INTERVAL,
            show_grid: true,
            show_minor_grid: true,
            show_major_grid: true,
            background_color: Color::WHITE,
            minor_line_width: constants::MINOR_LINE_WIDTH,
            major_line_width: constants::MAJOR_LINE_WIDTH,
            minor_line_stroke: Color::LIGHT_GRAY,
            major_line_stroke: Color::GRAY,
            grid_scale: constants::GRID_SCALE,
            offset_x: 0.0,
            offset_y: 0.0,
            oversize_factor: constants::OVERSIZE_FACTOR,
            auto_pan: AutoPanConfig::default(),
        }
    }
}

/// Automatic panning settings. The same interval and step apply to both axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoPanConfig {
    /// Pan horizontally on start
    pub horizontal: bool,
    /// Pan vertically on start
    pub vertical: bool,
    /// Milliseconds between ticks
    pub interval_ms: u64,
    /// Offset increment per tick, in logical units
    pub step: f64,
    /// Multiplier applied to the step
    pub speed: f64,
}

impl Default for AutoPanConfig {
    fn default() -> Self {
        Self {
            horizontal: true,
            vertical: false,
            interval_ms: constants::DRIFT_INTERVAL_MS,
            step: constants::DRIFT_STEP,
            speed: 1.0,
        }
    }
}

impl AutoPanConfig {
    /// Checks interval, step and speed.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.interval_ms == 0 {
            return Err(GridError::InvalidInterval);
        }
        if !self.step.is_finite() {
            return Err(GridError::InvalidStep(self.step));
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(GridError::InvalidSpeed(self.speed));
        }
        Ok(())
    }
}

impl GridEditConfig {
    /// Parses a JSON config and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every value the widget would reject.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.major_interval == 0 {
            return Err(GridError::InvalidMajorInterval(self.major_interval));
        }
        validate_spacing(self.grid_spacing)?;
        validate_spacing(self.grid_spacing * f64::from(self.major_interval))?;
        validate_line_width(self.minor_line_width)?;
        validate_line_width(self.major_line_width)?;
        if !(self.grid_scale.is_finite() && self.grid_scale > 0.0) {
            return Err(GridError::InvalidScale(self.grid_scale));
        }
        if !(self.offset_x.is_finite() && self.offset_y.is_finite()) {
            return Err(GridError::NonFiniteOffset {
                x: self.offset_x,
                y: self.offset_y,
            });
        }
        if !(self.oversize_factor.is_finite() && self.oversize_factor >= 1.0) {
            return Err(GridError::InvalidOversizeFactor(self.oversize_factor));
        }
        self.auto_pan.validate()
    }
}
