//! Editor configuration.

use crate::element::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};
use crate::handles::HANDLE_HIT_TOLERANCE;
use crate::history::DEFAULT_MAX_HISTORY;
use crate::measure::DEFAULT_CARET_PADDING;
use crate::snap::SNAP_THRESHOLD;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be {requirement}, got {value}")]
    OutOfRange {
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },
}

/// Tunables for the editing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Distance in page pixels within which dragged edges snap.
    pub snap_threshold: f64,
    pub snap_enabled: bool,
    /// Offset applied on both axes to duplicated elements.
    pub duplicate_offset: f64,
    /// Smallest width or height an element may have.
    pub min_element_size: f64,
    /// How long hover-leave is ignored after a resize ends.
    pub hover_debounce_ms: u64,
    pub max_history: usize,
    /// Extra width added to measured text.
    pub caret_padding: f64,
    /// Handle hit radius in screen pixels.
    pub handle_hit_tolerance: f64,
    pub default_shape_size: Size,
    pub default_image_size: Size,
    pub default_page_size: Size,
    pub default_font_size: f64,
    pub default_font_family: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_threshold: SNAP_THRESHOLD,
            snap_enabled: true,
            duplicate_offset: 10.0,
            min_element_size: 1.0,
            hover_debounce_ms: 200,
            max_history: DEFAULT_MAX_HISTORY,
            caret_padding: DEFAULT_CARET_PADDING,
            handle_hit_tolerance: HANDLE_HIT_TOLERANCE,
            default_shape_size: Size::new(100.0, 100.0),
            default_image_size: Size::new(300.0, 200.0),
            default_page_size: Size::new(1080.0, 1080.0),
            default_font_size: DEFAULT_FONT_SIZE,
            default_font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse a configuration; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("snap_threshold", self.snap_threshold)?;
        non_negative("duplicate_offset", self.duplicate_offset)?;
        non_negative("caret_padding", self.caret_padding)?;
        non_negative("handle_hit_tolerance", self.handle_hit_tolerance)?;
        positive("min_element_size", self.min_element_size)?;
        positive("default_font_size", self.default_font_size)?;
        positive("max_history", self.max_history as f64)?;
        for (field, size) in [
            ("default_shape_size", self.default_shape_size),
            ("default_image_size", self.default_image_size),
            ("default_page_size", self.default_page_size),
        ] {
            positive(field, size.width)?;
            positive(field, size.height)?;
        }
        Ok(())
    }

    pub fn hover_debounce(&self) -> Duration {
        Duration::from_millis(self.hover_debounce_ms)
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            requirement: "a finite number >= 0",
            value,
        })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            requirement: "a finite number > 0",
            value,
        })
    }
}
