//! Text element data.

use super::SerializableColor;
use serde::{Deserialize, Serialize};

/// Default font size in pixels.
pub const DEFAULT_FONT_SIZE: f64 = 24.0;
/// Default font family name.
pub const DEFAULT_FONT_FAMILY: &str = "Inter";
/// Line height as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.2;

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    /// Get display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            TextAlign::Left => "Left",
            TextAlign::Center => "Center",
            TextAlign::Right => "Right",
            TextAlign::Justify => "Justify",
        }
    }
}

/// Text-specific element fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    /// The text content. Lines are separated by `\n`.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f64,
    pub font_family: String,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default)]
    pub is_bold: bool,
    #[serde(default)]
    pub is_italic: bool,
    #[serde(default)]
    pub is_underlined: bool,
    #[serde(default)]
    pub is_strikethrough: bool,
    pub color: SerializableColor,
}

impl TextElement {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            text_align: TextAlign::default(),
            is_bold: false,
            is_italic: false,
            is_underlined: false,
            is_strikethrough: false,
            color: SerializableColor::black(),
        }
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    pub fn with_align(mut self, text_align: TextAlign) -> Self {
        self.text_align = text_align;
        self
    }

    pub fn with_color(mut self, color: SerializableColor) -> Self {
        self.color = color;
        self
    }

    /// Number of lines; empty content still occupies one line.
    pub fn line_count(&self) -> usize {
        self.content.lines().count().max(1)
    }

    /// Height of the laid-out text block.
    pub fn natural_height(&self) -> f64 {
        self.line_count() as f64 * self.font_size * LINE_HEIGHT
    }
}

impl Default for TextElement {
    fn default() -> Self {
        Self::new("")
    }
}
