//! Text width measurement for default text element sizes.

use crate::element::DEFAULT_FONT_SIZE;
use std::fmt;

/// Average glyph advance as a fraction of the font size, used when no
/// measurement surface is available.
pub const FALLBACK_CHAR_WIDTH: f64 = 0.6;

/// Default caret padding in pixels.
pub const DEFAULT_CARET_PADDING: f64 = 4.0;

/// A host-provided surface that can lay out a single line of text.
///
/// Returning `None` (or a non-finite or negative width) makes the service
/// use its approximate fallback instead.
pub trait TextMeasurer {
    fn measure_line(&self, line: &str, font_size: f64, font_family: &str) -> Option<f64>;
}

/// Computes widths for new text elements.
pub struct TextMeasureService {
    surface: Option<Box<dyn TextMeasurer>>,
    caret_padding: f64,
}

impl fmt::Debug for TextMeasureService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextMeasureService")
            .field("has_surface", &self.surface.is_some())
            .field("caret_padding", &self.caret_padding)
            .finish()
    }
}

impl Default for TextMeasureService {
    fn default() -> Self {
        Self::new(DEFAULT_CARET_PADDING)
    }
}

impl TextMeasureService {
    pub fn new(caret_padding: f64) -> Self {
        Self {
            surface: None,
            caret_padding: if caret_padding.is_finite() {
                caret_padding.max(0.0)
            } else {
                DEFAULT_CARET_PADDING
            },
        }
    }

    pub fn set_surface(&mut self, surface: Box<dyn TextMeasurer>) {
        self.surface = Some(surface);
    }

    pub fn clear_surface(&mut self) {
        self.surface = None;
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    pub fn caret_padding(&self) -> f64 {
        self.caret_padding
    }

    /// Width of the widest line of `text`, plus caret padding.
    pub fn measure_width(&self, text: &str, font_size: f64, font_family: &str) -> f64 {
        let font_size = if font_size.is_finite() && font_size > 0.0 {
            font_size
        } else {
            DEFAULT_FONT_SIZE
        };

        let measured = self.surface.as_ref().and_then(|surface| {
            let mut widest = 0.0_f64;
            for line in text.lines() {
                let width = surface.measure_line(line, font_size, font_family)?;
                if !width.is_finite() || width < 0.0 {
                    log::debug!("Rejecting measured width {width} for font {font_family}");
                    return None;
                }
                widest = widest.max(width);
            }
            Some(widest)
        });

        measured.unwrap_or_else(|| fallback_width(text, font_size)) + self.caret_padding
    }
}

/// Approximate width of the widest line: `chars * font_size * 0.6`.
pub fn fallback_width(text: &str, font_size: f64) -> f64 {
    let widest = text
        .lines()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    widest as f64 * font_size * FALLBACK_CHAR_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAdvance(f64);

    impl TextMeasurer for FixedAdvance {
        fn measure_line(&self, line: &str, _font_size: f64, _font_family: &str) -> Option<f64> {
            Some(line.len() as f64 * self.0)
        }
    }

    struct Broken;

    impl TextMeasurer for Broken {
        fn measure_line(&self, _line: &str, _font_size: f64, _font_family: &str) -> Option<f64> {
            Some(f64::NAN)
        }
    }

    #[test]
    fn test_fallback_width() {
        assert_eq!(fallback_width("", 10.0), 0.0);
        assert!((fallback_width("abcde", 10.0) - 30.0).abs() < 1e-9);
        assert!((fallback_width("ab\nabcd\na", 10.0) - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_fallback_includes_padding() {
        let service = TextMeasureService::new(4.0);
        assert!((service.measure_width("abcde", 10.0, "Inter") - 34.0).abs() < 1e-9);
    }

    #[test]
    fn test_surface_is_preferred() {
        let mut service = TextMeasureService::new(2.0);
        service.set_surface(Box::new(FixedAdvance(3.0)));
        assert_eq!(service.measure_width("ab\nabcd", 10.0, "Inter"), 14.0);
    }

    #[test]
    fn test_bad_surface_result_falls_back() {
        let mut service = TextMeasureService::new(0.0);
        service.set_surface(Box::new(Broken));
        assert!((service.measure_width("ab", 10.0, "Inter") - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_font_size_uses_default() {
        let service = TextMeasureService::new(0.0);
        let expected = fallback_width("ab", DEFAULT_FONT_SIZE);
        assert_eq!(service.measure_width("ab", f64::NAN, "Inter"), expected);
        assert_eq!(service.measure_width("ab", -3.0, "Inter"), expected);
    }
}
