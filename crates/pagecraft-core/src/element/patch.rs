//! Partial element descriptions: drafts for creation, patches for updates.

use super::{
    Element, ElementKind, ImageElement, SerializableColor, ShapeElement, TextAlign, TextElement,
    clamp_dimension,
};
use crate::config::EditorConfig;
use crate::measure::TextMeasureService;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// A sparse set of field changes for [`Element`].
///
/// Fields that belong to a different element variant than the target are
/// ignored when the patch is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub locked: Option<bool>,
    /// Explicitly keep or set the "just created" marker.
    pub is_new: Option<bool>,

    pub content: Option<String>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub text_align: Option<TextAlign>,
    pub is_bold: Option<bool>,
    pub is_italic: Option<bool>,
    pub is_underlined: Option<bool>,
    pub is_strikethrough: Option<bool>,
    pub text_color: Option<SerializableColor>,

    pub src: Option<String>,

    /// `Some(None)` removes the fill.
    pub fill: Option<Option<SerializableColor>>,
    pub stroke: Option<SerializableColor>,
    pub stroke_width: Option<f64>,
    pub corner_radius: Option<f64>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch that moves an element's top-left corner.
    pub fn position(position: Point) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
            ..Self::default()
        }
    }

    pub fn size(size: Size) -> Self {
        Self {
            width: Some(size.width),
            height: Some(size.height),
            ..Self::default()
        }
    }

    /// Patch that sets position and size from a rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            x: Some(rect.x0),
            y: Some(rect.y0),
            width: Some(rect.width()),
            height: Some(rect.height()),
            ..Self::default()
        }
    }

    pub fn locked(locked: bool) -> Self {
        Self {
            locked: Some(locked),
            ..Self::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn has_geometry(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.width.is_some() || self.height.is_some()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Element {
    /// Apply a patch in place.
    ///
    /// The lock flag is applied first; if the element is locked afterwards,
    /// geometry fields are dropped. Sizes are clamped to `min_size` and
    /// non-finite coordinates are ignored.
    pub(crate) fn apply_patch(&mut self, patch: &ElementPatch, min_size: f64) {
        if let Some(locked) = patch.locked {
            self.locked = locked;
        }

        if self.locked && patch.has_geometry() {
            log::debug!("Ignoring geometry change on locked element {}", self.id);
        } else {
            if let Some(x) = patch.x.filter(|x| x.is_finite()) {
                self.position.x = x;
            }
            if let Some(y) = patch.y.filter(|y| y.is_finite()) {
                self.position.y = y;
            }
            if let Some(width) = patch.width {
                self.width = clamp_dimension(width, min_size);
            }
            if let Some(height) = patch.height {
                self.height = clamp_dimension(height, min_size);
            }
        }

        self.is_new = patch.is_new.unwrap_or(false);

        match &mut self.kind {
            ElementKind::Text(text) => {
                if let Some(content) = &patch.content {
                    text.content.clone_from(content);
                }
                if let Some(font_size) = patch.font_size.filter(|s| s.is_finite()) {
                    text.font_size = font_size.max(1.0);
                }
                if let Some(family) = &patch.font_family {
                    text.font_family.clone_from(family);
                }
                if let Some(align) = patch.text_align {
                    text.text_align = align;
                }
                if let Some(bold) = patch.is_bold {
                    text.is_bold = bold;
                }
                if let Some(italic) = patch.is_italic {
                    text.is_italic = italic;
                }
                if let Some(underlined) = patch.is_underlined {
                    text.is_underlined = underlined;
                }
                if let Some(strikethrough) = patch.is_strikethrough {
                    text.is_strikethrough = strikethrough;
                }
                if let Some(color) = patch.text_color {
                    text.color = color;
                }
            }
            ElementKind::Shape(shape) => {
                if let Some(fill) = patch.fill {
                    shape.fill = fill;
                }
                if let Some(stroke) = patch.stroke {
                    shape.stroke = stroke;
                }
                if let Some(width) = patch.stroke_width.filter(|w| w.is_finite()) {
                    shape.stroke_width = width.max(0.0);
                }
                if let Some(radius) = patch.corner_radius.filter(|r| r.is_finite()) {
                    shape.corner_radius = radius.max(0.0);
                }
            }
            ElementKind::Image(image) => {
                if let Some(src) = &patch.src {
                    image.src.clone_from(src);
                }
            }
        }
    }
}

/// Description of an element to create. Missing sizes get type defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDraft {
    pub position: Point,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub locked: bool,
    pub kind: ElementKind,
}

impl ElementDraft {
    pub fn new(kind: ElementKind, position: Point) -> Self {
        Self {
            position,
            width: None,
            height: None,
            locked: false,
            kind,
        }
    }

    pub fn text(text: TextElement, position: Point) -> Self {
        Self::new(ElementKind::Text(text), position)
    }

    pub fn shape(shape: ShapeElement, position: Point) -> Self {
        Self::new(ElementKind::Shape(shape), position)
    }

    pub fn image(image: ImageElement, position: Point) -> Self {
        Self::new(ElementKind::Image(image), position)
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.width = Some(size.width);
        self.height = Some(size.height);
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Resolve defaults and build the element with a fresh id.
    pub(crate) fn into_element(self, config: &EditorConfig, measure: &TextMeasureService) -> Element {
        let default_size = match &self.kind {
            ElementKind::Text(text) => {
                let width = self.width.unwrap_or_else(|| {
                    measure.measure_width(&text.content, text.font_size, &text.font_family)
                });
                Size::new(width, text.natural_height())
            }
            ElementKind::Shape(_) => config.default_shape_size,
            ElementKind::Image(image) => image.natural_size.unwrap_or(config.default_image_size),
        };

        let min = config.min_element_size;
        let mut element = Element::new(self.kind, self.position, default_size);
        element.width = clamp_dimension(self.width.unwrap_or(default_size.width), min);
        element.height = clamp_dimension(self.height.unwrap_or(default_size.height), min);
        element.locked = self.locked;
        if !element.position.is_finite() {
            log::debug!("Draft position is not finite, placing element at origin");
            element.position = Point::ZERO;
        }
        element
    }
}
