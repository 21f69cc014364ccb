//! Element definitions for pages.

mod image;
mod patch;
mod shape;
mod text;

pub use image::{ImageElement, ImageFormat};
pub use patch::{ElementDraft, ElementPatch};
pub use shape::{ShapeElement, ShapeKind};
pub use text::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, LINE_HEIGHT, TextAlign, TextElement};

use kurbo::{Point, Rect, Size, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Variant-specific element data.
///
/// Every consumer matches on all three variants; adding a variant is a
/// compile error everywhere it is not handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    Text(TextElement),
    Shape(ShapeElement),
    Image(ImageElement),
}

impl ElementKind {
    /// Short name used in logs and history labels.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Text(_) => "text",
            ElementKind::Shape(_) => "shape",
            ElementKind::Image(_) => "image",
        }
    }
}

/// One positioned object on a page.
///
/// Geometry is only writable inside the crate so that `width > 0` and
/// `height > 0` hold after every store operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub(crate) id: ElementId,
    /// Top-left corner in page space.
    pub(crate) position: Point,
    pub(crate) width: f64,
    pub(crate) height: f64,
    #[serde(default)]
    pub(crate) locked: bool,
    /// Set on creation, cleared by the first update.
    #[serde(default)]
    pub(crate) is_new: bool,
    pub(crate) kind: ElementKind,
}

impl Element {
    /// Minimum width/height used when no configuration is at hand.
    pub const MIN_SIZE: f64 = 1.0;

    pub(crate) fn new(kind: ElementKind, position: Point, size: Size) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width: clamp_dimension(size.width, Self::MIN_SIZE),
            height: clamp_dimension(size.height, Self::MIN_SIZE),
            locked: false,
            is_new: true,
            kind,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Bounding box in page space.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size())
    }

    /// Bounding box, or `None` when any coordinate is not a finite number.
    pub fn world_rect(&self) -> Option<Rect> {
        let rect = self.bounds();
        rect.is_finite().then_some(rect)
    }

    /// Check if a point (in page space) hits this element.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.world_rect()
            .map(|rect| rect.inflate(tolerance, tolerance).contains(point))
            .unwrap_or(false)
    }

    pub fn as_text(&self) -> Option<&TextElement> {
        match &self.kind {
            ElementKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<&ShapeElement> {
        match &self.kind {
            ElementKind::Shape(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageElement> {
        match &self.kind {
            ElementKind::Image(image) => Some(image),
            _ => None,
        }
    }

    /// Give this element a fresh identifier (used when duplicating).
    pub(crate) fn regenerate_id(&mut self) {
        self.id = Uuid::new_v4();
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

/// Clamp a width or height to `min`, treating non-finite values as too small.
pub(crate) fn clamp_dimension(value: f64, min: f64) -> f64 {
    if value.is_finite() && value >= min {
        value
    } else {
        min
    }
}
