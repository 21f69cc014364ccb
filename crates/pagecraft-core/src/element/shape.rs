//! Shape element data.

use super::SerializableColor;
use serde::{Deserialize, Serialize};

/// Geometric primitive drawn by a shape element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Triangle,
    Line,
}

impl ShapeKind {
    /// Get display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Line => "Line",
        }
    }

    /// Whether this kind can be filled.
    pub fn is_closed(&self) -> bool {
        !matches!(self, ShapeKind::Line)
    }
}

/// Shape-specific element fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeElement {
    pub kind: ShapeKind,
    /// Fill color (None = no fill).
    pub fill: Option<SerializableColor>,
    pub stroke: SerializableColor,
    pub stroke_width: f64,
    /// Corner radius, only meaningful for rectangles.
    #[serde(default)]
    pub corner_radius: f64,
}

impl ShapeElement {
    pub fn new(kind: ShapeKind) -> Self {
        let fill = kind
            .is_closed()
            .then(|| SerializableColor::new(200, 200, 200, 255));
        Self {
            kind,
            fill,
            stroke: SerializableColor::black(),
            stroke_width: 2.0,
            corner_radius: 0.0,
        }
    }

    pub fn with_fill(mut self, fill: Option<SerializableColor>) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_stroke(mut self, stroke: SerializableColor, width: f64) -> Self {
        self.stroke = stroke;
        self.stroke_width = width;
        self
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }
}

impl Default for ShapeElement {
    fn default() -> Self {
        Self::new(ShapeKind::default())
    }
}
