//! Resize handles and resize geometry.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Type of resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Resizes both axes; the opposite corner stays fixed.
    Corner(Corner),
    /// Resizes one axis; the opposite edge stays fixed.
    Edge(Edge),
}

impl HandleKind {
    /// All handles, corners first so they win hit-testing on small elements.
    pub const ALL: [HandleKind; 8] = [
        HandleKind::Corner(Corner::TopLeft),
        HandleKind::Corner(Corner::TopRight),
        HandleKind::Corner(Corner::BottomRight),
        HandleKind::Corner(Corner::BottomLeft),
        HandleKind::Edge(Edge::Top),
        HandleKind::Edge(Edge::Right),
        HandleKind::Edge(Edge::Bottom),
        HandleKind::Edge(Edge::Left),
    ];

    pub fn moves_left(&self) -> bool {
        matches!(
            self,
            HandleKind::Corner(Corner::TopLeft | Corner::BottomLeft) | HandleKind::Edge(Edge::Left)
        )
    }

    pub fn moves_right(&self) -> bool {
        matches!(
            self,
            HandleKind::Corner(Corner::TopRight | Corner::BottomRight)
                | HandleKind::Edge(Edge::Right)
        )
    }

    pub fn moves_top(&self) -> bool {
        matches!(
            self,
            HandleKind::Corner(Corner::TopLeft | Corner::TopRight) | HandleKind::Edge(Edge::Top)
        )
    }

    pub fn moves_bottom(&self) -> bool {
        matches!(
            self,
            HandleKind::Corner(Corner::BottomLeft | Corner::BottomRight)
                | HandleKind::Edge(Edge::Bottom)
        )
    }

    /// CSS-style cursor direction ("nw", "e", ...), for hosts that show resize cursors.
    pub fn compass(&self) -> &'static str {
        match self {
            HandleKind::Corner(Corner::TopLeft) => "nw",
            HandleKind::Corner(Corner::TopRight) => "ne",
            HandleKind::Corner(Corner::BottomRight) => "se",
            HandleKind::Corner(Corner::BottomLeft) => "sw",
            HandleKind::Edge(Edge::Top) => "n",
            HandleKind::Edge(Edge::Right) => "e",
            HandleKind::Edge(Edge::Bottom) => "s",
            HandleKind::Edge(Edge::Left) => "w",
        }
    }

    /// Position of this handle on a bounding box.
    pub fn position_on(&self, bounds: Rect) -> Point {
        let center = bounds.center();
        match self {
            HandleKind::Corner(Corner::TopLeft) => Point::new(bounds.x0, bounds.y0),
            HandleKind::Corner(Corner::TopRight) => Point::new(bounds.x1, bounds.y0),
            HandleKind::Corner(Corner::BottomRight) => Point::new(bounds.x1, bounds.y1),
            HandleKind::Corner(Corner::BottomLeft) => Point::new(bounds.x0, bounds.y1),
            HandleKind::Edge(Edge::Top) => Point::new(center.x, bounds.y0),
            HandleKind::Edge(Edge::Right) => Point::new(bounds.x1, center.y),
            HandleKind::Edge(Edge::Bottom) => Point::new(center.x, bounds.y1),
            HandleKind::Edge(Edge::Left) => Point::new(bounds.x0, center.y),
        }
    }
}

/// A resize handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in page coordinates.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point (in page coordinates) hits this handle.
    /// `tolerance` should already be adjusted for zoom.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// The eight resize handles of a bounding box.
pub fn get_handles(bounds: Rect) -> Vec<Handle> {
    HandleKind::ALL
        .iter()
        .map(|kind| Handle::new(kind.position_on(bounds), *kind))
        .collect()
}

/// Find which handle (if any) is under `point`.
pub fn hit_test_handles(bounds: Rect, point: Point, tolerance: f64) -> Option<HandleKind> {
    get_handles(bounds)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

/// Resize `original` by dragging `handle` by `delta`.
///
/// The sides the handle does not move stay fixed. Sizes never drop below
/// `min_size`; a handle dragged past the opposite side stops there instead of
/// flipping. With `keep_aspect_ratio`, corner drags scale uniformly.
pub fn apply_resize(
    original: Rect,
    handle: HandleKind,
    delta: Vec2,
    min_size: f64,
    keep_aspect_ratio: bool,
) -> Rect {
    let dx = if delta.x.is_finite() { delta.x } else { 0.0 };
    let dy = if delta.y.is_finite() { delta.y } else { 0.0 };
    let min_size = min_size.max(f64::EPSILON);
    let Rect {
        mut x0,
        mut y0,
        mut x1,
        mut y1,
    } = original;

    if handle.moves_left() {
        x0 = (x0 + dx).min(x1 - min_size);
    }
    if handle.moves_right() {
        x1 = (x1 + dx).max(x0 + min_size);
    }
    if handle.moves_top() {
        y0 = (y0 + dy).min(y1 - min_size);
    }
    if handle.moves_bottom() {
        y1 = (y1 + dy).max(y0 + min_size);
    }

    if keep_aspect_ratio && matches!(handle, HandleKind::Corner(_)) {
        let original_width = original.width().max(f64::EPSILON);
        let original_height = original.height().max(f64::EPSILON);
        let scale = ((x1 - x0) / original_width)
            .max((y1 - y0) / original_height)
            .max(min_size / original_width)
            .max(min_size / original_height);
        let width = original_width * scale;
        let height = original_height * scale;

        if handle.moves_left() {
            x0 = x1 - width;
        } else {
            x1 = x0 + width;
        }
        if handle.moves_top() {
            y0 = y1 - height;
        } else {
            y1 = y0 + height;
        }
    }

    Rect::new(x0, y0, x1, y1)
}
