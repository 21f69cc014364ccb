//! Pages: ordered element containers.

use crate::element::{Element, ElementId, SerializableColor};
use crate::geometry::{intersects_open, union_all};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for pages.
pub type PageId = Uuid;

/// A page of the document.
///
/// Element order is the z-order: index 0 is painted first (bottom-most).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub(crate) id: PageId,
    pub(crate) canvas_size: Size,
    pub background: SerializableColor,
    pub(crate) elements: Vec<Element>,
}

impl Page {
    pub const DEFAULT_SIZE: Size = Size::new(1080.0, 1080.0);

    pub fn new(canvas_size: Size) -> Self {
        let valid = canvas_size.is_finite() && canvas_size.width > 0.0 && canvas_size.height > 0.0;
        let canvas_size = if valid { canvas_size } else { Self::DEFAULT_SIZE };
        Self {
            id: Uuid::new_v4(),
            canvas_size,
            background: SerializableColor::white(),
            elements: Vec::new(),
        }
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// The page itself as a rectangle at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.canvas_size)
    }

    /// Elements bottom to top.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub(crate) fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Z-index of an element (0 = bottom).
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// Element ids bottom to top.
    pub fn element_ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(|e| e.id).collect()
    }

    pub(crate) fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub(crate) fn insert(&mut self, index: usize, element: Element) {
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
    }

    pub(crate) fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.index_of(id)?;
        Some(self.elements.remove(index))
    }

    /// Elements under a point, topmost first.
    pub fn elements_at_point(&self, point: Point, tolerance: f64) -> Vec<ElementId> {
        self.elements
            .iter()
            .rev()
            .filter(|e| e.hit_test(point, tolerance))
            .map(|e| e.id)
            .collect()
    }

    /// Topmost element under a point.
    pub fn element_at_point(&self, point: Point, tolerance: f64) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.hit_test(point, tolerance))
            .map(|e| e.id)
    }

    /// Elements whose bounds intersect `rect` (open interval), bottom to top.
    /// Elements without a finite rectangle are skipped.
    pub fn elements_in_rect(&self, rect: Rect) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|e| e.world_rect().is_some_and(|r| intersects_open(rect, r)))
            .map(|e| e.id)
            .collect()
    }

    /// Union of all element bounds.
    pub fn content_bounds(&self) -> Option<Rect> {
        union_all(self.elements.iter().filter_map(Element::world_rect))
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}
