//! Rubber-band selection.

use kurbo::{Point, Rect};
use pagecraft_core::geometry::normalize_rect;
use pagecraft_core::{Canvas, ElementId};

/// A marquee drag in progress, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarqueeSession {
    pub start: Point,
    pub current: Point,
    /// Shift was held at press: toggle hits instead of replacing the selection.
    pub additive: bool,
}

impl MarqueeSession {
    pub fn new(start: Point, additive: bool) -> Self {
        Self {
            start,
            current: start,
            additive,
        }
    }

    /// Move the free corner. Only the live rectangle changes.
    pub fn update(&mut self, point: Point) {
        self.current = point;
    }

    /// The marquee as a normalized rectangle.
    pub fn rect(&self) -> Rect {
        normalize_rect(self.start, self.current)
    }

    /// Elements on the current page the marquee intersects.
    pub fn hits(&self, canvas: &Canvas) -> Vec<ElementId> {
        canvas.elements_in_rect(self.rect())
    }

    /// Apply the marquee to the selection. Returns the resulting selection.
    pub fn commit(self, canvas: &mut Canvas) -> Vec<ElementId> {
        let hits = self.hits(canvas);
        let selection = if self.additive {
            xor_selection(canvas.selection().ids(), &hits)
        } else {
            hits
        };
        log::debug!(
            "Marquee {:?} selected {} element(s)",
            self.rect(),
            selection.len()
        );
        canvas.select_multiple_elements(selection.iter().copied());
        selection
    }
}

/// Symmetric difference of the current selection and the marquee hits.
/// Kept ids stay in their order; newly added ids follow in hit order.
pub fn xor_selection(current: &[ElementId], hits: &[ElementId]) -> Vec<ElementId> {
    current
        .iter()
        .filter(|&id| !hits.contains(id))
        .chain(hits.iter().filter(|&id| !current.contains(id)))
        .copied()
        .collect()
}
