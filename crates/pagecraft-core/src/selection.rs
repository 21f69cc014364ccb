//! Selection set and the floating action bar tied to it.

use crate::element::ElementId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Ordered set of selected element ids on the current page.
///
/// Mutation is crate-private: [`crate::Canvas`] keeps the set a subset of
/// the current page's elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    /// The most recently added element.
    pub fn primary(&self) -> Option<ElementId> {
        self.ids.last().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Toggle membership when `additive`, otherwise replace with `{id}`.
    pub(crate) fn select(&mut self, id: ElementId, additive: bool) {
        if additive {
            if let Some(pos) = self.ids.iter().position(|&s| s == id) {
                self.ids.remove(pos);
            } else {
                self.ids.push(id);
            }
        } else {
            self.ids.clear();
            self.ids.push(id);
        }
    }

    /// Replace the whole set. Duplicates are dropped, first occurrence wins.
    pub(crate) fn replace(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.ids.clear();
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.ids.clear();
    }

    pub(crate) fn remove(&mut self, id: ElementId) -> bool {
        let len = self.ids.len();
        self.ids.retain(|&s| s != id);
        self.ids.len() != len
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&ElementId) -> bool) {
        self.ids.retain(keep);
    }
}

/// Contextual toolbar shown next to a selected element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionBar {
    pub is_active: bool,
    /// Anchor in screen space, supplied by the rendering layer.
    pub position: Point,
    pub element_id: Option<ElementId>,
}

impl ActionBar {
    pub(crate) fn show(&mut self, element_id: ElementId, position: Point) {
        self.is_active = true;
        self.position = position;
        self.element_id = Some(element_id);
    }

    pub(crate) fn hide(&mut self) {
        *self = Self::default();
    }

    pub fn references(&self, id: ElementId) -> bool {
        self.element_id == Some(id)
    }
}
