//! Paint-order operations on a page.
//!
//! Each operation only permutes `Page::elements`, so the set of ids and the
//! element count never change. They return `true` if the order changed.

use crate::element::ElementId;
use crate::page::Page;

impl Page {
    /// Swap an element with its neighbour above.
    pub(crate) fn bring_forward(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(pos) if pos + 1 < self.elements.len() => {
                self.elements.swap(pos, pos + 1);
                true
            }
            _ => false,
        }
    }

    /// Swap an element with its neighbour below.
    pub(crate) fn send_backward(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(pos) if pos > 0 => {
                self.elements.swap(pos, pos - 1);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn bring_to_front(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(pos) if pos + 1 < self.elements.len() => {
                let element = self.elements.remove(pos);
                self.elements.push(element);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn send_to_back(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(pos) if pos > 0 => {
                let element = self.elements.remove(pos);
                self.elements.insert(0, element);
                true
            }
            _ => false,
        }
    }
}
