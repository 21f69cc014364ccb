//! The document: an ordered list of pages with one current page.

use crate::element::ElementId;
use crate::page::{Page, PageId};
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised when importing a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Document has no pages")]
    NoPages,
    #[error("Current page {0} is not in the document")]
    MissingCurrentPage(PageId),
    #[error("Page id {0} appears more than once")]
    DuplicatePage(PageId),
    #[error("Element id {0} appears more than once")]
    DuplicateElement(ElementId),
    #[error("Invalid size {width}x{height} for {what}")]
    InvalidSize {
        what: String,
        width: f64,
        height: f64,
    },
}

/// A snapshot of the document's pages for undo/redo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub(crate) pages: Vec<Page>,
}

impl DocumentSnapshot {
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }
}

/// A design document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub(crate) pages: Vec<Page>,
    pub(crate) current_page_id: PageId,
}

impl Document {
    /// Create a document with one empty page of the given size.
    pub fn new(page_size: Size) -> Self {
        let page = Page::new(page_size);
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            current_page_id: page.id(),
            pages: vec![page],
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id() == id)
    }

    pub(crate) fn page_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id() == id)
    }

    pub fn page_index(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|p| p.id() == id)
    }

    pub fn current_page_id(&self) -> PageId {
        self.current_page_id
    }

    /// The current page. Falls back to the first page if the id is stale.
    pub fn current_page(&self) -> &Page {
        match self.page(self.current_page_id) {
            Some(page) => page,
            None => &self.pages[0],
        }
    }

    pub(crate) fn current_page_mut(&mut self) -> &mut Page {
        let index = self.page_index(self.current_page_id).unwrap_or(0);
        &mut self.pages[index]
    }

    /// Find the page holding an element.
    pub fn page_of(&self, id: ElementId) -> Option<PageId> {
        self.pages.iter().find(|p| p.contains(id)).map(Page::id)
    }

    /// Append a new page and return its id.
    pub(crate) fn add_page(&mut self, size: Size) -> PageId {
        let page = Page::new(size);
        let id = page.id();
        self.pages.push(page);
        id
    }

    /// Remove a page. The last remaining page cannot be removed.
    pub(crate) fn remove_page(&mut self, id: PageId) -> Option<Page> {
        if self.pages.len() <= 1 {
            return None;
        }
        let index = self.page_index(id)?;
        let page = self.pages.remove(index);
        if self.current_page_id == id {
            let next = index.min(self.pages.len() - 1);
            self.current_page_id = self.pages[next].id();
        }
        Some(page)
    }

    /// Make `id` the current page. Returns false if the page does not exist.
    pub(crate) fn set_current_page(&mut self, id: PageId) -> bool {
        if self.page(id).is_some() {
            self.current_page_id = id;
            true
        } else {
            false
        }
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            pages: self.pages.clone(),
        }
    }

    /// Restore pages from a snapshot, keeping the current page if it still exists.
    pub(crate) fn restore(&mut self, snapshot: DocumentSnapshot) {
        if snapshot.pages.is_empty() {
            log::warn!("Refusing to restore an empty snapshot");
            return;
        }
        self.pages = snapshot.pages;
        if self.page(self.current_page_id).is_none() {
            self.current_page_id = self.pages[0].id();
        }
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize and validate a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    /// Check the structural invariants every document must hold.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.pages.is_empty() {
            return Err(DocumentError::NoPages);
        }
        if self.page(self.current_page_id).is_none() {
            return Err(DocumentError::MissingCurrentPage(self.current_page_id));
        }

        let mut page_ids = HashSet::new();
        let mut element_ids = HashSet::new();
        for page in &self.pages {
            if !page_ids.insert(page.id()) {
                return Err(DocumentError::DuplicatePage(page.id()));
            }
            check_size(format!("page {}", page.id()), page.canvas_size())?;
            for element in page.elements() {
                if !element_ids.insert(element.id()) {
                    return Err(DocumentError::DuplicateElement(element.id()));
                }
                check_size(format!("element {}", element.id()), element.size())?;
            }
        }
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Page::DEFAULT_SIZE)
    }
}

fn check_size(what: String, size: Size) -> Result<(), DocumentError> {
    if size.is_finite() && size.width > 0.0 && size.height > 0.0 {
        Ok(())
    } else {
        Err(DocumentError::InvalidSize {
            what,
            width: size.width,
            height: size.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, ElementKind, TextElement};
    use kurbo::Point;
    use pretty_assertions::assert_eq;

    fn text_element() -> Element {
        Element::new(
            ElementKind::Text(TextElement::new("hi")),
            Point::new(5.0, 5.0),
            Size::new(40.0, 20.0),
        )
    }

    #[test]
    fn test_new_document_has_one_page() {
        let doc = Document::default();
        assert_eq!(doc.pages().len(), 1);
        assert_eq!(doc.current_page().id(), doc.current_page_id());
    }

    #[test]
    fn test_cannot_remove_last_page() {
        let mut doc = Document::default();
        let only = doc.current_page_id();
        assert!(doc.remove_page(only).is_none());
        assert_eq!(doc.pages().len(), 1);
    }

    #[test]
    fn test_remove_current_page_moves_to_neighbour() {
        let mut doc = Document::default();
        let first = doc.current_page_id();
        let second = doc.add_page(Page::DEFAULT_SIZE);
        assert!(doc.set_current_page(second));
        assert!(doc.remove_page(second).is_some());
        assert_eq!(doc.current_page_id(), first);
    }

    #[test]
    fn test_restore_keeps_valid_current_page() {
        let mut doc = Document::default();
        let snapshot = doc.snapshot();
        let second = doc.add_page(Page::DEFAULT_SIZE);
        doc.set_current_page(second);
        doc.restore(snapshot);
        assert_eq!(doc.pages().len(), 1);
        assert_eq!(doc.current_page_id(), doc.pages()[0].id());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut doc = Document::default();
        doc.current_page_mut().push(text_element());
        let json = doc.to_json().unwrap();
        let loaded = Document::from_json(&json).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_from_json_rejects_duplicate_elements() {
        let mut doc = Document::default();
        let element = text_element();
        doc.current_page_mut().push(element.clone());
        doc.current_page_mut().push(element);
        let json = doc.to_json().unwrap();
        assert!(matches!(
            Document::from_json(&json),
            Err(DocumentError::DuplicateElement(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_missing_current_page() {
        let mut doc = Document::default();
        doc.current_page_id = Uuid::new_v4();
        let json = doc.to_json().unwrap();
        assert!(matches!(
            Document::from_json(&json),
            Err(DocumentError::MissingCurrentPage(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_bad_sizes() {
        let mut doc = Document::default();
        let mut element = text_element();
        element.width = 0.0;
        doc.current_page_mut().push(element);
        let json = doc.to_json().unwrap();
        assert!(matches!(
            Document::from_json(&json),
            Err(DocumentError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(Document::from_json("{"), Err(DocumentError::Json(_))));
    }
}
