//! The editable canvas: document, selection and history behind one API.

use crate::config::EditorConfig;
use crate::document::{Document, DocumentError};
use crate::element::{Element, ElementDraft, ElementId, ElementPatch, TextElement};
use crate::history::History;
use crate::measure::{TextMeasureService, TextMeasurer};
use crate::page::{Page, PageId};
use crate::selection::{ActionBar, Selection};
use kurbo::{Point, Rect, Size, Vec2};

/// Owns a document and every piece of editing state that refers to it.
///
/// All document mutation goes through these methods so that sizes stay
/// positive, the selection stays a subset of the current page, and each
/// logical change lands in history exactly once.
#[derive(Debug)]
pub struct Canvas {
    document: Document,
    selection: Selection,
    action_bar: ActionBar,
    history: History,
    measure: TextMeasureService,
    config: EditorConfig,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a canvas with an empty one-page document.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let document = Document::new(config.default_page_size);
        Self::with_document(document, config)
    }

    /// Create a canvas with an existing document.
    pub fn with_document(document: Document, config: EditorConfig) -> Self {
        Self {
            document,
            selection: Selection::new(),
            action_bar: ActionBar::default(),
            history: History::new(config.max_history),
            measure: TextMeasureService::new(config.caret_padding),
            config,
        }
    }

    /// Replace the document, dropping selection and history.
    pub fn load_document(&mut self, document: Document) {
        log::info!("Loading document \"{}\" ({} pages)", document.name, document.pages().len());
        self.document = document;
        self.history.clear();
        self.selection.clear();
        self.action_bar.hide();
    }

    /// Install a host text layout surface for measuring new text elements.
    pub fn set_text_measurer(&mut self, measurer: Box<dyn TextMeasurer>) {
        self.measure.set_surface(measurer);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn action_bar(&self) -> &ActionBar {
        &self.action_bar
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn measure(&self) -> &TextMeasureService {
        &self.measure
    }

    pub fn current_page(&self) -> &Page {
        self.document.current_page()
    }

    pub fn current_page_id(&self) -> PageId {
        self.document.current_page_id()
    }

    /// Look up an element on the current page.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.current_page().element(id)
    }

    /// Text content with the configured default font.
    pub fn default_text(&self, content: impl Into<String>) -> TextElement {
        TextElement::new(content)
            .with_font_size(self.config.default_font_size)
            .with_font_family(self.config.default_font_family.clone())
    }

    /// Run a mutation and record it as one history entry. Inside a gesture
    /// the gesture's batch captures the change instead.
    fn transact<R>(&mut self, label: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        if self.history.is_batching() {
            return f(self);
        }
        let before = self.document.snapshot();
        let result = f(self);
        let after = self.document.snapshot();
        self.history.record(label, before, after);
        result
    }

    // --- Gestures ---

    /// Start grouping every following change into one history entry.
    /// Returns false if a gesture is already in progress.
    pub fn begin_gesture(&mut self, label: &str) -> bool {
        let started = self.history.begin_batch(label, self.document.snapshot());
        if !started {
            log::debug!("Ignoring gesture \"{label}\": another gesture is active");
        }
        started
    }

    /// Finish the gesture. Returns true if it changed the document.
    pub fn end_gesture(&mut self) -> bool {
        self.history.end_batch(self.document.snapshot())
    }

    /// Abort the gesture and restore the document to how it was at its start.
    pub fn cancel_gesture(&mut self) -> bool {
        match self.history.cancel_batch() {
            Some(before) => {
                self.document.restore(before);
                self.revalidate_selection();
                true
            }
            None => false,
        }
    }

    pub fn is_in_gesture(&self) -> bool {
        self.history.is_batching()
    }

    // --- Elements ---

    /// Add an element on top of the page's z-order.
    pub fn add_element(&mut self, page_id: PageId, draft: ElementDraft) -> Option<Element> {
        if self.document.page(page_id).is_none() {
            log::debug!("add_element: page {page_id} not found");
            return None;
        }
        let element = draft.into_element(&self.config, &self.measure);
        let label = format!("Add {}", element.kind().name());
        self.transact(&label, |canvas| {
            let page = canvas.document.page_mut(page_id)?;
            page.push(element.clone());
            Some(element)
        })
    }

    /// Apply a patch to an element. Returns false if the element does not exist.
    pub fn update_element(&mut self, page_id: PageId, id: ElementId, patch: &ElementPatch) -> bool {
        let min_size = self.config.min_element_size;
        self.transact("Edit element", |canvas| {
            match canvas.document.page_mut(page_id).and_then(|p| p.element_mut(id)) {
                Some(element) => {
                    element.apply_patch(patch, min_size);
                    true
                }
                None => {
                    log::debug!("update_element: element {id} not found on page {page_id}");
                    false
                }
            }
        })
    }

    /// Remove an element, dropping it from the selection and action bar.
    pub fn delete_element(&mut self, page_id: PageId, id: ElementId) -> bool {
        let removed = self.transact("Delete element", |canvas| {
            canvas
                .document
                .page_mut(page_id)
                .and_then(|page| page.remove(id))
                .is_some()
        });
        if removed {
            self.forget(id);
        } else {
            log::debug!("delete_element: element {id} not found on page {page_id}");
        }
        removed
    }

    /// Clone an element just above the original, offset on both axes.
    /// On the current page the copy becomes the only selected element.
    pub fn duplicate_element(&mut self, page_id: PageId, id: ElementId) -> Option<Element> {
        let offset = Vec2::new(self.config.duplicate_offset, self.config.duplicate_offset);
        let duplicate = self.transact("Duplicate element", |canvas| {
            let page = canvas.document.page_mut(page_id)?;
            Some(duplicate_in_page(page, id, offset)?.clone())
        });
        let Some(duplicate) = duplicate else {
            log::debug!("duplicate_element: element {id} not found on page {page_id}");
            return None;
        };
        if page_id == self.current_page_id() {
            self.selection.replace([duplicate.id()]);
            self.sync_action_bar();
        }
        Some(duplicate)
    }

    /// Delete every selected element. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selection.ids().to_vec();
        if ids.is_empty() {
            return 0;
        }
        let removed = self.transact("Delete elements", |canvas| {
            let page = canvas.document.current_page_mut();
            ids.iter().filter(|&&id| page.remove(id).is_some()).count()
        });
        self.selection.clear();
        self.action_bar.hide();
        removed
    }

    /// Duplicate every selected element and select the copies.
    pub fn duplicate_selected(&mut self) -> Vec<ElementId> {
        let ids = self.selected_ids_in_paint_order();
        if ids.is_empty() {
            return Vec::new();
        }
        let offset = Vec2::new(self.config.duplicate_offset, self.config.duplicate_offset);
        let copies = self.transact("Duplicate elements", |canvas| {
            let page = canvas.document.current_page_mut();
            ids.iter()
                .filter_map(|&id| duplicate_in_page(page, id, offset).map(Element::id))
                .collect::<Vec<_>>()
        });
        self.selection.replace(copies.iter().copied());
        self.sync_action_bar();
        copies
    }

    /// Lock or unlock an element on the current page.
    pub fn set_locked(&mut self, id: ElementId, locked: bool) -> bool {
        let label = if locked { "Lock element" } else { "Unlock element" };
        self.transact(label, |canvas| {
            match canvas.document.current_page_mut().element_mut(id) {
                Some(element) if element.locked != locked => {
                    element.locked = locked;
                    true
                }
                Some(_) => false,
                None => {
                    log::debug!("set_locked: element {id} not found");
                    false
                }
            }
        })
    }

    /// Flip the lock flag. Returns the new state, or `None` if the element is missing.
    pub fn toggle_lock(&mut self, id: ElementId) -> Option<bool> {
        let locked = !self.element(id)?.is_locked();
        self.set_locked(id, locked);
        Some(locked)
    }

    /// Toggle lock on the selection: lock all unless every element is already locked.
    pub fn toggle_lock_selected(&mut self) -> bool {
        let ids = self.selection.ids().to_vec();
        if ids.is_empty() {
            return false;
        }
        let all_locked = ids
            .iter()
            .all(|&id| self.element(id).is_some_and(Element::is_locked));
        let label = if all_locked { "Unlock elements" } else { "Lock elements" };
        self.transact(label, |canvas| {
            let page = canvas.document.current_page_mut();
            for id in &ids {
                if let Some(element) = page.element_mut(*id) {
                    element.locked = !all_locked;
                }
            }
        });
        true
    }

    // --- Z-order ---

    pub fn bring_element_forward(&mut self, id: ElementId) -> bool {
        self.reorder("Bring forward", id, Page::bring_forward)
    }

    pub fn send_element_backward(&mut self, id: ElementId) -> bool {
        self.reorder("Send backward", id, Page::send_backward)
    }

    pub fn bring_element_to_front(&mut self, id: ElementId) -> bool {
        self.reorder("Bring to front", id, Page::bring_to_front)
    }

    pub fn send_element_to_back(&mut self, id: ElementId) -> bool {
        self.reorder("Send to back", id, Page::send_to_back)
    }

    fn reorder(&mut self, label: &str, id: ElementId, op: fn(&mut Page, ElementId) -> bool) -> bool {
        self.transact(label, |canvas| op(canvas.document.current_page_mut(), id))
    }

    // --- Selection ---

    /// Toggle `id` when `additive`, otherwise select only `id`.
    /// Ids that are not on the current page are ignored.
    pub fn select_element(&mut self, id: ElementId, additive: bool) {
        if !self.current_page().contains(id) {
            log::debug!("select_element: element {id} is not on the current page");
            return;
        }
        self.selection.select(id, additive);
        self.sync_action_bar();
    }

    /// Replace the selection. Ids not on the current page are dropped.
    pub fn select_multiple_elements(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        let page = self.document.current_page();
        let ids: Vec<ElementId> = ids.into_iter().filter(|&id| page.contains(id)).collect();
        self.selection.replace(ids);
        self.sync_action_bar();
    }

    pub fn select_all(&mut self) {
        let ids = self.current_page().element_ids();
        self.selection.replace(ids);
        self.sync_action_bar();
    }

    /// Empty the selection and hide the action bar.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.action_bar.hide();
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selection.contains(id)
    }

    /// Selected elements in selection order.
    pub fn selected_elements(&self) -> Vec<&Element> {
        let page = self.current_page();
        self.selection
            .ids()
            .iter()
            .filter_map(|&id| page.element(id))
            .collect()
    }

    /// Selected ids ordered bottom to top.
    pub fn selected_ids_in_paint_order(&self) -> Vec<ElementId> {
        self.current_page()
            .element_ids()
            .into_iter()
            .filter(|&id| self.selection.contains(id))
            .collect()
    }

    /// Union of the selected elements' bounds.
    pub fn selection_bounds(&self) -> Option<Rect> {
        let rects = self.selected_elements().into_iter().filter_map(Element::world_rect);
        crate::geometry::union_all(rects)
    }

    pub fn show_action_bar(&mut self, id: ElementId, position: Point) -> bool {
        if !self.selection.contains(id) {
            log::debug!("show_action_bar: element {id} is not selected");
            return false;
        }
        self.action_bar.show(id, position);
        true
    }

    pub fn hide_action_bar(&mut self) {
        self.action_bar.hide();
    }

    /// Drop an id from selection and action bar.
    fn forget(&mut self, id: ElementId) {
        self.selection.remove(id);
        if self.action_bar.references(id) {
            self.action_bar.hide();
        }
    }

    fn sync_action_bar(&mut self) {
        let stale = self
            .action_bar
            .element_id
            .is_some_and(|id| !self.selection.contains(id));
        if stale {
            self.action_bar.hide();
        }
    }

    /// Drop selected ids that no longer exist on the current page.
    fn revalidate_selection(&mut self) {
        let page = self.document.current_page();
        self.selection.retain(|&id| page.contains(id));
        self.sync_action_bar();
    }

    // --- Pages ---

    pub fn add_page(&mut self, size: Size) -> PageId {
        self.transact("Add page", |canvas| canvas.document.add_page(size))
    }

    /// Delete a page. The last page is never deleted.
    pub fn delete_page(&mut self, id: PageId) -> bool {
        let was_current = id == self.current_page_id();
        let removed = self.transact("Delete page", |canvas| canvas.document.remove_page(id).is_some());
        if removed && was_current {
            self.clear_selection();
        }
        removed
    }

    /// Switch the current page, clearing the selection.
    pub fn set_current_page(&mut self, id: PageId) -> bool {
        if id == self.current_page_id() {
            return true;
        }
        if !self.document.set_current_page(id) {
            log::debug!("set_current_page: page {id} not found");
            return false;
        }
        self.clear_selection();
        true
    }

    // --- History ---

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.document.restore(snapshot);
                self.revalidate_selection();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.document.restore(snapshot);
                self.revalidate_selection();
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.history.undo_label()
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.history.redo_label()
    }

    // --- Queries ---

    /// Topmost element on the current page under a point.
    pub fn element_at_point(&self, point: Point, tolerance: f64) -> Option<ElementId> {
        self.current_page().element_at_point(point, tolerance)
    }

    /// Elements on the current page intersecting `rect` (open interval).
    pub fn elements_in_rect(&self, rect: Rect) -> Vec<ElementId> {
        self.current_page().elements_in_rect(rect)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        self.document.to_json()
    }
}

/// Insert a copy of `id` directly above it. Returns the copy.
fn duplicate_in_page(page: &mut Page, id: ElementId, offset: Vec2) -> Option<&Element> {
    let index = page.index_of(id)?;
    let mut copy = page.elements[index].clone();
    copy.regenerate_id();
    copy.translate(offset);
    copy.is_new = true;
    page.insert(index + 1, copy);
    page.elements.get(index + 1)
}
