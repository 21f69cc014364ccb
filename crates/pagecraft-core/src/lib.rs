//! Pagecraft Core Library
//!
//! Platform-agnostic scene graph, selection, snapping and history for the
//! Pagecraft page editor. Nothing in this crate performs I/O or renders pixels.

pub mod canvas;
pub mod config;
pub mod document;
pub mod element;
pub mod geometry;
pub mod handles;
pub mod history;
pub mod measure;
pub mod page;
pub mod selection;
pub mod snap;
pub mod viewport;
mod zorder;

pub use canvas::Canvas;
pub use config::{ConfigError, EditorConfig};
pub use document::{Document, DocumentError, DocumentSnapshot};
pub use element::{
    Element, ElementDraft, ElementId, ElementKind, ElementPatch, ImageElement, SerializableColor,
    ShapeElement, ShapeKind, TextAlign, TextElement,
};
pub use handles::{Corner, Edge, Handle, HandleKind, apply_resize, hit_test_handles};
pub use history::{History, HistoryEntry};
pub use measure::{TextMeasureService, TextMeasurer};
pub use page::{Page, PageId};
pub use selection::{ActionBar, Selection};
pub use snap::{AlignmentGuides, SNAP_THRESHOLD, SnapResult, snap_rect, snap_to_page};
pub use viewport::Viewport;
