//! Pagecraft Editor
//!
//! Turns pointer and keyboard input into operations on a
//! [`pagecraft_core::Canvas`]: dragging, resizing, marquee selection,
//! hover tracking and keyboard shortcuts.

pub mod event_handler;
pub mod hover;
pub mod input;
pub mod marquee;
pub mod shortcuts;

pub use event_handler::{EventHandler, Gesture};
pub use hover::{HoverState, HoverTracker};
pub use input::{EventResponse, Modifiers, PointerButton, PointerEvent};
pub use marquee::MarqueeSession;
pub use shortcuts::{EditorCommand, Shortcut, ShortcutRegistry, dispatch};
