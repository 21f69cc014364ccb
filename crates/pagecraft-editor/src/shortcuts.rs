//! Keyboard shortcut registry and command dispatch.

use crate::event_handler::EventHandler;
use crate::input::Modifiers;
use pagecraft_core::Canvas;

/// Editor commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    Undo,
    Redo,
    Delete,
    Duplicate,
    BringForward,
    SendBackward,
    BringToFront,
    SendToBack,
    ToggleLock,
    SelectAll,
    /// Abort the active gesture, or clear the selection when idle.
    CancelGesture,
}

impl EditorCommand {
    /// Commands that write to the document. These wait for the active
    /// gesture to finish so each gesture stays one history entry.
    pub fn mutates_document(&self) -> bool {
        !matches!(self, EditorCommand::SelectAll | EditorCommand::CancelGesture)
    }
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Shortcut {
    pub key: &'static str,
    /// Ctrl on Linux and Windows, Cmd on macOS.
    pub command: bool,
    pub shift: bool,
    pub description: &'static str,
    pub action: EditorCommand,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        command: bool,
        shift: bool,
        description: &'static str,
        action: EditorCommand,
    ) -> Self {
        Self {
            key,
            command,
            shift,
            description,
            action,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Shift+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.command {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.command == modifiers.command()
            && self.shift == modifiers.shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        use EditorCommand::*;
        vec![
            Shortcut::new("A", true, false, "Select all elements", SelectAll),
            Shortcut::new("Z", true, false, "Undo", Undo),
            Shortcut::new("Z", true, true, "Redo", Redo),
            Shortcut::new("Y", true, false, "Redo", Redo),
            Shortcut::new("D", true, false, "Duplicate selected elements", Duplicate),
            Shortcut::new("Delete", false, false, "Delete selected elements", Delete),
            Shortcut::new("Backspace", false, false, "Delete selected elements", Delete),
            Shortcut::new("]", true, false, "Bring forward", BringForward),
            Shortcut::new("[", true, false, "Send backward", SendBackward),
            Shortcut::new("]", true, true, "Bring to front", BringToFront),
            Shortcut::new("[", true, true, "Send to back", SendToBack),
            Shortcut::new("L", true, true, "Lock or unlock selected elements", ToggleLock),
            Shortcut::new("Escape", false, false, "Cancel current action", CancelGesture),
        ]
    }

    /// Find the command bound to a key press.
    pub fn lookup(key: &str, modifiers: Modifiers) -> Option<EditorCommand> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key, modifiers))
            .map(|shortcut| shortcut.action)
    }
}

/// Run a command against the canvas. Returns true if anything changed.
///
/// Z-order commands act on the primary selected element.
pub fn dispatch(command: EditorCommand, canvas: &mut Canvas, handler: &mut EventHandler) -> bool {
    if command.mutates_document() && (!handler.is_idle() || canvas.is_in_gesture()) {
        log::debug!("Ignoring {command:?}: a gesture is active");
        return false;
    }
    log::debug!("Dispatch {command:?}");
    let primary = canvas.selection().primary();
    match command {
        EditorCommand::Undo => canvas.undo(),
        EditorCommand::Redo => canvas.redo(),
        EditorCommand::Delete => canvas.delete_selected() > 0,
        EditorCommand::Duplicate => !canvas.duplicate_selected().is_empty(),
        EditorCommand::BringForward => primary.is_some_and(|id| canvas.bring_element_forward(id)),
        EditorCommand::SendBackward => primary.is_some_and(|id| canvas.send_element_backward(id)),
        EditorCommand::BringToFront => primary.is_some_and(|id| canvas.bring_element_to_front(id)),
        EditorCommand::SendToBack => primary.is_some_and(|id| canvas.send_element_to_back(id)),
        EditorCommand::ToggleLock => canvas.toggle_lock_selected(),
        EditorCommand::SelectAll => {
            canvas.select_all();
            !canvas.selection().is_empty()
        }
        EditorCommand::CancelGesture => {
            if handler.cancel(canvas) {
                return true;
            }
            let had_selection = !canvas.selection().is_empty();
            canvas.clear_selection();
            had_selection
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Size};
    use pagecraft_core::{ElementDraft, ElementId, ShapeElement, ShapeKind};

    const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    fn add_rect(canvas: &mut Canvas, x: f64) -> ElementId {
        let page = canvas.current_page_id();
        let draft = ElementDraft::shape(ShapeElement::new(ShapeKind::Rectangle), Point::new(x, 0.0))
            .with_size(Size::new(10.0, 10.0));
        canvas.add_element(page, draft).unwrap().id()
    }

    #[test]
    fn test_shortcut_format() {
        let shortcut = Shortcut::new("Z", true, true, "Redo", EditorCommand::Redo);
        assert_eq!(shortcut.format(), "Ctrl+Shift+Z");
        let shortcut = Shortcut::new("Escape", false, false, "Cancel", EditorCommand::CancelGesture);
        assert_eq!(shortcut.format(), "Escape");
    }

    #[test]
    fn test_lookup() {
        assert_eq!(ShortcutRegistry::lookup("z", CTRL), Some(EditorCommand::Undo));
        assert_eq!(
            ShortcutRegistry::lookup("Z", Modifiers { shift: true, ..CTRL }),
            Some(EditorCommand::Redo)
        );
        let cmd = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        assert_eq!(ShortcutRegistry::lookup("a", cmd), Some(EditorCommand::SelectAll));
        assert_eq!(
            ShortcutRegistry::lookup("Escape", Modifiers::NONE),
            Some(EditorCommand::CancelGesture)
        );
        assert_eq!(ShortcutRegistry::lookup("z", Modifiers::NONE), None);
    }

    #[test]
    fn test_no_duplicate_bindings() {
        let all = ShortcutRegistry::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(
                    !(a.key == b.key && a.command == b.command && a.shift == b.shift),
                    "{} bound twice",
                    a.format()
                );
            }
        }
    }

    #[test]
    fn test_dispatch_zorder_uses_primary() {
        let mut canvas = Canvas::new();
        let mut handler = EventHandler::default();
        let a = add_rect(&mut canvas, 0.0);
        let b = add_rect(&mut canvas, 20.0);
        canvas.select_element(a, false);

        assert!(dispatch(EditorCommand::BringToFront, &mut canvas, &mut handler));
        assert_eq!(canvas.current_page().element_ids(), vec![b, a]);
        assert!(!dispatch(EditorCommand::BringForward, &mut canvas, &mut handler));
    }

    #[test]
    fn test_dispatch_delete_then_undo() {
        let mut canvas = Canvas::new();
        let mut handler = EventHandler::default();
        let a = add_rect(&mut canvas, 0.0);
        canvas.select_element(a, false);

        assert!(dispatch(EditorCommand::Delete, &mut canvas, &mut handler));
        assert!(canvas.element(a).is_none());
        assert!(dispatch(EditorCommand::Undo, &mut canvas, &mut handler));
        assert!(canvas.element(a).is_some());
    }

    #[test]
    fn test_escape_clears_selection_when_idle() {
        let mut canvas = Canvas::new();
        let mut handler = EventHandler::default();
        let a = add_rect(&mut canvas, 0.0);
        canvas.select_element(a, false);

        assert!(dispatch(EditorCommand::CancelGesture, &mut canvas, &mut handler));
        assert!(canvas.selection().is_empty());
        assert!(!dispatch(EditorCommand::CancelGesture, &mut canvas, &mut handler));
    }

    #[test]
    fn test_only_selection_commands_run_during_gesture() {
        assert!(EditorCommand::Delete.mutates_document());
        assert!(EditorCommand::ToggleLock.mutates_document());
        assert!(EditorCommand::Undo.mutates_document());
        assert!(!EditorCommand::SelectAll.mutates_document());
        assert!(!EditorCommand::CancelGesture.mutates_document());
    }

    #[test]
    fn test_dispatch_waits_for_open_gesture() {
        let mut canvas = Canvas::new();
        let mut handler = EventHandler::default();
        let a = add_rect(&mut canvas, 0.0);
        canvas.select_element(a, false);

        assert!(canvas.begin_gesture("Move elements"));
        assert!(!dispatch(EditorCommand::Delete, &mut canvas, &mut handler));
        assert!(canvas.element(a).is_some());
        assert!(!canvas.end_gesture());
        assert!(dispatch(EditorCommand::Delete, &mut canvas, &mut handler));
    }
}
