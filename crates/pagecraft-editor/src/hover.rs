//! Hover tracking with a short grace period after resizes.
//!
//! While a resize handle is dragged the pointer often leaves the element's
//! bounds. The host then reports a hover-leave just as the gesture ends,
//! which must not be read as the pointer leaving the element. After a resize
//! ends, leave events are ignored until the deadline passes. Time is supplied
//! by the host as a monotonic `Duration` since any fixed origin.

use pagecraft_core::ElementId;
use std::time::Duration;

/// Hover state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(ElementId),
    Dragging,
    Resizing,
    /// A resize just ended; leave events are ignored until `deadline`.
    JustFinishedResizing {
        deadline: Duration,
        hovered: Option<ElementId>,
    },
}

/// Drives [`HoverState`] from hover, gesture and timer callbacks.
#[derive(Debug, Clone)]
pub struct HoverTracker {
    state: HoverState,
    debounce: Duration,
}

impl HoverTracker {
    pub fn new(debounce: Duration) -> Self {
        Self {
            state: HoverState::Idle,
            debounce,
        }
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    /// Element the pointer is considered to be over.
    pub fn hovered(&self) -> Option<ElementId> {
        match self.state {
            HoverState::Hovering(id) => Some(id),
            HoverState::JustFinishedResizing { hovered, .. } => hovered,
            _ => None,
        }
    }

    pub fn is_suppressing_leave(&self) -> bool {
        matches!(self.state, HoverState::JustFinishedResizing { .. })
    }

    pub fn pointer_enter(&mut self, id: ElementId) {
        self.state = match self.state {
            HoverState::Idle | HoverState::Hovering(_) => HoverState::Hovering(id),
            HoverState::JustFinishedResizing { deadline, .. } => HoverState::JustFinishedResizing {
                deadline,
                hovered: Some(id),
            },
            gesture @ (HoverState::Dragging | HoverState::Resizing) => gesture,
        };
    }

    /// Returns true if the leave was accepted.
    pub fn pointer_leave(&mut self, id: ElementId, now: Duration) -> bool {
        self.tick(now);
        match self.state {
            HoverState::Hovering(current) if current == id => {
                self.state = HoverState::Idle;
                true
            }
            HoverState::JustFinishedResizing { .. } => {
                log::trace!("Suppressed hover-leave for {id} after resize");
                false
            }
            _ => false,
        }
    }

    pub fn begin_drag(&mut self) {
        self.state = HoverState::Dragging;
    }

    pub fn end_drag(&mut self, hovered: Option<ElementId>) {
        self.state = hovered.map_or(HoverState::Idle, HoverState::Hovering);
    }

    pub fn begin_resize(&mut self) {
        self.state = HoverState::Resizing;
    }

    /// End a resize and start the leave-suppression window.
    pub fn end_resize(&mut self, now: Duration, hovered: Option<ElementId>) {
        self.state = HoverState::JustFinishedResizing {
            deadline: now.saturating_add(self.debounce),
            hovered,
        };
    }

    /// Advance the timer. Returns true if the suppression window closed.
    pub fn tick(&mut self, now: Duration) -> bool {
        match self.state {
            HoverState::JustFinishedResizing { deadline, hovered } if now >= deadline => {
                self.state = hovered.map_or(HoverState::Idle, HoverState::Hovering);
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.state = HoverState::Idle;
    }
}

impl Default for HoverTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(200))
    }
}
