//! Pointer gesture handling: click, drag, resize and marquee.

use crate::hover::HoverTracker;
use crate::input::{EventResponse, Modifiers, PointerButton, PointerEvent};
use crate::marquee::MarqueeSession;
use kurbo::{Point, Rect};
use pagecraft_core::{
    AlignmentGuides, Canvas, EditorConfig, ElementId, ElementPatch, HandleKind, Viewport,
    apply_resize, hit_test_handles, snap_to_page,
};
use std::mem;
use std::time::Duration;

/// A press on an element that has not moved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PressState {
    pub element_id: ElementId,
    /// Pointer position at press, in page coordinates.
    pub start_pointer: Point,
    /// False for locked elements and for elements a shift-click just deselected.
    pub draggable: bool,
    /// Release without moving narrows a multi-selection to this element.
    pub collapse_on_click: bool,
}

/// Moving one or more elements.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub start_pointer: Point,
    /// Every element being moved with its position at drag start.
    pub movers: Vec<(ElementId, Point)>,
    /// Bounds of the pressed element at drag start; this is what snaps.
    pub primary_start: Rect,
}

impl DragState {
    fn mover_ids(&self) -> Vec<ElementId> {
        self.movers.iter().map(|(id, _)| *id).collect()
    }
}

/// Dragging a resize handle.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    pub element_id: ElementId,
    pub handle: HandleKind,
    pub start_pointer: Point,
    pub original: Rect,
}

/// The active gesture. Only one can run at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    Pressed(PressState),
    Dragging(DragState),
    Resizing(ResizeState),
    Marquee(MarqueeSession),
}

/// Translates pointer input into canvas operations.
#[derive(Debug, Clone)]
pub struct EventHandler {
    gesture: Gesture,
    /// Guides for the current drag frame.
    guides: AlignmentGuides,
    hover: HoverTracker,
    modifiers: Modifiers,
    /// Marquee selection only starts in edit mode.
    edit_mode: bool,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl EventHandler {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            gesture: Gesture::Idle,
            guides: AlignmentGuides::default(),
            hover: HoverTracker::new(config.hover_debounce()),
            modifiers: Modifiers::default(),
            edit_mode: true,
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.gesture, Gesture::Idle)
    }

    pub fn guides(&self) -> &AlignmentGuides {
        &self.guides
    }

    /// Live marquee rectangle in page coordinates, for drawing.
    pub fn marquee_rect(&self) -> Option<Rect> {
        match &self.gesture {
            Gesture::Marquee(session) => Some(session.rect()),
            _ => None,
        }
    }

    pub fn hover(&self) -> &HoverTracker {
        &self.hover
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Alt/Option is tracked for callers (e.g. duplicate-on-drag) but never
    /// changes the document by itself.
    pub fn alt_held(&self) -> bool {
        self.modifiers.alt
    }

    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        self.edit_mode = edit_mode;
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Route a pointer event. `now` is the host's monotonic clock.
    pub fn handle_event(
        &mut self,
        canvas: &mut Canvas,
        viewport: &Viewport,
        event: PointerEvent,
        now: Duration,
    ) -> EventResponse {
        match event {
            PointerEvent::Down { position, button } => {
                self.pointer_down(canvas, viewport, position, button)
            }
            PointerEvent::Move { position } => self.pointer_move(canvas, viewport, position),
            PointerEvent::Up { position, button } => {
                self.pointer_up(canvas, viewport, position, button, now)
            }
        }
    }

    pub fn pointer_down(
        &mut self,
        canvas: &mut Canvas,
        viewport: &Viewport,
        screen_position: Point,
        button: PointerButton,
    ) -> EventResponse {
        if !self.is_idle() {
            log::debug!("Ignoring pointer down: a gesture is already active");
            return EventResponse::Ignored;
        }
        if button != PointerButton::Primary {
            return EventResponse::Ignored;
        }

        let point = viewport.screen_to_world(screen_position);
        let tolerance = viewport.screen_distance_to_world(canvas.config().handle_hit_tolerance);

        // Handles of selected elements sit partly outside the element, so
        // they are checked before element hits.
        if let Some((element_id, handle, original)) = handle_under(canvas, point, tolerance) {
            if !canvas.begin_gesture("Resize element") {
                return EventResponse::Ignored;
            }
            log::debug!("Resize {element_id} from {} handle", handle.compass());
            self.hover.begin_resize();
            self.gesture = Gesture::Resizing(ResizeState {
                element_id,
                handle,
                start_pointer: point,
                original,
            });
            return EventResponse::Consumed;
        }

        if let Some(element_id) = canvas.element_at_point(point, 0.0) {
            let shift = self.modifiers.shift;
            let already_selected = canvas.is_selected(element_id);
            if shift {
                canvas.select_element(element_id, true);
            } else if !already_selected {
                canvas.select_element(element_id, false);
            }
            let locked = canvas.element(element_id).is_some_and(|e| e.is_locked());
            self.gesture = Gesture::Pressed(PressState {
                element_id,
                start_pointer: point,
                draggable: !locked && canvas.is_selected(element_id),
                collapse_on_click: !shift && already_selected && canvas.selection().len() > 1,
            });
            return EventResponse::Consumed;
        }

        if self.edit_mode {
            let additive = self.modifiers.shift;
            if !additive {
                canvas.clear_selection();
            }
            self.gesture = Gesture::Marquee(MarqueeSession::new(point, additive));
            return EventResponse::Handled;
        }

        EventResponse::Ignored
    }

    pub fn pointer_move(
        &mut self,
        canvas: &mut Canvas,
        viewport: &Viewport,
        screen_position: Point,
    ) -> EventResponse {
        let point = viewport.screen_to_world(screen_position);
        match mem::take(&mut self.gesture) {
            Gesture::Idle => EventResponse::Ignored,
            Gesture::Pressed(press) => {
                if point == press.start_pointer || !press.draggable {
                    self.gesture = Gesture::Pressed(press);
                    return EventResponse::Handled;
                }
                match start_drag(canvas, &press) {
                    Some(drag) => {
                        log::debug!("Drag {} element(s)", drag.movers.len());
                        self.hover.begin_drag();
                        self.drag_to(canvas, &drag, point);
                        self.gesture = Gesture::Dragging(drag);
                    }
                    None => self.gesture = Gesture::Pressed(press),
                }
                EventResponse::Handled
            }
            Gesture::Dragging(drag) => {
                self.drag_to(canvas, &drag, point);
                self.gesture = Gesture::Dragging(drag);
                EventResponse::Handled
            }
            Gesture::Resizing(resize) => {
                self.resize_to(canvas, &resize, point);
                self.gesture = Gesture::Resizing(resize);
                EventResponse::Handled
            }
            Gesture::Marquee(mut session) => {
                session.update(point);
                self.gesture = Gesture::Marquee(session);
                EventResponse::Handled
            }
        }
    }

    pub fn pointer_up(
        &mut self,
        canvas: &mut Canvas,
        viewport: &Viewport,
        screen_position: Point,
        button: PointerButton,
        now: Duration,
    ) -> EventResponse {
        if button != PointerButton::Primary {
            return EventResponse::Ignored;
        }
        let point = viewport.screen_to_world(screen_position);
        match mem::take(&mut self.gesture) {
            Gesture::Idle => EventResponse::Ignored,
            Gesture::Pressed(press) => {
                if press.collapse_on_click {
                    canvas.select_element(press.element_id, false);
                }
                EventResponse::Consumed
            }
            Gesture::Dragging(_) => {
                if canvas.end_gesture() {
                    log::debug!("Drag finished");
                }
                self.guides.clear();
                self.hover.end_drag(canvas.element_at_point(point, 0.0));
                EventResponse::Consumed
            }
            Gesture::Resizing(resize) => {
                if canvas.end_gesture() {
                    log::debug!("Resize of {} finished", resize.element_id);
                }
                self.hover.end_resize(now, Some(resize.element_id));
                EventResponse::Consumed
            }
            Gesture::Marquee(mut session) => {
                session.update(point);
                session.commit(canvas);
                EventResponse::Handled
            }
        }
    }

    /// Abort the active gesture. Drags and resizes are rolled back and leave
    /// no history entry. Returns false if nothing was active.
    pub fn cancel(&mut self, canvas: &mut Canvas) -> bool {
        match mem::take(&mut self.gesture) {
            Gesture::Idle => false,
            Gesture::Dragging(_) | Gesture::Resizing(_) => {
                canvas.cancel_gesture();
                self.guides.clear();
                self.hover.reset();
                log::debug!("Gesture cancelled");
                true
            }
            Gesture::Pressed(_) | Gesture::Marquee(_) => true,
        }
    }

    pub fn hover_enter(&mut self, id: ElementId) {
        self.hover.pointer_enter(id);
    }

    /// Returns true if the leave was accepted (not suppressed).
    pub fn hover_leave(&mut self, id: ElementId, now: Duration) -> bool {
        self.hover.pointer_leave(id, now)
    }

    /// Timer callback that advances the hover debounce.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.hover.tick(now)
    }

    fn drag_to(&mut self, canvas: &mut Canvas, drag: &DragState, point: Point) {
        let delta = point - drag.start_pointer;
        let (snap_enabled, threshold) = {
            let config = canvas.config();
            (config.snap_enabled, config.snap_threshold)
        };

        let offset = if snap_enabled {
            let candidate = drag.primary_start + delta;
            let result = snap_to_page(canvas.current_page(), &drag.mover_ids(), candidate, threshold);
            self.guides = result.guides;
            result.position - drag.primary_start.origin()
        } else {
            self.guides.clear();
            delta
        };

        let page_id = canvas.current_page_id();
        for (id, start) in &drag.movers {
            canvas.update_element(page_id, *id, &ElementPatch::position(*start + offset));
        }
    }

    fn resize_to(&mut self, canvas: &mut Canvas, resize: &ResizeState, point: Point) {
        let delta = point - resize.start_pointer;
        let min_size = canvas.config().min_element_size;
        let rect = apply_resize(
            resize.original,
            resize.handle,
            delta,
            min_size,
            self.modifiers.shift,
        );
        let page_id = canvas.current_page_id();
        canvas.update_element(page_id, resize.element_id, &ElementPatch::from_rect(rect));
    }
}

/// First resize handle of a selected, unlocked element under `point`.
/// Topmost elements win.
fn handle_under(canvas: &Canvas, point: Point, tolerance: f64) -> Option<(ElementId, HandleKind, Rect)> {
    canvas
        .selected_ids_in_paint_order()
        .into_iter()
        .rev()
        .filter_map(|id| canvas.element(id))
        .filter(|element| !element.is_locked())
        .find_map(|element| {
            let bounds = element.world_rect()?;
            let handle = hit_test_handles(bounds, point, tolerance)?;
            Some((element.id(), handle, bounds))
        })
}

/// Open a history batch and capture start positions of every selected,
/// unlocked element.
fn start_drag(canvas: &mut Canvas, press: &PressState) -> Option<DragState> {
    let primary_start = canvas.element(press.element_id)?.world_rect()?;
    let movers: Vec<(ElementId, Point)> = canvas
        .selected_ids_in_paint_order()
        .into_iter()
        .filter_map(|id| canvas.element(id))
        .filter(|element| !element.is_locked())
        .map(|element| (element.id(), element.position()))
        .collect();
    if !canvas.begin_gesture("Move elements") {
        return None;
    }
    Some(DragState {
        start_pointer: press.start_pointer,
        movers,
        primary_start,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Size, Vec2};
    use pagecraft_core::{ElementDraft, ShapeElement, ShapeKind};

    const NOW: Duration = Duration::ZERO;

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    fn mv(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    fn add_rect(canvas: &mut Canvas, x: f64, y: f64, w: f64, h: f64) -> ElementId {
        let page = canvas.current_page_id();
        let draft = ElementDraft::shape(ShapeElement::new(ShapeKind::Rectangle), Point::new(x, y))
            .with_size(Size::new(w, h));
        canvas.add_element(page, draft).unwrap().id()
    }

    fn setup() -> (Canvas, EventHandler, Viewport) {
        let config = EditorConfig {
            snap_enabled: false,
            ..EditorConfig::default()
        };
        let handler = EventHandler::new(&config);
        (Canvas::with_config(config), handler, Viewport::default())
    }

    #[test]
    fn test_press_on_element_is_consumed_and_selects() {
        let (mut canvas, mut handler, viewport) = setup();
        let id = add_rect(&mut canvas, 100.0, 100.0, 50.0, 50.0);
        let response = handler.handle_event(&mut canvas, &viewport, down(120.0, 120.0), NOW);
        assert_eq!(response, EventResponse::Consumed);
        assert_eq!(canvas.selection().ids(), &[id]);
        assert!(matches!(handler.gesture(), Gesture::Pressed(_)));
    }

    #[test]
    fn test_second_press_is_ignored() {
        let (mut canvas, mut handler, viewport) = setup();
        add_rect(&mut canvas, 100.0, 100.0, 50.0, 50.0);
        handler.handle_event(&mut canvas, &viewport, down(120.0, 120.0), NOW);
        let response = handler.handle_event(&mut canvas, &viewport, down(500.0, 500.0), NOW);
        assert_eq!(response, EventResponse::Ignored);
        assert!(matches!(handler.gesture(), Gesture::Pressed(_)));
    }

    #[test]
    fn test_drag_moves_element() {
        let (mut canvas, mut handler, viewport) = setup();
        let id = add_rect(&mut canvas, 100.0, 100.0, 50.0, 50.0);
        handler.handle_event(&mut canvas, &viewport, down(120.0, 120.0), NOW);
        handler.handle_event(&mut canvas, &viewport, mv(130.0, 125.0), NOW);
        assert!(matches!(handler.gesture(), Gesture::Dragging(_)));
        handler.handle_event(&mut canvas, &viewport, mv(170.0, 140.0), NOW);
        handler.handle_event(&mut canvas, &viewport, up(170.0, 140.0), NOW);

        assert_eq!(canvas.element(id).unwrap().position(), Point::new(150.0, 120.0));
        assert!(handler.is_idle());
    }

    #[test]
    fn test_drag_respects_viewport_zoom() {
        let (mut canvas, mut handler, _) = setup();
        let viewport = Viewport::new(Vec2::ZERO, 2.0);
        let id = add_rect(&mut canvas, 100.0, 100.0, 50.0, 50.0);
        handler.handle_event(&mut canvas, &viewport, down(240.0, 240.0), NOW);
        handler.handle_event(&mut canvas, &viewport, mv(260.0, 240.0), NOW);
        handler.handle_event(&mut canvas, &viewport, up(260.0, 240.0), NOW);
        assert_eq!(canvas.element(id).unwrap().position(), Point::new(110.0, 100.0));
    }

    #[test]
    fn test_locked_element_selects_but_does_not_drag() {
        let (mut canvas, mut handler, viewport) = setup();
        let id = add_rect(&mut canvas, 100.0, 100.0, 50.0, 50.0);
        canvas.set_locked(id, true);
        let undo_len = canvas.history().undo_len();

        handler.handle_event(&mut canvas, &viewport, down(120.0, 120.0), NOW);
        handler.handle_event(&mut canvas, &viewport, mv(200.0, 200.0), NOW);
        handler.handle_event(&mut canvas, &viewport, up(200.0, 200.0), NOW);

        assert_eq!(canvas.selection().ids(), &[id]);
        assert_eq!(canvas.element(id).unwrap().position(), Point::new(100.0, 100.0));
        assert_eq!(canvas.history().undo_len(), undo_len);
    }

    #[test]
    fn test_shift_click_toggles() {
        let (mut canvas, mut handler, viewport) = setup();
        let a = add_rect(&mut canvas, 0.0, 0.0, 50.0, 50.0);
        let b = add_rect(&mut canvas, 100.0, 0.0, 50.0, 50.0);
        canvas.select_element(a, false);

        handler.set_modifiers(Modifiers::SHIFT);
        handler.handle_event(&mut canvas, &viewport, down(120.0, 20.0), NOW);
        handler.handle_event(&mut canvas, &viewport, up(120.0, 20.0), NOW);
        assert_eq!(canvas.selection().ids(), &[a, b]);

        handler.handle_event(&mut canvas, &viewport, down(20.0, 20.0), NOW);
        handler.handle_event(&mut canvas, &viewport, up(20.0, 20.0), NOW);
        assert_eq!(canvas.selection().ids(), &[b]);
    }

    #[test]
    fn test_click_in_multi_selection_collapses() {
        let (mut canvas, mut handler, viewport) = setup();
        let a = add_rect(&mut canvas, 0.0, 0.0, 50.0, 50.0);
        let b = add_rect(&mut canvas, 100.0, 0.0, 50.0, 50.0);
        canvas.select_multiple_elements([a, b]);

        handler.handle_event(&mut canvas, &viewport, down(20.0, 20.0), NOW);
        assert_eq!(canvas.selection().len(), 2);
        handler.handle_event(&mut canvas, &viewport, up(20.0, 20.0), NOW);
        assert_eq!(canvas.selection().ids(), &[a]);
    }

    #[test]
    fn test_multi_move() {
        let (mut canvas, mut handler, viewport) = setup();
        let a = add_rect(&mut canvas, 0.0, 0.0, 50.0, 50.0);
        let b = add_rect(&mut canvas, 100.0, 0.0, 50.0, 50.0);
        canvas.select_multiple_elements([a, b]);

        handler.handle_event(&mut canvas, &viewport, down(20.0, 20.0), NOW);
        handler.handle_event(&mut canvas, &viewport, mv(30.0, 50.0), NOW);
        handler.handle_event(&mut canvas, &viewport, up(30.0, 50.0), NOW);

        assert_eq!(canvas.element(a).unwrap().position(), Point::new(10.0, 30.0));
        assert_eq!(canvas.element(b).unwrap().position(), Point::new(110.0, 30.0));
        assert_eq!(canvas.selection().len(), 2);
    }

    #[test]
    fn test_drag_snaps_and_emits_guides() {
        let mut canvas = Canvas::new();
        let mut handler = EventHandler::default();
        let viewport = Viewport::default();
        add_rect(&mut canvas, 100.0, 300.0, 100.0, 100.0);
        let moving = add_rect(&mut canvas, 400.0, 600.0, 50.0, 40.0);

        handler.handle_event(&mut canvas, &viewport, down(410.0, 610.0), NOW);
        // Left edge lands at 203, 3px from the reference's right edge at 200.
        handler.handle_event(&mut canvas, &viewport, mv(213.0, 611.0), NOW);

        assert_eq!(canvas.element(moving).unwrap().x(), 200.0);
        assert!(handler.guides().vertical.contains(&200.0));

        handler.handle_event(&mut canvas, &viewport, up(213.0, 611.0), NOW);
        assert!(handler.guides().is_empty());
    }

    #[test]
    fn test_resize_from_corner_handle() {
        let (mut canvas, mut handler, viewport) = setup();
        let id = add_rect(&mut canvas, 100.0, 100.0, 100.0, 50.0);
        canvas.select_element(id, false);

        // Bottom-right corner at (200, 150).
        let response = handler.handle_event(&mut canvas, &viewport, down(200.0, 150.0), NOW);
        assert_eq!(response, EventResponse::Consumed);
        assert!(matches!(handler.gesture(), Gesture::Resizing(_)));
        handler.handle_event(&mut canvas, &viewport, mv(250.0, 170.0), NOW);
        handler.handle_event(&mut canvas, &viewport, up(250.0, 170.0), Duration::from_secs(1));

        let element = canvas.element(id).unwrap();
        assert_eq!(element.bounds(), Rect::new(100.0, 100.0, 250.0, 170.0));
        assert!(handler.hover().is_suppressing_leave());
        assert!(!handler.hover_leave(id, Duration::from_millis(1100)));
        assert!(handler.hover_leave(id, Duration::from_millis(1200)));
    }

    #[test]
    fn test_empty_canvas_press_clears_and_starts_marquee() {
        let (mut canvas, mut handler, viewport) = setup();
        let a = add_rect(&mut canvas, 0.0, 0.0, 50.0, 50.0);
        canvas.select_element(a, false);

        let response = handler.handle_event(&mut canvas, &viewport, down(500.0, 500.0), NOW);
        assert_eq!(response, EventResponse::Handled);
        assert!(canvas.selection().is_empty());
        assert!(handler.marquee_rect().is_some());
    }

    #[test]
    fn test_no_marquee_outside_edit_mode() {
        let (mut canvas, mut handler, viewport) = setup();
        handler.set_edit_mode(false);
        let response = handler.handle_event(&mut canvas, &viewport, down(500.0, 500.0), NOW);
        assert_eq!(response, EventResponse::Ignored);
        assert!(handler.is_idle());
    }

    #[test]
    fn test_secondary_button_ignored() {
        let (mut canvas, mut handler, viewport) = setup();
        add_rect(&mut canvas, 0.0, 0.0, 50.0, 50.0);
        let event = PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: PointerButton::Secondary,
        };
        assert_eq!(
            handler.handle_event(&mut canvas, &viewport, event, NOW),
            EventResponse::Ignored
        );
        assert!(canvas.selection().is_empty());
    }

    #[test]
    fn test_alt_does_not_mutate() {
        let (mut canvas, mut handler, _) = setup();
        add_rect(&mut canvas, 0.0, 0.0, 50.0, 50.0);
        let before = canvas.document().clone();
        handler.set_modifiers(Modifiers::ALT);
        assert!(handler.alt_held());
        assert_eq!(canvas.document(), &before);
    }
}
