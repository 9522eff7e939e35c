//! Pointer and keyboard routing over the control tree.
//!
//! One routing pass runs per received input event. Pointer events walk the
//! tree front-to-back (children in reverse paint order, then the container
//! itself), with coordinates translated into each control's local space by
//! subtracting composite-time offsets. The pass carries three pieces of
//! shared state, all scoped to the router:
//!
//! - **propagation flag**: reset at the start of every event; once set
//!   (explicitly via [`ControlEvent::accept`] or implicitly by a press),
//!   no further control receives that event.
//! - **dragged**: assigned by a press; while set, move events bypass the
//!   tree and go straight to the capture holder, and the matching release
//!   goes there too before the capture clears.
//! - **hovered**: re-evaluated after each pass settles; a change delivers
//!   exit-then-enter and surfaces the new control's cursor shape.
//!
//! Keyboard events skip hit-testing: key presses consult the shortcut
//! table, then the focused control receives the event.

use casement_core::logging::targets;
use casement_render::{Point, Rect};

use super::cursor::CursorShape;
use super::events::{
    ControlEvent, EventData, KeyEvent, PointerEvent, RawKeyEvent, RawPointerEvent, RawPointerKind,
};
use super::focus::FocusManager;
use super::shortcut::ShortcutMap;
use super::tree::{ControlId, ControlTree};

/// Deliver an event to one control: its own `event()` hook first, then the
/// registered listener for the event's kind.
///
/// Returns `true` if either accepted the event. This is the single delivery
/// path used by the router, the focus manager, and the layout engine.
pub(crate) fn deliver(tree: &mut ControlTree, id: ControlId, event: &mut ControlEvent) -> bool {
    let handled = {
        let Some(control) = tree.get_mut(id) else {
            return false;
        };
        control.event(event)
    };

    // The listener is taken out of the control for the call so the control
    // itself can be handed to it mutably.
    let kind = event.kind();
    if let Some(mut callback) = tree.base_mut(id).and_then(|b| b.take_callback(kind)) {
        if let Some(control) = tree.get_mut(id) {
            callback(control, event);
        }
        if let Some(base) = tree.base_mut(id) {
            base.restore_callback(kind, callback);
        }
    }

    handled || event.is_accepted()
}

/// Find the deepest visible, enabled control containing a point.
///
/// `point` is in the parent space of `id`; containment tests use the
/// composite-time offset, so a control that moved since the last render is
/// still hit where it was last drawn. Children are tested topmost first.
pub fn hit_test(tree: &ControlTree, id: ControlId, point: Point) -> Option<ControlId> {
    let base = tree.base(id)?;
    if !base.is_visible() || !base.is_enabled() {
        return None;
    }

    let rect = Rect {
        origin: base.offset(),
        size: base.size(),
    };
    if !rect.contains(point) {
        return None;
    }

    let local = Point::new(point.x - base.offset().x, point.y - base.offset().y);
    for child in tree.children(id).iter().rev() {
        if let Some(hit) = hit_test(tree, *child, local) {
            return Some(hit);
        }
    }
    Some(id)
}

/// Translate a window-space point into a control's local space by summing
/// the offset chain up to the root.
pub fn window_to_local(tree: &ControlTree, id: ControlId, window_point: Point) -> Point {
    let mut total = Point::ZERO;
    let mut current = Some(id);
    while let Some(c) = current {
        let Some(base) = tree.base(c) else {
            break;
        };
        total.x += base.offset().x;
        total.y += base.offset().y;
        current = base.parent();
    }
    Point::new(window_point.x - total.x, window_point.y - total.y)
}

/// The input-routing state machine for one GUI root.
pub struct EventRouter {
    root: ControlId,
    hovered: Option<ControlId>,
    dragged: Option<ControlId>,
    propagation_stopped: bool,
    pending_cursor: Option<CursorShape>,
    pointer_position: Point,
}

impl EventRouter {
    /// Create a router for the tree rooted at `root`.
    pub fn new(root: ControlId) -> Self {
        Self {
            root,
            hovered: None,
            dragged: None,
            propagation_stopped: false,
            pending_cursor: None,
            pointer_position: Point::ZERO,
        }
    }

    /// The control currently under the pointer, if any.
    #[inline]
    pub fn hovered(&self) -> Option<ControlId> {
        self.hovered
    }

    /// The control holding pointer capture, if a drag is active.
    #[inline]
    pub fn dragged(&self) -> Option<ControlId> {
        self.dragged
    }

    /// Last known pointer position in window coordinates.
    #[inline]
    pub fn pointer_position(&self) -> Point {
        self.pointer_position
    }

    /// A cursor shape change produced by the last hover transition, if the
    /// host has not consumed it yet.
    pub fn take_cursor_change(&mut self) -> Option<CursorShape> {
        self.pending_cursor.take()
    }

    // =========================================================================
    // Pointer routing
    // =========================================================================

    /// Run one routing pass for a pointer event.
    pub fn route_pointer(
        &mut self,
        tree: &mut ControlTree,
        focus: &mut FocusManager,
        raw: RawPointerEvent,
    ) {
        // The stop flag is scoped to a single event.
        self.propagation_stopped = false;

        let delta = Point::new(
            raw.position.x - self.pointer_position.x,
            raw.position.y - self.pointer_position.y,
        );
        self.pointer_position = raw.position;

        match (raw.kind, self.dragged) {
            (RawPointerKind::Move, Some(id)) => {
                // Drag capture: the tree is bypassed entirely.
                if tree.contains(id) {
                    let local = window_to_local(tree, id, raw.position);
                    let mut event = ControlEvent::new(EventData::Drag(PointerEvent {
                        position: local,
                        button: raw.button,
                        delta,
                        modifiers: raw.modifiers,
                    }));
                    deliver(tree, id, &mut event);
                } else {
                    self.dragged = None;
                }
            }
            (RawPointerKind::Release, Some(id)) => {
                // Release goes only to the capture holder, then the capture
                // clears and hover is re-evaluated where the pointer is now.
                self.dragged = None;
                if tree.contains(id) {
                    let local = window_to_local(tree, id, raw.position);
                    let mut event = ControlEvent::new(EventData::Release(PointerEvent {
                        position: local,
                        button: raw.button,
                        delta,
                        modifiers: raw.modifiers,
                    }));
                    deliver(tree, id, &mut event);
                }
                self.settle_hover(tree, raw.position);
            }
            _ => {
                self.dispatch(tree, focus, self.root, raw.position, delta, &raw);
                self.settle_hover(tree, raw.position);
            }
        }
    }

    /// Recursive front-to-back dispatch. `point` is in the parent space of
    /// `id`; invisible and disabled subtrees are skipped whole.
    fn dispatch(
        &mut self,
        tree: &mut ControlTree,
        focus: &mut FocusManager,
        id: ControlId,
        point: Point,
        delta: Point,
        raw: &RawPointerEvent,
    ) {
        if self.propagation_stopped {
            return;
        }
        let Some(base) = tree.base(id) else {
            return;
        };
        if !base.is_visible() || !base.is_enabled() {
            return;
        }

        let rect = Rect {
            origin: base.offset(),
            size: base.size(),
        };
        if !rect.contains(point) {
            return;
        }
        let local = Point::new(point.x - base.offset().x, point.y - base.offset().y);

        // Children topmost (highest z) first. The snapshot decouples the
        // walk from handlers that add or remove children mid-pass.
        let children = tree.children(id);
        for child in children.iter().rev() {
            self.dispatch(tree, focus, *child, local, delta, raw);
            if self.propagation_stopped {
                return;
            }
        }

        // Post-children handling: the container itself.
        self.deliver_pointer(tree, focus, id, local, delta, raw);
    }

    fn deliver_pointer(
        &mut self,
        tree: &mut ControlTree,
        focus: &mut FocusManager,
        id: ControlId,
        local: Point,
        delta: Point,
        raw: &RawPointerEvent,
    ) {
        let payload = PointerEvent {
            position: local,
            button: raw.button,
            delta: match raw.kind {
                RawPointerKind::Wheel => raw.wheel,
                _ => delta,
            },
            modifiers: raw.modifiers,
        };
        let data = match raw.kind {
            RawPointerKind::Press => EventData::Press(payload),
            RawPointerKind::Release => EventData::Release(payload),
            RawPointerKind::DoubleClick => EventData::DoubleClick(payload),
            RawPointerKind::Move => EventData::Move(payload),
            RawPointerKind::Wheel => EventData::Wheel(payload),
        };

        let mut event = ControlEvent::new(data);
        if deliver(tree, id, &mut event) {
            self.propagation_stopped = true;
        }

        if matches!(raw.kind, RawPointerKind::Press | RawPointerKind::DoubleClick) {
            // A press stops propagation and takes the drag capture whether
            // or not a handler ran.
            self.propagation_stopped = true;
            self.dragged = Some(id);
            tracing::trace!(target: targets::ROUTER, ?id, "press captured drag");

            if tree.base(id).is_some_and(|b| b.is_focusable()) {
                focus.request_focus(tree, id);
            }
        }
    }

    /// Re-evaluate hover once a pass has settled.
    ///
    /// Exit is delivered before enter; both happen after routing, never
    /// interleaved with it. A hover change surfaces the new control's
    /// declared cursor shape for the host.
    fn settle_hover(&mut self, tree: &mut ControlTree, window_point: Point) {
        let new = hit_test(tree, self.root, window_point);
        if new == self.hovered {
            return;
        }

        if let Some(old_id) = self.hovered.take() {
            if tree.contains(old_id) {
                if let Some(base) = tree.base_mut(old_id) {
                    base.set_hovered(false);
                }
                // The hover look changed; recomposite up to the root.
                tree.update(old_id);
                deliver(tree, old_id, &mut ControlEvent::new(EventData::Exit));
            }
        }

        if let Some(new_id) = new {
            if let Some(base) = tree.base_mut(new_id) {
                base.set_hovered(true);
            }
            tree.update(new_id);
            deliver(tree, new_id, &mut ControlEvent::new(EventData::Enter));
            self.pending_cursor = Some(
                tree.base(new_id)
                    .map(|b| b.cursor())
                    .unwrap_or_default(),
            );
        }

        self.hovered = new;
        tracing::trace!(target: targets::ROUTER, hovered = ?self.hovered, "hover settled");
    }

    // =========================================================================
    // Keyboard routing
    // =========================================================================

    /// Route a key event: shortcut table first (on press), then the
    /// focused control. Hit-testing plays no part.
    pub fn route_key(
        &mut self,
        tree: &mut ControlTree,
        focus: &FocusManager,
        shortcuts: &mut ShortcutMap,
        raw: RawKeyEvent,
    ) {
        self.propagation_stopped = false;
        let focused = focus.focused();

        if raw.pressed {
            // A focused control that overrides shortcut handling suppresses
            // everything except chords registered as strong.
            let only_strong = tree
                .base(focused)
                .is_some_and(|b| b.overrides_shortcuts());
            if shortcuts.dispatch(raw.key, raw.modifiers, only_strong) {
                tracing::trace!(target: targets::SHORTCUT, key = ?raw.key, "shortcut fired");
            }
        }

        let payload = KeyEvent {
            key: raw.key,
            modifiers: raw.modifiers,
        };
        let data = if raw.pressed {
            EventData::KeyPress(payload)
        } else {
            EventData::KeyRelease(payload)
        };
        deliver(tree, focused, &mut ControlEvent::new(data));
    }
}

impl std::fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRouter")
            .field("hovered", &self.hovered)
            .field("dragged", &self.dragged)
            .field("propagation_stopped", &self.propagation_stopped)
            .finish()
    }
}
