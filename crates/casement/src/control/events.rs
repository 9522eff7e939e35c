//! Event types routed through the control tree.
//!
//! Two layers of events exist:
//!
//! - **Raw input** ([`RawPointerEvent`], [`RawKeyEvent`]): what the host
//!   hands the router, with window coordinates. The platform module
//!   produces these from winit events.
//! - **Control events** ([`ControlEvent`]): what controls and listeners
//!   receive, with coordinates already in the control's local space and an
//!   accept flag that feeds the router's propagation-stop.
//!
//! One listener may be registered per [`EventKind`] per control;
//! re-registering replaces the previous listener.

use casement_render::{Point, Size};

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held.
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Control + Shift modifiers.
    pub const CTRL_SHIFT: Self = Self {
        shift: true,
        control: true,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }
}

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary button (usually left).
    Primary,
    /// Secondary button (usually right).
    Secondary,
    /// Middle button (wheel click).
    Middle,
}

/// Keys understood by the router and the shortcut table.
///
/// Letter keys are layout-resolved (what the user typed), not scan codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,
    Enter, Tab, Space, Backspace, Delete, Insert, Escape,
    /// Any key this toolkit does not name, identified by its raw code.
    Other(u32),
}

/// What a raw pointer event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawPointerKind {
    /// A button went down.
    Press,
    /// A button went up.
    Release,
    /// A second press within the double-click thresholds.
    DoubleClick,
    /// The pointer moved.
    Move,
    /// The wheel scrolled.
    Wheel,
}

/// A pointer event as delivered by the host, in window coordinates.
#[derive(Debug, Clone, Copy)]
pub struct RawPointerEvent {
    /// What happened.
    pub kind: RawPointerKind,
    /// Pointer position in window coordinates.
    pub position: Point,
    /// The button involved, for press/release/double-click.
    pub button: Option<PointerButton>,
    /// Scroll delta in pixels, for wheel events.
    pub wheel: Point,
    /// Modifier state at the time of the event.
    pub modifiers: KeyboardModifiers,
}

impl RawPointerEvent {
    /// A movement event at the given window position.
    pub fn moved(position: Point) -> Self {
        Self {
            kind: RawPointerKind::Move,
            position,
            button: None,
            wheel: Point::ZERO,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// A press of `button` at the given window position.
    pub fn pressed(position: Point, button: PointerButton) -> Self {
        Self {
            kind: RawPointerKind::Press,
            position,
            button: Some(button),
            wheel: Point::ZERO,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// A release of `button` at the given window position.
    pub fn released(position: Point, button: PointerButton) -> Self {
        Self {
            kind: RawPointerKind::Release,
            position,
            button: Some(button),
            wheel: Point::ZERO,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// A wheel scroll at the given window position.
    pub fn scrolled(position: Point, wheel: Point) -> Self {
        Self {
            kind: RawPointerKind::Wheel,
            position,
            button: None,
            wheel,
            modifiers: KeyboardModifiers::NONE,
        }
    }
}

/// A keyboard event as delivered by the host.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The key involved.
    pub key: Key,
    /// `true` for press, `false` for release.
    pub pressed: bool,
    /// Modifier state at the time of the event.
    pub modifiers: KeyboardModifiers,
}

/// Any raw input, for queueing host events onto the GUI thread.
#[derive(Debug, Clone, Copy)]
pub enum RawInput {
    /// A pointer event.
    Pointer(RawPointerEvent),
    /// A keyboard event.
    Key(RawKeyEvent),
}

/// Pointer payload delivered to a control, in its local coordinate space.
#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    /// Pointer position relative to the control's origin.
    pub position: Point,
    /// The button involved, if any.
    pub button: Option<PointerButton>,
    /// Scroll delta for wheel events, movement delta for drag events.
    pub delta: Point,
    /// Modifier state.
    pub modifiers: KeyboardModifiers,
}

/// Keyboard payload delivered to the focused control.
#[derive(Debug, Clone, Copy)]
pub struct KeyEvent {
    /// The key involved.
    pub key: Key,
    /// Modifier state.
    pub modifiers: KeyboardModifiers,
}

/// The payload of a [`ControlEvent`].
#[derive(Debug, Clone, Copy)]
pub enum EventData {
    /// A pointer button was pressed on the control.
    Press(PointerEvent),
    /// A pointer button was released on the control.
    Release(PointerEvent),
    /// The control was double-clicked.
    DoubleClick(PointerEvent),
    /// The pointer moved over the control.
    Move(PointerEvent),
    /// The pointer moved while this control holds the drag capture.
    Drag(PointerEvent),
    /// The wheel scrolled over the control.
    Wheel(PointerEvent),
    /// The pointer entered the control.
    Enter,
    /// The pointer left the control.
    Exit,
    /// A key was pressed while the control holds focus.
    KeyPress(KeyEvent),
    /// A key was released while the control holds focus.
    KeyRelease(KeyEvent),
    /// The control's size changed; carries the new size.
    Resize(Size),
    /// The control gained keyboard focus.
    FocusIn,
    /// The control lost keyboard focus.
    FocusOut,
}

/// Discriminant of [`EventData`], used to key listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Press,
    Release,
    DoubleClick,
    Move,
    Drag,
    Wheel,
    Enter,
    Exit,
    KeyPress,
    KeyRelease,
    Resize,
    FocusIn,
    FocusOut,
}

impl EventData {
    /// The kind of this payload.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Press(_) => EventKind::Press,
            Self::Release(_) => EventKind::Release,
            Self::DoubleClick(_) => EventKind::DoubleClick,
            Self::Move(_) => EventKind::Move,
            Self::Drag(_) => EventKind::Drag,
            Self::Wheel(_) => EventKind::Wheel,
            Self::Enter => EventKind::Enter,
            Self::Exit => EventKind::Exit,
            Self::KeyPress(_) => EventKind::KeyPress,
            Self::KeyRelease(_) => EventKind::KeyRelease,
            Self::Resize(_) => EventKind::Resize,
            Self::FocusIn => EventKind::FocusIn,
            Self::FocusOut => EventKind::FocusOut,
        }
    }
}

/// An event in flight to a control.
///
/// Carries the payload plus the accept flag. Accepting a pointer event
/// stops its propagation for the remainder of the routing pass; the flag is
/// reset by the router at the start of every new input event.
#[derive(Debug, Clone, Copy)]
pub struct ControlEvent {
    accepted: bool,
    /// The event payload.
    pub data: EventData,
}

impl ControlEvent {
    /// Wrap a payload in a fresh (unaccepted) event.
    pub fn new(data: EventData) -> Self {
        Self {
            accepted: false,
            data,
        }
    }

    /// The kind of the payload.
    pub fn kind(&self) -> EventKind {
        self.data.kind()
    }

    /// Whether a handler accepted the event.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, stopping propagation to remaining controls.
    pub fn accept(&mut self) {
        self.accepted = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_constants() {
        assert!(!KeyboardModifiers::NONE.any());
        assert!(KeyboardModifiers::CTRL.any());
        assert!(KeyboardModifiers::CTRL_SHIFT.shift);
        assert!(KeyboardModifiers::CTRL_SHIFT.control);
        assert!(!KeyboardModifiers::CTRL_SHIFT.alt);
    }

    #[test]
    fn event_kind_matches_payload() {
        let event = ControlEvent::new(EventData::Enter);
        assert_eq!(event.kind(), EventKind::Enter);

        let press = ControlEvent::new(EventData::Press(PointerEvent {
            position: Point::ZERO,
            button: Some(PointerButton::Primary),
            delta: Point::ZERO,
            modifiers: KeyboardModifiers::NONE,
        }));
        assert_eq!(press.kind(), EventKind::Press);
    }

    #[test]
    fn accept_flag_starts_clear() {
        let mut event = ControlEvent::new(EventData::Exit);
        assert!(!event.is_accepted());
        event.accept();
        assert!(event.is_accepted());
    }
}
