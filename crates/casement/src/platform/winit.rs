//! Conversion from winit input events to Casement raw events.
//!
//! The [`PointerTracker`] is the stateful piece: it remembers the pointer
//! position (winit reports button changes without coordinates), the
//! modifier state, and the last click for double-click detection. Feed it
//! winit window events; it hands back [`RawPointerEvent`]s ready for
//! [`Gui::pointer_event`](crate::Gui::pointer_event).

use std::time::{Duration, Instant};

use casement_render::Point;
use winit::event::{ElementState, Modifiers, MouseButton as WinitMouseButton, MouseScrollDelta};
use winit::keyboard::{Key as WinitKey, NamedKey};

use crate::control::events::{
    Key, KeyboardModifiers, PointerButton, RawKeyEvent, RawPointerEvent, RawPointerKind,
};

/// Two clicks within this window count as a double-click.
pub const DEFAULT_DOUBLE_CLICK_TIME_MS: u64 = 500;

/// Two clicks within this distance count as a double-click.
pub const DEFAULT_DOUBLE_CLICK_DISTANCE: f32 = 5.0;

/// How many pixels one wheel "line" scrolls.
const WHEEL_LINE_PIXELS: f32 = 20.0;

/// Map a winit mouse button to a pointer button.
///
/// Extra buttons (back/forward and beyond) have no role in this toolkit
/// and map to `None`.
pub fn from_winit_mouse_button(button: WinitMouseButton) -> Option<PointerButton> {
    match button {
        WinitMouseButton::Left => Some(PointerButton::Primary),
        WinitMouseButton::Right => Some(PointerButton::Secondary),
        WinitMouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

/// Extract the modifier set from a winit modifiers-changed event.
pub fn from_winit_modifiers(modifiers: &Modifiers) -> KeyboardModifiers {
    let state = modifiers.state();
    KeyboardModifiers {
        shift: state.shift_key(),
        control: state.control_key(),
        alt: state.alt_key(),
        meta: state.super_key(),
    }
}

/// Map a winit logical key to a Casement key.
pub fn from_winit_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(named) => from_named_key(named),
        WinitKey::Character(text) => text
            .chars()
            .next()
            .map(from_character)
            .unwrap_or(Key::Other(0)),
        _ => Key::Other(0),
    }
}

fn from_named_key(key: &NamedKey) -> Key {
    match key {
        NamedKey::ArrowUp => Key::ArrowUp,
        NamedKey::ArrowDown => Key::ArrowDown,
        NamedKey::ArrowLeft => Key::ArrowLeft,
        NamedKey::ArrowRight => Key::ArrowRight,
        NamedKey::Home => Key::Home,
        NamedKey::End => Key::End,
        NamedKey::PageUp => Key::PageUp,
        NamedKey::PageDown => Key::PageDown,
        NamedKey::Enter => Key::Enter,
        NamedKey::Tab => Key::Tab,
        NamedKey::Space => Key::Space,
        NamedKey::Backspace => Key::Backspace,
        NamedKey::Delete => Key::Delete,
        NamedKey::Insert => Key::Insert,
        NamedKey::Escape => Key::Escape,
        NamedKey::F1 => Key::F1,
        NamedKey::F2 => Key::F2,
        NamedKey::F3 => Key::F3,
        NamedKey::F4 => Key::F4,
        NamedKey::F5 => Key::F5,
        NamedKey::F6 => Key::F6,
        NamedKey::F7 => Key::F7,
        NamedKey::F8 => Key::F8,
        NamedKey::F9 => Key::F9,
        NamedKey::F10 => Key::F10,
        NamedKey::F11 => Key::F11,
        NamedKey::F12 => Key::F12,
        _ => Key::Other(0),
    }
}

fn from_character(c: char) -> Key {
    match c.to_ascii_lowercase() {
        'a' => Key::A,
        'b' => Key::B,
        'c' => Key::C,
        'd' => Key::D,
        'e' => Key::E,
        'f' => Key::F,
        'g' => Key::G,
        'h' => Key::H,
        'i' => Key::I,
        'j' => Key::J,
        'k' => Key::K,
        'l' => Key::L,
        'm' => Key::M,
        'n' => Key::N,
        'o' => Key::O,
        'p' => Key::P,
        'q' => Key::Q,
        'r' => Key::R,
        's' => Key::S,
        't' => Key::T,
        'u' => Key::U,
        'v' => Key::V,
        'w' => Key::W,
        'x' => Key::X,
        'y' => Key::Y,
        'z' => Key::Z,
        '0' => Key::Num0,
        '1' => Key::Num1,
        '2' => Key::Num2,
        '3' => Key::Num3,
        '4' => Key::Num4,
        '5' => Key::Num5,
        '6' => Key::Num6,
        '7' => Key::Num7,
        '8' => Key::Num8,
        '9' => Key::Num9,
        ' ' => Key::Space,
        other => Key::Other(other as u32),
    }
}

/// State for tracking a potential double-click.
#[derive(Debug, Clone, Copy)]
struct ClickState {
    button: PointerButton,
    position: Point,
    time: Instant,
}

/// Stateful converter from winit window events to raw pointer/key events.
#[derive(Debug)]
pub struct PointerTracker {
    position: Point,
    modifiers: KeyboardModifiers,
    last_click: Option<ClickState>,
    double_click_time: Duration,
    double_click_distance: f32,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerTracker {
    /// Create a tracker with the default double-click thresholds.
    pub fn new() -> Self {
        Self {
            position: Point::ZERO,
            modifiers: KeyboardModifiers::NONE,
            last_click: None,
            double_click_time: Duration::from_millis(DEFAULT_DOUBLE_CLICK_TIME_MS),
            double_click_distance: DEFAULT_DOUBLE_CLICK_DISTANCE,
        }
    }

    /// Last known pointer position in window coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current modifier state.
    pub fn modifiers(&self) -> KeyboardModifiers {
        self.modifiers
    }

    /// Adjust the double-click time threshold.
    pub fn set_double_click_time(&mut self, duration: Duration) {
        self.double_click_time = duration;
    }

    /// Adjust the double-click distance threshold.
    pub fn set_double_click_distance(&mut self, distance: f32) {
        self.double_click_distance = distance;
    }

    /// Record a modifiers-changed event.
    pub fn modifiers_changed(&mut self, modifiers: &Modifiers) {
        self.modifiers = from_winit_modifiers(modifiers);
    }

    /// Convert a cursor-moved event.
    pub fn cursor_moved(&mut self, position: Point) -> RawPointerEvent {
        self.position = position;
        RawPointerEvent {
            kind: RawPointerKind::Move,
            position,
            button: None,
            wheel: Point::ZERO,
            modifiers: self.modifiers,
        }
    }

    /// Convert a mouse button event, detecting double-clicks.
    ///
    /// Returns `None` for buttons the toolkit does not route.
    pub fn mouse_input(
        &mut self,
        state: ElementState,
        button: WinitMouseButton,
    ) -> Option<RawPointerEvent> {
        let button = from_winit_mouse_button(button)?;

        let kind = match state {
            ElementState::Pressed => {
                let is_double = self.last_click.is_some_and(|last| {
                    last.button == button
                        && last.time.elapsed() < self.double_click_time
                        && self.distance_to(last.position) < self.double_click_distance
                });

                if is_double {
                    // A triple click is not a second double-click.
                    self.last_click = None;
                    RawPointerKind::DoubleClick
                } else {
                    self.last_click = Some(ClickState {
                        button,
                        position: self.position,
                        time: Instant::now(),
                    });
                    RawPointerKind::Press
                }
            }
            ElementState::Released => RawPointerKind::Release,
        };

        Some(RawPointerEvent {
            kind,
            position: self.position,
            button: Some(button),
            wheel: Point::ZERO,
            modifiers: self.modifiers,
        })
    }

    /// Convert a wheel event, scaling line deltas to pixels.
    pub fn mouse_wheel(&mut self, delta: MouseScrollDelta) -> RawPointerEvent {
        let wheel = match delta {
            MouseScrollDelta::LineDelta(x, y) => {
                Point::new(x * WHEEL_LINE_PIXELS, y * WHEEL_LINE_PIXELS)
            }
            MouseScrollDelta::PixelDelta(pos) => Point::new(pos.x as f32, pos.y as f32),
        };
        RawPointerEvent {
            kind: RawPointerKind::Wheel,
            position: self.position,
            button: None,
            wheel,
            modifiers: self.modifiers,
        }
    }

    /// Convert a keyboard event.
    pub fn key_event(&self, event: &winit::event::KeyEvent) -> RawKeyEvent {
        RawKeyEvent {
            key: from_winit_key(&event.logical_key),
            pressed: event.state == ElementState::Pressed,
            modifiers: self.modifiers,
        }
    }

    /// The pointer left the window; forget click history.
    pub fn cursor_left(&mut self) {
        self.last_click = None;
    }

    fn distance_to(&self, point: Point) -> f32 {
        let dx = self.position.x - point.x;
        let dy = self.position.y - point.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_conversion() {
        assert_eq!(
            from_winit_mouse_button(WinitMouseButton::Left),
            Some(PointerButton::Primary)
        );
        assert_eq!(
            from_winit_mouse_button(WinitMouseButton::Right),
            Some(PointerButton::Secondary)
        );
        assert_eq!(from_winit_mouse_button(WinitMouseButton::Other(7)), None);
    }

    #[test]
    fn character_keys_fold_case() {
        assert_eq!(from_character('a'), Key::A);
        assert_eq!(from_character('A'), Key::A);
        assert_eq!(from_character('5'), Key::Num5);
        assert_eq!(from_character('ä'), Key::Other('ä' as u32));
    }

    #[test]
    fn quick_second_click_is_double() {
        let mut tracker = PointerTracker::new();
        tracker.cursor_moved(Point::new(50.0, 50.0));

        let first = tracker
            .mouse_input(ElementState::Pressed, WinitMouseButton::Left)
            .unwrap();
        assert_eq!(first.kind, RawPointerKind::Press);
        let _ = tracker.mouse_input(ElementState::Released, WinitMouseButton::Left);

        let second = tracker
            .mouse_input(ElementState::Pressed, WinitMouseButton::Left)
            .unwrap();
        assert_eq!(second.kind, RawPointerKind::DoubleClick);

        // And the third press starts over.
        let _ = tracker.mouse_input(ElementState::Released, WinitMouseButton::Left);
        let third = tracker
            .mouse_input(ElementState::Pressed, WinitMouseButton::Left)
            .unwrap();
        assert_eq!(third.kind, RawPointerKind::Press);
    }

    #[test]
    fn distant_second_click_is_not_double() {
        let mut tracker = PointerTracker::new();
        tracker.cursor_moved(Point::new(50.0, 50.0));
        let _ = tracker.mouse_input(ElementState::Pressed, WinitMouseButton::Left);
        let _ = tracker.mouse_input(ElementState::Released, WinitMouseButton::Left);

        tracker.cursor_moved(Point::new(200.0, 200.0));
        let second = tracker
            .mouse_input(ElementState::Pressed, WinitMouseButton::Left)
            .unwrap();
        assert_eq!(second.kind, RawPointerKind::Press);
    }

    #[test]
    fn wheel_lines_scale_to_pixels() {
        let mut tracker = PointerTracker::new();
        let event = tracker.mouse_wheel(MouseScrollDelta::LineDelta(0.0, -1.0));
        assert_eq!(event.wheel, Point::new(0.0, -20.0));
    }
}
