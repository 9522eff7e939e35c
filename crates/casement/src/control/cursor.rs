//! Pointer cursor shapes declared by controls.
//!
//! When hover settles on a new control at the end of a routing pass, the
//! router surfaces that control's declared shape so the host can update the
//! pointer glyph.

use cursor_icon::CursorIcon;

/// The pointer glyph a control wants shown while hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    /// The platform default arrow.
    #[default]
    Arrow,
    /// A pointing hand, for clickable elements.
    Hand,
    /// An I-beam, for text editing.
    Text,
    /// A four-way move cursor.
    Move,
    /// Horizontal resize arrows.
    ResizeHorizontal,
    /// Vertical resize arrows.
    ResizeVertical,
    /// A crosshair.
    Crosshair,
    /// The action is not allowed here.
    NotAllowed,
}

impl CursorShape {
    /// Map to the cross-platform [`CursorIcon`] vocabulary used by
    /// windowing layers.
    pub fn to_cursor_icon(self) -> CursorIcon {
        match self {
            Self::Arrow => CursorIcon::Default,
            Self::Hand => CursorIcon::Pointer,
            Self::Text => CursorIcon::Text,
            Self::Move => CursorIcon::Move,
            Self::ResizeHorizontal => CursorIcon::EwResize,
            Self::ResizeVertical => CursorIcon::NsResize,
            Self::Crosshair => CursorIcon::Crosshair,
            Self::NotAllowed => CursorIcon::NotAllowed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_arrow() {
        assert_eq!(CursorShape::default(), CursorShape::Arrow);
        assert_eq!(CursorShape::default().to_cursor_icon(), CursorIcon::Default);
    }
}
