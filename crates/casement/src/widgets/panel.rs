//! A plain rectangular container.

use casement_render::Color;

use crate::control::base::ControlBase;
use crate::control::traits::{Control, PaintContext};

/// A container with an optional background fill and border.
///
/// Panels group children, clip nothing, and draw at most two things: the
/// background (filled by the render engine before paint) and a one-pixel
/// border if one is set.
#[derive(Debug, Default)]
pub struct Panel {
    base: ControlBase,
    border: Option<Color>,
}

impl Panel {
    /// Create a panel with no background and no border.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an opaque background fill (builder style).
    pub fn with_background(mut self, color: Color) -> Self {
        self.base.set_background(Some(color));
        self
    }

    /// Set a one-pixel border color (builder style).
    pub fn with_border(mut self, color: Color) -> Self {
        self.border = Some(color);
        self
    }

    /// The border color, if any.
    pub fn border(&self) -> Option<Color> {
        self.border
    }

    /// Set or clear the border color.
    pub fn set_border(&mut self, border: Option<Color>) {
        if self.border != border {
            self.border = border;
            self.base.mark_dirty();
        }
    }
}

impl Control for Panel {
    fn base(&self) -> &ControlBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        if let Some(border) = self.border {
            let rect = ctx.rect();
            ctx.surface().stroke_rect(rect, border, 1.0);
        }
    }
}
