//! The core trait implemented by every control.
//!
//! Concrete controls embed a [`ControlBase`] and implement [`Control`],
//! overriding only the capabilities they need: painting, content
//! measurement, input handling. Everything else delegates to the base.
//!
//! # Example
//!
//! ```
//! use casement::{Control, ControlBase, PaintContext};
//! use casement_render::Color;
//!
//! struct ColorBox {
//!     base: ControlBase,
//!     color: Color,
//! }
//!
//! impl Control for ColorBox {
//!     fn base(&self) -> &ControlBase { &self.base }
//!     fn base_mut(&mut self) -> &mut ControlBase { &mut self.base }
//!
//!     fn paint(&self, ctx: &mut PaintContext<'_>) {
//!         let rect = ctx.rect();
//!         ctx.surface().fill_rect(rect, self.color);
//!     }
//! }
//! ```

use casement_render::{Point, Rect, Size, Surface, TextMetrics};

use super::base::ControlBase;
use super::events::ControlEvent;

/// Context handed to [`Control::paint`].
///
/// Wraps the control's own surface (already cleared, with the background
/// fill applied) plus the state flags a skin typically renders from.
pub struct PaintContext<'a> {
    surface: &'a mut Surface,
    rect: Rect,
    focused: bool,
    hovered: bool,
}

impl<'a> PaintContext<'a> {
    /// Create a paint context over a control's surface.
    pub fn new(surface: &'a mut Surface, rect: Rect, focused: bool, hovered: bool) -> Self {
        Self {
            surface,
            rect,
            focused,
            hovered,
        }
    }

    /// The surface to draw into.
    #[inline]
    pub fn surface(&mut self) -> &mut Surface {
        self.surface
    }

    /// The control's local rectangle (origin at 0,0).
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The control's width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.rect.width()
    }

    /// The control's height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.rect.height()
    }

    /// Whether the control holds keyboard focus.
    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the pointer is over the control.
    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}

/// The universal node type of a Casement tree.
///
/// Required: access to the embedded [`ControlBase`]. Everything else has a
/// default: a control that implements nothing further is an invisible
/// rectangle that participates in layout and routing.
pub trait Control: 'static {
    /// Borrow the control's base state.
    fn base(&self) -> &ControlBase;

    /// Mutably borrow the control's base state.
    fn base_mut(&mut self) -> &mut ControlBase;

    /// Paint the control's own content into its surface.
    ///
    /// The surface is cleared (and background-filled, if the control has a
    /// background) before this is called; children are composited on top
    /// afterwards by the render engine.
    fn paint(&self, _ctx: &mut PaintContext<'_>) {}

    /// Content-driven preferred size, if the control has one.
    ///
    /// Consulted by the layout engine when auto-size is enabled and no
    /// anchor is set. Text-bearing controls measure through `metrics`.
    fn size_hint(&self, _metrics: &dyn TextMetrics) -> Option<Size> {
        None
    }

    /// Handle an event before the registered listener sees it.
    ///
    /// Return `true` (or accept the event) to stop propagation. The default
    /// does nothing.
    fn event(&mut self, _event: &mut ControlEvent) -> bool {
        false
    }

    // =========================================================================
    // Delegating accessors
    // =========================================================================

    /// Position relative to the parent.
    fn pos(&self) -> Point {
        self.base().pos()
    }

    /// Current size.
    fn size(&self) -> Size {
        self.base().size()
    }

    /// The control's local rectangle.
    fn rect(&self) -> Rect {
        self.base().rect()
    }

    /// Whether the control is visible.
    fn is_visible(&self) -> bool {
        self.base().is_visible()
    }

    /// Whether the control responds to input.
    fn is_enabled(&self) -> bool {
        self.base().is_enabled()
    }

    /// Whether the control currently holds focus.
    fn has_focus(&self) -> bool {
        self.base().has_focus()
    }

    /// Whether the surface is stale.
    fn is_dirty(&self) -> bool {
        self.base().is_dirty()
    }
}
