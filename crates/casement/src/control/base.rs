//! Control base state shared by every node in the tree.
//!
//! `ControlBase` is pure per-control state: geometry with min/max clamping,
//! z-order, visibility, focus flags, the anchor set, the dirty flag, the
//! hit-test offset, the cached surface, and the listener table. Concrete
//! control types embed one and delegate through the
//! [`Control`](super::traits::Control) trait.
//!
//! Setters here mutate local state and mark the control dirty; propagation
//! of dirtiness to ancestors and layout side effects are the tree's job
//! (see [`ControlTree`](super::tree::ControlTree) and
//! [`anchors`](super::anchors)).

use std::collections::HashMap;

use casement_render::{Color, Point, Rect, Size, Surface};

use super::anchors::AnchorSet;
use super::auto_layout::AutoLayout;
use super::cursor::CursorShape;
use super::events::{ControlEvent, EventKind};
use super::traits::Control;
use super::tree::ControlId;

/// Hit-test offset assigned to children that must not be hittable
/// (invisible or fully transparent): far enough outside any plausible
/// container that containment tests always fail.
pub(crate) const OFFSCREEN: Point = Point::new(-1.0e7, -1.0e7);

/// Four-sided spacing, used for margins and padding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Edges {
    /// Zero spacing on all sides.
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    /// The same spacing on all four sides.
    pub const fn all(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    /// Combined horizontal spacing.
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Combined vertical spacing.
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// A registered event listener.
///
/// Receives the control it was registered on and the event; accepting a
/// pointer event stops propagation for the rest of the pass.
pub type EventCallback = Box<dyn FnMut(&mut dyn Control, &mut ControlEvent)>;

/// The state every control carries.
pub struct ControlBase {
    id: ControlId,
    parent: Option<ControlId>,
    children: Vec<ControlId>,

    pos: Point,
    size: Size,
    min_size: Size,
    max_size: Size,
    margin: Edges,
    padding: Edges,
    z: i32,

    visible: bool,
    enabled: bool,
    focusable: bool,
    focused: bool,
    hovered: bool,
    sticky_focus: bool,
    overrides_shortcuts: bool,
    auto_size: bool,
    opacity: f32,

    anchors: AnchorSet,
    auto_layout: AutoLayout,
    background: Option<Color>,
    cursor: CursorShape,

    dirty: bool,
    /// Position relative to the parent's origin as of the last composite;
    /// the router hit-tests against this, not against `pos`.
    offset: Point,
    surface: Option<Surface>,

    callbacks: HashMap<EventKind, EventCallback>,
}

impl Default for ControlBase {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlBase {
    /// Create a fresh base with default state.
    ///
    /// Controls start visible, enabled, non-focusable, fully opaque, and
    /// dirty (they have never been rendered).
    pub fn new() -> Self {
        Self {
            id: ControlId::default(),
            parent: None,
            children: Vec::new(),
            pos: Point::ZERO,
            size: Size::ZERO,
            min_size: Size::ZERO,
            max_size: Size::new(f32::MAX, f32::MAX),
            margin: Edges::ZERO,
            padding: Edges::ZERO,
            z: 0,
            visible: true,
            enabled: true,
            focusable: false,
            focused: false,
            hovered: false,
            sticky_focus: false,
            overrides_shortcuts: false,
            auto_size: false,
            opacity: 1.0,
            anchors: AnchorSet::default(),
            auto_layout: AutoLayout::None,
            background: None,
            cursor: CursorShape::Arrow,
            dirty: true,
            // Not hittable until the first composite assigns a real offset.
            offset: OFFSCREEN,
            surface: None,
            callbacks: HashMap::new(),
        }
    }

    // =========================================================================
    // Identity and relations
    // =========================================================================

    /// This control's ID in the tree. Null until registered.
    #[inline]
    pub fn id(&self) -> ControlId {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: ControlId) {
        self.id = id;
    }

    /// The parent control, if attached.
    #[inline]
    pub fn parent(&self) -> Option<ControlId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<ControlId>) {
        self.parent = parent;
    }

    /// Child IDs in paint order (lowest z first).
    #[inline]
    pub fn children(&self) -> &[ControlId] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<ControlId> {
        &mut self.children
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Position relative to the parent's origin.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Move the control. Marks it dirty; the parent composites it at the
    /// new position on the next render.
    pub fn set_pos(&mut self, pos: Point) {
        if self.pos != pos {
            self.pos = pos;
            self.dirty = true;
        }
    }

    /// Current size, always within `[min_size, max_size]`.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Set the size, clamped into `[min_size, max_size]`.
    ///
    /// Returns `true` if the effective size changed.
    pub fn set_size(&mut self, size: Size) -> bool {
        let clamped = size.clamp(self.min_size, self.max_size);
        if self.size != clamped {
            self.size = clamped;
            self.dirty = true;
            true
        } else {
            false
        }
    }

    /// Control width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    /// Control height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// The control's local rectangle (origin at 0,0).
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.size.width, self.size.height)
    }

    /// Minimum size constraint.
    #[inline]
    pub fn min_size(&self) -> Size {
        self.min_size
    }

    /// Set the minimum size and re-clamp the current size.
    pub fn set_min_size(&mut self, min: Size) {
        self.min_size = min;
        self.set_size(self.size);
    }

    /// Maximum size constraint.
    #[inline]
    pub fn max_size(&self) -> Size {
        self.max_size
    }

    /// Set the maximum size and re-clamp the current size.
    pub fn set_max_size(&mut self, max: Size) {
        self.max_size = max;
        self.set_size(self.size);
    }

    /// Outer spacing honored by auto-layout containers.
    #[inline]
    pub fn margin(&self) -> Edges {
        self.margin
    }

    /// Set the outer spacing.
    pub fn set_margin(&mut self, margin: Edges) {
        self.margin = margin;
        self.dirty = true;
    }

    /// Inner spacing reserved around this control's children.
    #[inline]
    pub fn padding(&self) -> Edges {
        self.padding
    }

    /// Set the inner spacing.
    pub fn set_padding(&mut self, padding: Edges) {
        self.padding = padding;
        self.dirty = true;
    }

    /// Explicit z-order among siblings. Higher paints later (on top).
    #[inline]
    pub fn z(&self) -> i32 {
        self.z
    }

    pub(crate) fn set_z_value(&mut self, z: i32) {
        self.z = z;
    }

    // =========================================================================
    // State flags
    // =========================================================================

    /// Whether the control is visible.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the control. Hidden controls are skipped by both the
    /// compositor and the router.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.dirty = true;
        }
    }

    /// Whether the control responds to input.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable input for the control and its subtree.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.dirty = true;
        }
    }

    /// Whether the control can take keyboard focus.
    #[inline]
    pub fn is_focusable(&self) -> bool {
        self.focusable && self.enabled && self.visible
    }

    /// Declare whether the control can take keyboard focus.
    pub fn set_focusable(&mut self, focusable: bool) {
        self.focusable = focusable;
    }

    /// Whether the control currently holds focus.
    #[inline]
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub(crate) fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.dirty = true;
        }
    }

    /// Whether the pointer is currently over this control.
    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        if self.hovered != hovered {
            self.hovered = hovered;
            self.dirty = true;
        }
    }

    /// Whether the control refuses to yield focus except via its own blur.
    #[inline]
    pub fn has_sticky_focus(&self) -> bool {
        self.sticky_focus
    }

    /// Declare sticky focus (e.g. a modal text field mid-edit).
    pub fn set_sticky_focus(&mut self, sticky: bool) {
        self.sticky_focus = sticky;
    }

    /// Whether this control captures key chords that would otherwise fire
    /// shortcuts. Strong shortcuts still fire.
    #[inline]
    pub fn overrides_shortcuts(&self) -> bool {
        self.overrides_shortcuts
    }

    /// Declare shortcut override (e.g. a text input claiming Ctrl+C).
    pub fn set_overrides_shortcuts(&mut self, overrides: bool) {
        self.overrides_shortcuts = overrides;
    }

    /// Whether content-driven sizing is enabled.
    ///
    /// Auto-size only applies while no anchor is set on the control;
    /// anchors take precedence.
    #[inline]
    pub fn auto_size(&self) -> bool {
        self.auto_size
    }

    /// Enable or disable content-driven sizing.
    pub fn set_auto_size(&mut self, auto: bool) {
        self.auto_size = auto;
    }

    /// Compositing opacity in `[0, 1]`.
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Set the compositing opacity, clamped to `[0, 1]`. A control at
    /// opacity zero is skipped entirely and becomes unhittable.
    pub fn set_opacity(&mut self, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        if self.opacity != opacity {
            self.opacity = opacity;
            self.dirty = true;
        }
    }

    // =========================================================================
    // Anchors, layout, appearance
    // =========================================================================

    /// The control's anchor set.
    #[inline]
    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    pub(crate) fn anchors_mut(&mut self) -> &mut AnchorSet {
        &mut self.anchors
    }

    /// The container's auto-layout mode.
    #[inline]
    pub fn auto_layout(&self) -> AutoLayout {
        self.auto_layout
    }

    /// Set the auto-layout mode. A non-`None` mode suppresses z-sorting of
    /// the children list; flow order is insertion order.
    pub fn set_auto_layout(&mut self, layout: AutoLayout) {
        self.auto_layout = layout;
        self.dirty = true;
    }

    /// Background fill painted before the control's own content.
    #[inline]
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Set the background fill. `None` leaves the surface transparent.
    pub fn set_background(&mut self, background: Option<Color>) {
        if self.background != background {
            self.background = background;
            self.dirty = true;
        }
    }

    /// The cursor shape shown while this control is hovered.
    #[inline]
    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    /// Declare the hover cursor shape.
    pub fn set_cursor(&mut self, cursor: CursorShape) {
        self.cursor = cursor;
    }

    // =========================================================================
    // Dirty flag, offset, surface
    // =========================================================================

    /// Whether the surface is stale and must be re-rendered.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flag this control's surface as stale.
    ///
    /// Local only: ancestors are not touched, so a change made outside a
    /// render pass should go through
    /// [`ControlTree::update`](super::tree::ControlTree::update), which
    /// propagates upward. Custom controls call this from their own setters;
    /// the eager upward walk happens on the next tree-level update or
    /// parent recomposite.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// The hit-test offset: this control's position relative to its
    /// parent's origin as of the last composite.
    #[inline]
    pub fn offset(&self) -> Point {
        self.offset
    }

    pub(crate) fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    /// Borrow the cached surface, if one has been rendered.
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub(crate) fn take_surface(&mut self) -> Option<Surface> {
        self.surface.take()
    }

    pub(crate) fn put_surface(&mut self, surface: Surface) {
        self.surface = Some(surface);
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Register a listener for one event kind, replacing any previous one.
    pub fn set_callback(&mut self, kind: EventKind, callback: EventCallback) {
        self.callbacks.insert(kind, callback);
    }

    /// Remove the listener for an event kind. Returns `true` if one was
    /// registered.
    pub fn clear_callback(&mut self, kind: EventKind) -> bool {
        self.callbacks.remove(&kind).is_some()
    }

    /// Whether a listener is registered for the event kind.
    pub fn has_callback(&self, kind: EventKind) -> bool {
        self.callbacks.contains_key(&kind)
    }

    pub(crate) fn take_callback(&mut self, kind: EventKind) -> Option<EventCallback> {
        self.callbacks.remove(&kind)
    }

    pub(crate) fn restore_callback(&mut self, kind: EventKind, callback: EventCallback) {
        // The listener may have re-registered itself while running; the
        // newer registration wins.
        self.callbacks.entry(kind).or_insert(callback);
    }
}

impl std::fmt::Debug for ControlBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlBase")
            .field("id", &self.id)
            .field("pos", &self.pos)
            .field("size", &self.size)
            .field("z", &self.z)
            .field("visible", &self.visible)
            .field("enabled", &self.enabled)
            .field("dirty", &self.dirty)
            .field("children", &self.children.len())
            .finish()
    }
}
