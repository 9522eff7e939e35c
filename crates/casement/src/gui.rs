//! The GUI root context.
//!
//! One [`Gui`] owns everything that is process-wide-per-root in the
//! original design: the control tree, the router's hovered/dragged state,
//! the focus token, the shortcut table, the tick scheduler, and the input
//! queue. Threading it explicitly (rather than through globals) keeps
//! multiple roots independent and the whole pipeline testable.
//!
//! # The tick
//!
//! [`Gui::tick`] runs the per-frame work in a fixed order: scheduled
//! callbacks, queued input (which may trigger layout eagerly), then render
//! and present according to the [`RenderPolicy`]. Layout therefore always
//! completes before render, and render before present.

use std::time::Instant;

use casement_core::{EventQueue, QueueSender, TickScheduler};
use casement_render::{Point, Size, TextMetrics};

use crate::control::anchors::{self, Edge};
use crate::control::base::EventCallback;
use crate::control::compose::{self, ComposeStats, RenderPolicy};
use crate::control::cursor::CursorShape;
use crate::control::events::{EventKind, RawInput, RawKeyEvent, RawPointerEvent};
use crate::control::focus::FocusManager;
use crate::control::router::{self, EventRouter};
use crate::control::shortcut::{KeyChord, ShortcutMap};
use crate::control::traits::Control;
use crate::control::tree::{ControlId, ControlTree};
use crate::host::WindowHost;
use crate::widgets::Panel;

/// A complete GUI root: tree, input state, focus, shortcuts, scheduler.
pub struct Gui {
    tree: ControlTree,
    root: ControlId,
    router: EventRouter,
    focus: FocusManager,
    shortcuts: ShortcutMap,
    scheduler: TickScheduler,
    queue: EventQueue<RawInput>,
    policy: RenderPolicy,
    metrics: Box<dyn TextMetrics>,
}

impl Gui {
    /// Create a root of the given size.
    ///
    /// The root is a plain [`Panel`]; it holds focus by default and is the
    /// permanent focus fallback.
    pub fn new(size: Size, metrics: Box<dyn TextMetrics>) -> Self {
        let mut tree = ControlTree::new();
        let mut panel = Panel::new();
        panel.base_mut().set_size(size);
        let root = tree.insert_root(Box::new(panel));

        let focus = FocusManager::new(root);
        // The root starts as the focus holder; reflect that on the control.
        if let Some(base) = tree.base_mut(root) {
            base.set_focused(true);
        }

        Self {
            tree,
            root,
            router: EventRouter::new(root),
            focus,
            shortcuts: ShortcutMap::new(),
            scheduler: TickScheduler::new(),
            queue: EventQueue::new(),
            policy: RenderPolicy::default(),
            metrics,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The root control.
    #[inline]
    pub fn root(&self) -> ControlId {
        self.root
    }

    /// Borrow the control tree.
    #[inline]
    pub fn tree(&self) -> &ControlTree {
        &self.tree
    }

    /// Mutably borrow the control tree.
    #[inline]
    pub fn tree_mut(&mut self) -> &mut ControlTree {
        &mut self.tree
    }

    /// The text-measurement service.
    #[inline]
    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics.as_ref()
    }

    /// The tick scheduler, for hover delays and tween driving.
    #[inline]
    pub fn scheduler_mut(&mut self) -> &mut TickScheduler {
        &mut self.scheduler
    }

    /// The control currently under the pointer.
    #[inline]
    pub fn hovered(&self) -> Option<ControlId> {
        self.router.hovered()
    }

    /// The control holding pointer capture.
    #[inline]
    pub fn dragged(&self) -> Option<ControlId> {
        self.router.dragged()
    }

    /// The focused control (never null; the root is the fallback).
    #[inline]
    pub fn focused(&self) -> ControlId {
        self.focus.focused()
    }

    /// How the root presents frames.
    #[inline]
    pub fn render_policy(&self) -> RenderPolicy {
        self.policy
    }

    /// Set the presentation policy.
    pub fn set_render_policy(&mut self, policy: RenderPolicy) {
        self.policy = policy;
    }

    /// The deepest control at a window position, per current hit-test
    /// offsets.
    pub fn control_at(&self, position: Point) -> Option<ControlId> {
        router::hit_test(&self.tree, self.root, position)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Append a child to a container.
    pub fn add(&mut self, parent: ControlId, control: Box<dyn Control>) -> ControlId {
        let id = self.tree.add(parent, control);
        self.reflow(parent);
        id
    }

    /// Insert a child at a paint-order position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn insert(
        &mut self,
        parent: ControlId,
        index: usize,
        control: Box<dyn Control>,
    ) -> ControlId {
        let id = self.tree.insert(parent, index, control);
        self.reflow(parent);
        id
    }

    /// Remove a child, destroying its subtree. No-op if not a child.
    pub fn remove(&mut self, parent: ControlId, child: ControlId) -> bool {
        let removed = self.tree.remove(parent, child);
        if removed {
            self.reflow(parent);
        }
        removed
    }

    /// Position of a child within its parent.
    pub fn index_of(&self, parent: ControlId, child: ControlId) -> Option<usize> {
        self.tree.index_of(parent, child)
    }

    fn reflow(&mut self, parent: ControlId) {
        if self
            .tree
            .base(parent)
            .is_some_and(|b| b.auto_layout() != crate::AutoLayout::None)
        {
            crate::control::auto_layout::flow_children(&mut self.tree, parent);
        }
    }

    // =========================================================================
    // Geometry and state
    // =========================================================================

    /// Move a control relative to its parent.
    pub fn set_position(&mut self, id: ControlId, position: Point) {
        if let Some(base) = self.tree.base_mut(id) {
            base.set_pos(position);
        }
        self.tree.update(id);
    }

    /// Resize a control. Clamps to its min/max, fires its resize listener,
    /// and re-lays-out its children.
    pub fn set_size(&mut self, id: ControlId, size: Size) {
        anchors::set_control_size(&mut self.tree, id, size, self.metrics.as_ref());
    }

    /// Resize the root (the host window changed size).
    pub fn resize_root(&mut self, size: Size) {
        self.set_size(self.root, size);
    }

    /// Show or hide a control.
    pub fn set_visible(&mut self, id: ControlId, visible: bool) {
        if let Some(base) = self.tree.base_mut(id) {
            base.set_visible(visible);
        }
        self.tree.update(id);
    }

    /// Enable or disable a control's input.
    pub fn set_enabled(&mut self, id: ControlId, enabled: bool) {
        if let Some(base) = self.tree.base_mut(id) {
            base.set_enabled(enabled);
        }
        self.tree.update(id);
    }

    /// Set a control's compositing opacity.
    pub fn set_opacity(&mut self, id: ControlId, opacity: f32) {
        if let Some(base) = self.tree.base_mut(id) {
            base.set_opacity(opacity);
        }
        self.tree.update(id);
    }

    /// Set a control's z-order, re-sorting its siblings.
    pub fn set_z(&mut self, id: ControlId, z: i32) {
        self.tree.set_z(id, z);
    }

    /// Mark a control's subtree path dirty.
    pub fn update(&mut self, id: ControlId) {
        self.tree.update(id);
    }

    // =========================================================================
    // Anchors
    // =========================================================================

    /// Anchor an edge at its current distance to the parent edge.
    pub fn set_anchor(&mut self, id: ControlId, edge: Edge) {
        anchors::set_anchor(&mut self.tree, id, edge);
    }

    /// Anchor several edges at their current distances.
    pub fn set_anchors(&mut self, id: ControlId, edges: &[Edge]) {
        anchors::set_anchors(&mut self.tree, id, edges);
    }

    /// Remove an anchor. Returns `false` if the edge was not anchored.
    pub fn clear_anchor(&mut self, id: ControlId, edge: Edge) -> bool {
        anchors::clear_anchor(&mut self.tree, id, edge)
    }

    // =========================================================================
    // Listeners, focus, shortcuts
    // =========================================================================

    /// Register the listener for one event kind on a control, replacing
    /// any previous one.
    pub fn set_callback(&mut self, id: ControlId, kind: EventKind, callback: EventCallback) {
        if let Some(base) = self.tree.base_mut(id) {
            base.set_callback(kind, callback);
        }
    }

    /// Remove a listener. Returns `false` if none was registered.
    pub fn clear_callback(&mut self, id: ControlId, kind: EventKind) -> bool {
        self.tree
            .base_mut(id)
            .map(|b| b.clear_callback(kind))
            .unwrap_or(false)
    }

    /// Request keyboard focus for a control.
    pub fn focus(&mut self, id: ControlId) -> bool {
        self.focus.request_focus(&mut self.tree, id)
    }

    /// Request blur; focus falls back to the root.
    pub fn blur(&mut self, id: ControlId) -> bool {
        self.focus.request_blur(&mut self.tree, id)
    }

    /// Move focus to the next focusable control (Tab).
    pub fn focus_next(&mut self) -> bool {
        self.focus.focus_next(&mut self.tree)
    }

    /// Move focus to the previous focusable control (Shift+Tab).
    pub fn focus_previous(&mut self) -> bool {
        self.focus.focus_previous(&mut self.tree)
    }

    /// Register a global shortcut, replacing any entry for the chord.
    pub fn register_shortcut<F>(&mut self, chord: KeyChord, strong: bool, callback: F)
    where
        F: FnMut() + 'static,
    {
        self.shortcuts.register(chord, strong, callback);
    }

    /// Remove a shortcut. Returns `false` if the chord was never
    /// registered.
    pub fn unregister_shortcut(&mut self, chord: KeyChord) -> bool {
        self.shortcuts.unregister(chord)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Route a pointer event immediately.
    pub fn pointer_event(&mut self, event: RawPointerEvent) {
        let span = tracing::trace_span!("casement::route");
        let _guard = span.enter();
        self.router
            .route_pointer(&mut self.tree, &mut self.focus, event);
    }

    /// Route a keyboard event immediately.
    pub fn key_event(&mut self, event: RawKeyEvent) {
        self.router
            .route_key(&mut self.tree, &self.focus, &mut self.shortcuts, event);
    }

    /// A sender for feeding input from host callbacks; drained by
    /// [`tick`](Self::tick).
    pub fn queue_sender(&self) -> QueueSender<RawInput> {
        self.queue.sender()
    }

    /// Drain and route all queued input, in arrival order.
    pub fn pump_input(&mut self) {
        while let Some(raw) = self.queue.pop() {
            match raw {
                RawInput::Pointer(event) => self.pointer_event(event),
                RawInput::Key(event) => self.key_event(event),
            }
        }
    }

    // =========================================================================
    // Tick and render
    // =========================================================================

    /// Run one application tick: scheduled callbacks, queued input, then
    /// render and present per the policy.
    pub fn tick(&mut self, host: &mut dyn WindowHost) -> ComposeStats {
        let span = tracing::trace_span!("casement::tick");
        let _guard = span.enter();

        self.scheduler.poll(Instant::now());
        self.pump_input();

        let stats = match self.policy {
            RenderPolicy::Continuous => {
                let stats = compose::render(&mut self.tree, self.root);
                self.present(host);
                stats
            }
            RenderPolicy::Efficient => {
                if self.tree.base(self.root).is_some_and(|b| b.is_dirty()) {
                    let stats = compose::render(&mut self.tree, self.root);
                    self.present(host);
                    stats
                } else {
                    ComposeStats::default()
                }
            }
            // The host drives rendering explicitly via `redraw`.
            RenderPolicy::NoLoop => ComposeStats::default(),
        };

        self.flush_cursor(host);
        stats
    }

    /// Render and present now, regardless of policy.
    ///
    /// This is the explicit path for [`RenderPolicy::NoLoop`] hosts, which
    /// call it on input or expose events.
    pub fn redraw(&mut self, host: &mut dyn WindowHost) -> ComposeStats {
        let stats = compose::render(&mut self.tree, self.root);
        self.present(host);
        self.flush_cursor(host);
        stats
    }

    fn present(&mut self, host: &mut dyn WindowHost) {
        if let Some(surface) = self.tree.base(self.root).and_then(|b| b.surface()) {
            host.present(surface);
        }
    }

    fn flush_cursor(&mut self, host: &mut dyn WindowHost) {
        if let Some(cursor) = self.router.take_cursor_change() {
            host.set_cursor(cursor);
        }
    }

    /// Fetch a pending cursor change without a host (headless callers).
    pub fn take_cursor_change(&mut self) -> Option<CursorShape> {
        self.router.take_cursor_change()
    }
}

impl std::fmt::Debug for Gui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gui")
            .field("root", &self.root)
            .field("controls", &self.tree.len())
            .field("policy", &self.policy)
            .field("focused", &self.focus.focused())
            .finish()
    }
}
