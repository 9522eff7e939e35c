//! Anchor-based layout on resize.
//!
//! An anchor pins a control edge to the matching parent edge at the pixel
//! distance measured when the anchor was set. When an ancestor resizes, the
//! engine re-derives position and size per axis:
//!
//! - Only the far edge (right/bottom) anchored: the control slides to keep
//!   its stored distance; size is untouched.
//! - Both edges anchored: the size becomes a function of the parent size
//!   (`parent - position - far_distance`); position is untouched.
//! - No anchor on the control at all: content-driven auto-size may apply.
//!
//! Rule strength, weakest to strongest: explicit size, auto-size, anchors,
//! min/max clamp. The clamp re-runs after every change.

use casement_core::logging::targets;
use casement_render::{Size, TextMetrics};

use super::auto_layout;
use super::events::{ControlEvent, EventData};
use super::router;
use super::tree::{ControlId, ControlTree};

/// A control edge that can be anchored to the matching parent edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    /// All four edges, for bulk anchoring.
    pub const ALL: [Self; 4] = [Self::Left, Self::Top, Self::Right, Self::Bottom];
}

/// Stored anchor distances, one optional entry per edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorSet {
    left: Option<f32>,
    top: Option<f32>,
    right: Option<f32>,
    bottom: Option<f32>,
}

impl AnchorSet {
    /// The stored distance for an edge, if anchored.
    pub fn get(&self, edge: Edge) -> Option<f32> {
        match edge {
            Edge::Left => self.left,
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
        }
    }

    /// Store a distance for an edge.
    pub fn set(&mut self, edge: Edge, distance: f32) {
        match edge {
            Edge::Left => self.left = Some(distance),
            Edge::Top => self.top = Some(distance),
            Edge::Right => self.right = Some(distance),
            Edge::Bottom => self.bottom = Some(distance),
        }
    }

    /// Unset an edge. Returns `true` if it was anchored.
    pub fn clear(&mut self, edge: Edge) -> bool {
        let slot = match edge {
            Edge::Left => &mut self.left,
            Edge::Top => &mut self.top,
            Edge::Right => &mut self.right,
            Edge::Bottom => &mut self.bottom,
        };
        slot.take().is_some()
    }

    /// Whether any edge is anchored. While true, auto-size is suppressed.
    pub fn any(&self) -> bool {
        self.left.is_some() || self.top.is_some() || self.right.is_some() || self.bottom.is_some()
    }
}

/// Capture an anchor for `id` at its current distance to the parent edge.
///
/// The distance is measured now and replayed on every subsequent parent
/// resize. Anchoring a parentless control is a configuration error and is
/// ignored with a warning.
pub fn set_anchor(tree: &mut ControlTree, id: ControlId, edge: Edge) {
    let Some(parent) = tree.parent(id) else {
        tracing::warn!(target: targets::LAYOUT, ?id, ?edge, "anchor on parentless control; ignoring");
        return;
    };
    let parent_size = tree.base(parent).map(|b| b.size()).unwrap_or(Size::ZERO);
    let Some(base) = tree.base_mut(id) else {
        return;
    };

    let distance = match edge {
        Edge::Left => base.pos().x,
        Edge::Top => base.pos().y,
        Edge::Right => parent_size.width - (base.pos().x + base.width()),
        Edge::Bottom => parent_size.height - (base.pos().y + base.height()),
    };
    base.anchors_mut().set(edge, distance);
    tracing::trace!(target: targets::LAYOUT, ?id, ?edge, distance, "anchor captured");
}

/// Capture anchors for several edges at once.
pub fn set_anchors(tree: &mut ControlTree, id: ControlId, edges: &[Edge]) {
    for &edge in edges {
        set_anchor(tree, id, edge);
    }
}

/// Remove an anchor. Returns `false` if the edge was not anchored.
pub fn clear_anchor(tree: &mut ControlTree, id: ControlId, edge: Edge) -> bool {
    tree.base_mut(id)
        .map(|b| b.anchors_mut().clear(edge))
        .unwrap_or(false)
}

/// Re-lay-out the children of `parent` after its size changed.
///
/// Applies the anchor rules per axis per child, runs auto-size where it
/// applies, re-clamps, fires each resized child's resize listener, marks
/// changed subtrees dirty, and recurses into children whose size changed
/// (their own children's anchors depend transitively on it).
pub fn resize_children(
    tree: &mut ControlTree,
    parent: ControlId,
    metrics: &dyn TextMetrics,
) {
    if let Some(base) = tree.base(parent) {
        if base.auto_layout() != auto_layout::AutoLayout::None {
            auto_layout::flow_children(tree, parent);
        }
    }

    let parent_size = match tree.base(parent) {
        Some(b) => b.size(),
        None => return,
    };

    for child in tree.children(parent) {
        layout_control(tree, child, parent_size, metrics);
    }
}

/// Apply the layout rules to one control given its parent's size.
fn layout_control(
    tree: &mut ControlTree,
    id: ControlId,
    parent_size: Size,
    metrics: &dyn TextMetrics,
) {
    let Some(base) = tree.base(id) else {
        return;
    };
    let anchors = *base.anchors();
    let old_size = base.size();
    let mut pos = base.pos();
    let mut size = old_size;

    // Auto-size is weaker than anchors: it only runs when the control has
    // no anchor at all.
    if !anchors.any() {
        if base.auto_size() {
            if let Some(hint) = tree.get(id).and_then(|c| c.size_hint(metrics)) {
                size = hint;
            }
        }
    } else {
        // Horizontal axis.
        match (anchors.get(Edge::Left), anchors.get(Edge::Right)) {
            (None, Some(right)) => {
                pos.x = parent_size.width - right - size.width;
            }
            (Some(_), Some(right)) => {
                size.width = parent_size.width - pos.x - right;
            }
            _ => {}
        }
        // Vertical axis.
        match (anchors.get(Edge::Top), anchors.get(Edge::Bottom)) {
            (None, Some(bottom)) => {
                pos.y = parent_size.height - bottom - size.height;
            }
            (Some(_), Some(bottom)) => {
                size.height = parent_size.height - pos.y - bottom;
            }
            _ => {}
        }
    }

    let Some(base) = tree.base_mut(id) else {
        return;
    };
    base.set_pos(pos);
    // The clamp is strongest: set_size re-applies it regardless of which
    // rule produced the value.
    let size_changed = base.set_size(size);
    let new_size = base.size();

    if size_changed {
        tree.update(id);
        let mut event = ControlEvent::new(EventData::Resize(new_size));
        router::deliver(tree, id, &mut event);
        resize_children(tree, id, metrics);
    }
}

/// Resize a control explicitly and propagate layout into its subtree.
///
/// This is the programmatic entry point (`set_size` on the public API):
/// clamps, fires the resize listener, marks the subtree path dirty, and
/// re-lays-out children.
pub fn set_control_size(
    tree: &mut ControlTree,
    id: ControlId,
    size: Size,
    metrics: &dyn TextMetrics,
) {
    let Some(base) = tree.base_mut(id) else {
        return;
    };
    let changed = base.set_size(size);
    let new_size = base.size();

    tree.update(id);
    if changed {
        let mut event = ControlEvent::new(EventData::Resize(new_size));
        router::deliver(tree, id, &mut event);
        resize_children(tree, id, metrics);
    }
}
