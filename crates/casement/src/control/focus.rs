//! Keyboard focus arbitration.
//!
//! Exactly one control holds focus at all times; the root container is the
//! permanent fallback, so the focus reference is never null. Focus moves
//! only through explicit requests, which the manager arbitrates:
//!
//! - a request fails if the target cannot take focus, or if the current
//!   holder declared *sticky* focus (it yields only via its own blur);
//! - a blur request only has effect coming from the current holder, and
//!   always lands focus back on the root.
//!
//! The control losing focus is notified before the one gaining it.

use casement_core::logging::targets;

use super::events::{ControlEvent, EventData};
use super::router::deliver;
use super::tree::{ControlId, ControlTree};

/// Tracks and arbitrates the single focused control of one GUI root.
#[derive(Debug)]
pub struct FocusManager {
    root: ControlId,
    focused: ControlId,
}

impl FocusManager {
    /// Create a manager with focus resting on the root.
    pub fn new(root: ControlId) -> Self {
        Self {
            root,
            focused: root,
        }
    }

    /// The control currently holding focus. Never invalid while the tree
    /// root lives.
    #[inline]
    pub fn focused(&self) -> ControlId {
        self.focused
    }

    /// Whether a specific control holds focus.
    #[inline]
    pub fn has_focus(&self, id: ControlId) -> bool {
        self.focused == id
    }

    /// Request focus for a control.
    ///
    /// Fails (returning `false`) if the control is not focusable, no longer
    /// exists, or the current holder has sticky focus. Requesting focus for
    /// the current holder succeeds trivially.
    pub fn request_focus(&mut self, tree: &mut ControlTree, id: ControlId) -> bool {
        if id == self.focused {
            return true;
        }

        // The root is the fallback holder and is always allowed to take
        // focus back; everything else must be focusable right now.
        if id != self.root && !tree.base(id).is_some_and(|b| b.is_focusable()) {
            tracing::trace!(target: targets::FOCUS, ?id, "focus request rejected: not focusable");
            return false;
        }

        if tree.base(self.focused).is_some_and(|b| b.has_sticky_focus()) {
            tracing::trace!(
                target: targets::FOCUS,
                holder = ?self.focused,
                ?id,
                "focus request rejected: holder is sticky"
            );
            return false;
        }

        self.transition(tree, id);
        true
    }

    /// Request blur from a control.
    ///
    /// Only the current holder can blur, and focus falls back to the root,
    /// never to nothing. A sticky holder blurring itself is the one
    /// sanctioned way for it to yield.
    pub fn request_blur(&mut self, tree: &mut ControlTree, id: ControlId) -> bool {
        if id != self.focused {
            tracing::trace!(target: targets::FOCUS, ?id, "blur request from non-holder; ignoring");
            return false;
        }
        if self.focused != self.root {
            self.transition(tree, self.root);
        }
        true
    }

    /// Move focus to the next focusable control in tree pre-order,
    /// wrapping at the end. Returns `false` if nothing is focusable or the
    /// current holder refuses to yield.
    pub fn focus_next(&mut self, tree: &mut ControlTree) -> bool {
        self.cycle(tree, false)
    }

    /// Move focus to the previous focusable control in tree pre-order.
    pub fn focus_previous(&mut self, tree: &mut ControlTree) -> bool {
        self.cycle(tree, true)
    }

    fn cycle(&mut self, tree: &mut ControlTree, backwards: bool) -> bool {
        let mut order = Vec::new();
        collect_focusable(tree, self.root, &mut order);
        if order.is_empty() {
            return false;
        }

        let target = match order.iter().position(|&id| id == self.focused) {
            Some(pos) => {
                let next = if backwards {
                    (pos + order.len() - 1) % order.len()
                } else {
                    (pos + 1) % order.len()
                };
                order[next]
            }
            None => {
                if backwards {
                    order[order.len() - 1]
                } else {
                    order[0]
                }
            }
        };

        if target == self.focused {
            return false;
        }
        self.request_focus(tree, target)
    }

    /// Reassign focus, delivering out-then-in notifications.
    fn transition(&mut self, tree: &mut ControlTree, id: ControlId) {
        let old = self.focused;
        if let Some(base) = tree.base_mut(old) {
            base.set_focused(false);
        }
        // Focus rings are painted state; recomposite both paths.
        tree.update(old);
        deliver(tree, old, &mut ControlEvent::new(EventData::FocusOut));

        self.focused = id;
        if let Some(base) = tree.base_mut(id) {
            base.set_focused(true);
        }
        tree.update(id);
        deliver(tree, id, &mut ControlEvent::new(EventData::FocusIn));

        tracing::trace!(target: targets::FOCUS, from = ?old, to = ?id, "focus moved");
    }
}

/// Collect focusable controls in pre-order (paint order), skipping hidden
/// subtrees.
fn collect_focusable(tree: &ControlTree, id: ControlId, order: &mut Vec<ControlId>) {
    let Some(base) = tree.base(id) else {
        return;
    };
    if !base.is_visible() {
        return;
    }
    if base.is_focusable() {
        order.push(id);
    }
    for child in tree.children(id) {
        collect_focusable(tree, child, order);
    }
}
