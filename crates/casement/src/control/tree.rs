//! Arena ownership of the control tree.
//!
//! The [`ControlTree`] owns every control behind a stable [`ControlId`].
//! Containers reference children by ID in paint order; children hold a
//! non-owning parent ID. Removing a child destroys its whole subtree -
//! parent ownership of child lifetime is exclusive.
//!
//! Structural invariants (a child's parent pointer always names the
//! container that lists it; the dirty flag of a control implies dirty
//! ancestors after [`update`](ControlTree::update)) are enforced here by
//! construction and are not runtime-checked anywhere else.

use casement_core::logging::targets;
use slotmap::{new_key_type, SlotMap};

use super::auto_layout::AutoLayout;
use super::base::ControlBase;
use super::traits::Control;

new_key_type! {
    /// A stable identifier for a control in the tree.
    ///
    /// IDs remain valid across tree mutations and become invalid when the
    /// control is removed.
    pub struct ControlId;
}

/// The arena owning all controls of one GUI root.
pub struct ControlTree {
    controls: SlotMap<ControlId, Box<dyn Control>>,
}

impl Default for ControlTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            controls: SlotMap::with_key(),
        }
    }

    /// Number of controls in the tree.
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Whether an ID is live.
    pub fn contains(&self, id: ControlId) -> bool {
        self.controls.contains_key(id)
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Borrow a control.
    pub fn get(&self, id: ControlId) -> Option<&dyn Control> {
        self.controls.get(id).map(|c| c.as_ref())
    }

    /// Mutably borrow a control.
    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut (dyn Control + 'static)> {
        self.controls.get_mut(id).map(|c| c.as_mut())
    }

    /// Borrow a control's base state.
    pub fn base(&self, id: ControlId) -> Option<&ControlBase> {
        self.get(id).map(|c| c.base())
    }

    /// Mutably borrow a control's base state.
    pub fn base_mut(&mut self, id: ControlId) -> Option<&mut ControlBase> {
        self.get_mut(id).map(|c| c.base_mut())
    }

    /// A control's parent.
    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.base(id).and_then(|b| b.parent())
    }

    /// A control's children in paint order, as a snapshot.
    ///
    /// The copy is deliberate: routing and compositing iterate snapshots so
    /// that handlers mutating the child list mid-pass are only observed by
    /// the next pass.
    pub fn children(&self, id: ControlId) -> Vec<ControlId> {
        self.base(id).map(|b| b.children().to_vec()).unwrap_or_default()
    }

    // =========================================================================
    // Structure mutation
    // =========================================================================

    /// Register a parentless control (the GUI root).
    pub fn insert_root(&mut self, control: Box<dyn Control>) -> ControlId {
        let id = self.controls.insert(control);
        self.controls[id].base_mut().assign_id(id);
        tracing::trace!(target: targets::TREE, ?id, "registered root control");
        id
    }

    /// Append a child to a container.
    ///
    /// The child lands at the end of the paint order (topmost among equal
    /// z). Marks the parent's subtree path dirty.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a live control.
    pub fn add(&mut self, parent: ControlId, control: Box<dyn Control>) -> ControlId {
        let index = self
            .base(parent)
            .map(|b| b.children().len())
            .expect("add: parent control does not exist");
        self.insert(parent, index, control)
    }

    /// Insert a child at a position in the paint order.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a live control or `index` is out of range
    /// (a host-level fault, per the error policy: child-index bounds are
    /// the caller's contract).
    pub fn insert(
        &mut self,
        parent: ControlId,
        index: usize,
        control: Box<dyn Control>,
    ) -> ControlId {
        assert!(
            self.controls.contains_key(parent),
            "insert: parent control does not exist"
        );

        let id = self.controls.insert(control);
        {
            let base = self.controls[id].base_mut();
            base.assign_id(id);
            base.set_parent(Some(parent));
        }
        self.controls[parent].base_mut().children_mut().insert(index, id);

        self.resort_children(parent);
        self.update(parent);
        tracing::trace!(target: targets::TREE, ?parent, ?id, index, "inserted control");
        id
    }

    /// Remove a child and destroy its subtree.
    ///
    /// Returns `false` (a no-op, not an error) when `child` is not
    /// currently a child of `parent`.
    pub fn remove(&mut self, parent: ControlId, child: ControlId) -> bool {
        let Some(position) = self.index_of(parent, child) else {
            tracing::warn!(target: targets::TREE, ?parent, ?child, "remove: not a child; ignoring");
            return false;
        };

        self.controls[parent].base_mut().children_mut().remove(position);
        self.destroy_subtree(child);
        self.update(parent);
        tracing::trace!(target: targets::TREE, ?parent, ?child, "removed control");
        true
    }

    /// Position of a child in its parent's paint order.
    pub fn index_of(&self, parent: ControlId, child: ControlId) -> Option<usize> {
        self.base(parent)
            .and_then(|b| b.children().iter().position(|&c| c == child))
    }

    fn destroy_subtree(&mut self, id: ControlId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(base) = self.base(current) {
                stack.extend_from_slice(base.children());
            }
            self.controls.remove(current);
        }
    }

    // =========================================================================
    // Z-order
    // =========================================================================

    /// Set a control's z-order and re-sort its siblings.
    ///
    /// The sort is stable, so equal-z siblings keep insertion order. A
    /// parent running an auto-layout keeps flow order instead; the z value
    /// is stored but sorting is suppressed.
    pub fn set_z(&mut self, id: ControlId, z: i32) {
        let Some(base) = self.base_mut(id) else {
            return;
        };
        if base.z() == z {
            return;
        }
        base.set_z_value(z);

        if let Some(parent) = self.parent(id) {
            self.resort_children(parent);
            self.update(parent);
        }
    }

    /// Re-sort a container's children by z (stable), unless the container
    /// auto-lays-out its children.
    pub(crate) fn resort_children(&mut self, parent: ControlId) {
        let Some(parent_base) = self.base(parent) else {
            return;
        };
        if parent_base.auto_layout() != AutoLayout::None {
            return;
        }

        let mut children = parent_base.children().to_vec();
        let keyed: Vec<i32> = children
            .iter()
            .map(|&c| self.base(c).map(|b| b.z()).unwrap_or(0))
            .collect();

        // Already sorted is the common case.
        if keyed.windows(2).all(|w| w[0] <= w[1]) {
            return;
        }

        let mut indexed: Vec<(i32, ControlId)> =
            keyed.into_iter().zip(children.iter().copied()).collect();
        indexed.sort_by_key(|&(z, _)| z);
        children.clear();
        children.extend(indexed.into_iter().map(|(_, c)| c));

        *self.controls[parent].base_mut().children_mut() = children;
    }

    // =========================================================================
    // Dirty propagation
    // =========================================================================

    /// Mark a control and every ancestor dirty.
    ///
    /// Eager and unconditional: a single leaf change becomes visible at the
    /// root without a separate invalidation pass. Calling this twice in a
    /// row is idempotent.
    pub fn update(&mut self, id: ControlId) {
        let mut current = Some(id);
        while let Some(c) = current {
            let Some(base) = self.base_mut(c) else {
                break;
            };
            base.mark_dirty();
            current = base.parent();
        }
    }
}

impl std::fmt::Debug for ControlTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlTree")
            .field("controls", &self.controls.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::base::ControlBase;

    struct Plain {
        base: ControlBase,
    }

    impl Plain {
        fn boxed() -> Box<dyn Control> {
            Box::new(Self {
                base: ControlBase::new(),
            })
        }
    }

    impl Control for Plain {
        fn base(&self) -> &ControlBase {
            &self.base
        }
        fn base_mut(&mut self) -> &mut ControlBase {
            &mut self.base
        }
    }

    fn tree_with_root() -> (ControlTree, ControlId) {
        let mut tree = ControlTree::new();
        let root = tree.insert_root(Plain::boxed());
        (tree, root)
    }

    #[test]
    fn add_links_parent_and_child() {
        let (mut tree, root) = tree_with_root();
        let child = tree.add(root, Plain::boxed());

        assert_eq!(tree.index_of(root, child), Some(0));
        assert_eq!(tree.parent(child), Some(root));
        assert_eq!(tree.base(child).unwrap().id(), child);
    }

    #[test]
    fn remove_destroys_subtree() {
        let (mut tree, root) = tree_with_root();
        let child = tree.add(root, Plain::boxed());
        let grandchild = tree.add(child, Plain::boxed());

        assert!(tree.remove(root, child));
        assert!(!tree.contains(child));
        assert!(!tree.contains(grandchild));
        assert_eq!(tree.children(root).len(), 0);
    }

    #[test]
    fn remove_absent_child_is_noop() {
        let (mut tree, root) = tree_with_root();
        let a = tree.add(root, Plain::boxed());
        let b = tree.add(a, Plain::boxed());

        // b is a grandchild of root, not a child.
        assert!(!tree.remove(root, b));
        assert!(tree.contains(b));
    }

    #[test]
    fn insertion_order_is_paint_order() {
        let (mut tree, root) = tree_with_root();
        let a = tree.add(root, Plain::boxed());
        let b = tree.add(root, Plain::boxed());
        let c = tree.insert(root, 1, Plain::boxed());

        assert_eq!(tree.children(root), vec![a, c, b]);
    }

    #[test]
    fn z_triggers_stable_resort() {
        let (mut tree, root) = tree_with_root();
        let a = tree.add(root, Plain::boxed());
        let b = tree.add(root, Plain::boxed());
        let c = tree.add(root, Plain::boxed());

        tree.set_z(a, 5);
        assert_eq!(tree.children(root), vec![b, c, a]);

        // Equal z keeps insertion order (stable sort).
        tree.set_z(b, 5);
        assert_eq!(tree.children(root), vec![c, a, b]);
    }

    #[test]
    fn auto_layout_suppresses_z_sort() {
        let (mut tree, root) = tree_with_root();
        let a = tree.add(root, Plain::boxed());
        let b = tree.add(root, Plain::boxed());

        tree.base_mut(root)
            .unwrap()
            .set_auto_layout(AutoLayout::Column { spacing: 0.0 });
        tree.set_z(a, 10);

        // Flow order unchanged.
        assert_eq!(tree.children(root), vec![a, b]);
    }

    #[test]
    fn update_marks_ancestors() {
        let (mut tree, root) = tree_with_root();
        let child = tree.add(root, Plain::boxed());
        let grandchild = tree.add(child, Plain::boxed());

        for id in [root, child, grandchild] {
            tree.base_mut(id).unwrap().clear_dirty();
        }

        tree.update(grandchild);
        assert!(tree.base(grandchild).unwrap().is_dirty());
        assert!(tree.base(child).unwrap().is_dirty());
        assert!(tree.base(root).unwrap().is_dirty());
    }

    #[test]
    #[should_panic(expected = "insertion index")]
    fn insert_out_of_range_panics() {
        let (mut tree, root) = tree_with_root();
        tree.insert(root, 3, Plain::boxed());
    }
}
