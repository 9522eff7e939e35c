//! Simple flow layouts for containers.
//!
//! A container may stack its children in a column or a row instead of
//! positioning them manually. Flow order is insertion order - an explicit
//! z-index on a flowed child is stored but never re-sorts the list - and
//! each child's margin plus the container's padding are honored.
//!
//! This is deliberately the whole story: no wrapping, no stretch factors,
//! no grid arithmetic. Anything beyond stacking belongs to anchors or to
//! manual positioning.

use casement_render::Point;

use super::tree::{ControlId, ControlTree};

/// How a container positions its children.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AutoLayout {
    /// Children are positioned manually (and by anchors).
    #[default]
    None,
    /// Children stack top to bottom.
    Column {
        /// Vertical gap between consecutive children.
        spacing: f32,
    },
    /// Children stack left to right.
    Row {
        /// Horizontal gap between consecutive children.
        spacing: f32,
    },
}

/// Reposition a container's children according to its auto-layout.
///
/// Invisible children are skipped and take no space. Does nothing for
/// [`AutoLayout::None`].
pub fn flow_children(tree: &mut ControlTree, parent: ControlId) {
    let Some(parent_base) = tree.base(parent) else {
        return;
    };
    let layout = parent_base.auto_layout();
    let padding = parent_base.padding();

    let (column, spacing) = match layout {
        AutoLayout::None => return,
        AutoLayout::Column { spacing } => (true, spacing),
        AutoLayout::Row { spacing } => (false, spacing),
    };

    let mut cursor = if column { padding.top } else { padding.left };

    for child in tree.children(parent) {
        let Some(base) = tree.base_mut(child) else {
            continue;
        };
        if !base.is_visible() {
            continue;
        }
        let margin = base.margin();

        if column {
            cursor += margin.top;
            base.set_pos(Point::new(padding.left + margin.left, cursor));
            cursor += base.height() + margin.bottom + spacing;
        } else {
            cursor += margin.left;
            base.set_pos(Point::new(cursor, padding.top + margin.top));
            cursor += base.width() + margin.right + spacing;
        }
    }

    tree.update(parent);
}

#[cfg(test)]
mod tests {
    use super::*;
    use casement_render::Size;

    use crate::control::base::{ControlBase, Edges};
    use crate::control::traits::Control;

    struct Plain {
        base: ControlBase,
    }

    impl Plain {
        fn sized(width: f32, height: f32) -> Box<dyn Control> {
            let mut base = ControlBase::new();
            base.set_size(Size::new(width, height));
            Box::new(Self { base })
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

    #[test]
    fn column_stacks_children() {
        let mut tree = ControlTree::new();
        let root = tree.insert_root(Plain::sized(100.0, 100.0));
        tree.base_mut(root)
            .unwrap()
            .set_auto_layout(AutoLayout::Column { spacing: 4.0 });

        let a = tree.add(root, Plain::sized(50.0, 20.0));
        let b = tree.add(root, Plain::sized(50.0, 30.0));

        flow_children(&mut tree, root);

        assert_eq!(tree.base(a).unwrap().pos(), Point::new(0.0, 0.0));
        assert_eq!(tree.base(b).unwrap().pos(), Point::new(0.0, 24.0));
    }

    #[test]
    fn row_honors_padding_and_margin() {
        let mut tree = ControlTree::new();
        let root = tree.insert_root(Plain::sized(200.0, 50.0));
        {
            let base = tree.base_mut(root).unwrap();
            base.set_auto_layout(AutoLayout::Row { spacing: 2.0 });
            base.set_padding(Edges::all(5.0));
        }

        let a = tree.add(root, Plain::sized(40.0, 40.0));
        tree.base_mut(a).unwrap().set_margin(Edges::all(3.0));
        let b = tree.add(root, Plain::sized(40.0, 40.0));

        flow_children(&mut tree, root);

        // a: padding.left + margin.left = 8; b: 8 + 40 + 3 + 2 = 53.
        assert_eq!(tree.base(a).unwrap().pos(), Point::new(8.0, 8.0));
        assert_eq!(tree.base(b).unwrap().pos(), Point::new(53.0, 5.0));
    }

    #[test]
    fn hidden_children_take_no_space() {
        let mut tree = ControlTree::new();
        let root = tree.insert_root(Plain::sized(100.0, 100.0));
        tree.base_mut(root)
            .unwrap()
            .set_auto_layout(AutoLayout::Column { spacing: 0.0 });

        let a = tree.add(root, Plain::sized(50.0, 20.0));
        let b = tree.add(root, Plain::sized(50.0, 20.0));
        tree.base_mut(a).unwrap().set_visible(false);

        flow_children(&mut tree, root);
        assert_eq!(tree.base(b).unwrap().pos().y, 0.0);
    }
}
