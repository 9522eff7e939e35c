//! The dirty-driven incremental render engine.
//!
//! Rendering is bottom-up compositing: a control paints its own content
//! into its cached surface, then blits each visible child's surface on top
//! at the child's position, recursing first into children whose dirty flag
//! is set. A clean subtree costs one blit of its cached surface - that is
//! the whole point of the per-control surface cache.
//!
//! During the composite each child's hit-test `offset` is refreshed to the
//! position it was actually drawn at; the router tests against that, so
//! hit-testing always matches what is on screen, not what a handler moved
//! a moment ago.

use casement_core::logging::targets;
use casement_render::{Point, Rect, Surface};

use super::base::OFFSCREEN;
use super::traits::PaintContext;
use super::tree::{ControlId, ControlTree};

/// When the root presents its surface to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPolicy {
    /// Present every tick, rendered or not.
    Continuous,
    /// Render and present only when something is dirty.
    #[default]
    Efficient,
    /// Never render from the tick; the host calls
    /// [`Gui::redraw`](crate::Gui::redraw) explicitly (and re-triggers it
    /// on input).
    NoLoop,
}

/// Counters from one composite pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeStats {
    /// Controls whose surface was re-rendered.
    pub rendered: u32,
    /// Clean controls whose cached surface was blitted as-is.
    pub reused: u32,
    /// Controls skipped (hidden or fully transparent).
    pub skipped: u32,
}

/// Render the subtree rooted at `root` if it is dirty.
///
/// Clean trees return immediately with zero stats. After the pass the
/// root's own hit-test offset is pinned to the origin.
pub fn render(tree: &mut ControlTree, root: ControlId) -> ComposeStats {
    let mut stats = ComposeStats::default();

    if tree.base(root).is_some_and(|b| b.is_dirty()) {
        render_control(tree, root, &mut stats);
        tracing::trace!(
            target: targets::COMPOSE,
            rendered = stats.rendered,
            reused = stats.reused,
            skipped = stats.skipped,
            "composite pass"
        );
    }

    if let Some(base) = tree.base_mut(root) {
        base.set_offset(Point::ZERO);
    }
    stats
}

/// Re-render one control's surface and composite its children onto it.
fn render_control(tree: &mut ControlTree, id: ControlId, stats: &mut ComposeStats) {
    let Some(base) = tree.base(id) else {
        return;
    };

    // Surfaces cannot have non-positive extents; a collapsed control still
    // renders as a 1x1 buffer.
    let width = base.width().round().max(1.0) as u32;
    let height = base.height().round().max(1.0) as u32;
    let local_rect = Rect::new(0.0, 0.0, width as f32, height as f32);
    let background = base.background();
    let focused = base.has_focus();
    let hovered = base.is_hovered();

    // Take the surface out of the control so the tree stays borrowable
    // while we paint and recurse.
    let mut surface = tree
        .base_mut(id)
        .and_then(|b| b.take_surface())
        .unwrap_or_else(|| Surface::new(width, height));
    surface.ensure_size(width, height);
    surface.clear();
    if let Some(bg) = background {
        surface.fill(bg);
    }

    if let Some(control) = tree.get(id) {
        let mut ctx = PaintContext::new(&mut surface, local_rect, focused, hovered);
        control.paint(&mut ctx);
    }
    stats.rendered += 1;

    // Children in paint order, lowest z first. The list is a snapshot; a
    // paint hook mutating the tree is seen next pass.
    for child in tree.children(id) {
        let Some(child_base) = tree.base(child) else {
            continue;
        };
        let visible = child_base.is_visible();
        let opacity = child_base.opacity();
        let dirty = child_base.is_dirty();
        let pos = child_base.pos();

        if !visible || opacity == 0.0 {
            // Skipped children must also be unhittable.
            if let Some(b) = tree.base_mut(child) {
                b.set_offset(OFFSCREEN);
            }
            stats.skipped += 1;
            continue;
        }

        if dirty {
            render_control(tree, child, stats);
        } else {
            stats.reused += 1;
        }

        if let Some(b) = tree.base_mut(child) {
            b.set_offset(pos);
        }

        if let Some(child_surface) = tree.base(child).and_then(|b| b.surface()) {
            let x = pos.x.round() as i64;
            let y = pos.y.round() as i64;
            if opacity < 1.0 {
                surface.blit_with_opacity(child_surface, x, y, opacity);
            } else {
                surface.blit(child_surface, x, y);
            }
        }
    }

    if let Some(base) = tree.base_mut(id) {
        base.put_surface(surface);
        base.clear_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casement_render::{Color, Size};

    use crate::control::base::ControlBase;
    use crate::control::traits::Control;

    struct Fill {
        base: ControlBase,
        color: Color,
    }

    impl Fill {
        fn boxed(color: Color, width: f32, height: f32) -> Box<dyn Control> {
            let mut base = ControlBase::new();
            base.set_size(Size::new(width, height));
            Box::new(Self { base, color })
        }
    }

    impl Control for Fill {
        fn base(&self) -> &ControlBase {
            &self.base
        }
        fn base_mut(&mut self) -> &mut ControlBase {
            &mut self.base
        }
        fn paint(&self, ctx: &mut PaintContext<'_>) {
            let rect = ctx.rect();
            ctx.surface().fill_rect(rect, self.color);
        }
    }

    fn small_tree() -> (ControlTree, ControlId, ControlId) {
        let mut tree = ControlTree::new();
        let root = tree.insert_root(Fill::boxed(Color::BLACK, 10.0, 10.0));
        let child = tree.add(root, Fill::boxed(Color::RED, 4.0, 4.0));
        tree.base_mut(child).unwrap().set_pos(Point::new(2.0, 2.0));
        (tree, root, child)
    }

    #[test]
    fn clean_tree_renders_nothing() {
        let (mut tree, root, _) = small_tree();
        render(&mut tree, root);

        let stats = render(&mut tree, root);
        assert_eq!(stats, ComposeStats::default());
    }

    #[test]
    fn child_pixels_land_in_parent_surface() {
        let (mut tree, root, _) = small_tree();
        render(&mut tree, root);

        let base = tree.base(root).unwrap();
        let surface = base.surface().unwrap();
        assert_eq!(surface.pixel(0, 0), Color::BLACK);
        assert_eq!(surface.pixel(3, 3), Color::RED);
        assert_eq!(surface.pixel(6, 6), Color::BLACK);
    }

    #[test]
    fn dirty_leaf_recomposites_to_root() {
        let (mut tree, root, child) = small_tree();
        render(&mut tree, root);

        // Leaf update marks the whole ancestor path dirty.
        tree.update(child);
        let stats = render(&mut tree, root);
        assert_eq!(stats.rendered, 2);
    }

    #[test]
    fn clean_sibling_surface_is_reused() {
        let (mut tree, root, child) = small_tree();
        let sibling = tree.add(root, Fill::boxed(Color::GREEN, 3.0, 3.0));
        render(&mut tree, root);

        tree.update(child);
        let stats = render(&mut tree, root);
        assert_eq!(stats.rendered, 2); // root + child
        assert_eq!(stats.reused, 1); // sibling blitted from cache
        let _ = sibling;
    }

    #[test]
    fn update_is_idempotent_per_render() {
        let (mut tree, root, child) = small_tree();
        render(&mut tree, root);

        tree.update(child);
        tree.update(child);
        let stats = render(&mut tree, root);
        // Two updates, one render.
        assert_eq!(stats.rendered, 2);
        assert_eq!(render(&mut tree, root), ComposeStats::default());
    }

    #[test]
    fn hidden_child_is_skipped_and_offscreen() {
        let (mut tree, root, child) = small_tree();
        tree.base_mut(child).unwrap().set_visible(false);

        let stats = render(&mut tree, root);
        assert_eq!(stats.skipped, 1);
        assert_eq!(tree.base(child).unwrap().offset(), OFFSCREEN);

        let base = tree.base(root).unwrap();
        assert_eq!(base.surface().unwrap().pixel(3, 3), Color::BLACK);
    }

    #[test]
    fn zero_opacity_child_is_skipped_and_offscreen() {
        let (mut tree, root, child) = small_tree();
        tree.base_mut(child).unwrap().set_opacity(0.0);

        let stats = render(&mut tree, root);
        assert_eq!(stats.skipped, 1);
        assert_eq!(tree.base(child).unwrap().offset(), OFFSCREEN);
    }

    #[test]
    fn composite_assigns_offsets() {
        let (mut tree, root, child) = small_tree();
        render(&mut tree, root);

        assert_eq!(tree.base(root).unwrap().offset(), Point::ZERO);
        assert_eq!(tree.base(child).unwrap().offset(), Point::new(2.0, 2.0));
    }

    #[test]
    fn offsets_lag_until_next_composite() {
        let (mut tree, root, child) = small_tree();
        render(&mut tree, root);

        // Moving the control does not move its hit-test offset...
        tree.base_mut(child).unwrap().set_pos(Point::new(5.0, 5.0));
        assert_eq!(tree.base(child).unwrap().offset(), Point::new(2.0, 2.0));

        // ...until the parent composites again.
        tree.update(child);
        render(&mut tree, root);
        assert_eq!(tree.base(child).unwrap().offset(), Point::new(5.0, 5.0));
    }

    #[test]
    fn zero_sized_control_gets_unit_surface() {
        let mut tree = ControlTree::new();
        let root = tree.insert_root(Fill::boxed(Color::BLACK, 0.0, 0.0));
        render(&mut tree, root);

        let base = tree.base(root).unwrap();
        let surface = base.surface().unwrap();
        assert_eq!((surface.width(), surface.height()), (1, 1));
    }

    #[test]
    fn surface_persists_across_renders() {
        let (mut tree, root, _) = small_tree();
        render(&mut tree, root);
        tree.update(root);
        render(&mut tree, root);

        assert!(tree.base(root).unwrap().surface().is_some());
    }
}
