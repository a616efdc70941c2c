//! Layout driver: runs the measure/arrange protocol over a whole tree.
//!
//! [`LayoutEngine`] dispatches each node to the strategy named by its
//! hints. [`LayoutEngine::layout`] pins the root to the viewport and then
//! arranges every container top-down, so each node's own size is already
//! fixed by its parent when its children are placed.

use crate::dom::node::NodeId;
use crate::geometry::Size;

use super::strategy::LayoutTree;

/// Default maximum tree depth arranged by [`LayoutEngine::layout`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration for a [`LayoutEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Size given to the root widget.
    pub viewport: Size,
    /// Nodes at or below this depth are not arranged.
    pub max_depth: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport: Size::ZERO,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl LayoutConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewport size (builder).
    pub fn with_viewport(mut self, width: i32, height: i32) -> Self {
        self.viewport = Size::new(width, height);
        self
    }

    /// Set the maximum arranged depth (builder).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Drives layout strategies over a [`LayoutTree`].
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Intrinsic size of `node` for `available_width`. Writes no bounds.
    pub fn measure<T: LayoutTree + ?Sized>(&self, tree: &T, node: NodeId, available_width: i32) -> Size {
        tree.hints(node).layout.measure(tree, node, available_width)
    }

    /// Place the children of `node` inside its current bounds.
    pub fn arrange<T: LayoutTree + ?Sized>(&self, tree: &mut T, node: NodeId) {
        let layout = tree.hints(node).layout;
        layout.arrange(tree, node);
    }

    /// Arrange `root` and every descendant, parents before children.
    ///
    /// `root` must already have its bounds. Returns the number of nodes
    /// arranged.
    pub fn arrange_subtree<T: LayoutTree + ?Sized>(&self, tree: &mut T, root: NodeId) -> usize {
        let mut arranged = 0;
        let mut stack = vec![(root, 0usize)];

        while let Some((node, depth)) = stack.pop() {
            let children = tree.children(node);
            if children.is_empty() {
                continue;
            }
            if depth >= self.config.max_depth {
                log::warn!(
                    "max layout depth {} reached at {node:?}; subtree left unarranged",
                    self.config.max_depth
                );
                continue;
            }

            self.arrange(tree, node);
            arranged += 1;
            log::trace!("arranged {node:?} at depth {depth}: {:?}", tree.bounds(node));

            for &child in tree.children(node).iter().rev() {
                if !tree.is_row_break(child) {
                    stack.push((child, depth + 1));
                }
            }
        }

        arranged
    }

    /// Give `root` the viewport and arrange the whole tree below it.
    pub fn layout<T: LayoutTree + ?Sized>(&self, tree: &mut T, root: NodeId) -> usize {
        tree.set_bounds(root, self.config.viewport.to_region());
        let arranged = self.arrange_subtree(tree, root);
        log::debug!(
            "layout pass over {:?}: {arranged} containers arranged",
            self.config.viewport
        );
        arranged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::{Content, NodeData};
    use crate::dom::tree::WidgetTree;
    use crate::geometry::{Gap, Insets, Region, Span, Weight};
    use crate::layout::hints::{LayoutData, LayoutHints, TableLayoutData};
    use crate::layout::strategy::LayoutKind;
    use pretty_assertions::assert_eq;

    fn leaf(width: i32, height: i32) -> NodeData {
        NodeData::new("Leaf").with_content(Content::Fixed(Size::new(width, height)))
    }

    #[test]
    fn config_defaults_and_builders() {
        let config = LayoutConfig::new();
        assert_eq!(config.viewport, Size::ZERO);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);

        let config = LayoutConfig::new().with_viewport(80, 24).with_max_depth(3);
        assert_eq!(config.viewport, Size::new(80, 24));
        assert_eq!(config.max_depth, 3);
        assert_eq!(LayoutEngine::new(config.clone()).config(), &config);
    }

    #[test]
    fn layout_pins_root_to_viewport() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(NodeData::new("Screen"));
        let engine = LayoutEngine::new(LayoutConfig::new().with_viewport(80, 24));

        assert_eq!(engine.layout(&mut tree, root), 0);
        assert_eq!(tree.bounds(root), Region::new(0, 0, 80, 24));
    }

    #[test]
    fn layout_arranges_nested_containers() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(NodeData::new("Screen").with_hints(LayoutHints::new().with_insets(Insets::all(1))));
        let grid_hints = LayoutHints::new()
            .with_layout(LayoutKind::Table)
            .with_gap(Gap::new(2, 0));
        let grid = tree.insert_child(root, NodeData::new("Grid").with_hints(grid_hints));
        let a = tree.insert_child(grid, leaf(10, 3));
        let b = tree.insert_child(grid, leaf(6, 3));

        let engine = LayoutEngine::new(LayoutConfig::new().with_viewport(40, 10));
        assert_eq!(engine.layout(&mut tree, root), 2);

        assert_eq!(tree.bounds(grid), Region::new(1, 1, 18, 3));
        assert_eq!(tree.bounds(a), Region::new(0, 0, 10, 3));
        assert_eq!(tree.bounds(b), Region::new(12, 0, 6, 3));
        assert_eq!(tree.absolute_bounds(b), Region::new(13, 1, 6, 3));
    }

    #[test]
    fn measure_dispatches_on_layout_kind() {
        let mut tree = WidgetTree::new();
        let hints = LayoutHints::new().with_layout(LayoutKind::Table);
        let root = tree.insert(NodeData::new("Grid").with_hints(hints));
        tree.insert_child(root, leaf(10, 2));
        tree.insert_child(root, leaf(10, 2));

        let engine = LayoutEngine::default();
        assert_eq!(engine.measure(&tree, root, 100), Size::new(20, 2));

        tree.set_hints(root, LayoutHints::new());
        assert_eq!(engine.measure(&tree, root, 100), Size::new(10, 2));
    }

    #[test]
    fn depth_limit_leaves_deep_subtrees_alone() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(NodeData::new("Screen"));
        let mid = tree.insert_child(root, NodeData::new("Panel"));
        let inner = tree.insert_child(mid, NodeData::new("Panel"));
        let deep = tree.insert_child(inner, leaf(5, 5));

        let engine = LayoutEngine::new(LayoutConfig::new().with_viewport(50, 50).with_max_depth(2));
        assert_eq!(engine.layout(&mut tree, root), 2);
        assert_eq!(tree.bounds(inner), Region::new(0, 0, 5, 5));
        assert_eq!(tree.bounds(deep), Region::EMPTY);
    }

    #[test]
    fn relayout_is_bit_identical() {
        let mut tree = WidgetTree::new();
        let hints = LayoutHints::new().with_layout(LayoutKind::Table);
        let root = tree.insert(NodeData::new("Grid").with_hints(hints));
        let weighted = LayoutHints::new().with_data(LayoutData::Table(TableLayoutData {
            span: Span::new(1, 1),
            weight: Weight::new(1, 1),
        }));
        let ids = [
            tree.insert_child(root, leaf(7, 3).with_hints(weighted)),
            tree.insert_child(root, leaf(9, 4)),
        ];
        let engine = LayoutEngine::new(LayoutConfig::new().with_viewport(33, 17));

        engine.layout(&mut tree, root);
        let first: Vec<Region> = ids.iter().map(|&id| tree.bounds(id)).collect();
        engine.layout(&mut tree, root);
        let second: Vec<Region> = ids.iter().map(|&id| tree.bounds(id)).collect();
        assert_eq!(first, second);
        assert_eq!(first[0], Region::new(0, 0, 24, 17));
    }
}
