//! Widget tree: insert, remove, walk, hints, bounds and preferred sizes.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use slotmap::{SecondaryMap, SlotMap};

use crate::css::style::{StyleId, StyleSheet};
use crate::geometry::{Region, Size};
use crate::layout::hints::LayoutHints;
use crate::layout::resolve::resolve_hints;
use crate::layout::strategy::{inner_width, LayoutTree};

use super::node::{Content, NodeData, NodeId};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The widget tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships and
/// arranged bounds are stored in secondary maps so that node removal is
/// O(subtree size) and lookup is O(1).
///
/// Preferred sizes are memoized per `(node, width)`. Any change to structure,
/// hints or content clears the memo. Writing bounds keeps it, except when a
/// parentless node changes width.
#[derive(Debug)]
pub struct WidgetTree {
    nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    bounds: SecondaryMap<NodeId, Region>,
    root: Option<NodeId>,
    preferred: RefCell<HashMap<(NodeId, i32), Size>>,
}

impl WidgetTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            bounds: SecondaryMap::new(),
            root: None,
            preferred: RefCell::new(HashMap::new()),
        }
    }

    /// Insert a root-level node (no parent).
    ///
    /// If no root has been set yet, this node becomes the root.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        if self.root.is_none() {
            self.root = Some(id);
        }
        self.invalidate();
        id
    }

    /// Insert a node as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics (debug) if `parent` does not exist in the tree.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        debug_assert!(
            self.nodes.contains_key(parent),
            "parent node does not exist"
        );
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
        }
        self.invalidate();
        id
    }

    /// Append a table row-break marker to `parent`.
    pub fn insert_break(&mut self, parent: NodeId) -> NodeId {
        self.insert_child(parent, NodeData::row_break())
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't exist.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) {
            return None;
        }

        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }

        if self.root == Some(id) {
            self.root = None;
        }

        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            self.bounds.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed = data;
            }
        }

        self.invalidate();
        removed
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node in sibling order. Returns an empty slice if
    /// the node has no children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Ancestors of `id`, nearest first, ending at the root. Excludes `id`.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// The current root node, if set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of nodes, row breaks included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            stack.extend(self.children(current).iter().rev());
        }
        result
    }

    /// Resolved layout hints; defaults for unknown ids.
    pub fn hints(&self, id: NodeId) -> LayoutHints {
        self.nodes.get(id).map(|node| node.hints).unwrap_or_default()
    }

    /// Replace the layout hints of `id`.
    pub fn set_hints(&mut self, id: NodeId, hints: LayoutHints) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.hints = hints;
            self.invalidate();
        }
    }

    /// Resolve `style` from `sheet` and replace the hints of `id` with it.
    pub fn apply_style(&mut self, id: NodeId, sheet: &StyleSheet, style: StyleId) {
        let hints = resolve_hints(sheet, style);
        if let Some(node) = self.nodes.get_mut(id) {
            node.hints = hints;
            node.style = Some(style);
            self.invalidate();
        }
    }

    /// Replace the intrinsic content of `id`.
    pub fn set_content(&mut self, id: NodeId, content: Content) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.content = content;
            self.invalidate();
        }
    }

    pub fn is_row_break(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(NodeData::is_row_break)
    }

    /// Bounds relative to the parent; empty until arranged.
    pub fn bounds(&self, id: NodeId) -> Region {
        self.bounds.get(id).copied().unwrap_or_default()
    }

    pub fn set_bounds(&mut self, id: NodeId, bounds: Region) {
        if !self.nodes.contains_key(id) {
            return;
        }
        let previous = self.bounds.insert(id, bounds);
        // A resized root asks its subtree for a new set of widths.
        if !self.parent.contains_key(id) && previous.map(|region| region.width) != Some(bounds.width) {
            self.invalidate();
        }
    }

    /// Bounds translated into the root's coordinate space.
    pub fn absolute_bounds(&self, id: NodeId) -> Region {
        self.ancestors(id).into_iter().fold(self.bounds(id), |region, ancestor| {
            let origin = self.bounds(ancestor);
            region.translate(origin.x, origin.y)
        })
    }

    /// Intrinsic size of `id` for an advisory `width`.
    ///
    /// Containers are measured by their layout strategy; leaves report their
    /// content plus insets, raised to the minimum size. Row breaks are empty.
    pub fn preferred_size(&self, id: NodeId, width: i32) -> Size {
        let key = (id, width);
        let cached = self.preferred.borrow().get(&key).copied();
        if let Some(size) = cached {
            return size;
        }

        let size = self.compute_preferred_size(id, width);
        self.preferred.borrow_mut().insert(key, size);
        size
    }

    fn compute_preferred_size(&self, id: NodeId, width: i32) -> Size {
        let Some(node) = self.nodes.get(id) else {
            return Size::ZERO;
        };
        if node.is_row_break() {
            return Size::ZERO;
        }

        let hints = node.hints;
        if self.children(id).is_empty() {
            node.content
                .measure(inner_width(width, hints.insets))
                .expand(hints.insets)
                .max(hints.min_size)
        } else {
            hints.layout.measure(self, id, width)
        }
    }

    /// Drop every memoized preferred size.
    pub fn invalidate(&self) {
        self.preferred.borrow_mut().clear();
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutTree for WidgetTree {
    fn children(&self, node: NodeId) -> &[NodeId] {
        WidgetTree::children(self, node)
    }

    fn hints(&self, node: NodeId) -> LayoutHints {
        WidgetTree::hints(self, node)
    }

    fn is_row_break(&self, node: NodeId) -> bool {
        WidgetTree::is_row_break(self, node)
    }

    fn preferred_size(&self, node: NodeId, width: i32) -> Size {
        WidgetTree::preferred_size(self, node, width)
    }

    fn bounds(&self, node: NodeId) -> Region {
        WidgetTree::bounds(self, node)
    }

    fn set_bounds(&mut self, node: NodeId, bounds: Region) {
        WidgetTree::set_bounds(self, node, bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::style::Style;
    use crate::geometry::{Gap, Insets};
    use crate::layout::strategy::{LayoutKind, UNCONSTRAINED};
    use pretty_assertions::assert_eq;

    /// Build a small test tree:
    /// ```text
    ///       root
    ///      /    \
    ///    a        b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (WidgetTree, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = WidgetTree::new();
        let root = tree.insert(NodeData::new("Screen"));
        let a = tree.insert_child(root, NodeData::new("Panel"));
        let b = tree.insert_child(root, NodeData::new("Panel"));
        let c = tree.insert_child(a, NodeData::new("Button"));
        let d = tree.insert_child(a, NodeData::new("Label"));
        (tree, root, a, b, c, d)
    }

    #[test]
    fn insert_sets_root() {
        let mut tree = WidgetTree::new();
        let first = tree.insert(NodeData::new("First"));
        let _second = tree.insert(NodeData::new("Second"));
        assert_eq!(tree.root(), Some(first));
    }

    #[test]
    fn insert_child_parent_relationship() {
        let (tree, root, a, b, c, d) = build_tree();
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(c), Some(a));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.children(a), &[c, d]);
        assert!(tree.children(c).is_empty());
    }

    #[test]
    fn ancestors() {
        let (tree, root, a, _b, c, _d) = build_tree();
        assert_eq!(tree.ancestors(c), vec![a, root]);
        assert!(tree.ancestors(root).is_empty());
    }

    #[test]
    fn insert_break_adds_marker() {
        let (mut tree, root, a, b, ..) = build_tree();
        let br = tree.insert_break(root);
        assert_eq!(tree.children(root), &[a, b, br]);
        assert!(tree.is_row_break(br));
        assert!(!tree.is_row_break(a));
        assert_eq!(tree.preferred_size(br, 100), Size::ZERO);
    }

    #[test]
    fn remove_subtree() {
        let (mut tree, root, a, b, c, d) = build_tree();
        tree.set_bounds(c, Region::new(1, 1, 1, 1));
        let removed = tree.remove(a);
        assert_eq!(removed.map(|n| n.widget_type), Some("Panel".to_string()));
        assert!(!tree.contains(a));
        assert!(!tree.contains(c));
        assert!(!tree.contains(d));
        assert_eq!(tree.children(root), &[b]);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.bounds(c), Region::EMPTY);
    }

    #[test]
    fn remove_root_and_stale_ids() {
        let (mut tree, root, ..) = build_tree();
        tree.remove(root);
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert!(tree.remove(root).is_none());
    }

    #[test]
    fn walk_is_pre_order() {
        let (tree, root, a, b, c, d) = build_tree();
        assert_eq!(tree.walk(root), vec![root, a, c, d, b]);
        assert_eq!(tree.walk(a), vec![a, c, d]);
    }

    #[test]
    fn absolute_bounds_accumulate_parent_offsets() {
        let (mut tree, root, a, _b, c, _d) = build_tree();
        tree.set_bounds(root, Region::new(0, 0, 100, 100));
        tree.set_bounds(a, Region::new(10, 20, 50, 50));
        tree.set_bounds(c, Region::new(3, 4, 5, 6));
        assert_eq!(tree.bounds(c), Region::new(3, 4, 5, 6));
        assert_eq!(tree.absolute_bounds(c), Region::new(13, 24, 5, 6));
    }

    #[test]
    fn leaf_preferred_size_adds_insets_and_min_size() {
        let mut tree = WidgetTree::new();
        let hints = LayoutHints::new()
            .with_insets(Insets::all(1))
            .with_min_size(Size::new(0, 10));
        let label = tree.insert(
            NodeData::new("Label")
                .with_content(Content::Wrap { length: 30, line_height: 1 })
                .with_hints(hints),
        );
        assert_eq!(tree.preferred_size(label, UNCONSTRAINED), Size::new(32, 10));
        // 12 wide leaves 10 columns for text: 3 lines
        assert_eq!(tree.preferred_size(label, 12), Size::new(12, 10));

        tree.set_hints(label, LayoutHints::new());
        assert_eq!(tree.preferred_size(label, 12), Size::new(12, 3));
    }

    #[test]
    fn container_preferred_size_uses_layout() {
        let mut tree = WidgetTree::new();
        let hints = LayoutHints::new()
            .with_layout(LayoutKind::Table)
            .with_gap(Gap::new(1, 0));
        let row = tree.insert(NodeData::new("Row").with_hints(hints));
        tree.insert_child(row, NodeData::new("A").with_content(Content::Fixed(Size::new(4, 2))));
        tree.insert_child(row, NodeData::new("B").with_content(Content::Fixed(Size::new(5, 3))));
        assert_eq!(tree.preferred_size(row, 100), Size::new(10, 3));
    }

    #[test]
    fn preferred_size_memo_is_invalidated_by_changes() {
        let mut tree = WidgetTree::new();
        let panel = tree.insert(NodeData::new("Panel"));
        let item = tree.insert_child(panel, NodeData::new("Item").with_content(Content::Fixed(Size::new(4, 4))));
        assert_eq!(tree.preferred_size(panel, 50), Size::new(4, 4));

        tree.set_content(item, Content::Fixed(Size::new(9, 2)));
        assert_eq!(tree.preferred_size(panel, 50), Size::new(9, 2));

        tree.insert_child(panel, NodeData::new("Item").with_content(Content::Fixed(Size::new(1, 7))));
        assert_eq!(tree.preferred_size(panel, 50), Size::new(9, 7));

        // Bounds writes keep the memo.
        tree.set_bounds(item, Region::new(0, 0, 1, 1));
        assert_eq!(tree.preferred.borrow().len(), 3);
    }

    #[test]
    fn root_resize_clears_preferred_size_memo() {
        let mut tree = WidgetTree::new();
        let screen = tree.insert(NodeData::new("Screen"));
        let item = tree.insert_child(screen, NodeData::new("Item").with_content(Content::Wrap { length: 40, line_height: 1 }));
        tree.set_bounds(screen, Region::new(0, 0, 20, 5));

        for width in [10, 20, 30] {
            tree.preferred_size(item, width);
        }
        assert_eq!(tree.preferred.borrow().len(), 3);

        tree.set_bounds(screen, Region::new(0, 0, 20, 9));
        assert_eq!(tree.preferred.borrow().len(), 3);

        tree.set_bounds(screen, Region::new(0, 0, 21, 9));
        assert!(tree.preferred.borrow().is_empty());
        assert_eq!(tree.preferred_size(item, 20), Size::new(20, 2));
    }

    #[test]
    fn apply_style_replaces_hints() {
        let mut sheet = StyleSheet::new();
        let grid = sheet.insert(Style::new("Grid").with("layout", "table").with("gap", 2));

        let mut tree = WidgetTree::new();
        let node = tree.insert(NodeData::new("Grid").with_hints(LayoutHints::new().with_insets(Insets::all(9))));
        tree.apply_style(node, &sheet, grid);

        let hints = tree.hints(node);
        assert_eq!(hints.layout, LayoutKind::Table);
        assert_eq!(hints.gap, Gap::new(2, 2));
        assert_eq!(hints.insets, Insets::ZERO);
        assert_eq!(tree.get(node).and_then(|n| n.style), Some(grid));
    }

    #[test]
    fn unknown_ids_are_harmless() {
        let mut tree = WidgetTree::new();
        let gone = tree.insert(NodeData::new("Gone"));
        tree.remove(gone);
        tree.set_bounds(gone, Region::new(1, 2, 3, 4));
        assert_eq!(tree.bounds(gone), Region::EMPTY);
        assert_eq!(tree.hints(gone), LayoutHints::default());
        assert_eq!(tree.preferred_size(gone, 10), Size::ZERO);
        assert!(tree.children(gone).is_empty());
    }
}
