//! Snapshot helpers for arranged widget trees.

use crate::dom::node::NodeId;
use crate::dom::tree::WidgetTree;

/// Dump the bounds of `root` and its descendants, one widget per line.
///
/// Each line is `<type> <x>,<y> <width>x<height>`, indented two spaces per
/// depth level, in pre-order. Positions are relative to the parent. Row-break
/// markers are skipped. Lines are separated by `'\n'`; the final line has no
/// trailing newline.
///
/// # Examples
///
/// ```ignore
/// use trellis_ui::testing::bounds_to_string;
///
/// let dump = bounds_to_string(&tree, root);
/// assert_eq!(dump, "Screen 0,0 80x24\n  Label 1,1 10x1");
/// ```
pub fn bounds_to_string(tree: &WidgetTree, root: NodeId) -> String {
    let mut lines = Vec::new();
    let mut stack = vec![(root, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        let Some(data) = tree.get(node) else {
            continue;
        };
        if data.is_row_break() {
            continue;
        }

        let b = tree.bounds(node);
        lines.push(format!(
            "{:indent$}{} {},{} {}x{}",
            "",
            data.widget_type,
            b.x,
            b.y,
            b.width,
            b.height,
            indent = depth * 2
        ));

        for &child in tree.children(node).iter().rev() {
            stack.push((child, depth + 1));
        }
    }

    lines.join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================
