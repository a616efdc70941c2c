//! Static layout: free-form per-child position and size.
//!
//! Each child is placed at its declared `(x, y)` inside the target's content
//! area, sized by its declared width/height (fraction, absolute, or preferred)
//! and shifted by its own alignment.

use crate::dom::node::NodeId;
use crate::fixed::Fixed;
use crate::geometry::{Region, Size};

use super::hints::StaticLayoutData;
use super::strategy::{content_size, inner_width, LayoutStrategy, LayoutTree};

/// Free-form placement strategy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticLayout;

/// Resolve one declared axis length.
///
/// Negative means preferred; up to one unit is a fraction of `available`;
/// anything larger is absolute. A fraction with no known `available` length
/// falls back to the preferred length.
fn resolve_length(declared: Fixed, preferred: i32, available: Option<i32>) -> i32 {
    if declared.is_negative() {
        preferred
    } else if declared.is_fraction() {
        match available {
            Some(available) => declared.mul_int(available),
            None => preferred,
        }
    } else {
        declared.to_int()
    }
}

fn placement<T: LayoutTree + ?Sized>(tree: &T, child: NodeId) -> StaticLayoutData {
    tree.hints(child).static_data().unwrap_or_default()
}

impl LayoutStrategy for StaticLayout {
    fn measure<T: LayoutTree + ?Sized>(&self, tree: &T, target: NodeId, available_width: i32) -> Size {
        let hints = tree.hints(target);
        let width = inner_width(available_width, hints.insets);
        let known_width = (width >= 0).then_some(width);

        let mut content = Size::ZERO;
        for &child in tree.children(target) {
            if tree.is_row_break(child) {
                continue;
            }
            let data = placement(tree, child);
            let preferred = tree.preferred_size(child, width);
            // Positions are ignored; the height of the target is not known yet.
            let size = Size::new(
                resolve_length(data.width, preferred.width, known_width),
                resolve_length(data.height, preferred.height, None),
            );
            content = content.max(size);
        }

        content.expand(hints.insets).max(hints.min_size)
    }

    fn arrange<T: LayoutTree + ?Sized>(&self, tree: &mut T, target: NodeId) {
        let hints = tree.hints(target);
        let available = content_size(tree.bounds(target), hints.insets).max(Size::ZERO);

        let placements: Vec<(NodeId, Region)> = tree
            .children(target)
            .iter()
            .filter(|&&child| !tree.is_row_break(child))
            .map(|&child| {
                let data = placement(tree, child);
                let preferred = tree.preferred_size(child, available.width);
                let width = resolve_length(data.width, preferred.width, Some(available.width));
                let height = resolve_length(data.height, preferred.height, Some(available.height));
                let x = data.x + data.alignment.horizontal.offset(available.width, width);
                let y = data.y + data.alignment.vertical.offset(available.height, height);
                let bounds = Region::new(hints.insets.left + x, hints.insets.top + y, width, height);
                (child, bounds)
            })
            .collect();

        for (child, bounds) in placements {
            tree.set_bounds(child, bounds);
        }
    }
}
