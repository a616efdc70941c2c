//! The measure/arrange contract shared by every layout strategy.

use crate::dom::node::NodeId;
use crate::geometry::{Insets, Region, Size};

use super::hints::LayoutHints;
use super::static_layout::StaticLayout;
use super::table::TableLayout;

/// Width constraint meaning "no limit".
pub const UNCONSTRAINED: i32 = -1;

/// Read/write view of a widget tree used by layout strategies.
///
/// Strategies only ever read hints, child lists and preferred sizes, plus the
/// target's own bounds when arranging; `set_bounds` is the only mutation.
pub trait LayoutTree {
    /// Children of `node` in sibling order.
    fn children(&self, node: NodeId) -> &[NodeId];

    /// Resolved layout hints of `node`.
    fn hints(&self, node: NodeId) -> LayoutHints;

    /// Whether `node` is a table row-break marker.
    fn is_row_break(&self, node: NodeId) -> bool;

    /// Intrinsic size of `node` for an advisory width. Must return the same
    /// value for the same arguments throughout a layout pass.
    fn preferred_size(&self, node: NodeId, width: i32) -> Size;

    /// Current bounds of `node`.
    fn bounds(&self, node: NodeId) -> Region;

    /// Write final bounds for `node`.
    fn set_bounds(&mut self, node: NodeId, bounds: Region);
}

/// A layout algorithm. Implementations hold no state between calls.
pub trait LayoutStrategy {
    /// Intrinsic size of `target`'s content plus insets. Never writes bounds.
    fn measure<T: LayoutTree + ?Sized>(&self, tree: &T, target: NodeId, available_width: i32)
        -> Size;

    /// Write bounds for each child of `target`, using `target`'s own size.
    fn arrange<T: LayoutTree + ?Sized>(&self, tree: &mut T, target: NodeId);
}

/// The closed set of layout strategies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Free-form placement, see [`StaticLayout`].
    #[default]
    Static,
    /// Grid with spans and weights, see [`TableLayout`].
    Table,
}

impl LayoutKind {
    pub fn measure<T: LayoutTree + ?Sized>(self, tree: &T, target: NodeId, available_width: i32) -> Size {
        match self {
            LayoutKind::Static => StaticLayout.measure(tree, target, available_width),
            LayoutKind::Table => TableLayout.measure(tree, target, available_width),
        }
    }

    pub fn arrange<T: LayoutTree + ?Sized>(self, tree: &mut T, target: NodeId) {
        match self {
            LayoutKind::Static => StaticLayout.arrange(tree, target),
            LayoutKind::Table => TableLayout.arrange(tree, target),
        }
    }
}

/// Width left for content after `insets`, keeping [`UNCONSTRAINED`] as is.
pub(crate) fn inner_width(available: i32, insets: Insets) -> i32 {
    if available < 0 {
        UNCONSTRAINED
    } else {
        (available - insets.width()).max(0)
    }
}

/// Content area of `bounds` after `insets`. May be negative.
pub(crate) fn content_size(bounds: Region, insets: Insets) -> Size {
    Size::new(bounds.width - insets.width(), bounds.height - insets.height())
}
