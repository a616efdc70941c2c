//! Node types: NodeId, NodeKind, Content, NodeData.

use slotmap::new_key_type;

use crate::css::style::StyleId;
use crate::geometry::Size;
use crate::layout::hints::LayoutHints;

new_key_type! {
    /// Unique identifier for a widget in a [`WidgetTree`](super::WidgetTree).
    /// Copy, lightweight (u64).
    pub struct NodeId;
}

/// Whether a node is a real widget or a table row-break marker.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeKind {
    #[default]
    Widget,
    /// Pseudo-child that ends the current table row. Never sized or placed.
    RowBreak,
}

/// Intrinsic content of a leaf widget.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Content {
    #[default]
    Empty,
    /// A fixed-size block (icon, image, fixed-width field).
    Fixed(Size),
    /// `length` cells of text that wrap at the available width.
    Wrap { length: i32, line_height: i32 },
}

impl Content {
    /// Size of the content for an advisory `width`; a negative width means
    /// unconstrained.
    pub fn measure(&self, width: i32) -> Size {
        match *self {
            Content::Empty => Size::ZERO,
            Content::Fixed(size) => size,
            Content::Wrap { length, line_height } => {
                if length <= 0 {
                    return Size::ZERO;
                }
                let columns = if width < 0 { length } else { length.min(width).max(1) };
                let lines = (length + columns - 1) / columns;
                Size::new(columns, lines * line_height)
            }
        }
    }
}

/// Data associated with a single widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Widget type name (e.g. "Label", "Panel").
    pub widget_type: String,
    pub kind: NodeKind,
    pub content: Content,
    /// Resolved layout hints. Replaced wholesale on style changes.
    pub hints: LayoutHints,
    /// Style the hints were last resolved from.
    pub style: Option<StyleId>,
}

impl NodeData {
    /// Create a widget with empty content and default hints.
    pub fn new(widget_type: impl Into<String>) -> Self {
        Self {
            widget_type: widget_type.into(),
            kind: NodeKind::Widget,
            content: Content::Empty,
            hints: LayoutHints::default(),
            style: None,
        }
    }

    /// A table row-break marker.
    pub fn row_break() -> Self {
        Self {
            kind: NodeKind::RowBreak,
            ..Self::new("Break")
        }
    }

    /// Set the content (builder).
    pub fn with_content(mut self, content: Content) -> Self {
        self.content = content;
        self
    }

    /// Set the layout hints (builder).
    pub fn with_hints(mut self, hints: LayoutHints) -> Self {
        self.hints = hints;
        self
    }

    pub fn is_row_break(&self) -> bool {
        self.kind == NodeKind::RowBreak
    }
}
