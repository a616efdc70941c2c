//! Widget arena: slotmap-backed tree with layout hints, bounds and memoized
//! preferred sizes.

pub mod node;
pub mod tree;

pub use node::{Content, NodeData, NodeId, NodeKind};
pub use tree::WidgetTree;
