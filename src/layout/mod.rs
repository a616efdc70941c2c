//! Layout: the measure/arrange protocol, static and table strategies, and the
//! driver that runs them over a widget tree.

pub mod engine;
pub mod hints;
pub mod resolve;
pub mod static_layout;
pub mod strategy;
pub mod table;

pub use engine::{LayoutConfig, LayoutEngine};
pub use hints::{LayoutData, LayoutHints, StaticLayoutData, TableLayoutData};
pub use resolve::resolve_hints;
pub use static_layout::StaticLayout;
pub use strategy::{LayoutKind, LayoutStrategy, LayoutTree, UNCONSTRAINED};
pub use table::{distribute, TableLayout};
