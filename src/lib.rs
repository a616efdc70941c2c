//! # trellis-ui
//!
//! The layout and style core of a retained-mode UI toolkit for constrained
//! devices. A slotmap-backed widget tree carries style-derived layout hints;
//! layout strategies turn those hints into integer pixel bounds with a
//! two-pass measure/arrange protocol, using 16.16 fixed-point math instead of
//! floats so that repeated passes are bit-identical.
//!
//! ## Core Systems
//!
//! - **[`geometry`]**: Size, Region, Insets, Gap, Span, Weight, Alignment
//! - **[`fixed`]**: 16.16 fixed-point arithmetic
//! - **[`css`]**: Style text tokenizer and parser, property store with parent
//!   cascade, property conversion
//! - **[`dom`]**: Widget arena with hints, bounds and memoized preferred sizes
//! - **[`layout`]**: Strategy contract, static and table layouts, the engine driver
//! - **[`testing`]**: Bounds dumps for snapshot tests
//!
//! ## Example
//!
//! ```
//! use trellis_ui::css::StyleSheet;
//! use trellis_ui::dom::{Content, NodeData, WidgetTree};
//! use trellis_ui::geometry::{Region, Size};
//! use trellis_ui::layout::{LayoutConfig, LayoutEngine};
//!
//! let sheet = StyleSheet::from_css("Grid { layout: table; gap: 2; }").unwrap();
//! let grid_style = sheet.find("Grid").unwrap();
//!
//! let mut tree = WidgetTree::new();
//! let grid = tree.insert(NodeData::new("Grid"));
//! tree.apply_style(grid, &sheet, grid_style);
//! let a = tree.insert_child(grid, NodeData::new("A").with_content(Content::Fixed(Size::new(10, 1))));
//! let b = tree.insert_child(grid, NodeData::new("B").with_content(Content::Fixed(Size::new(10, 1))));
//!
//! let engine = LayoutEngine::new(LayoutConfig::new().with_viewport(40, 5));
//! engine.layout(&mut tree, grid);
//! assert_eq!(tree.bounds(a), Region::new(0, 0, 10, 1));
//! assert_eq!(tree.bounds(b), Region::new(12, 0, 10, 1));
//! ```

// Foundation
pub mod fixed;
pub mod geometry;

// Core systems
pub mod css;
pub mod dom;
pub mod layout;

// Test support
pub mod testing;
