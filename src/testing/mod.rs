//! Test helpers: textual dumps of arranged bounds for snapshot assertions.
//!
//! Use [`bounds_to_string`] after a layout pass to capture every widget's
//! bounds as plain text, then compare it with `insta` or a literal string.

pub mod snapshot;

pub use snapshot::bounds_to_string;
