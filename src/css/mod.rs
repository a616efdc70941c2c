//! Style engine: tokenizer, parser, property store with cascade, and the
//! conversion of property values into layout types.

pub mod tokenizer;
pub mod parser;
pub mod style;
pub mod properties;

pub use parser::ParseError;
pub use properties::PropertyError;
pub use style::{PropertyValue, Style, StyleId, StyleProperty, StyleSheet};
