//! Style property store: ordered property lists with parent cascade.
//!
//! A [`Style`] is an append-ordered list of [`StyleProperty`] entries plus an
//! optional parent. Styles are owned by a [`StyleSheet`] arena and refer to
//! their parent by [`StyleId`], so a cascade chain is a walk over ids rather
//! than a chain of shared pointers.
//!
//! Duplicate names are resolved **first added wins**: a later `add()` for a
//! name already present is kept in the list but never returned by lookups.

use slotmap::{new_key_type, SlotMap};

use crate::css::parser::{parse_stylesheet, ParseError};
use crate::fixed::Fixed;

new_key_type! {
    /// Identifier for a [`Style`] inside a [`StyleSheet`].
    pub struct StyleId;
}

/// A typed property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// A number, e.g. `10` or `0.5`.
    Number(Fixed),
    /// A keyword, e.g. `center` or `auto`.
    Ident(String),
    /// Several space-separated values, e.g. `1 2 3 4`.
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// The number, if this is a single number.
    pub fn as_number(&self) -> Option<Fixed> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The keyword, if this is a single identifier.
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            PropertyValue::Ident(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// The component values: the list items, or the value itself.
    pub fn items(&self) -> &[PropertyValue] {
        match self {
            PropertyValue::List(items) => items.as_slice(),
            single => std::slice::from_ref(single),
        }
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Number(Fixed::from_int(value))
    }
}

impl From<Fixed> for PropertyValue {
    fn from(value: Fixed) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Ident(value.to_owned())
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(values: Vec<PropertyValue>) -> Self {
        PropertyValue::List(values)
    }
}

/// A single named property. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleProperty {
    name: String,
    value: PropertyValue,
}

impl StyleProperty {
    pub fn new(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &PropertyValue {
        &self.value
    }
}

/// An ordered property list with an opaque selector and optional parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    selector: String,
    properties: Vec<StyleProperty>,
    parent: Option<StyleId>,
}

impl Style {
    /// Create an empty style for `selector`.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            properties: Vec::new(),
            parent: None,
        }
    }

    /// Set the cascade parent (builder).
    pub fn with_parent(mut self, parent: StyleId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Append a property (builder).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.add(name, value);
        self
    }

    /// Append a property. An existing entry with the same name shadows it.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.push(StyleProperty::new(name, value));
    }

    /// Append an already constructed property.
    pub fn push(&mut self, property: StyleProperty) {
        self.properties.push(property);
    }

    /// Look up `name` in this style only, ignoring the parent chain.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(StyleProperty::value)
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn parent(&self) -> Option<StyleId> {
        self.parent
    }

    /// All entries in insertion order, shadowed duplicates included.
    pub fn properties(&self) -> &[StyleProperty] {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Arena of styles, shared read-only by every widget that uses them.
#[derive(Debug, Default)]
pub struct StyleSheet {
    styles: SlotMap<StyleId, Style>,
}

impl StyleSheet {
    /// Create an empty sheet.
    pub fn new() -> Self {
        Self {
            styles: SlotMap::with_key(),
        }
    }

    /// Load styles from text. Rules are inserted in source order and have no
    /// parent; use [`insert`](Self::insert) with [`Style::with_parent`] to
    /// build cascade chains.
    pub fn from_css(input: &str) -> Result<Self, ParseError> {
        let mut sheet = Self::new();
        for style in parse_stylesheet(input)? {
            sheet.insert(style);
        }
        Ok(sheet)
    }

    /// Add a style and return its id.
    pub fn insert(&mut self, style: Style) -> StyleId {
        self.styles.insert(style)
    }

    /// The style stored under `id`.
    pub fn style(&self, id: StyleId) -> Option<&Style> {
        self.styles.get(id)
    }

    /// Look up `name` in `id` and then along its parent chain.
    ///
    /// Returns `None` when no style in the chain defines the name. The walk
    /// visits at most as many styles as the sheet holds, so a malformed chain
    /// cannot loop.
    pub fn get(&self, id: StyleId, name: &str) -> Option<&PropertyValue> {
        let mut current = Some(id);
        for _ in 0..self.styles.len() {
            let style = self.styles.get(current?)?;
            if let Some(value) = style.get(name) {
                return Some(value);
            }
            current = style.parent;
        }
        None
    }

    /// The first style whose selector text equals `selector`.
    pub fn find(&self, selector: &str) -> Option<StyleId> {
        self.styles
            .iter()
            .find(|(_, style)| style.selector == selector)
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
