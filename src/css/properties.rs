//! Property conversion: [`PropertyValue`]s → typed layout values.
//!
//! Each function takes the value found for one property name and returns the
//! geometry type layout consumes, or a [`PropertyError`] describing why the
//! value does not fit.

use std::ops::RangeInclusive;

use crate::css::style::PropertyValue;
use crate::fixed::Fixed;
use crate::geometry::{Align, Alignment, Gap, Insets, Size, Span, Weight};
use crate::layout::{LayoutKind, StaticLayoutData};

pub const LAYOUT: &str = "layout";
pub const INSETS: &str = "insets";
pub const GAP: &str = "gap";
pub const ALIGN: &str = "align";
pub const SPAN: &str = "span";
pub const WEIGHT: &str = "weight";
pub const MIN_SIZE: &str = "min-size";
pub const X: &str = "x";
pub const Y: &str = "y";
pub const WIDTH: &str = "width";
pub const HEIGHT: &str = "height";
pub const ALIGN_SELF: &str = "align-self";

/// Errors from property conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    #[error("invalid value for {property}: {message}")]
    InvalidValue { property: String, message: String },
    #[error("{property} must be at least {min}, got {value}")]
    OutOfRange { property: String, value: i32, min: i32 },
}

fn invalid(property: &str, message: impl Into<String>) -> PropertyError {
    PropertyError::InvalidValue {
        property: property.into(),
        message: message.into(),
    }
}

/// The component values, checked against an allowed count.
fn components<'a>(
    value: &'a PropertyValue,
    property: &str,
    allowed: RangeInclusive<usize>,
) -> Result<&'a [PropertyValue], PropertyError> {
    let items = value.items();
    if allowed.contains(&items.len()) {
        Ok(items)
    } else {
        Err(invalid(
            property,
            format!(
                "expected {}-{} values, got {}",
                allowed.start(),
                allowed.end(),
                items.len()
            ),
        ))
    }
}

/// A whole number.
fn integer(value: &PropertyValue, property: &str) -> Result<i32, PropertyError> {
    match value {
        PropertyValue::Number(n) if Fixed::from_int(n.to_int()) == *n => Ok(n.to_int()),
        PropertyValue::Number(n) => Err(invalid(property, format!("expected a whole number, got {n}"))),
        other => Err(invalid(property, format!("expected a number, got {other:?}"))),
    }
}

/// A whole number no smaller than `min`.
fn integer_at_least(value: &PropertyValue, property: &str, min: i32) -> Result<i32, PropertyError> {
    let n = integer(value, property)?;
    if n < min {
        return Err(PropertyError::OutOfRange {
            property: property.into(),
            value: n,
            min,
        });
    }
    Ok(n)
}

fn align(value: &PropertyValue, property: &str) -> Result<Align, PropertyError> {
    match value.as_ident() {
        Some("start") => Ok(Align::Start),
        Some("center") => Ok(Align::Center),
        Some("end") => Ok(Align::End),
        Some(other) => Err(invalid(property, format!("expected start|center|end, got: {other}"))),
        None => Err(invalid(property, format!("expected an identifier, got {value:?}"))),
    }
}

/// `static` | `table`
pub fn parse_layout_kind(value: &PropertyValue) -> Result<LayoutKind, PropertyError> {
    match value.as_ident() {
        Some("static") => Ok(LayoutKind::Static),
        Some("table") => Ok(LayoutKind::Table),
        Some(other) => Err(invalid(LAYOUT, format!("expected static|table, got: {other}"))),
        None => Err(invalid(LAYOUT, format!("expected an identifier, got {value:?}"))),
    }
}

/// 1-4 whole numbers in shorthand order:
///
/// - 1 value: all sides
/// - 2 values: vertical, horizontal
/// - 3 values: top, horizontal, bottom
/// - 4 values: top, right, bottom, left
pub fn parse_insets(value: &PropertyValue) -> Result<Insets, PropertyError> {
    let items = components(value, INSETS, 1..=4)?;
    let n = items
        .iter()
        .map(|v| integer(v, INSETS))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(match n.as_slice() {
        [all] => Insets::all(*all),
        [vertical, horizontal] => Insets::symmetric(*vertical, *horizontal),
        [top, horizontal, bottom] => Insets::new(*top, *horizontal, *horizontal, *bottom),
        [top, right, bottom, left] => Insets::new(*top, *left, *right, *bottom),
        _ => unreachable!("component count checked above"),
    })
}

/// `gap: <both>` or `gap: <horizontal> <vertical>`. Negative gaps are allowed.
pub fn parse_gap(value: &PropertyValue) -> Result<Gap, PropertyError> {
    match components(value, GAP, 1..=2)? {
        [both] => {
            let g = integer(both, GAP)?;
            Ok(Gap::new(g, g))
        }
        [h, v] => Ok(Gap::new(integer(h, GAP)?, integer(v, GAP)?)),
        _ => unreachable!("component count checked above"),
    }
}

/// One keyword for both axes, or `<horizontal> <vertical>`.
pub fn parse_alignment(value: &PropertyValue, property: &str) -> Result<Alignment, PropertyError> {
    match components(value, property, 1..=2)? {
        [both] => {
            let a = align(both, property)?;
            Ok(Alignment::new(a, a))
        }
        [h, v] => Ok(Alignment::new(align(h, property)?, align(v, property)?)),
        _ => unreachable!("component count checked above"),
    }
}

/// `span: <colspan> [<rowspan>]`, each at least 1.
pub fn parse_span(value: &PropertyValue) -> Result<Span, PropertyError> {
    let items = components(value, SPAN, 1..=2)?;
    let colspan = integer_at_least(&items[0], SPAN, 1)?;
    let rowspan = match items.get(1) {
        Some(v) => integer_at_least(v, SPAN, 1)?,
        None => 1,
    };
    Ok(Span::new(colspan as u32, rowspan as u32))
}

/// `weight: <weightx> [<weighty>]`, each at least 0.
pub fn parse_weight(value: &PropertyValue) -> Result<Weight, PropertyError> {
    let items = components(value, WEIGHT, 1..=2)?;
    let wx = integer_at_least(&items[0], WEIGHT, 0)?;
    let wy = match items.get(1) {
        Some(v) => integer_at_least(v, WEIGHT, 0)?,
        None => 0,
    };
    Ok(Weight::new(wx as u32, wy as u32))
}

/// `min-size: <both>` or `min-size: <width> <height>`.
pub fn parse_min_size(value: &PropertyValue) -> Result<Size, PropertyError> {
    match components(value, MIN_SIZE, 1..=2)? {
        [both] => {
            let n = integer(both, MIN_SIZE)?;
            Ok(Size::new(n, n))
        }
        [w, h] => Ok(Size::new(integer(w, MIN_SIZE)?, integer(h, MIN_SIZE)?)),
        _ => unreachable!("component count checked above"),
    }
}

/// A whole-number position (`x`, `y`).
pub fn parse_position(value: &PropertyValue, property: &str) -> Result<i32, PropertyError> {
    integer(value, property)
}

/// A static length (`width`, `height`): a number or `auto`.
///
/// Numbers up to 1 read as a fraction of the available length, larger
/// numbers as pixels; negative numbers and `auto` mean "preferred size".
pub fn parse_length(value: &PropertyValue, property: &str) -> Result<Fixed, PropertyError> {
    match value {
        PropertyValue::Number(n) => Ok(*n),
        PropertyValue::Ident(name) if name == "auto" => Ok(StaticLayoutData::AUTO),
        other => Err(invalid(property, format!("expected a number or 'auto', got {other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parser::parse_declarations;

    /// Parse `name: value` and return the value.
    fn value(decl: &str) -> PropertyValue {
        let props = parse_declarations(decl).unwrap_or_else(|e| panic!("parse failed: {e}"));
        props[0].value().clone()
    }

    #[test]
    fn layout_kind() {
        assert_eq!(parse_layout_kind(&value("layout: table")), Ok(LayoutKind::Table));
        assert_eq!(parse_layout_kind(&value("layout: static")), Ok(LayoutKind::Static));
        assert!(parse_layout_kind(&value("layout: flex")).is_err());
        assert!(parse_layout_kind(&value("layout: 3")).is_err());
    }

    #[test]
    fn insets_shorthand() {
        assert_eq!(parse_insets(&value("insets: 2")), Ok(Insets::all(2)));
        assert_eq!(parse_insets(&value("insets: 1 3")), Ok(Insets::symmetric(1, 3)));
        assert_eq!(parse_insets(&value("insets: 1 2 3")), Ok(Insets::new(1, 2, 2, 3)));
        // top right bottom left
        assert_eq!(parse_insets(&value("insets: 1 2 3 4")), Ok(Insets::new(1, 4, 2, 3)));
    }

    #[test]
    fn insets_rejects_fractions_and_extra_values() {
        assert!(matches!(
            parse_insets(&value("insets: 0.5")),
            Err(PropertyError::InvalidValue { .. })
        ));
        assert!(parse_insets(&value("insets: 1 2 3 4 5")).is_err());
    }

    #[test]
    fn gap_forms() {
        assert_eq!(parse_gap(&value("gap: 4")), Ok(Gap::new(4, 4)));
        assert_eq!(parse_gap(&value("gap: 4 -2")), Ok(Gap::new(4, -2)));
    }

    #[test]
    fn alignment_forms() {
        assert_eq!(
            parse_alignment(&value("align: center"), ALIGN),
            Ok(Alignment::new(Align::Center, Align::Center))
        );
        assert_eq!(
            parse_alignment(&value("align: end start"), ALIGN),
            Ok(Alignment::new(Align::End, Align::Start))
        );
        assert!(parse_alignment(&value("align: middle"), ALIGN).is_err());
    }

    #[test]
    fn span_bounds() {
        assert_eq!(parse_span(&value("span: 2")), Ok(Span::new(2, 1)));
        assert_eq!(parse_span(&value("span: 1 3")), Ok(Span::new(1, 3)));
        assert_eq!(
            parse_span(&value("span: 0")),
            Err(PropertyError::OutOfRange {
                property: SPAN.into(),
                value: 0,
                min: 1
            })
        );
    }

    #[test]
    fn weight_bounds() {
        assert_eq!(parse_weight(&value("weight: 3")), Ok(Weight::new(3, 0)));
        assert_eq!(parse_weight(&value("weight: 1 2")), Ok(Weight::new(1, 2)));
        assert!(matches!(
            parse_weight(&value("weight: -1")),
            Err(PropertyError::OutOfRange { .. })
        ));
    }

    #[test]
    fn min_size_forms() {
        assert_eq!(parse_min_size(&value("min-size: 10")), Ok(Size::new(10, 10)));
        assert_eq!(parse_min_size(&value("min-size: 10 4")), Ok(Size::new(10, 4)));
    }

    #[test]
    fn lengths() {
        assert_eq!(parse_length(&value("width: 0.5"), WIDTH), Ok(Fixed::HALF));
        assert_eq!(parse_length(&value("width: 60"), WIDTH), Ok(Fixed::from_int(60)));
        assert_eq!(parse_length(&value("height: auto"), HEIGHT), Ok(StaticLayoutData::AUTO));
        assert!(parse_length(&value("height: tall"), HEIGHT).is_err());
    }

    #[test]
    fn positions() {
        assert_eq!(parse_position(&value("x: -4"), X), Ok(-4));
        assert!(parse_position(&value("x: 1.5"), X).is_err());
    }

    #[test]
    fn error_messages() {
        let err = parse_span(&value("span: 0")).unwrap_err();
        assert_eq!(err.to_string(), "span must be at least 1, got 0");
        let err = parse_gap(&value("gap: wide")).unwrap_err();
        assert!(err.to_string().starts_with("invalid value for gap:"));
    }
}
