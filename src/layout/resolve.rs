//! Style → [`LayoutHints`] resolution.
//!
//! Reads the layout properties of one style (through its cascade chain) and
//! converts them with [`css::properties`](crate::css::properties). A value
//! that fails conversion is logged and replaced by the field's default, so a
//! bad stylesheet degrades layout instead of aborting it.

use crate::css::properties::{self, PropertyError};
use crate::css::style::{PropertyValue, StyleId, StyleSheet};

use super::hints::{LayoutData, LayoutHints, StaticLayoutData, TableLayoutData};

const STATIC_PROPERTIES: &[&str] = &[
    properties::X,
    properties::Y,
    properties::WIDTH,
    properties::HEIGHT,
    properties::ALIGN_SELF,
];

const TABLE_PROPERTIES: &[&str] = &[properties::SPAN, properties::WEIGHT];

/// Look up `name` and convert it, warning on malformed values.
fn lookup<T>(
    sheet: &StyleSheet,
    style: StyleId,
    name: &str,
    convert: impl FnOnce(&PropertyValue) -> Result<T, PropertyError>,
) -> Option<T> {
    let value = sheet.get(style, name)?;
    match convert(value) {
        Ok(converted) => Some(converted),
        Err(err) => {
            log::warn!("ignoring {name}: {err}");
            None
        }
    }
}

fn defines_any(sheet: &StyleSheet, style: StyleId, names: &[&str]) -> bool {
    names.iter().any(|name| sheet.get(style, name).is_some())
}

/// Resolve the complete hint set for `style`.
pub fn resolve_hints(sheet: &StyleSheet, style: StyleId) -> LayoutHints {
    let defaults = LayoutHints::default();
    LayoutHints {
        layout: lookup(sheet, style, properties::LAYOUT, properties::parse_layout_kind)
            .unwrap_or(defaults.layout),
        insets: lookup(sheet, style, properties::INSETS, properties::parse_insets)
            .unwrap_or(defaults.insets),
        gap: lookup(sheet, style, properties::GAP, properties::parse_gap).unwrap_or(defaults.gap),
        align: lookup(sheet, style, properties::ALIGN, |v| {
            properties::parse_alignment(v, properties::ALIGN)
        })
        .unwrap_or(defaults.align),
        min_size: lookup(sheet, style, properties::MIN_SIZE, properties::parse_min_size)
            .unwrap_or(defaults.min_size),
        data: resolve_data(sheet, style),
    }
}

/// Per-child data: static when any static property is present, else table
/// when a span or weight is present.
fn resolve_data(sheet: &StyleSheet, style: StyleId) -> Option<LayoutData> {
    let is_static = defines_any(sheet, style, STATIC_PROPERTIES);
    let is_table = defines_any(sheet, style, TABLE_PROPERTIES);

    if is_static {
        if is_table {
            log::warn!("style defines both static and table placement; using static");
        }
        let defaults = StaticLayoutData::default();
        return Some(LayoutData::Static(StaticLayoutData {
            x: lookup(sheet, style, properties::X, |v| {
                properties::parse_position(v, properties::X)
            })
            .unwrap_or(defaults.x),
            y: lookup(sheet, style, properties::Y, |v| {
                properties::parse_position(v, properties::Y)
            })
            .unwrap_or(defaults.y),
            width: lookup(sheet, style, properties::WIDTH, |v| {
                properties::parse_length(v, properties::WIDTH)
            })
            .unwrap_or(defaults.width),
            height: lookup(sheet, style, properties::HEIGHT, |v| {
                properties::parse_length(v, properties::HEIGHT)
            })
            .unwrap_or(defaults.height),
            alignment: lookup(sheet, style, properties::ALIGN_SELF, |v| {
                properties::parse_alignment(v, properties::ALIGN_SELF)
            })
            .unwrap_or(defaults.alignment),
        }));
    }

    if is_table {
        let defaults = TableLayoutData::default();
        return Some(LayoutData::Table(TableLayoutData {
            span: lookup(sheet, style, properties::SPAN, properties::parse_span)
                .unwrap_or(defaults.span),
            weight: lookup(sheet, style, properties::WEIGHT, properties::parse_weight)
                .unwrap_or(defaults.weight),
        }));
    }

    None
}
