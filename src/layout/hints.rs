//! Style-derived layout hints and per-child layout data.

use crate::fixed::Fixed;
use crate::geometry::{Alignment, Gap, Insets, Size, Span, Weight};

use super::strategy::LayoutKind;

/// Free-form placement of one child inside a static layout.
///
/// `width` and `height` are read by magnitude: a value up to
/// [`Fixed::ONE`] is a fraction of the available length, a larger value is
/// an absolute length, and a negative value means "use the preferred size".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StaticLayoutData {
    pub x: i32,
    pub y: i32,
    pub width: Fixed,
    pub height: Fixed,
    pub alignment: Alignment,
}

impl StaticLayoutData {
    /// Declared size meaning "use the preferred size".
    pub const AUTO: Fixed = Fixed::from_int(-1);

    /// Origin position, preferred size, start alignment.
    pub const fn new() -> Self {
        Self {
            x: 0,
            y: 0,
            width: Self::AUTO,
            height: Self::AUTO,
            alignment: Alignment::START,
        }
    }

    /// Set the position (builder).
    pub const fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the declared size (builder).
    pub const fn sized(mut self, width: Fixed, height: Fixed) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the alignment (builder).
    pub const fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl Default for StaticLayoutData {
    fn default() -> Self {
        Self::new()
    }
}

/// Cell data for a table layout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TableLayoutData {
    pub span: Span,
    pub weight: Weight,
}

/// Per-child hint object; one variant per layout strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayoutData {
    Static(StaticLayoutData),
    Table(TableLayoutData),
}

/// Everything a layout strategy reads about one widget.
///
/// Built from the widget's resolved style and replaced wholesale whenever
/// that style changes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayoutHints {
    /// Strategy used to lay out this widget's children.
    pub layout: LayoutKind,
    pub insets: Insets,
    pub gap: Gap,
    /// Alignment of this widget's content block inside its own bounds.
    pub align: Alignment,
    /// Lower bound for this widget's preferred size.
    pub min_size: Size,
    pub data: Option<LayoutData>,
}

impl LayoutHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: LayoutKind) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn with_gap(mut self, gap: Gap) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn with_min_size(mut self, min_size: Size) -> Self {
        self.min_size = min_size;
        self
    }

    pub fn with_data(mut self, data: LayoutData) -> Self {
        self.data = Some(data);
        self
    }

    /// Table span; a single cell unless table data says otherwise.
    pub fn span(&self) -> Span {
        match self.data {
            Some(LayoutData::Table(table)) => table.span,
            _ => Span::ONE,
        }
    }

    /// Table weight; zero unless table data says otherwise.
    pub fn weight(&self) -> Weight {
        match self.data {
            Some(LayoutData::Table(table)) => table.weight,
            _ => Weight::ZERO,
        }
    }

    /// Static placement, if this widget carries one.
    pub fn static_data(&self) -> Option<StaticLayoutData> {
        match self.data {
            Some(LayoutData::Static(data)) => Some(data),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let hints = LayoutHints::new();
        assert_eq!(hints.layout, LayoutKind::Static);
        assert_eq!(hints.span(), Span::ONE);
        assert_eq!(hints.weight(), Weight::ZERO);
        assert!(hints.static_data().is_none());
    }

    #[test]
    fn table_data_accessors() {
        let hints = LayoutHints::new().with_data(LayoutData::Table(TableLayoutData {
            span: Span::new(2, 3),
            weight: Weight::new(1, 0),
        }));
        assert_eq!(hints.span(), Span::new(2, 3));
        assert_eq!(hints.weight(), Weight::new(1, 0));
        assert!(hints.static_data().is_none());
    }

    #[test]
    fn static_data_builders() {
        let data = StaticLayoutData::new()
            .at(4, 5)
            .sized(Fixed::HALF, Fixed::from_int(20));
        assert_eq!(data.x, 4);
        assert_eq!(data.height, Fixed::from_int(20));
        assert_eq!(StaticLayoutData::default().width, StaticLayoutData::AUTO);

        let hints = LayoutHints::new().with_data(LayoutData::Static(data));
        assert_eq!(hints.static_data(), Some(data));
        assert_eq!(hints.span(), Span::ONE);
    }
}
