//! Table layout: grid placement with spans, row breaks and weights.
//!
//! Children are placed left to right into a grid; a row-break marker starts a
//! new row and a cell spanning several rows keeps its columns occupied until
//! the span ends. Column widths and row heights are then solved per axis with
//! an increasing-span sweep: weights first, then sizes, so that every cell's
//! span totals at least the cell's measured length.
//!
//! All scratch state (cells, tracks) is built and dropped inside a single
//! `measure` or `arrange` call.

use crate::dom::node::NodeId;
use crate::fixed::mul_div_wide;
use crate::geometry::{Gap, Region, Size, Span, Weight};

use super::strategy::{content_size, inner_width, LayoutStrategy, LayoutTree};

/// Grid strategy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TableLayout;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// One placed child.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Cell {
    node: NodeId,
    col: usize,
    row: usize,
    span: Span,
    weight: Weight,
    size: Size,
}

impl Cell {
    /// First track and track count on `axis`.
    fn extent(&self, axis: Axis) -> (usize, usize) {
        match axis {
            Axis::Horizontal => (self.col, self.span.colspan()),
            Axis::Vertical => (self.row, self.span.rowspan()),
        }
    }

    fn weight(&self, axis: Axis) -> i32 {
        let w = match axis {
            Axis::Horizontal => self.weight.weightx,
            Axis::Vertical => self.weight.weighty,
        };
        i32::try_from(w).unwrap_or(i32::MAX)
    }

    fn length(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.size.width,
            Axis::Vertical => self.size.height,
        }
    }
}

/// Placed cells plus the grid dimensions they cover.
#[derive(Debug, Default)]
struct Grid {
    cells: Vec<Cell>,
    ncol: usize,
    nrow: usize,
}

/// Solved lengths and weights for the tracks of one axis.
#[derive(Debug, Default, PartialEq, Eq)]
struct Tracks {
    lengths: Vec<i32>,
    weights: Vec<i32>,
}

impl Tracks {
    fn solve(grid: &Grid, axis: Axis, gap: i32) -> Self {
        let count = match axis {
            Axis::Horizontal => grid.ncol,
            Axis::Vertical => grid.nrow,
        };
        let mut tracks = Tracks {
            lengths: vec![0; count],
            weights: vec![0; count],
        };

        let mut spans: Vec<usize> = grid.cells.iter().map(|cell| cell.extent(axis).1).collect();
        spans.sort_unstable();
        spans.dedup();

        for &span in &spans {
            for cell in grid.cells.iter().filter(|c| c.extent(axis).1 == span) {
                let (start, len) = cell.extent(axis);
                distribute(&mut tracks.weights, start, len, None, cell.weight(axis));
            }
        }

        for &span in &spans {
            for cell in grid.cells.iter().filter(|c| c.extent(axis).1 == span) {
                let (start, len) = cell.extent(axis);
                // Inner gaps already separate the spanned tracks.
                let required = cell.length(axis) - gap * (len as i32 - 1);
                distribute(&mut tracks.lengths, start, len, Some(tracks.weights.as_slice()), required);
            }
        }

        tracks
    }

    fn content_length(&self, gap: i32) -> i32 {
        content_length(&self.lengths, gap)
    }

    /// Share `surplus` among weighted tracks.
    fn grow(&mut self, surplus: i32) {
        grow(&mut self.lengths, &self.weights, surplus);
    }

    /// Start offset of each track relative to the content origin.
    fn offsets(&self, gap: i32) -> Vec<i32> {
        let mut offsets = Vec::with_capacity(self.lengths.len());
        let mut at = 0;
        for &length in &self.lengths {
            offsets.push(at);
            at += length + gap;
        }
        offsets
    }

    /// Total length of `len` tracks from `start`, inner gaps included.
    fn span_length(&self, start: usize, len: usize, gap: i32) -> i32 {
        self.lengths[start..start + len].iter().sum::<i32>() + gap * (len as i32 - 1)
    }
}

/// Raise `values[start..start + len]` so that they sum to at least `required`.
///
/// A single entry is raised to `required`. For several entries the missing
/// amount is shared in proportion to `weights` (every entry counts equally
/// when `weights` is `None`), truncating each share; the last entry absorbs
/// the remainder so the span totals exactly `required`. Entries with zero
/// weight receive nothing, and when all weights are zero the last entry takes
/// the whole amount.
pub fn distribute(values: &mut [i32], start: usize, len: usize, weights: Option<&[i32]>, required: i32) {
    if len == 0 {
        return;
    }
    if len == 1 {
        values[start] = values[start].max(required);
        return;
    }

    let range = start..start + len;
    let diff = i64::from(required) - range.clone().map(|i| i64::from(values[i])).sum::<i64>();
    if diff <= 0 {
        return;
    }

    let weight_at = |i: usize| weights.map_or(1, |w| i64::from(w[i]));
    let total: i64 = range.clone().map(weight_at).sum();
    let last = range.end - 1;

    let mut given = 0;
    if total > 0 {
        for i in start..last {
            let weight = weight_at(i);
            if weight == 0 {
                continue;
            }
            let share = mul_div_wide(weight, diff, total);
            values[i] = saturate(i64::from(values[i]) + share);
            given += share;
        }
    }
    values[last] = saturate(i64::from(values[last]) + diff - given);
}

/// Share `surplus` among the tracks with non-zero weight; the last weighted
/// track absorbs the rounding remainder.
fn grow(values: &mut [i32], weights: &[i32], surplus: i32) {
    let total: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    if surplus <= 0 || total <= 0 {
        return;
    }
    let Some(last) = weights.iter().rposition(|&w| w > 0) else {
        return;
    };

    let surplus = i64::from(surplus);
    let mut given = 0;
    for (value, &weight) in values[..last].iter_mut().zip(&weights[..last]) {
        if weight > 0 {
            let share = mul_div_wide(i64::from(weight), surplus, total);
            *value = saturate(i64::from(*value) + share);
            given += share;
        }
    }
    values[last] = saturate(i64::from(values[last]) + surplus - given);
}

/// Clamp a 64-bit sum back into track range.
fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// `sum(values) + (count - 1) * gap`, or zero with no tracks.
fn content_length(values: &[i32], gap: i32) -> i32 {
    if values.is_empty() {
        return 0;
    }
    values.iter().sum::<i32>() + gap * (values.len() as i32 - 1)
}

/// Phase A: assign a grid position to every child.
fn place_cells<T: LayoutTree + ?Sized>(tree: &T, target: NodeId, width: i32) -> Grid {
    let mut grid = Grid::default();
    // Row index until which each column is occupied by a row-spanning cell.
    let mut col_heights: Vec<usize> = Vec::new();
    let (mut col, mut row) = (0, 0);

    for &child in tree.children(target) {
        if tree.is_row_break(child) {
            row += 1;
            col = 0;
            continue;
        }

        let hints = tree.hints(child);
        let span = hints.span();
        let (colspan, rowspan) = (span.colspan(), span.rowspan());

        'scan: loop {
            for c in col..col + colspan {
                if col_heights.get(c).is_some_and(|&until| until > row) {
                    col = c + 1;
                    continue 'scan;
                }
            }
            break;
        }

        grid.cells.push(Cell {
            node: child,
            col,
            row,
            span,
            weight: hints.weight(),
            size: tree.preferred_size(child, width),
        });
        grid.ncol = grid.ncol.max(col + colspan);
        grid.nrow = grid.nrow.max(row + rowspan);

        if rowspan > 1 {
            if col_heights.len() < col + colspan {
                col_heights.resize(col + colspan, 0);
            }
            for until in &mut col_heights[col..col + colspan] {
                *until = row + rowspan;
            }
        }
        col += colspan;
    }

    log::debug!(
        "table grid {}x{} with {} cells",
        grid.ncol,
        grid.nrow,
        grid.cells.len()
    );
    grid
}

fn solve(grid: &Grid, gap: Gap) -> (Tracks, Tracks) {
    (
        Tracks::solve(grid, Axis::Horizontal, gap.horizontal),
        Tracks::solve(grid, Axis::Vertical, gap.vertical),
    )
}

impl LayoutStrategy for TableLayout {
    fn measure<T: LayoutTree + ?Sized>(&self, tree: &T, target: NodeId, available_width: i32) -> Size {
        let hints = tree.hints(target);
        let grid = place_cells(tree, target, inner_width(available_width, hints.insets));
        let (cols, rows) = solve(&grid, hints.gap);

        Size::new(
            cols.content_length(hints.gap.horizontal),
            rows.content_length(hints.gap.vertical),
        )
        .expand(hints.insets)
        .max(hints.min_size)
    }

    fn arrange<T: LayoutTree + ?Sized>(&self, tree: &mut T, target: NodeId) {
        let hints = tree.hints(target);
        let gap = hints.gap;
        let available = content_size(tree.bounds(target), hints.insets);

        let grid = place_cells(&*tree, target, available.width.max(0));
        if grid.cells.is_empty() {
            return;
        }
        let (mut cols, mut rows) = solve(&grid, gap);

        cols.grow(available.width - cols.content_length(gap.horizontal));
        rows.grow(available.height - rows.content_length(gap.vertical));

        let content = Size::new(
            cols.content_length(gap.horizontal),
            rows.content_length(gap.vertical),
        );
        let origin_x = hints.insets.left + hints.align.horizontal.offset(available.width, content.width);
        let origin_y = hints.insets.top + hints.align.vertical.offset(available.height, content.height);

        let col_offsets = cols.offsets(gap.horizontal);
        let row_offsets = rows.offsets(gap.vertical);

        for cell in &grid.cells {
            let bounds = Region::new(
                origin_x + col_offsets[cell.col],
                origin_y + row_offsets[cell.row],
                cols.span_length(cell.col, cell.span.colspan(), gap.horizontal),
                rows.span_length(cell.row, cell.span.rowspan(), gap.vertical),
            );
            tree.set_bounds(cell.node, bounds);
        }
    }
}
