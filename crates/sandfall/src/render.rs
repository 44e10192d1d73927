//! Text rendering of a grid, cropped to the interesting columns.

use crate::Grid;

/// Render `grid` one row per line, keeping only the columns between the
/// leftmost and rightmost non-air cell plus `padding` on each side.
///
/// The added floor row does not widen the crop. A grid with nothing but air
/// is rendered whole.
#[must_use]
pub fn render_cropped(grid: &Grid, padding: usize) -> String {
    let floor_row = grid.floor_depth().map(|d| d as usize);
    let occupied = grid
        .rows()
        .enumerate()
        .filter(|&(row, _)| Some(row) != floor_row)
        .flat_map(|(_, cells)| {
            let first = cells.iter().position(|c| !c.is_air());
            let last = cells.iter().rposition(|c| !c.is_air());
            first.into_iter().chain(last)
        })
        .fold(None, |span: Option<(usize, usize)>, column| {
            Some(span.map_or((column, column), |(lo, hi)| (lo.min(column), hi.max(column))))
        });

    let last_column = grid.width().saturating_sub(1);
    let (lo, hi) = match occupied {
        Some((lo, hi)) => (lo.saturating_sub(padding), (hi + padding).min(last_column)),
        None => (0, last_column),
    };

    grid.rows()
        .map(|cells| cells[lo..=hi].iter().map(|c| c.glyph()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
