// File: crates/chart-core/src/grid.rs
// Summary: Grid-line layout helpers (tick values -> whole-pixel positions off the axis lines).

use crate::format::round_half_up;

/// Pixel rows for horizontal grid lines, or `None` when the grid is hidden.
///
/// Positions landing on the plot top (0) or bottom (`inner_height`) are dropped so no
/// grid line sits on the axis.
pub fn y_grid_values<T>(
    show: bool,
    ticks: &[T],
    scale: impl Fn(&T) -> f64,
    inner_height: f64,
) -> Option<Vec<f64>> {
    if !show {
        return None;
    }
    Some(
        ticks
            .iter()
            .map(|t| round_half_up(scale(t)))
            .filter(|&v| v != 0.0 && v != inner_height)
            .collect(),
    )
}

/// Pixel columns for vertical grid lines, shifted by the left margin.
///
/// Positions on the left axis (`offset_left`) or the right edge (`outer_width`) are dropped.
pub fn x_grid_values<T>(
    show: bool,
    ticks: &[T],
    scale: impl Fn(&T) -> f64,
    offset_left: f64,
    outer_width: f64,
) -> Option<Vec<f64>> {
    if !show {
        return None;
    }
    Some(
        ticks
            .iter()
            .map(|t| round_half_up(scale(t) + offset_left))
            .filter(|&v| v != offset_left && v != outer_width)
            .collect(),
    )
}
