use std::time::Duration;

/// How long the terminal must stay quiet after a resize burst before the
/// cell size is recomputed.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Columns per grid cell for a terminal `cols` wide.
///
/// The board takes about half the terminal width, split evenly across the
/// world, never narrower than one column per cell.
pub fn cell_size(cols: u16, world_width: u32) -> u16 {
    let half = u32::from(cols) / 2;
    (half / world_width).max(1) as u16
}
