#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure transition system that evaluates the B3/S23 rule on a toroidal grid.

use life_core::Grid;

/// Offsets of the Moore neighborhood as `(dx, dy)` pairs.
const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Counts the live cells among the eight neighbors of column `x`, row `y`.
///
/// Both axes wrap: the last column neighbors the first and the last row
/// neighbors the first. On grids narrower than three cells the wrap folds
/// several offsets onto the same cell, and each offset is counted.
#[must_use]
pub fn live_neighbors(grid: &Grid, x: usize, y: usize) -> u8 {
    let mut count = 0;
    for (dx, dy) in MOORE_OFFSETS {
        let column = wrap(x, dx, grid.width());
        let row = wrap(y, dy, grid.height());
        if grid.get(column, row) {
            count += 1;
        }
    }
    count
}

/// Applies the survival and birth rule to a single cell.
#[must_use]
pub const fn next_state(alive: bool, live_neighbors: u8) -> bool {
    matches!((alive, live_neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Writes the generation following `current` into `scratch` and returns it.
///
/// Every cell is evaluated against `current` only, so `scratch` never
/// observes a partially updated state. A `scratch` buffer with mismatched
/// dimensions is reallocated before the pass.
pub fn advance<'a>(current: &Grid, scratch: &'a mut Grid) -> &'a Grid {
    if !scratch.same_dimensions(current) {
        *scratch = current.dead_like();
    }

    for y in 0..current.height() {
        for x in 0..current.width() {
            let alive = next_state(current.get(x, y), live_neighbors(current, x, y));
            scratch.set(x, y, alive);
        }
    }

    scratch
}

fn wrap(index: usize, delta: isize, extent: usize) -> usize {
    // Extents originate from `Vec` lengths and therefore fit in `isize`.
    let extent = extent as isize;
    (index as isize + delta).rem_euclid(extent) as usize
}
