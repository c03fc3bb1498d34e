#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Density seeding system that populates a grid from an injected random source.
//!
//! Seeding marks a prefix of the grid alive and then scatters it with a
//! sequence of random value copies. A copy is not a swap: each operation may
//! overwrite a live cell with a dead one or the reverse, so the realized live
//! count drifts away from the requested density. Callers observing the
//! density after seeding must treat it as approximate.

use life_core::Grid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Creates the deterministic random source used for seeding.
#[must_use]
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Number of cells marked alive before the scatter pass.
///
/// Computed as `percentage * width * height / 100` with truncating division.
/// Non-positive results yield zero.
#[must_use]
pub fn target_alive_count(percentage: i32, height: usize, width: usize) -> usize {
    let cells = i128::try_from(height.saturating_mul(width)).unwrap_or(i128::MAX);
    let target = i128::from(percentage).saturating_mul(cells) / 100;
    usize::try_from(target.max(0)).unwrap_or(usize::MAX)
}

/// Seeds `grid` so roughly `percentage` of its cells are alive.
///
/// `percentage` is used as given; values outside `0..=100` are the caller's
/// responsibility. Every cell of `grid` is overwritten.
pub fn seed<R>(grid: &mut Grid, percentage: i32, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let (height, width) = (grid.height(), grid.width());
    let target = target_alive_count(percentage, height, width);

    let mut marked = 0;
    for y in 0..height {
        for x in 0..width {
            grid.set(x, y, marked < target);
            marked += 1;
        }
    }

    for _ in 0..target {
        let to_x = rng.gen_range(0..width);
        let to_y = rng.gen_range(0..height);
        let from_x = rng.gen_range(0..width);
        let from_y = rng.gen_range(0..height);
        let value = grid.get(from_x, from_y);
        grid.set(to_x, to_y, value);
    }
}
