use life_core::Grid;
use life_system_seeding::{seed, seeded_rng, target_alive_count};
use rand::{rngs::mock::StepRng, RngCore};

/// Replays a fixed list of 64-bit outputs.
///
/// On an axis of extent two, `0` samples index 0 and `HIGH` samples index 1.
struct ScriptedRng {
    outputs: std::vec::IntoIter<u64>,
}

const HIGH: u64 = 1 << 63;

impl ScriptedRng {
    fn new(outputs: Vec<u64>) -> Self {
        Self {
            outputs: outputs.into_iter(),
        }
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.outputs.next().expect("script exhausted")
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[test]
fn zero_percent_leaves_grid_dead() {
    let mut grid = Grid::new(8, 8).expect("valid dimensions");
    grid.set(3, 3, true);

    seed(&mut grid, 0, &mut seeded_rng(7));
    assert_eq!(grid.live_cells(), 0);
}

#[test]
fn full_density_stays_fully_alive() {
    let mut grid = Grid::new(6, 9).expect("valid dimensions");

    seed(&mut grid, 100, &mut seeded_rng(0xdead_beef));
    assert_eq!(grid.live_cells(), 54, "copying live onto live never kills");
}

#[test]
fn same_seed_produces_identical_grids() {
    let mut first = Grid::new(12, 20).expect("valid dimensions");
    let mut second = Grid::new(12, 20).expect("valid dimensions");

    seed(&mut first, 40, &mut seeded_rng(0x1234_5678));
    seed(&mut second, 40, &mut seeded_rng(0x1234_5678));
    assert_eq!(first, second);
}

#[test]
fn realized_density_stays_within_grid_bounds() {
    let mut grid = Grid::new(10, 10).expect("valid dimensions");
    seed(&mut grid, 40, &mut seeded_rng(99));

    let live = grid.live_cells();
    assert!(live > 0, "forty percent fill produced an empty grid");
    assert!(live < 100, "forty percent fill produced a full grid");
}

#[test]
fn non_square_grids_draw_coordinates_from_their_own_axes() {
    for (height, width) in [(1, 50), (50, 1), (3, 17), (17, 3)] {
        let mut grid = Grid::new(height, width).expect("valid dimensions");
        seed(&mut grid, 60, &mut seeded_rng(3));
        assert!(grid.live_cells() <= height * width);
    }
}

#[test]
fn prefix_is_marked_in_row_major_order_before_scattering() {
    // A constant source always copies cell (0, 0) onto itself, so the prefix
    // survives the scatter pass unchanged.
    let mut grid = Grid::new(3, 4).expect("valid dimensions");
    let mut rng = StepRng::new(0, 0);

    seed(&mut grid, 50, &mut rng);

    assert_eq!(target_alive_count(50, 3, 4), 6);
    let rows: Vec<&[bool]> = grid.rows().collect();
    assert_eq!(rows[0], &[true, true, true, true]);
    assert_eq!(rows[1], &[true, true, false, false]);
    assert_eq!(rows[2], &[false, false, false, false]);
}

#[test]
fn out_of_range_percentages_are_not_clamped() {
    let mut grid = Grid::new(4, 4).expect("valid dimensions");
    seed(&mut grid, -10, &mut seeded_rng(1));
    assert_eq!(grid.live_cells(), 0);

    seed(&mut grid, 250, &mut seeded_rng(1));
    assert_eq!(grid.live_cells(), 16);
}

#[test]
fn scatter_copies_values_so_live_count_can_drift_below_target() {
    // 2x2 at 50%: the top row starts alive. Each copy draws destination x,
    // destination y, source x, source y. Both copies pull a dead cell from
    // the bottom row onto a live cell above it. A swap would keep two live
    // cells; a copy leaves none.
    let mut grid = Grid::new(2, 2).expect("valid dimensions");
    let mut rng = ScriptedRng::new(vec![0, 0, 0, HIGH, HIGH, 0, HIGH, HIGH]);

    seed(&mut grid, 50, &mut rng);

    let target = target_alive_count(50, 2, 2);
    assert_eq!(target, 2);
    assert_eq!(grid.live_cells(), 0);
    assert!(grid.live_cells() < target, "copies must not preserve the count");
    assert!(rng.outputs.next().is_none(), "one draw per coordinate");
}
