#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation state for the Life engine.
//!
//! The world owns a pair of equally sized grid buffers and an index naming
//! the current one. A transition reads the current buffer, writes the other,
//! and then flips the index, so no pass ever observes partially updated
//! cells.

use life_core::{Command, Event, Grid, GridError};
use life_system_seeding as seeding;
use life_system_transition as transition;
use tracing::{debug, info, warn};

/// Represents a single simulation session.
#[derive(Clone, Debug)]
pub struct World {
    buffers: [Grid; 2],
    current: usize,
    generation: u64,
}

impl World {
    /// Creates a world whose grid has the provided size with every cell dead.
    pub fn new(height: usize, width: usize) -> Result<Self, GridError> {
        Grid::new(height, width).map(Self::from_grid)
    }

    /// Creates a world whose current grid is `grid`.
    #[must_use]
    pub fn from_grid(grid: Grid) -> Self {
        let scratch = grid.dead_like();
        Self {
            buffers: [grid, scratch],
            current: 0,
            generation: 0,
        }
    }

    fn current_grid(&self) -> &Grid {
        &self.buffers[self.current]
    }

    fn current_grid_mut(&mut self) -> &mut Grid {
        &mut self.buffers[self.current]
    }

    fn install(&mut self, grid: Grid) {
        let scratch = grid.dead_like();
        self.buffers = [grid, scratch];
        self.current = 0;
        self.generation = 0;
    }

    fn step(&mut self) -> usize {
        let [first, second] = &mut self.buffers;
        let (current, scratch) = if self.current == 0 {
            (&*first, second)
        } else {
            (&*second, first)
        };

        let live_cells = transition::advance(current, scratch).live_cells();
        self.current = 1 - self.current;
        self.generation = self.generation.saturating_add(1);
        live_cells
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid { height, width } => match Grid::new(height, width) {
            Ok(grid) => {
                world.install(grid);
                info!(height, width, "configured grid");
                out_events.push(Event::GridConfigured { height, width });
            }
            Err(reason) => {
                warn!(%reason, "rejected grid configuration");
                out_events.push(Event::GridRejected { reason });
            }
        },
        Command::Seed {
            percentage,
            rng_seed,
        } => {
            let mut rng = seeding::seeded_rng(rng_seed);
            let grid = world.current_grid_mut();
            seeding::seed(grid, percentage, &mut rng);
            let live_cells = grid.live_cells();
            world.generation = 0;

            info!(percentage, rng_seed, live_cells, "seeded grid");
            out_events.push(Event::GridSeeded {
                percentage,
                live_cells,
            });
        }
        Command::Advance => {
            let live_cells = world.step();
            debug!(generation = world.generation, live_cells, "advanced generation");
            out_events.push(Event::GenerationAdvanced {
                generation: world.generation,
                live_cells,
            });
        }
        Command::ReplaceGrid { grid } => {
            let (height, width) = (grid.height(), grid.width());
            world.install(grid);
            info!(height, width, "replaced grid");
            out_events.push(Event::GridReplaced { height, width });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use life_core::Grid;

    /// Provides read-only access to the current grid.
    #[must_use]
    pub fn current(world: &World) -> &Grid {
        world.current_grid()
    }

    /// Number of transitions applied since the grid was configured, seeded or
    /// replaced.
    #[must_use]
    pub fn generation(world: &World) -> u64 {
        world.generation
    }

    /// Height and width of the current grid.
    #[must_use]
    pub fn dimensions(world: &World) -> (usize, usize) {
        let grid = world.current_grid();
        (grid.height(), grid.width())
    }

    /// Counts the live cells of the current grid.
    #[must_use]
    pub fn live_cells(world: &World) -> usize {
        world.current_grid().live_cells()
    }
}
