#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Life engine.
//!
//! This crate defines the cell matrix and the message surface that connects
//! adapters, the authoritative world, and pure systems. Adapters submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then reports [`Event`] values
//! describing what changed. Systems operate on [`Grid`] values directly and
//! never hold state of their own.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces both grid buffers with dead grids of the provided size.
    ConfigureGrid {
        /// Number of rows in the grid.
        height: usize,
        /// Number of columns in the grid.
        width: usize,
    },
    /// Reseeds the current grid so roughly `percentage` of its cells are alive.
    Seed {
        /// Requested density. Callers validate the range; the world does not.
        percentage: i32,
        /// Seed for the deterministic random source driving the shuffle.
        rng_seed: u64,
    },
    /// Advances the simulation by a single generation.
    Advance,
    /// Replaces the current grid with an externally produced one, such as a
    /// grid loaded from a state file.
    ReplaceGrid {
        /// Grid that becomes current. Its dimensions replace the world's.
        grid: Grid,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that the grid buffers were reallocated.
    GridConfigured {
        /// Number of rows in the new grid.
        height: usize,
        /// Number of columns in the new grid.
        width: usize,
    },
    /// Reports that a configuration request was rejected. State is unchanged.
    GridRejected {
        /// Specific reason the request failed.
        reason: GridError,
    },
    /// Confirms that the current grid was reseeded.
    GridSeeded {
        /// Density requested by the command.
        percentage: i32,
        /// Number of live cells actually present after seeding.
        live_cells: usize,
    },
    /// Indicates that a transition pass completed.
    GenerationAdvanced {
        /// Generation counter after the pass.
        generation: u64,
        /// Number of live cells in the new current grid.
        live_cells: usize,
    },
    /// Confirms that an externally produced grid became current.
    GridReplaced {
        /// Number of rows in the replacement grid.
        height: usize,
        /// Number of columns in the replacement grid.
        width: usize,
    },
}

/// Reasons a grid could not be constructed.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridError {
    /// Height or width was zero.
    #[error("grid dimensions must be positive, got {height}x{width}")]
    InvalidDimension {
        /// Requested number of rows.
        height: usize,
        /// Requested number of columns.
        width: usize,
    },
    /// A row supplied to [`Grid::from_rows`] does not match the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
}

/// Row-major boolean cell matrix.
///
/// `x` always names the column and `y` the row. Both dimensions are at least
/// one for every grid that can be constructed. Callers are expected to keep
/// coordinates in range; indexing outside the grid panics.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates a grid of the provided size with every cell dead.
    pub fn new(height: usize, width: usize) -> Result<Self, GridError> {
        if height == 0 || width == 0 {
            return Err(GridError::InvalidDimension { height, width });
        }

        Ok(Self {
            height,
            width,
            cells: vec![false; height * width],
        })
    }

    /// Builds a grid from a rectangular matrix of rows.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GridError::InvalidDimension { height, width });
        }

        let mut cells = Vec::with_capacity(height * width);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(GridError::RaggedRows {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }

        Ok(Self {
            height,
            width,
            cells,
        })
    }

    /// Allocates a dead grid with the same dimensions as `self`.
    #[must_use]
    pub fn dead_like(&self) -> Self {
        Self {
            height: self.height,
            width: self.width,
            cells: vec![false; self.cells.len()],
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Reports whether `other` has the same height and width.
    #[must_use]
    pub const fn same_dimensions(&self, other: &Grid) -> bool {
        self.height == other.height && self.width == other.width
    }

    /// Returns whether the cell at column `x`, row `y` is alive.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)]
    }

    /// Sets the state of the cell at column `x`, row `y`.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        let index = self.index(x, y);
        self.cells[index] = alive;
    }

    /// Iterator over the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Counts the live cells in the grid.
    #[must_use]
    pub fn live_cells(&self) -> usize {
        self.cells.iter().filter(|alive| **alive).count()
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} grid",
            self.height,
            self.width
        );
        y * self.width + x
    }
}

impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.rows())
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<Vec<bool>>::deserialize(deserializer)?;
        Grid::from_rows(rows).map_err(de::Error::custom)
    }
}
