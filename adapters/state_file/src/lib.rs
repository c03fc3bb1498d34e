#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Plain-text persistence for grid state.
//!
//! A state file holds one line per grid row. Each line contains one character
//! per cell, `1` for alive and `0` for dead, with no separators. Rows are
//! joined by a single `\n` and the final row carries no trailing newline, so
//! saving a freshly loaded grid reproduces the source file byte for byte.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use life_core::{Grid, GridError};
use thiserror::Error;
use tracing::{debug, info};

const ALIVE: char = '1';
const DEAD: char = '0';
const ROW_DELIMITER: &str = "\n";

/// Errors that can occur while reading or writing state files.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The file could not be opened, read or written.
    #[error("could not access world state file {}: {source}", path.display())]
    Io {
        /// File that triggered the failure.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A line does not match the width established by the first row.
    #[error(
        "world state file {} has {found} cells on line {line}, expected {expected}",
        path.display()
    )]
    WidthMismatch {
        /// File that triggered the failure.
        path: PathBuf,
        /// One-based line number of the offending row.
        line: usize,
        /// Width established by the first non-empty line.
        expected: usize,
        /// Width of the offending line.
        found: usize,
    },
    /// A line contains a character other than `0` or `1`.
    #[error(
        "world state file {} contains invalid character {character:?} at line {line}, column {column}",
        path.display()
    )]
    InvalidCharacter {
        /// File that triggered the failure.
        path: PathBuf,
        /// One-based line number of the offending row.
        line: usize,
        /// One-based column of the offending character.
        column: usize,
        /// Character that was rejected.
        character: char,
    },
    /// The file holds no rows, so no grid can be derived from it.
    #[error("world state file {} does not describe a grid: {source}", path.display())]
    Grid {
        /// File that triggered the failure.
        path: PathBuf,
        /// Reason the rows were rejected.
        #[source]
        source: GridError,
    },
}

/// Renders the grid in state file format.
#[must_use]
pub fn encode(grid: &Grid) -> String {
    let mut encoded = String::with_capacity(grid.height() * (grid.width() + 1));
    for (index, row) in grid.rows().enumerate() {
        if index > 0 {
            encoded.push_str(ROW_DELIMITER);
        }
        encoded.extend(symbols(row));
    }
    encoded
}

/// Writes the grid in state file format to `writer`.
pub fn write_to<W>(grid: &Grid, writer: &mut W) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let mut line = String::with_capacity(grid.width());
    for (index, row) in grid.rows().enumerate() {
        line.clear();
        if index > 0 {
            line.push_str(ROW_DELIMITER);
        }
        line.extend(symbols(row));
        writer.write_all(line.as_bytes())?;
    }
    writer.flush()
}

/// Saves the grid to `path`, creating or truncating the file.
pub fn save(grid: &Grid, path: &Path) -> Result<(), CodecError> {
    let io_error = |source: io::Error| CodecError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    write_to(grid, &mut writer).map_err(io_error)?;

    info!(
        path = %path.display(),
        height = grid.height(),
        width = grid.width(),
        "saved world state"
    );
    Ok(())
}

/// Parses a grid from state file text read through `reader`.
///
/// `origin` names the source in error values. Leading blank lines are
/// skipped; surrounding whitespace, including a `\r` before the newline, is
/// ignored on every line. Input is read as bytes, so content that is not
/// UTF-8 is reported as an invalid character rather than an I/O failure.
pub fn read_from<R>(reader: R, origin: &Path) -> Result<Grid, CodecError>
where
    R: BufRead,
{
    let mut rows: Vec<Vec<bool>> = Vec::new();
    let mut width = None;

    for (index, line) in reader.split(b'\n').enumerate() {
        let number = index + 1;
        let line = line.map_err(|source| CodecError::Io {
            path: origin.to_path_buf(),
            source,
        })?;
        let row = parse_row(trim(&line), number, origin)?;

        let found = row.len();
        match width {
            None if found == 0 => continue,
            None => width = Some(found),
            Some(expected) if expected != found => {
                return Err(CodecError::WidthMismatch {
                    path: origin.to_path_buf(),
                    line: number,
                    expected,
                    found,
                });
            }
            Some(_) => {}
        }

        rows.push(row);
    }

    let grid = Grid::from_rows(rows).map_err(|source| CodecError::Grid {
        path: origin.to_path_buf(),
        source,
    })?;
    debug!(
        path = %origin.display(),
        height = grid.height(),
        width = grid.width(),
        "parsed world state"
    );
    Ok(grid)
}

/// Loads a grid from the state file at `path`.
///
/// The returned grid is freshly allocated; nothing is produced on failure, so
/// callers can swap it in only once parsing has succeeded.
pub fn load(path: &Path) -> Result<Grid, CodecError> {
    let file = File::open(path).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = read_from(BufReader::new(file), path)?;

    info!(
        path = %path.display(),
        height = grid.height(),
        width = grid.width(),
        "loaded world state"
    );
    Ok(grid)
}

fn symbols(row: &[bool]) -> impl Iterator<Item = char> + '_ {
    row.iter().map(|alive| if *alive { ALIVE } else { DEAD })
}

fn trim(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|byte| !byte.is_ascii_whitespace())
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|byte| !byte.is_ascii_whitespace())
        .map_or(start, |last| last + 1);
    &line[start..end]
}

fn parse_row(line: &[u8], number: usize, origin: &Path) -> Result<Vec<bool>, CodecError> {
    line.iter()
        .enumerate()
        .map(|(column, byte)| match char::from(*byte) {
            ALIVE => Ok(true),
            DEAD => Ok(false),
            character => Err(CodecError::InvalidCharacter {
                path: origin.to_path_buf(),
                line: number,
                column: column + 1,
                character,
            }),
        })
        .collect()
}
