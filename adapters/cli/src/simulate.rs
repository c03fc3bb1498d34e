//! Batch mode: advance a session a fixed number of generations and print each one.

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use life_core::{Command, Event, Grid};
use life_world::{self as world, query, World};
use serde::Serialize;

/// How generations are written to the output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// One JSON object per generation.
    #[default]
    Json,
    /// The state file layout, one block per generation.
    Text,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    generation: u64,
    live_cells: usize,
    cells: &'a Grid,
}

/// Prints the current generation, then `generations` successors.
pub(crate) fn run<W>(world: &mut World, generations: u64, format: Format, out: &mut W) -> Result<()>
where
    W: Write + ?Sized,
{
    emit(world, format, out)?;

    let mut events = Vec::new();
    for _ in 0..generations {
        events.clear();
        world::apply(world, Command::Advance, &mut events);
        if let Some(Event::GenerationAdvanced { live_cells: 0, generation }) = events.last() {
            tracing::debug!(generation, "population died out");
        }
        emit(world, format, out)?;
    }

    out.flush().context("failed to flush output")
}

fn emit<W>(world: &World, format: Format, out: &mut W) -> Result<()>
where
    W: Write + ?Sized,
{
    let grid = query::current(world);
    let generation = query::generation(world);
    match format {
        Format::Json => {
            let snapshot = Snapshot {
                generation,
                live_cells: grid.live_cells(),
                cells: grid,
            };
            serde_json::to_writer(&mut *out, &snapshot)
                .context("failed to encode generation")?;
            writeln!(out)?;
        }
        Format::Text => {
            writeln!(out, "# generation {generation}")?;
            writeln!(out, "{}", life_state_file::encode(grid))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blinker() -> World {
        let mut grid = Grid::new(5, 5).expect("valid dimensions");
        for x in 1..4 {
            grid.set(x, 2, true);
        }
        World::from_grid(grid)
    }

    #[test]
    fn json_emits_one_line_per_generation() {
        let mut world = blinker();
        let mut out = Vec::new();
        run(&mut world, 2, Format::Json, &mut out).expect("run");

        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["generation"], 0);
        assert_eq!(lines[2]["generation"], 2);
        assert_eq!(lines[1]["live_cells"], 3);
        assert_eq!(lines[0]["cells"], lines[2]["cells"], "blinker has period two");
    }

    #[test]
    fn text_uses_the_state_file_layout() {
        let mut world = blinker();
        let mut out = Vec::new();
        run(&mut world, 1, Format::Text, &mut out).expect("run");

        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(
            text,
            "# generation 0\n00000\n00000\n01110\n00000\n00000\n\
             # generation 1\n00000\n00100\n00100\n00100\n00000\n"
        );
    }

    #[test]
    fn zero_generations_prints_only_the_start() {
        let mut world = blinker();
        let mut out = Vec::new();
        run(&mut world, 0, Format::Json, &mut out).expect("run");

        assert_eq!(String::from_utf8(out).expect("utf8").lines().count(), 1);
        assert_eq!(query::generation(&world), 0);
    }
}
