#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for the Life engine.
//!
//! `life run` prints a fixed number of generations; `life serve` exposes a
//! session over HTTP until interrupted.

mod settings;
mod simulate;

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use life_core::Command;
use life_http::AppState;
use life_world::{self as world, World};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    settings::{Overrides, Settings},
    simulate::Format,
};

/// Conway's Game of Life on a wrapping grid.
#[derive(Debug, Parser)]
#[command(name = "life", version)]
struct Cli {
    /// TOML file providing defaults for every option.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Advance a session and print each generation.
    Run(RunArgs),
    /// Serve a session over HTTP.
    Serve(ServeArgs),
}

/// Options shared by every mode.
#[derive(Debug, Args)]
struct GridArgs {
    /// Number of grid rows.
    #[arg(long)]
    height: Option<usize>,
    /// Number of grid columns.
    #[arg(long)]
    width: Option<usize>,
    /// Percentage of cells alive after seeding.
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=100))]
    fill: Option<i32>,
    /// Seed for the random generator; taken from the clock when absent.
    #[arg(long)]
    seed: Option<u64>,
    /// Start from a state file instead of a random grid.
    #[arg(long, value_name = "FILE")]
    load: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct RunArgs {
    #[command(flatten)]
    grid: GridArgs,
    /// Number of generations to advance.
    #[arg(long, default_value_t = 10)]
    generations: u64,
    /// Output layout.
    #[arg(long, value_enum, default_value_t)]
    format: Format,
    /// Write the final generation to a state file.
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ServeArgs {
    #[command(flatten)]
    grid: GridArgs,
    /// Address to listen on.
    #[arg(long)]
    bind: Option<SocketAddr>,
    /// File that persists the fill chosen by clients.
    #[arg(long, value_name = "FILE")]
    fill_file: Option<PathBuf>,
}

impl GridArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            height: self.height,
            width: self.width,
            fill: self.fill,
            rng_seed: self.seed,
            ..Overrides::default()
        }
    }
}

/// Entry point for the Life command-line interface.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.mode {
        Mode::Run(args) => {
            let settings = settings.merge(args.grid.overrides())?;
            run(&settings, &args)
        }
        Mode::Serve(args) => {
            let overrides = Overrides {
                bind: args.bind,
                fill_file: args.fill_file.clone(),
                ..args.grid.overrides()
            };
            let settings = settings.merge(overrides)?;
            serve(&settings, &args).await
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn starting_world(settings: &Settings, grid: &GridArgs) -> Result<World> {
    if let Some(path) = &grid.load {
        let grid = life_state_file::load(path)?;
        return Ok(World::from_grid(grid));
    }

    let mut world = World::new(settings.height, settings.width)?;
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::Seed {
            percentage: settings.fill,
            rng_seed: settings.resolved_seed(),
        },
        &mut events,
    );
    Ok(world)
}

fn run(settings: &Settings, args: &RunArgs) -> Result<()> {
    let mut world = starting_world(settings, &args.grid)?;

    let stdout = std::io::stdout();
    simulate::run(&mut world, args.generations, args.format, &mut stdout.lock())?;

    if let Some(path) = &args.save {
        life_state_file::save(life_world::query::current(&world), path)?;
    }
    Ok(())
}

async fn serve(settings: &Settings, args: &ServeArgs) -> Result<()> {
    let config = settings.server_config();
    let state = match &args.grid.load {
        Some(path) => AppState::with_grid(&config, life_state_file::load(path)?),
        None => AppState::new(&config)?,
    };

    let listener = TcpListener::bind(settings.bind)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind))?;
    info!(height = settings.height, width = settings.width, fill = settings.fill, "starting server");

    life_http::serve(listener, Arc::new(state), life_http::shutdown_signal())
        .await
        .context("server failed")
}
