#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! HTTP adapter that exposes a single Life session over JSON endpoints.
//!
//! The adapter owns one [`life_world::World`] behind an async mutex, so every
//! request observes and mutates the session one at a time. Routes:
//!
//! - `GET|POST /nextstate` advances one generation and returns the cells.
//! - `POST /setstate` with `{"fill": n}` stores the fill, reseeds the
//!   session, advances once and returns the cells.
//! - `GET|POST /reset` reseeds the session with the stored fill and returns
//!   `{"fill": n}`.

mod error;
mod fill_config;
mod routes;
mod server;
mod state;

use std::path::PathBuf;

pub use error::ApiError;
pub use fill_config::{parse_fill, FillConfig};
pub use routes::{ResetResponse, SetStateRequest};
pub use server::{router, serve, shutdown_signal};
pub use state::AppState;

/// Smallest fill accepted from clients.
pub const MIN_FILL: i32 = 0;
/// Largest fill accepted from clients.
pub const MAX_FILL: i32 = 100;

/// Parameters required to start a session.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Number of grid rows.
    pub height: usize,
    /// Number of grid columns.
    pub width: usize,
    /// Initial seeding density in percent.
    pub fill: i32,
    /// Seed for the first reseed; later reseeds use successive values.
    pub rng_seed: u64,
    /// File that persists the most recently accepted fill.
    pub fill_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            height: 10,
            width: 10,
            fill: 40,
            rng_seed: 0,
            fill_file: PathBuf::from("state.cfg"),
        }
    }
}
