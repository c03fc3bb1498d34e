use life_core::{Command, Grid};
use life_world::{self as world, query, World};
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::{ApiError, FillConfig, ServerConfig};

/// State shared across every request handler.
#[derive(Debug)]
pub struct AppState {
    session: Mutex<Session>,
    fill_config: FillConfig,
}

impl AppState {
    /// Creates a session of the configured size seeded with the configured fill.
    pub fn new(config: &ServerConfig) -> Result<Self, ApiError> {
        let world = World::new(config.height, config.width)?;
        Ok(Self::with_world(config, world, true))
    }

    /// Creates a session around a prepared grid, such as one loaded from a
    /// state file. The grid is used as is and not reseeded.
    #[must_use]
    pub fn with_grid(config: &ServerConfig, grid: Grid) -> Self {
        Self::with_world(config, World::from_grid(grid), false)
    }

    fn with_world(config: &ServerConfig, world: World, reseed: bool) -> Self {
        let mut session = Session {
            world,
            fill: config.fill,
            next_seed: config.rng_seed,
        };
        if reseed {
            session.reseed(config.fill);
        }

        Self {
            session: Mutex::new(session),
            fill_config: FillConfig::new(config.fill_file.clone()),
        }
    }

    pub(crate) async fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().await
    }

    pub(crate) fn fill_config(&self) -> &FillConfig {
        &self.fill_config
    }
}

/// The simulation session guarded by [`AppState`].
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    fill: i32,
    next_seed: u64,
}

impl Session {
    /// Fill used by the most recent reseed.
    pub(crate) fn fill(&self) -> i32 {
        self.fill
    }

    /// Reseeds the grid with `fill`, drawing a fresh random seed each time.
    pub(crate) fn reseed(&mut self, fill: i32) {
        let rng_seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        self.fill = fill;

        let mut events = Vec::new();
        world::apply(
            &mut self.world,
            Command::Seed {
                percentage: fill,
                rng_seed,
            },
            &mut events,
        );
        info!(fill, rng_seed, "session reseeded");
    }

    /// Advances one generation and returns a copy of the new current grid.
    pub(crate) fn advance(&mut self) -> Grid {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Advance, &mut events);
        query::current(&self.world).clone()
    }
}
