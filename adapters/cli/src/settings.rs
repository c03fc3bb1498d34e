//! Layered configuration: built-in defaults, an optional TOML file, then
//! command-line overrides.

use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{ensure, Context, Result};
use life_http::{ServerConfig, MAX_FILL, MIN_FILL};
use serde::Deserialize;

/// Values every mode of the binary starts from.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    pub(crate) height: usize,
    pub(crate) width: usize,
    pub(crate) fill: i32,
    /// Absent means a seed is taken from the clock.
    pub(crate) rng_seed: Option<u64>,
    pub(crate) bind: SocketAddr,
    pub(crate) fill_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            height: 10,
            width: 10,
            fill: 40,
            rng_seed: None,
            bind: SocketAddr::from(([0, 0, 0, 0], 8081)),
            fill_file: PathBuf::from("state.cfg"),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Overrides {
    pub(crate) height: Option<usize>,
    pub(crate) width: Option<usize>,
    pub(crate) fill: Option<i32>,
    pub(crate) rng_seed: Option<u64>,
    pub(crate) bind: Option<SocketAddr>,
    pub(crate) fill_file: Option<PathBuf>,
}

impl Settings {
    /// Reads settings from `path`, or returns the defaults when no file is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid settings in {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let settings: Self = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Replaces every value the command line supplied.
    pub(crate) fn merge(mut self, overrides: Overrides) -> Result<Self> {
        if let Some(height) = overrides.height {
            self.height = height;
        }
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(fill) = overrides.fill {
            self.fill = fill;
        }
        if let Some(rng_seed) = overrides.rng_seed {
            self.rng_seed = Some(rng_seed);
        }
        if let Some(bind) = overrides.bind {
            self.bind = bind;
        }
        if let Some(fill_file) = overrides.fill_file {
            self.fill_file = fill_file;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.height > 0 && self.width > 0,
            "grid must be at least 1x1, got {}x{}",
            self.height,
            self.width
        );
        ensure!(
            (MIN_FILL..=MAX_FILL).contains(&self.fill),
            "fill {} out of range {}..={}",
            self.fill,
            MIN_FILL,
            MAX_FILL
        );
        Ok(())
    }

    /// Seed for the first seeding pass.
    pub(crate) fn resolved_seed(&self) -> u64 {
        self.rng_seed.unwrap_or_else(clock_seed)
    }

    /// Server parameters derived from these settings.
    pub(crate) fn server_config(&self) -> ServerConfig {
        ServerConfig {
            height: self.height,
            width: self.width,
            fill: self.fill,
            rng_seed: self.resolved_seed(),
            fill_file: self.fill_file.clone(),
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
