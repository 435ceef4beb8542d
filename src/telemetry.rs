//! Logging setup for the `kobana` binary.
//!
//! Installs a `tracing` subscriber that writes human-readable events to stderr,
//! filtered by `RUST_LOG`. Standard output stays reserved for command results.

use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone)]
pub struct Telemetry {
    name: &'static str,
    version: &'static str,
    default_level: LevelFilter,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry {
    pub fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            default_level: LevelFilter::WARN,
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn with_version(mut self, version: &'static str) -> Self {
        self.version = version;
        self
    }

    /// Level used when `RUST_LOG` is unset.
    pub fn with_default_level(mut self, level: LevelFilter) -> Self {
        self.default_level = level;
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(self.default_level.into())
            .from_env_lossy()
    }

    /// Installs the global subscriber. Does nothing if one is already set.
    pub fn register(self) -> Self {
        let installed = tracing_subscriber::registry()
            .with(self.filter())
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .is_ok();
        if installed {
            tracing::debug!(name = self.name, version = self.version, "Logging initialized");
        }
        self
    }
}
