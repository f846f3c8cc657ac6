// cleanse/src/logger.rs
//! Logger setup for the `cleanse` binary and its tests.
//!
//! `RUST_LOG` is honoured unless a level is forced from the command line.
//! Safe to call more than once; only the first call installs the logger.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger`, defaulting to `warn` when `RUST_LOG` is unset.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).format_target(false);
    builder.try_init().ok();
}
