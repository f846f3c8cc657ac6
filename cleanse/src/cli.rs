// cleanse/src/cli.rs
//! Command-line interface for the `cleanse` binary.
//!
//! Every flag is optional: run with no arguments, `cleanse` processes the
//! current directory with the built-in configuration. Flags override the
//! configuration file, which overrides the built-in defaults.

use clap::Parser;
use std::path::PathBuf;

use cleanse_core::{MarkerOverrides, PartialConfig};

/// Top-level CLI definition.
#[derive(Parser, Debug, Default)]
#[command(
    name = "cleanse",
    version = env!("CARGO_PKG_VERSION"),
    about = "Prepare a public mirror of a private repository",
    long_about = "cleanse walks a source tree and overwrites every file whose first line is a sensitivity marker with a fixed redaction notice, keeping the file's line count. All other files have their canonical repository links rewritten to the mirror's. Run it with no arguments from the root of a checkout."
)]
pub struct Cli {
    /// Path to a YAML configuration merged over the built-in defaults.
    #[arg(long, value_name = "FILE", env = "CLEANSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory to walk (defaults to the configured root, usually `.`).
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Directory names never descended into (comma-separated, replaces the configured set).
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Only visit files with these extensions (comma-separated, replaces the configured filter).
    #[arg(long = "ext", value_name = "EXTS", value_delimiter = ',', conflicts_with = "all_files")]
    pub extensions: Option<Vec<String>>,

    /// Visit every file regardless of extension.
    #[arg(long)]
    pub all_files: bool,

    /// Treat `/** sensitive` (long-form marker) files as ordinary.
    #[arg(long)]
    pub no_long_form: bool,

    /// Record malformed sensitive headers and keep going instead of aborting.
    #[arg(long)]
    pub keep_going: bool,

    /// Report what would change without writing anything.
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Show a unified diff for every changed file.
    #[arg(long, short = 'D')]
    pub diff: bool,

    /// Path to a custom YAML theme file.
    #[arg(long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Suppress progress output and the summary; warnings and errors are still printed.
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long, short = 'd', conflicts_with = "quiet")]
    pub debug: bool,

    /// Do not print the summary table at the end of the run.
    #[arg(long)]
    pub no_summary: bool,
}

impl Cli {
    /// Configuration overrides expressed by the command-line flags.
    pub fn overrides(&self) -> PartialConfig {
        let extensions = if self.all_files {
            Some(Vec::new())
        } else {
            self.extensions.clone()
        };
        let markers = self.no_long_form.then(|| MarkerOverrides {
            long_form_enabled: Some(false),
            ..MarkerOverrides::default()
        });
        PartialConfig {
            root: self.root.clone(),
            exclude_dirs: self.exclude.clone(),
            extensions,
            markers,
            fail_fast: self.keep_going.then_some(false),
            ..PartialConfig::default()
        }
    }

    /// Log level forced by `--quiet` / `--debug`, if any.
    pub fn log_level(&self) -> Option<log::LevelFilter> {
        if self.debug {
            Some(log::LevelFilter::Debug)
        } else if self.quiet {
            Some(log::LevelFilter::Error)
        } else {
            None
        }
    }
}
