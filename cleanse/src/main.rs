// cleanse/src/main.rs
//! cleanse entry point.
//!
//! Resolves the configuration, builds the marker engine and runs it over the
//! tree. Exits non-zero when the run aborts or any file had a malformed
//! sensitive header.

use anyhow::{Context, Result};
use clap::Parser;

use cleanse::cli::Cli;
use cleanse::commands::cleanse::{error_msg, resolve_config, run_cleanse, CleanseOptions};
use cleanse::logger;
use cleanse::ui::theme::{build_theme_map, ThemeMap, ThemeStyle};
use cleanse_core::MarkerEngine;

fn main() {
    let cli = Cli::parse();
    logger::init_logger(cli.log_level());

    let theme_map = match build_theme_map(cli.theme.as_deref()).context("Theme error") {
        Ok(theme_map) => theme_map,
        Err(e) => fail(&e, &ThemeStyle::default_theme_map()),
    };

    if let Err(e) = run(&cli, &theme_map) {
        fail(&e, &theme_map);
    }
}

fn run(cli: &Cli, theme_map: &ThemeMap) -> Result<()> {
    let config = resolve_config(cli)?;
    let engine = MarkerEngine::new(config).context("Failed to build the cleanse engine")?;

    let report = run_cleanse(&engine, CleanseOptions::from(cli), theme_map)?;

    if report.has_fatal_failures() {
        let paths: Vec<String> = report
            .fatal_failures()
            .map(|f| f.path.display().to_string())
            .collect();
        anyhow::bail!("Malformed sensitive header in: {}", paths.join(", "));
    }
    Ok(())
}

fn fail(error: &anyhow::Error, theme_map: &ThemeMap) -> ! {
    error_msg(format!("{:#}", error), theme_map);
    std::process::exit(1);
}
