//! The cleanse command: resolve configuration, run the engine over the
//! tree, and report progress, diffs and the summary on the console.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::io::{self, Write};
use std::path::Path;

use cleanse_core::{
    cleanse_tree, merge_config, CleanseEngine, CleanseError, FileAction, MirrorConfig,
    RunObserver, RunOptions, RunReport, SourceFile,
};

use crate::cli::Cli;
use crate::ui::diff_viewer;
use crate::ui::output_format;
use crate::ui::run_summary;
use crate::ui::theme::ThemeMap;

/// Options for the console side of a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanseOptions {
    pub dry_run: bool,
    pub diff: bool,
    pub quiet: bool,
    pub no_summary: bool,
}

impl From<&Cli> for CleanseOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            dry_run: cli.dry_run,
            diff: cli.diff,
            quiet: cli.quiet,
            no_summary: cli.no_summary,
        }
    }
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, supports_color);
}

/// Built-in defaults, then the `--config` file, then command-line flags.
pub fn resolve_config(cli: &Cli) -> Result<MirrorConfig> {
    let config = MirrorConfig::load(cli.config.as_deref())?;
    let config = merge_config(config, Some(cli.overrides()));
    config.validate().context("Invalid configuration")?;
    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

/// Prints per-file progress to stdout and per-file problems to stderr.
struct ConsoleObserver<'a> {
    theme: &'a ThemeMap,
    opts: CleanseOptions,
    color: bool,
}

impl<'a> ConsoleObserver<'a> {
    fn new(theme: &'a ThemeMap, opts: CleanseOptions) -> Self {
        Self { theme, opts, color: io::stdout().is_terminal() }
    }
}

impl RunObserver for ConsoleObserver<'_> {
    fn on_visit(&mut self, path: &Path) {
        if self.opts.quiet {
            return;
        }
        let mut out = io::stdout().lock();
        let _ = output_format::print_progress_message(
            &mut out,
            &format!("checking {}", path.display()),
            self.theme,
            self.color,
        );
    }

    fn on_action(&mut self, source: &SourceFile, action: &FileAction, written: bool) {
        let path = source.path().display();
        let message = match action {
            FileAction::Redact { .. } if written => format!("cleansed {}", path),
            FileAction::Redact { .. } => format!("would cleanse {}", path),
            FileAction::RewriteLinks { .. } if written => format!("rewrote links in {}", path),
            FileAction::RewriteLinks { .. } => format!("would rewrite links in {}", path),
            _ => return,
        };

        let mut out = io::stdout().lock();
        if !self.opts.quiet {
            let _ = output_format::print_success_message(&mut out, &message, self.theme, self.color);
        }
        if self.opts.diff {
            if let Some(updated) = action.new_content() {
                let label = source.path().to_string_lossy();
                let _ = diff_viewer::print_diff(&label, source.content(), updated, &mut out, self.theme, self.color);
                let _ = out.flush();
            }
        }
    }

    fn on_error(&mut self, _path: &Path, error: &CleanseError) {
        if error.is_batch_fatal() {
            error_msg(error.to_string(), self.theme);
        } else {
            warn_msg(error.to_string(), self.theme);
        }
    }
}

/// The main operation runner for the cleanse CLI.
pub fn run_cleanse(
    engine: &dyn CleanseEngine,
    opts: CleanseOptions,
    theme: &ThemeMap,
) -> Result<RunReport> {
    info!("Starting cleanse operation.");
    if opts.dry_run && !opts.quiet {
        info_msg("Dry run: no files will be written.", theme);
    }

    let mut observer = ConsoleObserver::new(theme, opts);
    let report = cleanse_tree(engine, RunOptions { dry_run: opts.dry_run }, &mut observer)
        .context("Cleanse run aborted")?;

    if !opts.no_summary && !opts.quiet {
        let stdout = io::stdout();
        let supports_color = stdout.is_terminal();
        run_summary::print_summary(&report, &mut stdout.lock(), theme, supports_color)?;
    }

    info!("Cleanse operation completed.");
    Ok(report)
}
