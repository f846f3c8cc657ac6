// cleanse-core/src/runner.rs
//! Batch runner: walk the tree, plan each file, write back what changed.
//!
//! Files are processed one at a time. Each file is read completely, its new
//! content computed in memory, and only then written, so no file's result
//! depends on another's and walk order does not matter.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::engine::{CleanseEngine, FileAction};
use crate::errors::CleanseError;
use crate::marker::SensitivityForm;
use crate::source::SourceFile;
use crate::walker::TreeWalker;
use crate::writer::write_atomic;

/// Options for a single run that are not part of the mirror configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Plan every change but write nothing.
    pub dry_run: bool,
}

/// Receives per-file events during a run.
///
/// The core never prints; front ends implement this to show progress.
pub trait RunObserver {
    fn on_visit(&mut self, _path: &Path) {}
    fn on_action(&mut self, _source: &SourceFile, _action: &FileAction, _written: bool) {}
    fn on_error(&mut self, _path: &Path, _error: &CleanseError) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// A file that could not be processed.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: CleanseError,
}

/// Counts and failures collected over a run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub dry_run: bool,
    pub visited: usize,
    pub redacted_short: usize,
    pub redacted_long: usize,
    pub already_redacted: usize,
    pub links_rewritten: usize,
    pub link_replacements: usize,
    pub unchanged: usize,
    pub skipped_empty: usize,
    pub failures: Vec<FileFailure>,
}

impl RunReport {
    pub fn redacted(&self) -> usize {
        self.redacted_short + self.redacted_long
    }

    /// Files written, or that would be written in a dry run.
    pub fn changed(&self) -> usize {
        self.redacted() + self.links_rewritten
    }

    /// Failures that should make the process exit non-zero.
    pub fn fatal_failures(&self) -> impl Iterator<Item = &FileFailure> {
        self.failures.iter().filter(|f| f.error.is_batch_fatal())
    }

    pub fn has_fatal_failures(&self) -> bool {
        self.fatal_failures().next().is_some()
    }

    fn record(&mut self, action: &FileAction) {
        match action {
            FileAction::SkipEmpty => self.skipped_empty += 1,
            FileAction::Unchanged => self.unchanged += 1,
            FileAction::AlreadyRedacted { .. } => self.already_redacted += 1,
            FileAction::Redact { form: SensitivityForm::Short, .. } => self.redacted_short += 1,
            FileAction::Redact { form: SensitivityForm::Long, .. } => self.redacted_long += 1,
            FileAction::RewriteLinks { replacements, .. } => {
                self.links_rewritten += 1;
                self.link_replacements += replacements;
            }
        }
    }
}

/// Runs the engine over every file the configured walker yields.
///
/// When the engine's configuration is fail-fast, the first batch-fatal error
/// (a malformed sensitive header) aborts the run and is returned. Every other
/// per-file error is logged, recorded in the report, and the run continues.
pub fn cleanse_tree(
    engine: &dyn CleanseEngine,
    options: RunOptions,
    observer: &mut dyn RunObserver,
) -> Result<RunReport, CleanseError> {
    let config = engine.config();
    let walker = TreeWalker::from_config(config);
    info!(
        "Starting cleanse run in {}{}",
        walker.root().display(),
        if options.dry_run { " (dry run)" } else { "" }
    );

    let mut report = RunReport { dry_run: options.dry_run, ..RunReport::default() };

    for path in walker.files() {
        report.visited += 1;
        observer.on_visit(&path);
        debug!("checking {}", path.display());

        let result = SourceFile::read(&path).and_then(|source| {
            let action = engine.plan(&source)?;
            let mut written = false;
            if let Some(content) = action.new_content() {
                if !options.dry_run {
                    write_atomic(&path, content)?;
                    written = true;
                }
            }
            Ok((source, action, written))
        });

        match result {
            Ok((source, action, written)) => {
                log_action(&path, &action, written);
                report.record(&action);
                observer.on_action(&source, &action, written);
            }
            Err(e) => {
                observer.on_error(&path, &e);
                if e.is_batch_fatal() && config.fail_fast {
                    error!("Aborting run: {}", e);
                    return Err(e);
                }
                warn!("{}", e);
                report.failures.push(FileFailure { path, error: e });
            }
        }
    }

    info!(
        "Cleanse run finished: {} visited, {} redacted, {} link-rewritten, {} failed.",
        report.visited,
        report.redacted(),
        report.links_rewritten,
        report.failures.len()
    );
    Ok(report)
}

fn log_action(path: &Path, action: &FileAction, written: bool) {
    let verb = |past: &'static str, planned: &'static str| if written { past } else { planned };
    match action {
        FileAction::Redact { form, original_lines, redacted_lines, .. } => info!(
            "{} {} ({}, {} -> {} lines)",
            verb("cleansed", "would cleanse"),
            path.display(),
            form,
            original_lines,
            redacted_lines
        ),
        FileAction::RewriteLinks { replacements, .. } => info!(
            "{} links in {} ({} replacement(s))",
            verb("rewrote", "would rewrite"),
            path.display(),
            replacements
        ),
        FileAction::AlreadyRedacted { .. } => debug!("{} is already redacted", path.display()),
        FileAction::Unchanged => debug!("{} unchanged", path.display()),
        FileAction::SkipEmpty => debug!("{} is empty; skipped", path.display()),
    }
}
