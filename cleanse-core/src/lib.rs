// cleanse-core/src/lib.rs
//! # cleanse Core Library
//!
//! `cleanse-core` turns a private source tree into the content of its public
//! mirror. Files whose first line carries a sensitivity marker are replaced
//! by a fixed redaction banner padded to the original line count; every other
//! file has its canonical repository links rewritten to the mirror's.
//!
//! The library does no console output. Front ends observe a run through the
//! [`RunObserver`] trait and the [`RunReport`] it returns.
//!
//! ## Modules
//!
//! * `config`: [`MirrorConfig`], the embedded defaults and user overrides.
//! * `marker`: first-line classification into [`SensitivityForm`]s.
//! * `redaction`: the [`RedactionTemplate`] and line-count preserving [`Redactor`].
//! * `links`: the substring based [`LinkRewriter`].
//! * `engine`: the [`CleanseEngine`] trait and the [`MarkerEngine`] that plans a [`FileAction`] per file.
//! * `walker`: the [`TreeWalker`] enumerating files to visit.
//! * `writer`: atomic in-place overwrites.
//! * `runner`: [`cleanse_tree`], the batch job tying it together.
//! * `errors`: the [`CleanseError`] taxonomy.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use cleanse_core::{cleanse_tree, MarkerEngine, MirrorConfig, NoopObserver, RunOptions};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     // 1. Built-in defaults, optionally merged with a user file.
//!     let config = MirrorConfig::load(None)?;
//!
//!     // 2. Build the engine; this validates the configuration.
//!     let engine = MarkerEngine::new(config)?;
//!
//!     // 3. Run over the configured root.
//!     let report = cleanse_tree(&engine, RunOptions::default(), &mut NoopObserver)?;
//!     println!("{} file(s) changed", report.changed());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Per-file failures are [`CleanseError`] values. Only a malformed long-form
//! marker is batch-fatal; everything else is recorded and the run continues.
//! Configuration loading uses `anyhow::Error` with file context.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod errors;
pub mod links;
pub mod marker;
pub mod redaction;
pub mod runner;
pub mod source;
pub mod walker;
pub mod writer;

/// Re-exports the configuration types.
pub use config::{merge_config, LinkRule, MarkerConfig, MarkerOverrides, MirrorConfig, PartialConfig};

/// Re-exports the custom error type for clear error reporting.
pub use errors::CleanseError;

/// Re-exports the engine trait and the default marker-driven engine.
pub use engine::{CleanseEngine, FileAction, MarkerEngine};

pub use links::{LinkRewrite, LinkRewriter};
pub use marker::{classify, SensitivityForm};
pub use redaction::{render_lines, RedactionTemplate, Redactor};
pub use source::SourceFile;
pub use walker::TreeWalker;
pub use writer::write_atomic;

/// Re-exports the batch runner and its reporting types.
pub use runner::{cleanse_tree, FileFailure, NoopObserver, RunObserver, RunOptions, RunReport};
