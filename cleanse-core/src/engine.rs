// cleanse-core/src/engine.rs
//! Defines the core `CleanseEngine` trait and the per-file plan it produces.
//!
//! An engine looks at one [`SourceFile`] and decides what should happen to
//! it: redaction for sensitive files, link rewriting for ordinary ones, or
//! nothing at all. Planning is pure; reading and writing files is the
//! runner's job.
//!
//! License: MIT OR APACHE 2.0

use log::debug;

use crate::config::MirrorConfig;
use crate::errors::CleanseError;
use crate::links::LinkRewriter;
use crate::marker::{classify, SensitivityForm};
use crate::redaction::{render_lines, Redactor};
use crate::source::SourceFile;

/// What should happen to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    /// Zero-length file; nothing to classify.
    SkipEmpty,
    /// Ordinary file with no link to rewrite.
    Unchanged,
    /// Sensitive file whose content already equals its redaction.
    AlreadyRedacted { form: SensitivityForm },
    /// Sensitive file to overwrite with `content`.
    Redact {
        form: SensitivityForm,
        content: String,
        original_lines: usize,
        redacted_lines: usize,
    },
    /// Ordinary file to overwrite with rewritten links.
    RewriteLinks { content: String, replacements: usize },
}

impl FileAction {
    /// New file content, if the plan writes the file.
    pub fn new_content(&self) -> Option<&str> {
        match self {
            FileAction::Redact { content, .. } | FileAction::RewriteLinks { content, .. } => {
                Some(content.as_str())
            }
            _ => None,
        }
    }
}

/// A trait that defines how a mirror engine plans changes to files.
///
/// This decouples the tree runner from the classification and transform
/// logic, so runs can be driven by alternative engines in tests.
pub trait CleanseEngine {
    /// Decides what to do with `source`.
    ///
    /// # Errors
    /// [`CleanseError::MalformedSensitiveHeader`] when a long-form marker has
    /// no terminator.
    fn plan(&self, source: &SourceFile) -> Result<FileAction, CleanseError>;

    /// Returns a reference to the engine's configuration.
    fn config(&self) -> &MirrorConfig;
}

/// The marker-driven engine: first-line markers select redaction, everything
/// else goes through link rewriting.
#[derive(Debug, Clone)]
pub struct MarkerEngine {
    config: MirrorConfig,
    redactor: Redactor,
    links: LinkRewriter,
}

impl MarkerEngine {
    /// Builds an engine from a validated configuration.
    pub fn new(config: MirrorConfig) -> Result<Self, CleanseError> {
        config.validate()?;
        let redactor = Redactor::from_config(&config);
        let links = LinkRewriter::new(config.link_rewrites.clone());
        debug!(
            "MarkerEngine ready: {} template line(s), {} link rule(s), long form {}",
            redactor.template().lines().len(),
            links.rules().len(),
            if config.markers.long_form_enabled { "enabled" } else { "disabled" }
        );
        Ok(Self { config, redactor, links })
    }

    pub fn redactor(&self) -> &Redactor {
        &self.redactor
    }

    pub fn link_rewriter(&self) -> &LinkRewriter {
        &self.links
    }
}

impl CleanseEngine for MarkerEngine {
    fn plan(&self, source: &SourceFile) -> Result<FileAction, CleanseError> {
        let Some(first_line) = source.first_line() else {
            return Ok(FileAction::SkipEmpty);
        };

        match classify(first_line, &self.config.markers) {
            Some(form) => {
                let lines = self.redactor.redact(source, form)?;
                let content = render_lines(&lines);
                if content == source.content() {
                    return Ok(FileAction::AlreadyRedacted { form });
                }
                Ok(FileAction::Redact {
                    form,
                    original_lines: source.line_count(),
                    redacted_lines: lines.len(),
                    content,
                })
            }
            None => Ok(match self.links.rewrite(source.content()) {
                Some(rewrite) => FileAction::RewriteLinks {
                    content: rewrite.content,
                    replacements: rewrite.replacements,
                },
                None => FileAction::Unchanged,
            }),
        }
    }

    fn config(&self) -> &MirrorConfig {
        &self.config
    }
}
