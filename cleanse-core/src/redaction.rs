// cleanse-core/src/redaction.rs
//! Line-count preserving redaction of sensitive files.
//!
//! A sensitive file is replaced by the redaction banner, followed (for the
//! long form) by the preserved preamble and a blank line, then padded with
//! placeholder lines until it has as many lines as the original. Output is
//! never shorter than the banner plus preamble, even when the original was.
//!
//! License: MIT OR APACHE 2.0

use log::debug;

use crate::config::{MarkerConfig, MirrorConfig};
use crate::errors::CleanseError;
use crate::marker::SensitivityForm;
use crate::source::SourceFile;

/// The fixed banner written at the top of every redacted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionTemplate {
    lines: Vec<String>,
}

impl RedactionTemplate {
    /// Builds a template from banner text: the text is trimmed, split into
    /// lines and followed by one blank line.
    pub fn new(text: &str) -> Self {
        let mut lines: Vec<String> = text.trim().lines().map(str::to_string).collect();
        lines.push(String::new());
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Applies redaction to files already classified as sensitive.
#[derive(Debug, Clone)]
pub struct Redactor {
    template: RedactionTemplate,
    markers: MarkerConfig,
}

impl Redactor {
    pub fn new(template: RedactionTemplate, markers: MarkerConfig) -> Self {
        Self { template, markers }
    }

    pub fn from_config(config: &MirrorConfig) -> Self {
        Self::new(
            RedactionTemplate::new(&config.redaction_template),
            config.markers.clone(),
        )
    }

    pub fn template(&self) -> &RedactionTemplate {
        &self.template
    }

    /// Computes the redacted lines for `source`.
    ///
    /// Fails with [`CleanseError::MalformedSensitiveHeader`] when a long-form
    /// marker has no terminator line.
    pub fn redact(
        &self,
        source: &SourceFile,
        form: SensitivityForm,
    ) -> Result<Vec<String>, CleanseError> {
        let original: Vec<&str> = source.lines().collect();

        if self.is_redacted(&original) {
            debug!("{} already has redacted shape", source.path().display());
            return Ok(original.into_iter().map(str::to_string).collect());
        }

        let mut lines = self.template.lines().to_vec();

        if form == SensitivityForm::Long {
            let trimmed: Vec<&str> = original.iter().map(|l| l.trim()).collect();
            let terminator = trimmed
                .iter()
                .skip(1)
                .position(|l| *l == self.markers.terminator)
                .map(|i| i + 1)
                .ok_or_else(|| CleanseError::MalformedSensitiveHeader {
                    path: source.path().to_path_buf(),
                    terminator: self.markers.terminator.clone(),
                })?;
            debug!(
                "{}: preserving {} preamble line(s)",
                source.path().display(),
                terminator - 1
            );
            lines.extend(trimmed[1..terminator].iter().map(|l| l.to_string()));
            lines.push(String::new());
        }

        if lines.len() < original.len() {
            lines.resize(original.len(), self.markers.placeholder.clone());
        }
        Ok(lines)
    }

    /// Whether `lines` is already the output of a redaction: the exact
    /// banner, an optional preserved preamble ending in a blank line, then
    /// only placeholder lines. Every preamble line must be blank or a
    /// comment line, so code hidden after a banner is redacted again.
    fn is_redacted(&self, lines: &[&str]) -> bool {
        let template = self.template.lines();
        if lines.len() < template.len() || lines[..template.len()] != *template {
            return false;
        }
        let rest = &lines[template.len()..];
        let body_end = rest
            .iter()
            .rposition(|l| *l != self.markers.placeholder)
            .map_or(0, |i| i + 1);
        let Some((last, block)) = rest[..body_end].split_last() else {
            return true;
        };
        if !last.is_empty() {
            return false;
        }
        match block.iter().find(|l| !is_comment_line(l)) {
            Some(line) => {
                debug!("Preamble line {:?} is not a comment; redacting again", line);
                false
            }
            None => true,
        }
    }
}

/// Blank lines and lines opening or continuing a comment.
fn is_comment_line(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('*') || line.starts_with("//") || line.starts_with("/*")
}

/// Joins redacted lines into file content with a single trailing newline.
pub fn render_lines(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
