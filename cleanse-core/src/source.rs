// cleanse-core/src/source.rs
//! A file read fully into memory for classification and transformation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::CleanseError;

/// Decoded text content of one file, together with its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: String) -> Self {
        Self { path: path.into(), content }
    }

    /// Reads and decodes `path`. The whole file is read before anything is
    /// written back to it.
    pub fn read(path: &Path) -> Result<Self, CleanseError> {
        let bytes = fs::read(path).map_err(|e| CleanseError::from_io(path, e))?;
        let content = String::from_utf8(bytes).map_err(|_| CleanseError::Encoding(path.to_path_buf()))?;
        Ok(Self::new(path, content))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Lines without their terminators. A final line without a trailing
    /// newline still counts; a trailing newline does not add an empty line.
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.content.lines()
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    pub fn first_line(&self) -> Option<&str> {
        self.lines().next()
    }
}
