// cleanse-core/src/marker.rs
//! First-line sensitivity markers.
//!
//! A file is sensitive when its first line, trimmed of surrounding
//! whitespace, equals one of the configured marker literals. Nothing else in
//! the file is inspected to classify it.

use log::debug;
use std::fmt;

use crate::config::MarkerConfig;

/// Which marker a sensitive file starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensitivityForm {
    /// `/** sensitive */` on a line of its own.
    Short,
    /// `/** sensitive` opening a preamble closed by a terminator line.
    Long,
}

impl fmt::Display for SensitivityForm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SensitivityForm::Short => write!(f, "short-form"),
            SensitivityForm::Long => write!(f, "long-form"),
        }
    }
}

/// Classifies a file by its first line. `None` means the file is ordinary.
pub fn classify(first_line: &str, markers: &MarkerConfig) -> Option<SensitivityForm> {
    let trimmed = first_line.trim();
    if trimmed == markers.short_form {
        return Some(SensitivityForm::Short);
    }
    if trimmed == markers.long_form {
        if markers.long_form_enabled {
            return Some(SensitivityForm::Long);
        }
        debug!("Long-form marker found but long-form support is disabled; treating file as ordinary.");
    }
    None
}
