//! Configuration management for `cleanse-core`.
//!
//! This module defines the configuration surface of a mirror run: the walk
//! root, excluded directory names, extension filter, marker literals, link
//! rewrite rules and the redaction banner. The built-in defaults are embedded
//! from `config/default_config.yaml`; a user YAML file is parsed into a
//! [`PartialConfig`] and merged over them key by key.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::CleanseError;

/// Literals that mark a file as sensitive, and the lines emitted around them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MarkerConfig {
    /// Self-terminating first-line marker, e.g. `/** sensitive */`.
    pub short_form: String,
    /// Marker that opens a preamble block, e.g. `/** sensitive`.
    pub long_form: String,
    /// Whether the long form is recognised at all.
    pub long_form_enabled: bool,
    /// Line that closes a long-form preamble.
    pub terminator: String,
    /// Padding line used to restore the original line count.
    pub placeholder: String,
}

/// A literal substring replacement applied to ordinary files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct LinkRule {
    pub from: String,
    pub to: String,
}

/// Fully resolved configuration for a run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MirrorConfig {
    pub root: PathBuf,
    pub exclude_dirs: Vec<String>,
    /// Extensions (without the dot) to visit. Empty means every file.
    pub extensions: Vec<String>,
    pub markers: MarkerConfig,
    pub link_rewrites: Vec<LinkRule>,
    /// Banner text. Its first line must equal `markers.short_form`.
    pub redaction_template: String,
    /// Abort the batch on the first malformed sensitive header.
    pub fail_fast: bool,
}

/// Marker overrides from a user file. Omitted keys keep the default.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerOverrides {
    pub short_form: Option<String>,
    pub long_form: Option<String>,
    pub long_form_enabled: Option<bool>,
    pub terminator: Option<String>,
    pub placeholder: Option<String>,
}

/// A user configuration file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialConfig {
    pub root: Option<PathBuf>,
    pub exclude_dirs: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
    pub markers: Option<MarkerOverrides>,
    pub link_rewrites: Option<Vec<LinkRule>>,
    pub redaction_template: Option<String>,
    pub fail_fast: Option<bool>,
}

impl PartialConfig {
    /// Loads a user configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading mirror configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parses a user configuration from YAML text. An empty document is an empty override.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let partial: PartialConfig = serde_yml::from_str(text)?;
        Ok(partial)
    }
}

impl MirrorConfig {
    /// Loads the built-in configuration embedded in the library.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default mirror configuration from embedded string...");
        let default_yaml = include_str!("../config/default_config.yaml");
        let config: MirrorConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the defaults and merges an optional user file over them.
    pub fn load(user_path: Option<&Path>) -> Result<Self> {
        let defaults = Self::load_default()?;
        let user = user_path.map(PartialConfig::load_from_file).transpose()?;
        let merged = merge_config(defaults, user);
        merged
            .validate()
            .context("Merged configuration failed validation")?;
        Ok(merged)
    }

    /// Checks the invariants the transforms rely on.
    pub fn validate(&self) -> Result<(), CleanseError> {
        let mut errors = Vec::new();
        let markers = &self.markers;

        if markers.short_form.trim().is_empty() {
            errors.push("`markers.short_form` is empty.".to_string());
        }
        if markers.long_form_enabled && markers.long_form.trim().is_empty() {
            errors.push("`markers.long_form` is empty while long-form markers are enabled.".to_string());
        }
        if markers.terminator.trim().is_empty() {
            errors.push("`markers.terminator` is empty.".to_string());
        }
        if markers.placeholder.is_empty() {
            errors.push("`markers.placeholder` is empty.".to_string());
        }

        // First lines and terminators are trimmed before comparison.
        for (key, literal) in [
            ("short_form", &markers.short_form),
            ("long_form", &markers.long_form),
            ("terminator", &markers.terminator),
        ] {
            if literal.trim() != literal.as_str() {
                errors.push(format!(
                    "`markers.{}` has leading or trailing whitespace ({:?}); it would never match.",
                    key, literal
                ));
            }
        }

        let first_template_line = self.redaction_template.trim().lines().next().unwrap_or("").trim();
        if first_template_line != markers.short_form.trim() {
            errors.push(format!(
                "`redaction_template` must begin with the short-form marker '{}', found '{}'.",
                markers.short_form, first_template_line
            ));
        }

        for (i, rule) in self.link_rewrites.iter().enumerate() {
            if rule.from.is_empty() {
                errors.push(format!("Link rewrite #{} has an empty `from` field.", i + 1));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CleanseError::InvalidConfig(errors.join("\n")))
        }
    }
}

/// Merges a user configuration over the defaults.
pub fn merge_config(defaults: MirrorConfig, user: Option<PartialConfig>) -> MirrorConfig {
    let Some(user) = user else {
        debug!("No user configuration provided; using defaults.");
        return defaults;
    };

    let mut merged = defaults;
    if let Some(root) = user.root {
        debug!("Overriding root with user value: {}", root.display());
        merged.root = root;
    }
    if let Some(exclude_dirs) = user.exclude_dirs {
        debug!("Overriding excluded directories: {:?}", exclude_dirs);
        merged.exclude_dirs = exclude_dirs;
    }
    if let Some(extensions) = user.extensions {
        debug!("Overriding extension filter: {:?}", extensions);
        merged.extensions = extensions;
    }
    if let Some(markers) = user.markers {
        let target = &mut merged.markers;
        if let Some(v) = markers.short_form {
            target.short_form = v;
        }
        if let Some(v) = markers.long_form {
            target.long_form = v;
        }
        if let Some(v) = markers.long_form_enabled {
            target.long_form_enabled = v;
        }
        if let Some(v) = markers.terminator {
            target.terminator = v;
        }
        if let Some(v) = markers.placeholder {
            target.placeholder = v;
        }
    }
    if let Some(link_rewrites) = user.link_rewrites {
        debug!("Overriding link rewrites with {} user rule(s).", link_rewrites.len());
        merged.link_rewrites = link_rewrites;
    }
    if let Some(template) = user.redaction_template {
        merged.redaction_template = template;
    }
    if let Some(fail_fast) = user.fail_fast {
        merged.fail_fast = fail_fast;
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = MirrorConfig::load_default().unwrap();
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.exclude_dirs, vec![".git".to_string(), "node_modules".to_string()]);
        assert_eq!(config.extensions, vec!["ts".to_string()]);
        assert_eq!(config.markers.short_form, "/** sensitive */");
        assert_eq!(config.markers.long_form, "/** sensitive");
        assert!(config.markers.long_form_enabled);
        assert_eq!(config.link_rewrites.len(), 1);
        assert!(config.fail_fast);
    }

    #[test]
    fn template_must_start_with_short_marker() {
        let mut config = MirrorConfig::load_default().unwrap();
        config.redaction_template = "// redacted\n".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, CleanseError::InvalidConfig(ref msg) if msg.contains("redaction_template")));
    }

    #[test]
    fn empty_link_source_is_rejected() {
        let mut config = MirrorConfig::load_default().unwrap();
        config.link_rewrites.push(LinkRule { from: String::new(), to: "x".to_string() });
        assert!(config.validate().is_err());
    }

    #[test]
    fn long_form_literal_may_be_empty_when_disabled() {
        let mut config = MirrorConfig::load_default().unwrap();
        config.markers.long_form = String::new();
        assert!(config.validate().is_err());
        config.markers.long_form_enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn padded_marker_literals_are_rejected() {
        let defaults = MirrorConfig::load_default().unwrap();
        let user = PartialConfig::from_yaml("markers:\n  short_form: \"/** sensitive */ \"\n").unwrap();
        let merged = merge_config(defaults.clone(), Some(user));
        let err = merged.validate().unwrap_err();
        assert!(matches!(err, CleanseError::InvalidConfig(ref msg) if msg.contains("markers.short_form")));

        let mut config = defaults;
        config.markers.terminator = " */".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, CleanseError::InvalidConfig(ref msg) if msg.contains("markers.terminator")));
    }

    #[test]
    fn merge_overrides_only_given_keys() {
        let defaults = MirrorConfig::load_default().unwrap();
        let user = PartialConfig::from_yaml(
            "extensions: []\nmarkers:\n  long_form_enabled: false\n",
        )
        .unwrap();
        let merged = merge_config(defaults.clone(), Some(user));
        assert!(merged.extensions.is_empty());
        assert!(!merged.markers.long_form_enabled);
        assert_eq!(merged.markers.short_form, defaults.markers.short_form);
        assert_eq!(merged.exclude_dirs, defaults.exclude_dirs);
        assert_eq!(merged.redaction_template, defaults.redaction_template);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(PartialConfig::from_yaml("exclude_dir: [\".git\"]\n").is_err());
    }
}
