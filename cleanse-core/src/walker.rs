// cleanse-core/src/walker.rs
//! Recursive enumeration of the files a run should visit.

use log::{debug, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::MirrorConfig;
use crate::writer::TMP_SUFFIX;

/// Walks a root directory, pruning excluded directory names and applying an
/// optional extension filter.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
    exclude_dirs: HashSet<String>,
    extensions: Vec<String>,
}

impl TreeWalker {
    pub fn new<I, S>(root: impl Into<PathBuf>, exclude_dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: root.into(),
            exclude_dirs: exclude_dirs.into_iter().map(Into::into).collect(),
            extensions: Vec::new(),
        }
    }

    pub fn from_config(config: &MirrorConfig) -> Self {
        Self::new(config.root.clone(), config.exclude_dirs.iter().cloned())
            .with_extensions(config.extensions.clone())
    }

    /// Restricts output to files with these extensions. Empty means all files.
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .collect();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.exclude_dirs.contains(name))
    }

    fn wants_file(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return self.extensions.is_empty();
        };
        if name.ends_with(TMP_SUFFIX) {
            return false;
        }
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }

    /// Lazily yields every matching regular file under the root.
    ///
    /// A missing root yields nothing. Unreadable entries are logged and skipped.
    pub fn files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        if !self.root.exists() {
            debug!("Walk root {} does not exist; nothing to do.", self.root.display());
        }
        WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(move |entry| {
                let excluded = self.is_excluded_dir(entry);
                if excluded {
                    debug!("Skipping excluded directory {}", entry.path().display());
                }
                !excluded
            })
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    if e.depth() == 0 && e.io_error().is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound) {
                        return None;
                    }
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(DirEntry::into_path)
            .filter(move |path| self.wants_file(path))
    }
}
