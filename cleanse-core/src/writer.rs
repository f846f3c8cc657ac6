// cleanse-core/src/writer.rs
//! Atomic in-place overwrites.
//!
//! New content is written to a sibling temporary file under an exclusive
//! lock and then renamed over the target, so an interrupted run leaves
//! either the old file or the new one, never a mix.

use log::debug;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::CleanseError;

/// Suffix of the temporary file written next to the target.
pub const TMP_SUFFIX: &str = ".cleanse.tmp";

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(TMP_SUFFIX);
    path.with_file_name(name)
}

/// Replaces the content of `path` with `content`, keeping its permissions.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), CleanseError> {
    let io_err = |e: std::io::Error| CleanseError::from_io(path, e);

    let permissions = fs::metadata(path).map_err(io_err)?.permissions();
    let tmp_path = tmp_path_for(path);
    debug!("Writing {} via {}", path.display(), tmp_path.display());

    let result = (|| -> std::io::Result<()> {
        let mut tmp = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp_path)?;
        fs2::FileExt::lock_exclusive(&tmp)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.sync_all()?;
        fs2::FileExt::unlock(&tmp)?;
        drop(tmp);
        fs::set_permissions(&tmp_path, permissions)?;
        fs::rename(&tmp_path, path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_err(e));
    }
    Ok(())
}
