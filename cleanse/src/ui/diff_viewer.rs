// cleanse/src/ui/diff_viewer.rs
//! Unified diff of a planned change, for `--diff`.
//!
//! Highlights exactly what a run removes (red) and adds (green) in a file.

use anyhow::Result;
use diffy::{create_patch, Line as DiffLine};
use std::io::Write;

use crate::ui::output_format::write_styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Writes a unified diff between `original` and `updated` for `label`.
pub fn print_diff<W: Write + ?Sized>(
    label: &str,
    original: &str,
    updated: &str,
    writer: &mut W,
    theme: &ThemeMap,
    supports_color: bool,
) -> Result<()> {
    let patch = create_patch(original, updated);

    write_styled(writer, &format!("--- a/{}\n+++ b/{}", label, label), ThemeEntry::DiffHeader, theme, supports_color)?;
    writeln!(writer)?;

    if patch.hunks().is_empty() {
        writeln!(writer, "No changes detected.")?;
        return Ok(());
    }

    for hunk in patch.hunks() {
        let old = hunk.old_range();
        let new = hunk.new_range();
        let header = format!("@@ -{},{} +{},{} @@", old.start(), old.len(), new.start(), new.len());
        write_styled(writer, &header, ThemeEntry::DiffHeader, theme, supports_color)?;
        writeln!(writer)?;

        for line in hunk.lines() {
            match line {
                DiffLine::Delete(s) => {
                    write_styled(writer, &format!("-{}", trim_newline(s)), ThemeEntry::DiffRemoved, theme, supports_color)?;
                }
                DiffLine::Insert(s) => {
                    write_styled(writer, &format!("+{}", trim_newline(s)), ThemeEntry::DiffAdded, theme, supports_color)?;
                }
                DiffLine::Context(s) => {
                    write!(writer, " {}", trim_newline(s))?;
                }
            }
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn trim_newline(s: &str) -> &str {
    s.strip_suffix('\n').map(|s| s.strip_suffix('\r').unwrap_or(s)).unwrap_or(s)
}
