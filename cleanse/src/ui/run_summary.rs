// cleanse/src/ui/run_summary.rs
//! End-of-run summary table.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use std::io::Write;

use cleanse_core::RunReport;

use crate::ui::output_format::write_styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Builds the summary table for `report`.
pub fn build_summary_table(report: &RunReport, supports_color: bool) -> Table {
    let rows: [(&str, usize); 8] = [
        ("Files visited", report.visited),
        ("Redacted (short form)", report.redacted_short),
        ("Redacted (long form)", report.redacted_long),
        ("Already redacted", report.already_redacted),
        ("Links rewritten", report.links_rewritten),
        ("Unchanged", report.unchanged),
        ("Skipped (empty)", report.skipped_empty),
        ("Failed", report.failures.len()),
    ];

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Outcome", "Files"]);
    if !supports_color {
        table.force_no_tty();
    }

    for (label, count) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }
    table
}

/// Prints the title line, the summary table and one line per failure.
pub fn print_summary<W: Write + ?Sized>(
    report: &RunReport,
    writer: &mut W,
    theme: &ThemeMap,
    supports_color: bool,
) -> Result<()> {
    let title = if report.dry_run {
        "Cleanse summary (dry run, nothing written)"
    } else {
        "Cleanse summary"
    };
    write_styled(writer, title, ThemeEntry::Header, theme, supports_color)?;
    writeln!(writer)?;
    writeln!(writer, "{}", build_summary_table(report, supports_color))?;

    for failure in &report.failures {
        write_styled(writer, &format!("  {}", failure.error), ThemeEntry::Error, theme, supports_color)?;
        writeln!(writer)?;
    }
    Ok(())
}
