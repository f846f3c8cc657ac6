//! Themed one-line messages.
//!
//! Every helper takes the writer and a `supports_color` flag so callers
//! decide where output goes and tests can capture it uncolored.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

/// Writes `text` in the color configured for `entry`.
pub fn write_styled<W: Write + ?Sized>(
    writer: &mut W,
    text: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    match color_for(entry, theme) {
        Some(color) if supports_color => write!(writer, "{}", text.color(color)),
        _ => write!(writer, "{}", text),
    }
}

fn print_line<W: Write + ?Sized>(
    writer: &mut W,
    prefix: &str,
    msg: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    write_styled(writer, &format!("{}{}", prefix, msg), entry, theme, supports_color)?;
    writeln!(writer)
}

pub fn print_info_message<W: Write + ?Sized>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_line(writer, "", msg, ThemeEntry::Info, theme, supports_color)
}

pub fn print_progress_message<W: Write + ?Sized>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_line(writer, "", msg, ThemeEntry::Progress, theme, supports_color)
}

pub fn print_success_message<W: Write + ?Sized>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_line(writer, "    ", msg, ThemeEntry::Success, theme, supports_color)
}

pub fn print_warn_message<W: Write + ?Sized>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_line(writer, "Warning: ", msg, ThemeEntry::Warn, theme, supports_color)
}

pub fn print_error_message<W: Write + ?Sized>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_line(writer, "Error: ", msg, ThemeEntry::Error, theme, supports_color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    #[test]
    fn uncolored_output_is_plain() {
        let theme = ThemeStyle::default_theme_map();
        let mut buf = Vec::new();
        print_warn_message(&mut buf, "skipped a.ts", &theme, false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Warning: skipped a.ts\n");
    }

    #[test]
    fn colored_output_contains_escape_codes() {
        let theme = ThemeStyle::default_theme_map();
        let mut buf = Vec::new();
        print_error_message(&mut buf, "bad", &theme, true).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("\u{1b}["));
        assert!(out.contains("Error: bad"));
    }
}
