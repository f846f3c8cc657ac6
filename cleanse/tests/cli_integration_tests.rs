// cleanse/tests/cli_integration_tests.rs
//! Command-line integration tests for the `cleanse` binary.
//!
//! Each test builds a small checkout in a temporary directory, runs the
//! binary from inside it the way the mirror job does, and inspects the files
//! and console output afterwards. `strip_ansi_escapes` keeps assertions
//! independent of terminal coloring.

use anyhow::Result;
#[allow(unused_imports)]
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[allow(unused_imports)]
use assert_cmd::prelude::*;
use assert_cmd::Command;

use strip_ansi_escapes::strip as strip_ansi_escapes_fn;

const CANONICAL: &str = "https://github.com/jeremy-rifkin/wheatley/";
const MIRROR: &str = "https://github.com/jeremy-rifkin/wheatley-mirror/";

/// Runs `cleanse` with `args` from inside `dir`.
fn run_cleanse_in(dir: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cleanse").unwrap();
    cmd.current_dir(dir);
    cmd.env_remove("CLEANSE_CONFIG");
    cmd.env("RUST_LOG", "debug");
    cmd.args(args);
    cmd.assert()
}

fn strip_ansi(bytes: &[u8]) -> String {
    String::from_utf8_lossy(&strip_ansi_escapes_fn(bytes)).to_string()
}

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn read(dir: &Path, rel: &str) -> String {
    fs::read_to_string(dir.join(rel)).unwrap()
}

fn sample_checkout() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "src/modules/anti_scam.ts",
        "/** sensitive */\nconst threshold = 3;\nexport function check() {}\n",
    );
    write(
        dir.path(),
        "src/modules/notify.ts",
        &format!("// see {}issues\nexport const x = 1;\n", CANONICAL),
    );
    write(dir.path(), "README.md", &format!("Source: {}\n", CANONICAL));
    write(dir.path(), ".git/config.ts", &format!("// {}\n", CANONICAL));
    write(dir.path(), "node_modules/dep/index.ts", "/** sensitive */\n");
    dir
}

#[test]
fn zero_argument_run_cleanses_current_directory() -> Result<()> {
    let dir = sample_checkout();
    let assert = run_cleanse_in(dir.path(), &[]).success();
    let stdout = strip_ansi(&assert.get_output().stdout);

    let redacted = read(dir.path(), "src/modules/anti_scam.ts");
    let lines: Vec<&str> = redacted.lines().collect();
    assert_eq!(lines[0], "/** sensitive */");
    assert_eq!(lines[1], "/****************************************************");
    assert_eq!(lines.len(), 9, "banner plus blank line sets the minimum length");
    assert!(!redacted.contains("threshold"));

    assert_eq!(
        read(dir.path(), "src/modules/notify.ts"),
        format!("// see {}issues\nexport const x = 1;\n", MIRROR)
    );

    // Only `.ts` files are visited by default; excluded directories are pruned.
    assert_eq!(read(dir.path(), "README.md"), format!("Source: {}\n", CANONICAL));
    assert_eq!(read(dir.path(), ".git/config.ts"), format!("// {}\n", CANONICAL));
    assert_eq!(read(dir.path(), "node_modules/dep/index.ts"), "/** sensitive */\n");

    assert!(stdout.contains("cleansed"));
    assert!(stdout.contains("rewrote links in"));
    assert!(stdout.contains("Cleanse summary"));
    Ok(())
}

#[test]
fn long_form_preamble_survives_redaction() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let original = "/** sensitive\n * Heuristics for spam detection.\n */\n\
                    const a = 1;\nconst b = 2;\nconst c = 3;\nconst d = 4;\nconst e = 5;\n\
                    const f = 6;\nconst g = 7;\nconst h = 8;\nconst i = 9;\nconst j = 10;\n";
    write(dir.path(), "spam.ts", original);

    run_cleanse_in(dir.path(), &[]).success();

    let redacted = read(dir.path(), "spam.ts");
    let lines: Vec<&str> = redacted.lines().collect();
    assert_eq!(lines.len(), original.lines().count());
    assert_eq!(lines[9], "* Heuristics for spam detection.");
    assert_eq!(lines[10], "");
    assert!(lines[11..].iter().all(|l| *l == "/**/"));
    Ok(())
}

#[test]
fn second_run_changes_nothing() -> Result<()> {
    let dir = sample_checkout();
    run_cleanse_in(dir.path(), &[]).success();
    let first = read(dir.path(), "src/modules/anti_scam.ts");
    let notify = read(dir.path(), "src/modules/notify.ts");

    let assert = run_cleanse_in(dir.path(), &[]).success();
    let stdout = strip_ansi(&assert.get_output().stdout);

    assert_eq!(read(dir.path(), "src/modules/anti_scam.ts"), first);
    assert_eq!(read(dir.path(), "src/modules/notify.ts"), notify);
    assert!(!stdout.contains("cleansed"));
    assert!(!stdout.contains("rewrote links in"));
    Ok(())
}

#[test]
fn dry_run_with_diff_writes_nothing() -> Result<()> {
    let dir = sample_checkout();
    let assert = run_cleanse_in(dir.path(), &["--dry-run", "--diff"]).success();
    let stdout = strip_ansi(&assert.get_output().stdout);

    assert_eq!(
        read(dir.path(), "src/modules/anti_scam.ts"),
        "/** sensitive */\nconst threshold = 3;\nexport function check() {}\n"
    );
    assert!(read(dir.path(), "src/modules/notify.ts").contains(CANONICAL));

    assert!(stdout.contains("would cleanse"));
    assert!(stdout.contains("would rewrite links in"));
    assert!(stdout.contains(&format!("+// see {}issues", MIRROR)));
    assert!(stdout.contains("-const threshold = 3;"));
    assert!(stdout.contains("dry run, nothing written"));
    Ok(())
}

#[test]
fn malformed_header_fails_the_run() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write(dir.path(), "broken.ts", "/** sensitive\nno terminator here\n");

    let assert = run_cleanse_in(dir.path(), &[]).failure();
    let stderr = strip_ansi(&assert.get_output().stderr);
    assert!(stderr.contains("broken.ts"));
    assert!(stderr.contains("no terminating '*/' line"));
    assert!(stderr.contains("Error: Cleanse run aborted"));
    assert_eq!(read(dir.path(), "broken.ts"), "/** sensitive\nno terminator here\n");
    Ok(())
}

#[test]
fn keep_going_processes_remaining_files_but_still_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write(dir.path(), "a_broken.ts", "/** sensitive\nno terminator here\n");
    write(dir.path(), "b_links.ts", &format!("// {}\n", CANONICAL));

    let assert = run_cleanse_in(dir.path(), &["--keep-going"]).failure();
    let stderr = strip_ansi(&assert.get_output().stderr);

    assert_eq!(read(dir.path(), "b_links.ts"), format!("// {}\n", MIRROR));
    assert!(stderr.contains("Malformed sensitive header in:"));
    assert!(stderr.contains("a_broken.ts"));
    Ok(())
}

#[test]
fn no_long_form_treats_long_marker_as_ordinary() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let original = format!("/** sensitive\n * notes\n// {}\n", CANONICAL);
    write(dir.path(), "notes.ts", &original);

    run_cleanse_in(dir.path(), &["--no-long-form"]).success();
    assert_eq!(read(dir.path(), "notes.ts"), format!("/** sensitive\n * notes\n// {}\n", MIRROR));
    Ok(())
}

#[test]
fn all_files_and_extension_flags_change_the_filter() -> Result<()> {
    let dir = sample_checkout();
    run_cleanse_in(dir.path(), &["--ext", "md"]).success();
    assert_eq!(read(dir.path(), "README.md"), format!("Source: {}\n", MIRROR));
    assert!(read(dir.path(), "src/modules/notify.ts").contains(CANONICAL));

    run_cleanse_in(dir.path(), &["--all-files"]).success();
    assert!(read(dir.path(), "src/modules/notify.ts").contains(MIRROR));
    assert_eq!(read(dir.path(), ".git/config.ts"), format!("// {}\n", CANONICAL));
    Ok(())
}

#[test]
fn config_file_overrides_defaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write(dir.path(), "lib/a.ts", "/** secret */\nline\nline\n");
    write(dir.path(), "lib/b.ts", "see https://old.example/x\n");
    write(
        dir.path(),
        "mirror.yaml",
        "markers:\n  short_form: \"/** secret */\"\n\
         redaction_template: \"/** secret */\\n// removed\\n\"\n\
         link_rewrites:\n  - from: \"https://old.example/\"\n    to: \"https://new.example/\"\n",
    );

    run_cleanse_in(dir.path(), &["--config", "mirror.yaml", "--root", "lib"]).success();

    assert_eq!(read(dir.path(), "lib/a.ts"), "/** secret */\n// removed\n\n");
    assert_eq!(read(dir.path(), "lib/b.ts"), "see https://new.example/x\n");
    Ok(())
}

#[test]
fn invalid_config_is_reported() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write(dir.path(), "bad.yaml", "no_such_key: true\n");

    let assert = run_cleanse_in(dir.path(), &["--config", "bad.yaml"]).failure().code(1);
    let stderr = strip_ansi(&assert.get_output().stderr);
    assert!(stderr.contains("Error: Failed to parse config file bad.yaml"));
    assert!(!stderr.contains("Caused by:"));
    Ok(())
}

#[test]
fn padded_marker_in_config_is_rejected() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write(dir.path(), "a.ts", "/** sensitive */
secret();
");
    write(dir.path(), "padded.yaml", "markers:\n  short_form: \"/** sensitive */ \"\n");

    run_cleanse_in(dir.path(), &["--config", "padded.yaml"])
        .failure()
        .stderr(predicate::str::contains("markers.short_form"));
    assert_eq!(read(dir.path(), "a.ts"), "/** sensitive */\nsecret();\n");
    Ok(())
}

#[test]
fn quiet_suppresses_progress_and_summary() -> Result<()> {
    let dir = sample_checkout();
    let assert = run_cleanse_in(dir.path(), &["-q"]).success();
    let stdout = strip_ansi(&assert.get_output().stdout);

    assert!(stdout.is_empty(), "unexpected stdout: {}", stdout);
    assert!(!read(dir.path(), "src/modules/anti_scam.ts").contains("threshold"));
    Ok(())
}
