//! CLI integration tests
//!
//! End-to-end tests for the html2md command-line interface.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a Command for the html2md binary
fn html2md() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("html2md").expect("Failed to find html2md binary")
}

/// Create a temporary directory containing `page.html`
fn setup_page(html: &[u8]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("page.html"), html).expect("Failed to write test file");
    dir
}

#[test]
fn test_help_output() {
    html2md()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Convert HTML documents to Markdown"))
        .stdout(predicate::str::contains("--filter-tags"));
}

#[test]
fn test_file_to_stdout() {
    let dir = setup_page(b"<h1>Title</h1><p>Hello <b>world</b>.</p>");
    html2md()
        .arg(dir.path().join("page.html"))
        .assert()
        .success()
        .stdout("# Title\n\nHello **world**.\n\n");
}

#[test]
fn test_stdin_to_stdout() {
    html2md()
        .write_stdin("<ul><li>A<ul><li>B</li></ul></li></ul>")
        .assert()
        .success()
        .stdout("- A\n    - B\n\n")
        .stderr("");
}

#[test]
fn test_output_file() {
    let dir = setup_page(b"<p>saved</p>");
    let output = dir.path().join("page.md");
    html2md()
        .arg(dir.path().join("page.html"))
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout("");

    let written = fs::read_to_string(&output).expect("Failed to read output");
    assert_eq!(written, "saved\n\n");
}

#[test]
fn test_filter_tags_flag() {
    html2md()
        .args(["--filter-tags", "script", "--filter-tags", "aside"])
        .write_stdin("<p>keep</p><script>alert(1)</script><aside>side</aside>")
        .assert()
        .success()
        .stdout("keep\n\n");
}

#[test]
fn test_filter_tags_comma_separated() {
    html2md()
        .args(["--filter-tags", "nav,footer"])
        .write_stdin("<nav>menu</nav><p>body</p><footer>foot</footer>")
        .assert()
        .success()
        .stdout("body\n\n");
}

#[test]
fn test_strip_non_content() {
    html2md()
        .arg("--strip-non-content")
        .write_stdin("<p>Text</p><noscript>Enable JS</noscript><script>x()</script>")
        .assert()
        .success()
        .stdout("Text\n\n");
}

#[test]
fn test_max_depth_flag() {
    html2md()
        .args(["--max-depth", "1"])
        .write_stdin("<ul><li>A<ul><li>B</li></ul></li></ul>")
        .assert()
        .success()
        .stdout("- A\n- B\n\n");
}

#[test]
fn test_legacy_charset_file() {
    let dir = setup_page(b"<meta charset=\"windows-1252\"><p>Caf\xE9 \x80 10</p>");
    html2md()
        .arg(dir.path().join("page.html"))
        .assert()
        .success()
        .stdout("Café € 10\n\n");
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let missing = dir.path().join("missing.html");
    html2md()
        .arg(&missing)
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("missing.html"));
}

#[test]
fn test_unwritable_output() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let output = dir.path().join("no-such-dir").join("out.md");
    html2md()
        .arg("-o")
        .arg(&output)
        .write_stdin("<p>x</p>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("out.md"));
}

#[test]
fn test_max_size_flag() {
    html2md()
        .args(["--max-size", "8"])
        .write_stdin("<p>too long</p>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds maximum size"));

    html2md()
        .args(["--max-size", "0"])
        .write_stdin("<p>fine</p>")
        .assert()
        .success()
        .stdout("fine\n\n");
}

#[test]
fn test_invalid_utf8_fails() {
    html2md()
        .write_stdin(b"<p>\xC3\x28</p>".as_slice())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Encoding error"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    html2md()
        .arg("--verbose")
        .write_stdin("<p>x</p>")
        .assert()
        .success()
        .stdout("x\n\n")
        .stderr(predicate::str::contains("conversion complete"));
}
