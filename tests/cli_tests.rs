//! CLI integration tests.
//!
//! Invokes the `evjson` binary as a subprocess.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

fn run(args: &[&str], input: &str) -> (i32, String, String) {
    let bin = env!("CARGO_BIN_EXE_evjson");
    let mut child = Command::new(bin)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|e| panic!("failed to spawn {bin}: {e}"));

    {
        let stdin = child.stdin.as_mut().unwrap();
        stdin.write_all(input.as_bytes()).unwrap();
    }

    let output = child.wait_with_output().unwrap();
    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

// ============================================================================
// format
// ============================================================================

#[test]
fn cli_format_compacts_stdin() {
    let (code, stdout, _) = run(&["format"], "{ \"a\" : 1 , \"b\" : [ 1 , 2 , 3 ] }\n");
    assert_eq!(code, 0);
    assert_eq!(stdout, "{\"a\":1,\"b\":[1,2,3]}\n");
}

#[test]
fn cli_format_reports_parse_error() {
    let (code, stdout, stderr) = run(&["format"], "{\"a\":1,}");
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert_eq!(stderr.trim(), "miss key");
}

#[test]
fn cli_format_reads_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/corpus/corpus.json");
    let (code, stdout, _) = run(&["format", path.to_str().unwrap()], "");
    assert_eq!(code, 0);
    assert!(stdout.starts_with("{\"version\":\"1\",\"vectors\":["));
}

#[test]
fn cli_missing_file_is_io_error() {
    let (code, _, stderr) = run(&["format", "no/such/file.json"], "");
    assert_eq!(code, 2);
    assert!(stderr.starts_with("error:"));
}

// ============================================================================
// check / echo
// ============================================================================

#[test]
fn cli_check_counts_events() {
    let (code, stdout, _) = run(&["check"], "[1, {\"k\": null}]");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok: 7 events");
}

#[test]
fn cli_echo_streams() {
    let (code, stdout, _) = run(&["echo"], " [ 1.50 , NaN ] ");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "[1.5,NaN]");
}

#[test]
fn cli_echo_prints_nothing_on_error() {
    let (code, stdout, stderr) = run(&["echo"], "[1, 2");
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert_eq!(stderr.trim(), "miss comma or square bracket");
}

// ============================================================================
// limits
// ============================================================================

#[test]
fn cli_max_depth() {
    let (code, _, stderr) = run(&["--max-depth", "1", "check"], "[[1]]");
    assert_eq!(code, 1);
    assert_eq!(stderr.trim(), "nesting too deep");

    let (code, _, _) = run(&["check", "--max-depth", "2"], "[[1]]");
    assert_eq!(code, 0);
}

#[test]
fn cli_unbounded() {
    let deep = format!("{}{}", "[".repeat(1000), "]".repeat(1000));
    let (code, _, stderr) = run(&["check"], &deep);
    assert_eq!(code, 1);
    assert_eq!(stderr.trim(), "nesting too deep");

    let (code, stdout, _) = run(&["--unbounded", "check"], &deep);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok: 2000 events");
}

// ============================================================================
// corpus
// ============================================================================

#[test]
fn cli_corpus_passes() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/corpus/corpus.json");
    let (code, stdout, _) = run(&["corpus", path.to_str().unwrap()], "");
    assert_eq!(code, 0, "{stdout}");
    assert!(stdout.contains("0 failed"));
}

#[test]
fn cli_corpus_missing_file_is_io_error() {
    let (code, stdout, stderr) = run(&["corpus", "no/such/corpus.json"], "");
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("error:"), "{stderr}");
}

#[test]
fn cli_corpus_failure_reports_once() {
    let dir = std::env::temp_dir().join(format!("evjson-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("failing.json");
    std::fs::write(
        &path,
        r#"{"version":"1","vectors":[{"id":"wrong","input":"[1]","expected":{"ok":"[2]"}}]}"#,
    )
    .unwrap();

    let (code, stdout, stderr) = run(&["corpus", path.to_str().unwrap()], "");
    let _ = std::fs::remove_dir_all(&dir);

    assert_eq!(code, 1);
    assert!(stdout.contains("FAIL wrong"), "{stdout}");
    assert_eq!(stdout.matches("1 failed").count(), 1);
    assert!(!stderr.contains("failed"), "{stderr}");
}
