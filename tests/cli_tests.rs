//! Integration tests: the cookiebar binary against a jar on disk and local fragments.
//!
//! Every run uses `--country` or the default assume-EU mode, so nothing
//! touches the network.

use serde_json::Value;
use std::path::Path;
use std::process::Command;

const SCRIPT: &str = "https://cdn.example/cookiebar/cookiebar.js";

fn fragments_dir() -> String {
    format!("{}/crates/cookiebar-banner/tests/fixtures", env!("CARGO_MANIFEST_DIR"))
}

fn run(jar: &Path, args: &[&str]) -> Value {
    let output = Command::new(env!("CARGO_BIN_EXE_cookiebar"))
        .arg("--config")
        .arg(jar.with_file_name("absent.toml"))
        .arg("--jar")
        .arg(jar)
        .args(args)
        .output()
        .expect("failed to run cookiebar");
    assert!(
        output.status.success(),
        "cookiebar {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    if stdout.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("bad json {stdout:?}: {e}"))
    }
}

fn visit(jar: &Path, query: &str, extra: &[&str]) -> Value {
    let script = format!("{SCRIPT}{query}");
    let dir = fragments_dir();
    let mut args = vec!["visit", "--script-url", &script, "--fragments", &dir];
    args.extend_from_slice(extra);
    run(jar, &args)
}

// ===========================================================================
// Page loads
// ===========================================================================

#[test]
fn fresh_visit_shows_banner() {
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("jar.json");
    let out = visit(&jar, "", &[]);
    assert_eq!(out["resolution"]["verdict"]["verdict"], "must_prompt");
    assert_eq!(out["banner"]["state"], "shown");
}

#[test]
fn accept_is_remembered() {
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("jar.json");

    let out = visit(&jar, "", &["--action", "accept"]);
    assert_eq!(out["banner"]["state"], "accepted");

    let status = run(&jar, &["status"]);
    assert_eq!(status["consent"], "CookieAllowed");

    let out = visit(&jar, "", &[]);
    assert_eq!(out["resolution"]["verdict"]["reason"], "already_answered");
    assert_eq!(out["banner"]["state"], "hidden");
}

#[test]
fn scrolling_visit_accepts() {
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("jar.json");
    let out = visit(&jar, "?scrolling=1", &["--action", "scroll", "--scroll", "300"]);
    assert_eq!(out["banner"]["state"], "accepted");
    assert_eq!(run(&jar, &["status"])["consent"], "CookieAllowed");
}

#[test]
fn unconfirmed_decline_keeps_banner() {
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("jar.json");
    let out = visit(&jar, "?showNoConsent=1", &["--action", "decline"]);
    assert_eq!(out["banner"]["state"], "shown");
    assert_eq!(run(&jar, &["status"])["consent"], Value::Null);
}

#[test]
fn confirmed_decline_records_refusal() {
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("jar.json");
    let out = visit(&jar, "?showNoConsent=1", &["--action", "decline", "--confirm"]);
    assert_eq!(out["banner"]["state"], "declined");
    assert_eq!(run(&jar, &["status"])["consent"], "CookieDisallowed");
}

#[test]
fn outside_jurisdiction_assumes_consent() {
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("jar.json");
    let out = visit(&jar, "?refreshPage=1", &["--country", "US"]);
    assert_eq!(out["resolution"]["verdict"]["reason"], "outside_jurisdiction");
    assert_eq!(out["resolution"]["reload"], true);
    assert_eq!(out["banner"]["state"], "accepted");
    assert_eq!(run(&jar, &["status"])["consent"], "CookieAllowed");
}

#[test]
fn inside_jurisdiction_prompts() {
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("jar.json");
    let out = visit(&jar, "", &["--country", "DE", "--locale", "de-DE"]);
    assert_eq!(out["banner"]["state"], "shown");
}

// ===========================================================================
// Other commands
// ===========================================================================

#[test]
fn revoke_purges_and_records_refusal() {
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("jar.json");
    visit(&jar, "", &["--action", "accept"]);
    run(&jar, &["revoke"]);
    let status = run(&jar, &["status"]);
    assert_eq!(status["consent"], "CookieDisallowed");
    assert_eq!(status["has_data"], true);
}

#[test]
fn config_prints_parsed_options() {
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("jar.json");
    let script = format!("{SCRIPT}?top=1&remember=7&theme=dark");
    let out = run(&jar, &["config", "--script-url", &script]);
    assert_eq!(out["top"], true);
    assert_eq!(out["remember"], 7);
    assert_eq!(out["theme"], "dark");
    assert_eq!(out["showNoConsent"], false);
}
