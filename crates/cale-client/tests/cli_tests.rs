//! Integration tests for the `cale` binary.
//!
//! These tests use `assert_cmd` and `predicates` to run the real binary. The
//! end-to-end cases point it at a wiremock server through a temporary config
//! file. `HOME` is redirected so a developer's `~/.env` never leaks in.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use std::path::Path;

use assert_cmd::Command;
use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper: the binary with an isolated environment.
fn cale(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cale").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("CALENDLY_API_KEY")
        .env_remove("CALE_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper: writes a config file pointing both base URLs at `base`.
fn write_config(dir: &Path, base: &str, extra: &str) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    let content = format!(
        "[calendly]\n\
         api_key = \"test-token\"\n\
         user_uri = \"{base}/users/USER1\"\n\
         api_base = \"{base}\"\n\
         booking_base = \"{base}\"\n\
         timeout = 5\n\
         {extra}"
    );
    std::fs::write(&path, content).unwrap();
    path
}

// ─────────────────────────────────────────────────────────────────────────────
// Argument handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn url_argument_is_rejected() {
    let home = TempDir::new().unwrap();
    cale(home.path())
        .arg("https://calendly.com/jane/30min")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error: URL argument not implemented yet"));
}

#[test]
fn missing_slug_fails() {
    let home = TempDir::new().unwrap();
    cale(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing event type slug"));
}

#[test]
fn bad_start_by_fails_before_any_request() {
    let home = TempDir::new().unwrap();
    // No token is configured: the time error must win.
    cale(home.path())
        .args(["30min", "--start-by", "25 PM"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not parse time: 25 PM"));
}

#[test]
fn missing_token_is_config_error() {
    let home = TempDir::new().unwrap();
    cale(home.path())
        .arg("30min")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration error"))
        .stderr(predicate::str::contains("CALENDLY_API_KEY"));
}

#[test]
fn token_from_dotenv_is_used() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join(".env"), "CALENDLY_API_KEY=from-dotenv\n").unwrap();

    // The token is found; the next failure is reaching the (closed) server.
    let config = write_config(home.path(), "http://127.0.0.1:9", "");
    let without_key = std::fs::read_to_string(&config)
        .unwrap()
        .replace("api_key = \"test-token\"\n", "");
    std::fs::write(&config, without_key).unwrap();

    cale(home.path())
        .arg("--config")
        .arg(&config)
        .arg("30min")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration error").not())
        .stderr(predicate::str::contains("network_error"));
}

#[test]
fn rust_log_from_dotenv_enables_logging() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join(".env"), "RUST_LOG=cale_client=debug\n").unwrap();
    let config = write_config(home.path(), "https://api.calendly.com", "");

    cale(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "validate"])
        .assert()
        .success()
        .stderr(predicate::str::contains("loaded config from"));
}

#[test]
fn quiet_without_rust_log() {
    let home = TempDir::new().unwrap();
    let config = write_config(home.path(), "https://api.calendly.com", "");

    cale(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "validate"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Config subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn config_path_prints_explicit_path() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("custom.toml");
    cale(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn config_path_defaults_to_config_dir() {
    let home = TempDir::new().unwrap();
    cale(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cale"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_validate_accepts_good_file() {
    let home = TempDir::new().unwrap();
    let config = write_config(home.path(), "https://api.calendly.com", "[filters]\nstart_by = \"5 PM\"\n");
    cale(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid."));
}

#[test]
fn config_validate_rejects_bad_cutoff() {
    let home = TempDir::new().unwrap();
    let config = write_config(home.path(), "https://api.calendly.com", "[filters]\nend_by = \"noonish\"\n");
    cale(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not parse time: noonish"));
}

#[test]
fn config_dump_masks_plain_token() {
    let home = TempDir::new().unwrap();
    let config = write_config(home.path(), "https://api.calendly.com", "");
    cale(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "dump"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[calendly]"))
        .stdout(predicate::str::contains("<redacted>"))
        .stdout(predicate::str::contains("test-token").not());
}

// ─────────────────────────────────────────────────────────────────────────────
// End to end against a mock Calendly
// ─────────────────────────────────────────────────────────────────────────────

async fn mount_calendly(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/event_types"))
        .and(query_param("user", format!("{}/users/USER1", server.uri())))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": [
                { "uri": "https://api.calendly.com/event_types/ET30", "slug": "30min", "duration": 30 }
            ],
            "pagination": { "next_page": null }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/booking/event_types/ET30/calendar/range"))
        .and(query_param("diagnostics", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "days": [
                {
                    "date": "2025-03-03",
                    "status": "available",
                    "spots": [
                        { "status": "available", "start_time": "2025-03-03T09:00:00-05:00" },
                        { "status": "available", "start_time": "2025-03-03T09:30:00-05:00" },
                        { "status": "available", "start_time": "2025-03-03T16:30:00-05:00" }
                    ]
                },
                {
                    "date": "2025-03-08",
                    "status": "available",
                    "spots": [
                        { "status": "available", "start_time": "2025-03-08T10:00:00-05:00" }
                    ]
                }
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn prints_merged_schedule() {
    let server = MockServer::start().await;
    mount_calendly(&server).await;

    let home = TempDir::new().unwrap();
    let config = write_config(home.path(), &server.uri(), "");

    let output = tokio::task::spawn_blocking(move || {
        cale(home.path())
            .arg("--config")
            .arg(&config)
            .arg("30min")
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    output.assert().success().stdout(
        "Mon 03 Mar\tbetween 9:00 AM and 10:00 AM\n\
         Mon 03 Mar\t4:30 PM\n\
         Sat 08 Mar\t10:00 AM\n",
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn flags_filter_the_schedule() {
    let server = MockServer::start().await;
    mount_calendly(&server).await;

    let home = TempDir::new().unwrap();
    let config = write_config(home.path(), &server.uri(), "");

    let output = tokio::task::spawn_blocking(move || {
        cale(home.path())
            .arg("--config")
            .arg(&config)
            .args(["30min", "-w", "-e", "4:45 PM"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    output
        .assert()
        .success()
        .stdout("Mon 03 Mar\tbetween 9:00 AM and 10:00 AM\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_slug_fails_without_output() {
    let server = MockServer::start().await;
    mount_calendly(&server).await;

    let home = TempDir::new().unwrap();
    let config = write_config(home.path(), &server.uri(), "");

    let output = tokio::task::spawn_blocking(move || {
        cale(home.path())
            .arg("--config")
            .arg(&config)
            .arg("2h")
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    output
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error: slug not found: 2h"));
}
