//! Integration tests for the `homedash` CLI binary.
//!
//! Every test points the CLI at a config file inside a temp directory so
//! the user's real configuration is never read or written.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `homedash` binary with env isolation.
fn homedash_cmd(config: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("homedash");
    cmd.env("HOME", "/tmp/homedash-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/homedash-cli-test-nonexistent")
        .env("HOMEDASH_CONFIG", config)
        .env_remove("HOMEDASH_PROXY_URL")
        .env_remove("HOMEDASH_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

fn config_file(dir: &tempfile::TempDir, proxy: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    let contents = format!(
        r#"
[proxy]
url = "{proxy}"
timeout = 2

[[dashboard.tiles]]
type = "service"
name = "Jellyfin"
url = "http://media.lan:8096"

[[dashboard.tiles]]
type = "dashdot"
url = "http://dash.lan:3001"
graphs = ["storage", "network", "cpu"]
is_compact_view = true

[[dashboard.tiles]]
type = "dashdot"
url = "http://dash.lan:3001"
graphs = ["ram"]
"#
    );
    std::fs::write(&path, contents).unwrap();
    path
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let dir = tempfile::tempdir().unwrap();
    let output = homedash_cmd(&dir.path().join("none.toml")).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    homedash_cmd(&dir.path().join("none.toml"))
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("tiles")
                .and(predicate::str::contains("status"))
                .and(predicate::str::contains("config")),
        );
}

#[test]
fn test_completions_zsh() {
    let dir = tempfile::tempdir().unwrap();
    homedash_cmd(&dir.path().join("none.toml"))
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── tiles ───────────────────────────────────────────────────────────

#[test]
fn test_tiles_json_describes_actions() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_file(&dir, "http://127.0.0.1:9");
    let output = homedash_cmd(&config)
        .args(["--output", "json", "tiles"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let tiles: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tiles[0]["kind"], "service");
    assert_eq!(tiles[0]["action"], "open in new tab");
    assert_eq!(tiles[1]["kind"], "dashdot");
    assert_eq!(tiles[1]["action"], "shows CPU, compact strip");
}

#[test]
fn test_tiles_plain_without_config_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    homedash_cmd(&dir.path().join("none.toml"))
        .args(["--output", "plain", "tiles"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ── config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honours_env() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("custom.toml");
    homedash_cmd(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    homedash_cmd(&config).args(["config", "init"]).assert().success();
    assert!(config.exists());

    let output = homedash_cmd(&config).args(["config", "init"]).output().unwrap();
    assert_eq!(output.status.code(), Some(6));
    assert!(combined_output(&output).contains("--force"));

    homedash_cmd(&config)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_show_applies_proxy_override() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_file(&dir, "http://127.0.0.1:9");
    homedash_cmd(&config)
        .args(["--proxy", "http://nas.lan:7575", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://nas.lan:7575"));
}

// ── status ──────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_status_probes_shared_target_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/modules/dashdot"))
        .and(query_param("url", "/info"))
        .and(query_param("base", "http://dash.lan:3001/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "storage": { "layout": [{ "size": 1000 }, { "size": 24 }] },
            "network": { "speedUp": 1.0e8, "speedDown": 9.0e8 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config_file(&dir, &server.uri());
    let output = homedash_cmd(&config)
        .args(["--output", "json", "status"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let entries: Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["tile"], 1);
    assert_eq!(entries[0]["state"], "ok");
    assert_eq!(entries[0]["storage_bytes"], 1024);
    assert_eq!(entries[1]["volumes"], 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_upstream_failure_exits_nonzero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config_file(&dir, &server.uri());
    let output = homedash_cmd(&config)
        .args(["--color", "never", "status", "--tile", "1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("unreachable"), "{text}");
    assert!(text.contains("502"), "{text}");
}

#[test]
fn test_status_unknown_tile_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_file(&dir, "http://127.0.0.1:9");
    let output = homedash_cmd(&config)
        .args(["status", "--tile", "9"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("homedash tiles"));
}

#[test]
fn test_status_on_service_tile_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_file(&dir, "http://127.0.0.1:9");
    homedash_cmd(&config)
        .args(["status", "--tile", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("service shortcut"));
}
