//! CLI tests for the side-effect-free subcommands
//!
//! Only `render` and `unit` are exercised here; the lifecycle actions need a
//! real host layout and are covered through the deploy tests instead.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, body: &str) -> String {
    let path = dir.path().join("config.toml");
    fs::write(&path, body).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_render_with_defaults() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "");

    Command::cargo_bin("node-exporter-deploy")
        .unwrap()
        .args(["--config", &config, "render"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "--web.listen-address=:9100 --web.telemetry-path=/metrics \
             --log.level=info --log.format=logger:stdout",
        ));
}

#[test]
fn test_render_with_collector_toggles() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        r#"
[exporter]
collectors_enabled = ["cpu", "meminfo"]
collectors_disabled = ["wifi"]
"#,
    );

    Command::cargo_bin("node-exporter-deploy")
        .unwrap()
        .args(["--config", &config, "render"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "--collector.cpu --collector.meminfo --no-collector.wifi",
        ));
}

#[test]
fn test_render_rejects_unknown_collector() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        r#"
[exporter]
collectors_enabled = ["not_a_collector"]
"#,
    );

    Command::cargo_bin("node-exporter-deploy")
        .unwrap()
        .args(["--config", &config, "render"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("should be a collector"));
}

#[test]
fn test_listen_address_override() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "");

    Command::cargo_bin("node-exporter-deploy")
        .unwrap()
        .args(["--config", &config, "--listen-address", ":9555", "render"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--web.listen-address=:9555"));
}

#[test]
fn test_unit_prints_systemd_unit_by_default() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "");

    Command::cargo_bin("node-exporter-deploy")
        .unwrap()
        .args(["--config", &config, "unit"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ExecStart=/usr/local/sbin/node_exporter --web.listen-address=:9100",
        ))
        .stdout(predicate::str::contains("WantedBy=multi-user.target"));
}

#[test]
fn test_unit_prints_upstart_conf_for_non_systemd_host() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        r#"
[host]
init_package = "upstart"
"#,
    );

    Command::cargo_bin("node-exporter-deploy")
        .unwrap()
        .args(["--config", &config, "unit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exec /usr/local/sbin/node_exporter"))
        .stdout(predicate::str::contains("respawn"));
}
