//! Configuration validation tests
//!
//! Tests that verify configuration defaults and structure.

use node_exporter_deploy::config::{Config, ExporterConfig, HostConfig, InitSystem, ReleaseConfig};

#[test]
fn test_exporter_config_defaults() {
    // Given: An ExporterConfig with default values
    let config = ExporterConfig::default();

    // Then: Should have the daemon's stock settings
    assert_eq!(config.web_listen_address, ":9100");
    assert_eq!(config.web_telemetry_path, "/metrics");
    assert_eq!(config.log_level, "info");
    assert_eq!(config.log_format, "logger:stdout");
    assert!(config.collectors_enabled.is_empty());
    assert!(config.collectors_disabled.is_empty());
    assert!(!config.collector_ntp_server_is_local);
    assert!(config.custom_options.is_none());
}

#[test]
fn test_host_config_defaults_to_systemd() {
    // Given: A HostConfig with default values
    let host = HostConfig::default();

    // Then: systemd is assumed unless the host says otherwise
    assert_eq!(host.init_package, "systemd");
    assert_eq!(host.init_system(), InitSystem::Systemd);
}

#[test]
fn test_init_system_selection() {
    // Given: Various init package facts
    // Then: Only the exact string "systemd" selects systemd units
    assert_eq!(InitSystem::from_package("systemd"), InitSystem::Systemd);
    assert_eq!(InitSystem::from_package("upstart"), InitSystem::Upstart);
    assert_eq!(InitSystem::from_package("sysvinit"), InitSystem::Upstart);
    assert_eq!(InitSystem::from_package(""), InitSystem::Upstart);
}

#[test]
fn test_release_config_construction() {
    // Given: A release record as supplied by host configuration
    let release = ReleaseConfig {
        url: "https://github.com/prometheus/node_exporter/releases/download/v0.15.2/node_exporter-0.15.2.linux-amd64.tar.gz".to_string(),
        checksum: Some("deadbeef".to_string()),
        version: "0.15.2".to_string(),
    };

    // Then: Fields carried verbatim for the fetcher
    assert!(release.url.ends_with(".tar.gz"));
    assert_eq!(release.version, "0.15.2");
    assert_eq!(release.checksum.as_deref(), Some("deadbeef"));
}

#[test]
fn test_top_level_config_default_has_no_release() {
    // Given: A Config built entirely from defaults
    let config = Config::default();

    // Then: Render-only use works without a release section
    assert!(config.release.is_none());
    assert_eq!(config.exporter.web_listen_address, ":9100");
    assert_eq!(config.host.init_system(), InitSystem::Systemd);
}
