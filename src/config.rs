use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Release archive identity. Required for `install` and the actions that
    /// imply it; the render-only commands work without it.
    #[serde(default)]
    pub release: Option<ReleaseConfig>,
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub exporter: ExporterConfig,
}

/// Which release archive to place on the host.
///
/// The URL and checksum are carried verbatim for the fetcher; this crate does
/// not retrieve or verify them itself.
#[derive(Debug, Deserialize, Clone)]
pub struct ReleaseConfig {
    pub url: String,
    #[serde(default)]
    pub checksum: Option<String>,
    pub version: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HostConfig {
    #[serde(default = "default_init_package")]
    pub init_package: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            init_package: default_init_package(),
        }
    }
}

impl HostConfig {
    pub fn init_system(&self) -> InitSystem {
        InitSystem::from_package(&self.init_package)
    }
}

/// The host's service-supervision system, selecting which unit format gets
/// rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitSystem {
    Systemd,
    Upstart,
}

impl InitSystem {
    /// `"systemd"` selects systemd units; every other init package gets an
    /// upstart job definition.
    pub fn from_package(package: &str) -> Self {
        if package == "systemd" {
            InitSystem::Systemd
        } else {
            InitSystem::Upstart
        }
    }
}

/// Daemon flags, one field per node_exporter command-line option.
///
/// Constructed once per invocation and consumed by
/// [`crate::options::validate`]; immutable afterwards.
#[derive(Debug, Deserialize, Clone)]
pub struct ExporterConfig {
    #[serde(default = "default_web_listen_address")]
    pub web_listen_address: String,
    #[serde(default = "default_web_telemetry_path")]
    pub web_telemetry_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Collectors to force on, in order. Each entry must name a known
    /// collector. May overlap with `collectors_disabled`; the daemon's own
    /// last-flag-wins parsing resolves conflicts.
    #[serde(default)]
    pub collectors_enabled: Vec<String>,
    /// Collectors to force off, in order. Same vocabulary restriction.
    #[serde(default)]
    pub collectors_disabled: Vec<String>,

    #[serde(default)]
    pub collector_megacli_command: Option<String>,
    #[serde(default)]
    pub collector_ntp_server: Option<String>,
    #[serde(default)]
    pub collector_ntp_protocol_version: Option<u8>,
    #[serde(default)]
    pub collector_ntp_server_is_local: bool,
    #[serde(default)]
    pub collector_ntp_ip_ttl: Option<u32>,
    #[serde(default)]
    pub collector_ntp_max_distance: Option<String>,
    #[serde(default)]
    pub collector_ntp_local_offset_tolerance: Option<String>,
    #[serde(default)]
    pub path_procfs: Option<String>,
    #[serde(default)]
    pub path_sysfs: Option<String>,
    #[serde(default)]
    pub collector_textfile_directory: Option<String>,
    #[serde(default)]
    pub collector_netdev_ignored_devices: Option<String>,
    #[serde(default)]
    pub collector_diskstats_ignored_devices: Option<String>,
    #[serde(default)]
    pub collector_filesystem_ignored_fs_types: Option<String>,
    #[serde(default)]
    pub collector_filesystem_ignored_mount_points: Option<String>,
    /// Free-form extra flags appended verbatim, unescaped.
    #[serde(default)]
    pub custom_options: Option<String>,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            web_listen_address: default_web_listen_address(),
            web_telemetry_path: default_web_telemetry_path(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            collectors_enabled: Vec::new(),
            collectors_disabled: Vec::new(),
            collector_megacli_command: None,
            collector_ntp_server: None,
            collector_ntp_protocol_version: None,
            collector_ntp_server_is_local: false,
            collector_ntp_ip_ttl: None,
            collector_ntp_max_distance: None,
            collector_ntp_local_offset_tolerance: None,
            path_procfs: None,
            path_sysfs: None,
            collector_textfile_directory: None,
            collector_netdev_ignored_devices: None,
            collector_diskstats_ignored_devices: None,
            collector_filesystem_ignored_fs_types: None,
            collector_filesystem_ignored_mount_points: None,
            custom_options: None,
        }
    }
}

fn default_web_listen_address() -> String {
    ":9100".to_string()
}

fn default_web_telemetry_path() -> String {
    "/metrics".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "logger:stdout".to_string()
}

fn default_init_package() -> String {
    "systemd".to_string()
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("NODE_EXPORTER").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
