//! Options-String Builder
//!
//! The core of the crate: turns an [`ExporterConfig`] into the ordered
//! command-line argument string the daemon is started with, plus the small
//! set of facts the deploy layer consumes.
//!
//! # Contract
//!
//! - [`validate`] checks the two collector lists against the known vocabulary
//!   and returns the config retyped as [`ValidatedConfig`]. It is the only
//!   failure point; rendering a validated config never fails.
//! - [`ValidatedConfig::render`] emits flags in a fixed order, each present
//!   iff the corresponding field is set, joined by single spaces. Byte-stable
//!   across calls.
//!
//! # Quoting
//!
//! The four ignored-devices / fs-types / mount-points filters are wrapped in
//! single quotes verbatim, and `custom_options` is appended untouched. No
//! escaping is applied; a value that itself contains a single quote produces
//! a malformed command line. This mirrors the long-standing deployment
//! behavior and is intentionally not fixed here.

use crate::collectors::is_known_collector;
use crate::config::{ExporterConfig, HostConfig, InitSystem};
use crate::error::{DeployError, Result};
use std::path::PathBuf;

/// An [`ExporterConfig`] whose collector lists passed vocabulary validation.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedConfig<'a> {
    config: &'a ExporterConfig,
}

/// Named facts handed to the deploy layer alongside the argument string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facts {
    /// Which unit format to render.
    pub init: InitSystem,
    /// Directory the textfile collector scans; must exist (0755, root:root)
    /// before the daemon starts. `None` when unset or empty.
    pub textfile_directory: Option<PathBuf>,
}

/// Checks every element of `collectors_enabled` and `collectors_disabled`
/// against the known-collector vocabulary.
///
/// Fails with the offending field's name before any rendering or side effect;
/// the two lists are not cross-validated against each other.
pub fn validate(config: &ExporterConfig) -> Result<ValidatedConfig<'_>> {
    check_collector_list("collectors_enabled", &config.collectors_enabled)?;
    check_collector_list("collectors_disabled", &config.collectors_disabled)?;
    Ok(ValidatedConfig { config })
}

fn check_collector_list(field: &'static str, list: &[String]) -> Result<()> {
    if list.iter().all(|name| is_known_collector(name)) {
        Ok(())
    } else {
        Err(DeployError::Validation {
            field,
            message: "should be a collector",
        })
    }
}

impl<'a> ValidatedConfig<'a> {
    /// The underlying config, unchanged by validation.
    pub fn inner(&self) -> &'a ExporterConfig {
        self.config
    }

    /// Renders the daemon's argument string.
    ///
    /// An ordered list of optional flags folded into a single
    /// space-separated join; order is fixed and independent of which
    /// optional fields are set.
    pub fn render(&self) -> String {
        let c = self.config;

        let flags = [
            Some(format!("--web.listen-address={}", c.web_listen_address)),
            Some(format!("--web.telemetry-path={}", c.web_telemetry_path)),
            Some(format!("--log.level={}", c.log_level)),
            Some(format!("--log.format={}", c.log_format)),
            c.collector_megacli_command
                .as_deref()
                .map(|v| format!("--collector.megacli.command={v}")),
            c.collector_ntp_server
                .as_deref()
                .map(|v| format!("--collector.ntp.server={v}")),
            c.collector_ntp_protocol_version
                .map(|v| format!("--collector.ntp.protocol-version={v}")),
            c.collector_ntp_server_is_local
                .then(|| "--collector.ntp.server-is-local".to_string()),
            c.collector_ntp_ip_ttl
                .map(|v| format!("--collector.ntp.ip-ttl={v}")),
            c.collector_ntp_max_distance
                .as_deref()
                .map(|v| format!("--collector.ntp.max-distance={v}")),
            c.collector_ntp_local_offset_tolerance
                .as_deref()
                .map(|v| format!("--collector.ntp.local-offset-tolerance={v}")),
            c.path_procfs.as_deref().map(|v| format!("--path.procfs={v}")),
            c.path_sysfs.as_deref().map(|v| format!("--path.sysfs={v}")),
            c.collector_textfile_directory
                .as_deref()
                .map(|v| format!("--collector.textfile.directory={v}")),
            c.collector_netdev_ignored_devices
                .as_deref()
                .map(|v| format!("--collector.netdev.ignored-devices='{v}'")),
            c.collector_diskstats_ignored_devices
                .as_deref()
                .map(|v| format!("--collector.diskstats.ignored-devices='{v}'")),
            c.collector_filesystem_ignored_fs_types
                .as_deref()
                .map(|v| format!("--collector.filesystem.ignored-fs-types='{v}'")),
            c.collector_filesystem_ignored_mount_points
                .as_deref()
                .map(|v| format!("--collector.filesystem.ignored-mount-points='{v}'")),
            c.custom_options.clone(),
        ];

        let mut args: Vec<String> = flags.into_iter().flatten().collect();
        args.extend(c.collectors_enabled.iter().map(|n| format!("--collector.{n}")));
        args.extend(
            c.collectors_disabled
                .iter()
                .map(|n| format!("--no-collector.{n}")),
        );
        args.join(" ")
    }

    /// Derives the deploy-layer facts: init-system selector and textfile
    /// collector directory (empty string counts as unset).
    pub fn facts(&self, host: &HostConfig) -> Facts {
        Facts {
            init: host.init_system(),
            textfile_directory: self
                .config
                .collector_textfile_directory
                .as_deref()
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
        }
    }
}
