//! Service Unit Rendering
//!
//! Generates the service-manager definition that embeds the rendered
//! argument string: a systemd unit or an upstart job, selected by the host's
//! init-system fact. Units are plain text built line by line; no template
//! engine is involved.

use crate::config::InitSystem;

/// Service name as known to the service manager.
pub const SERVICE_NAME: &str = "node_exporter";

/// Human-readable description shared by both unit formats.
pub const SERVICE_DESCRIPTION: &str = "Prometheus Node Exporter";

/// Renders a service-unit definition around a start command.
pub trait UnitRenderer {
    /// Full unit text; `exec_start` is the binary path plus argument string.
    fn render(&self, exec_start: &str) -> String;

    /// File name under the init system's unit directory.
    fn file_name(&self) -> &'static str;
}

/// Systemd unit definition for the exporter.
#[derive(Debug, Clone)]
pub struct SystemdUnit {
    pub description: String,
    pub after: Vec<String>,
    pub working_directory: String,
    pub restart: String,
    pub restart_sec: String,
    pub wanted_by: String,
}

impl Default for SystemdUnit {
    fn default() -> Self {
        Self {
            description: format!("Systemd unit for {SERVICE_DESCRIPTION}"),
            after: vec!["network.target".to_string(), "remote-fs.target".to_string()],
            working_directory: "/".to_string(),
            restart: "on-failure".to_string(),
            restart_sec: "30s".to_string(),
            wanted_by: "multi-user.target".to_string(),
        }
    }
}

impl UnitRenderer for SystemdUnit {
    fn render(&self, exec_start: &str) -> String {
        let mut unit = String::new();

        unit.push_str("[Unit]\n");
        unit.push_str(&format!("Description={}\n", self.description));
        unit.push_str(&format!("After={}\n", self.after.join(" ")));
        unit.push('\n');

        unit.push_str("[Service]\n");
        unit.push_str("Type=simple\n");
        unit.push_str(&format!("ExecStart={exec_start}\n"));
        unit.push_str(&format!("WorkingDirectory={}\n", self.working_directory));
        unit.push_str(&format!("Restart={}\n", self.restart));
        unit.push_str(&format!("RestartSec={}\n", self.restart_sec));
        unit.push('\n');

        unit.push_str("[Install]\n");
        unit.push_str(&format!("WantedBy={}\n", self.wanted_by));

        unit
    }

    fn file_name(&self) -> &'static str {
        "node_exporter.service"
    }
}

/// Upstart job definition for hosts without systemd.
#[derive(Debug, Clone)]
pub struct UpstartConf {
    pub description: String,
    pub respawn: bool,
}

impl Default for UpstartConf {
    fn default() -> Self {
        Self {
            description: SERVICE_DESCRIPTION.to_string(),
            respawn: true,
        }
    }
}

impl UnitRenderer for UpstartConf {
    fn render(&self, exec_start: &str) -> String {
        let mut conf = String::new();

        conf.push_str(&format!("description \"{}\"\n\n", self.description));
        conf.push_str("start on runlevel [2345]\n");
        conf.push_str("stop on runlevel [016]\n\n");
        if self.respawn {
            conf.push_str("respawn\n\n");
        }
        conf.push_str(&format!("exec {exec_start}\n"));

        conf
    }

    fn file_name(&self) -> &'static str {
        "node_exporter.conf"
    }
}

/// Picks the unit renderer matching the host's init system.
pub fn renderer_for(init: InitSystem) -> Box<dyn UnitRenderer> {
    match init {
        InitSystem::Systemd => Box::new(SystemdUnit::default()),
        InitSystem::Upstart => Box::new(UpstartConf::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn systemd_unit_embeds_exec_start() {
        let unit = SystemdUnit::default().render("/usr/local/sbin/node_exporter --log.level=info");
        assert!(unit.contains("ExecStart=/usr/local/sbin/node_exporter --log.level=info\n"));
        assert!(unit.contains("Restart=on-failure\n"));
        assert!(unit.contains("WantedBy=multi-user.target\n"));
    }

    #[test]
    fn upstart_conf_embeds_exec_line() {
        let conf = UpstartConf::default().render("/usr/local/sbin/node_exporter");
        assert!(conf.contains("exec /usr/local/sbin/node_exporter\n"));
        assert!(conf.contains("respawn\n"));
    }
}
