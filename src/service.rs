//! Service Lifecycle Control
//!
//! Thin delegation to the host's service manager. Each verb shells out to
//! `systemctl` (or `initctl` on upstart hosts), checks the exit status, and
//! surfaces stderr on failure. Nothing deeper: no dbus, no unit parsing.

use crate::config::InitSystem;
use crate::error::{DeployError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

/// No-argument lifecycle triggers delegating to the service manager.
pub trait ServiceController {
    fn enable(&self) -> Result<()>;
    fn disable(&self) -> Result<()>;
    fn start(&self) -> Result<()>;
    fn stop(&self) -> Result<()>;
    fn restart(&self) -> Result<()>;
}

fn run_manager(tool: &str, verb: &str, service: &str) -> Result<()> {
    let output = Command::new(tool)
        .args([verb, service])
        .output()
        .map_err(|e| DeployError::Service(format!("Failed to execute {tool} {verb}: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DeployError::Service(format!(
            "{tool} {verb} {service} failed: {}",
            stderr.trim()
        )));
    }

    info!("{} {} {}", tool, verb, service);
    Ok(())
}

/// Controller for systemd hosts, driving `systemctl`.
#[derive(Debug, Clone)]
pub struct SystemctlController {
    service: String,
}

impl SystemctlController {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

impl ServiceController for SystemctlController {
    fn enable(&self) -> Result<()> {
        run_manager("systemctl", "enable", &self.service)
    }

    fn disable(&self) -> Result<()> {
        run_manager("systemctl", "disable", &self.service)
    }

    fn start(&self) -> Result<()> {
        run_manager("systemctl", "start", &self.service)
    }

    fn stop(&self) -> Result<()> {
        run_manager("systemctl", "stop", &self.service)
    }

    fn restart(&self) -> Result<()> {
        run_manager("systemctl", "restart", &self.service)
    }
}

/// Controller for upstart hosts, driving `initctl`.
///
/// Upstart has no enable/disable verbs: a job runs at boot whenever its conf
/// file is present. Enable-at-boot is therefore expressed through the
/// `<job>.override` file (`manual` stanza suppresses automatic start).
#[derive(Debug, Clone)]
pub struct InitctlController {
    service: String,
    override_path: PathBuf,
}

impl InitctlController {
    pub fn new(service: impl Into<String>, conf_dir: impl Into<PathBuf>) -> Self {
        let service = service.into();
        let override_path = conf_dir.into().join(format!("{service}.override"));
        Self {
            service,
            override_path,
        }
    }
}

impl ServiceController for InitctlController {
    fn enable(&self) -> Result<()> {
        if self.override_path.exists() {
            std::fs::remove_file(&self.override_path)?;
        }
        info!("removed manual override for {}", self.service);
        Ok(())
    }

    fn disable(&self) -> Result<()> {
        std::fs::write(&self.override_path, "manual\n")?;
        info!("wrote manual override for {}", self.service);
        Ok(())
    }

    fn start(&self) -> Result<()> {
        run_manager("initctl", "start", &self.service)
    }

    fn stop(&self) -> Result<()> {
        run_manager("initctl", "stop", &self.service)
    }

    fn restart(&self) -> Result<()> {
        run_manager("initctl", "restart", &self.service)
    }
}

impl<T: ServiceController + ?Sized> ServiceController for Box<T> {
    fn enable(&self) -> Result<()> {
        (**self).enable()
    }

    fn disable(&self) -> Result<()> {
        (**self).disable()
    }

    fn start(&self) -> Result<()> {
        (**self).start()
    }

    fn stop(&self) -> Result<()> {
        (**self).stop()
    }

    fn restart(&self) -> Result<()> {
        (**self).restart()
    }
}

/// Picks the controller matching the host's init system.
pub fn controller_for(
    init: InitSystem,
    service: &str,
    upstart_conf_dir: &Path,
) -> Box<dyn ServiceController> {
    match init {
        InitSystem::Systemd => Box::new(SystemctlController::new(service)),
        InitSystem::Upstart => Box::new(InitctlController::new(service, upstart_conf_dir)),
    }
}
