//! Deploy Orchestration
//!
//! Drives the lifecycle actions over a set of idempotent filesystem steps:
//! stage the release archive, unpack it, symlink the binary, write the
//! service unit embedding the rendered argument string, and prepare the
//! textfile collector directory. Network retrieval and checksum verification
//! stay behind [`PackageFetcher`]; service-manager verbs stay behind
//! [`ServiceController`].
//!
//! # Action semantics
//!
//! - `install`: converge files, do not touch the running service
//! - `enable`: install, then enable at boot
//! - `start`: install, then start now
//! - `stop` / `disable`: delegate only, no file changes
//!
//! Validation runs before any side effect; an unknown collector name aborts
//! the whole action with nothing written.

use crate::config::{Config, InitSystem, ReleaseConfig};
use crate::error::{DeployError, Result};
use crate::options;
use crate::service::ServiceController;
use crate::unit::{renderer_for, SERVICE_NAME};
use flate2::read::GzDecoder;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::{debug, info};

/// Produces a local copy of the release archive.
///
/// Retrieval and checksum verification are external capabilities; the
/// `ReleaseConfig` carries `url` and `checksum` through untouched for
/// implementations that do fetch.
pub trait PackageFetcher {
    fn fetch(&self, release: &ReleaseConfig, cache_dir: &Path) -> Result<PathBuf>;
}

/// Fetcher for pre-staged archives.
///
/// Uses `release.url` directly when it names an existing local file,
/// otherwise falls back to an archive already present in the cache
/// directory. Never goes to the network.
#[derive(Debug, Clone, Default)]
pub struct LocalArchiveFetcher;

impl PackageFetcher for LocalArchiveFetcher {
    fn fetch(&self, release: &ReleaseConfig, cache_dir: &Path) -> Result<PathBuf> {
        let cached = cache_dir.join(format!("{SERVICE_NAME}.tar.gz"));

        let source = Path::new(&release.url);
        if source.is_file() {
            fs::copy(source, &cached)?;
            debug!("staged release archive from {}", source.display());
            return Ok(cached);
        }

        if cached.is_file() {
            debug!("using cached release archive {}", cached.display());
            return Ok(cached);
        }

        Err(DeployError::Archive(format!(
            "release archive not found: stage {} or fetch {} with external tooling",
            cached.display(),
            release.url
        )))
    }
}

/// Filesystem destinations for an install. Defaults match a stock Linux
/// host; tests point everything at a temp directory.
#[derive(Debug, Clone)]
pub struct InstallLayout {
    /// Where release trees are unpacked.
    pub opt_dir: PathBuf,
    /// Where the binary symlink is placed.
    pub sbin_dir: PathBuf,
    pub systemd_unit_dir: PathBuf,
    pub upstart_conf_dir: PathBuf,
    /// Staging area for downloaded archives.
    pub cache_dir: PathBuf,
}

impl Default for InstallLayout {
    fn default() -> Self {
        Self {
            opt_dir: PathBuf::from("/opt"),
            sbin_dir: PathBuf::from("/usr/local/sbin"),
            systemd_unit_dir: PathBuf::from("/etc/systemd/system"),
            upstart_conf_dir: PathBuf::from("/etc/init"),
            cache_dir: PathBuf::from("/var/cache/node_exporter"),
        }
    }
}

impl InstallLayout {
    /// Path the service manager starts the daemon from.
    pub fn binary_link(&self) -> PathBuf {
        self.sbin_dir.join(SERVICE_NAME)
    }

    pub fn unit_dir(&self, init: InitSystem) -> &Path {
        match init {
            InitSystem::Systemd => &self.systemd_unit_dir,
            InitSystem::Upstart => &self.upstart_conf_dir,
        }
    }
}

/// Orchestrates the lifecycle actions for one host.
pub struct Deployer<F: PackageFetcher, C: ServiceController> {
    config: Config,
    layout: InstallLayout,
    fetcher: F,
    controller: C,
}

impl<F: PackageFetcher, C: ServiceController> Deployer<F, C> {
    pub fn new(config: Config, layout: InstallLayout, fetcher: F, controller: C) -> Self {
        Self {
            config,
            layout,
            fetcher,
            controller,
        }
    }

    /// Converges binary, unit file, and textfile directory. Does not start
    /// or enable the service.
    pub fn install(&self) -> Result<()> {
        // Validation happens before the first side effect.
        let valid = options::validate(&self.config.exporter)?;
        let opts = valid.render();
        let facts = valid.facts(&self.config.host);

        let release = self.config.release.as_ref().ok_or_else(|| {
            DeployError::Config("release.url and release.version are required for install".into())
        })?;

        fs::create_dir_all(&self.layout.cache_dir)?;
        let archive = self.fetcher.fetch(release, &self.layout.cache_dir)?;
        self.unpack(&archive)?;
        self.link_binary(release)?;

        let renderer = renderer_for(facts.init);
        let exec_start = format!("{} {}", self.layout.binary_link().display(), opts);
        let unit_dir = self.layout.unit_dir(facts.init);
        fs::create_dir_all(unit_dir)?;
        let unit_path = unit_dir.join(renderer.file_name());
        write_with_mode(&unit_path, &renderer.render(&exec_start), 0o644)?;
        info!("wrote unit file {}", unit_path.display());

        if let Some(dir) = &facts.textfile_directory {
            fs::create_dir_all(dir)?;
            fs::set_permissions(dir, fs::Permissions::from_mode(0o755))?;
            debug!("prepared textfile directory {}", dir.display());
        }

        Ok(())
    }

    /// Install, then enable at boot.
    pub fn enable(&self) -> Result<()> {
        self.install()?;
        self.controller.enable()
    }

    /// Install, then start now.
    pub fn start(&self) -> Result<()> {
        self.install()?;
        self.controller.start()
    }

    pub fn stop(&self) -> Result<()> {
        self.controller.stop()
    }

    pub fn disable(&self) -> Result<()> {
        self.controller.disable()
    }

    fn unpack(&self, archive: &Path) -> Result<()> {
        let file = fs::File::open(archive)?;
        let mut tree = Archive::new(GzDecoder::new(file));
        fs::create_dir_all(&self.layout.opt_dir)?;
        tree.unpack(&self.layout.opt_dir).map_err(|e| {
            DeployError::Archive(format!("Failed to unpack {}: {e}", archive.display()))
        })?;
        debug!("unpacked {} into {}", archive.display(), self.layout.opt_dir.display());
        Ok(())
    }

    fn link_binary(&self, release: &ReleaseConfig) -> Result<()> {
        let target = self
            .layout
            .opt_dir
            .join(format!("{SERVICE_NAME}-{}.linux-amd64", release.version))
            .join(SERVICE_NAME);
        let link = self.layout.binary_link();

        fs::create_dir_all(&self.layout.sbin_dir)?;
        match fs::remove_file(&link) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        std::os::unix::fs::symlink(&target, &link)?;
        info!("linked {} -> {}", link.display(), target.display());
        Ok(())
    }
}

fn write_with_mode(path: &Path, contents: &str, mode: u32) -> Result<()> {
    fs::write(path, contents)?;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}
