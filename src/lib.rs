//! Prometheus Node Exporter Deployer
//!
//! Declarative installation, configuration, and supervision of the
//! node_exporter daemon on a single host.
//!
//! # Overview
//!
//! The crate turns a structured configuration record into the daemon's
//! command-line argument string, embeds it in a service-manager unit
//! (systemd or upstart, selected by a host fact), and converges the
//! filesystem: release tree under `/opt`, binary symlink under
//! `/usr/local/sbin`, unit file, and textfile collector directory.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐   validate    ┌─────────────────┐    render    ┌─────────────┐
//! │ ExporterConfig │ ────────────► │ ValidatedConfig │ ───────────► │ arg string  │
//! └────────────────┘               └─────────────────┘   + facts    └──────┬──────┘
//!                                                                          │
//!                   ┌──────────────┐   ExecStart=/usr/local/sbin/...       │
//!                   │ UnitRenderer │ ◄─────────────────────────────────────┘
//!                   └──────┬───────┘
//!                          │ write          ┌───────────────────┐
//!                          ▼                │ ServiceController │ systemctl / initctl
//!                     unit file             └───────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`options`] - Validation and argument-string rendering (the core)
//! - [`collectors`] - The closed vocabulary of known collector names
//! - [`config`] - Configuration management
//! - [`unit`] - Systemd/upstart unit rendering
//! - [`service`] - Service-manager delegation
//! - [`deploy`] - Lifecycle orchestration
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use node_exporter_deploy::{config::Config, options};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     let valid = options::validate(&config.exporter)?;
//!     println!("{}", valid.render());
//!     Ok(())
//! }
//! ```

pub mod collectors;
pub mod config;
pub mod deploy;
pub mod error;
pub mod options;
pub mod service;
pub mod unit;
