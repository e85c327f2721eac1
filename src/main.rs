use anyhow::Result;
use clap::{Parser, Subcommand};
use node_exporter_deploy::config::Config;
use node_exporter_deploy::deploy::{Deployer, InstallLayout, LocalArchiveFetcher};
use node_exporter_deploy::service::controller_for;
use node_exporter_deploy::unit::{renderer_for, SERVICE_NAME};
use node_exporter_deploy::options;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/Default.toml", env = "NODE_EXPORTER_CONFIG")]
    config: String,

    /// Listen address for the daemon (overrides config)
    #[arg(long, env = "NODE_EXPORTER_LISTEN_ADDRESS")]
    listen_address: Option<String>,

    /// Daemon log level (overrides config)
    #[arg(long, env = "NODE_EXPORTER_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place the binary, write the service unit, prepare directories
    Install,
    /// Install and enable the service at boot
    Enable,
    /// Install and start the service now
    Start,
    /// Stop the running service
    Stop,
    /// Disable the service at boot
    Disable,
    /// Print the daemon's argument string and exit
    Render,
    /// Print the rendered service unit and exit
    Unit,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = Config::load(&args.config)?;

    // Override with CLI arguments if provided
    if let Some(listen) = args.listen_address {
        config.exporter.web_listen_address = listen;
    }
    if let Some(level) = args.log_level {
        config.exporter.log_level = level;
    }

    let layout = InstallLayout::default();

    match args.command {
        Command::Render => {
            let valid = options::validate(&config.exporter)?;
            println!("{}", valid.render());
        }
        Command::Unit => {
            let valid = options::validate(&config.exporter)?;
            let facts = valid.facts(&config.host);
            let exec_start = format!("{} {}", layout.binary_link().display(), valid.render());
            print!("{}", renderer_for(facts.init).render(&exec_start));
        }
        action => {
            let init = config.host.init_system();
            let controller = controller_for(init, SERVICE_NAME, &layout.upstart_conf_dir);
            let deployer = Deployer::new(config, layout, LocalArchiveFetcher, controller);

            match action {
                Command::Install => deployer.install()?,
                Command::Enable => deployer.enable()?,
                Command::Start => deployer.start()?,
                Command::Stop => deployer.stop()?,
                Command::Disable => deployer.disable()?,
                Command::Render | Command::Unit => unreachable!(),
            }
            info!("{} complete", SERVICE_NAME);
        }
    }

    Ok(())
}
