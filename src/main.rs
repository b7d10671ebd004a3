//! fpga-bridge main entry point
//!
//! This binary handles CLI parsing, logging setup, address discovery and
//! the HTTP listener.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fpga_bridge::{
    config::{Config, Variant},
    control::ControlServer,
    platform::{self, AddressReport},
    APP_NAME, VERSION,
};

/// HTTP bridge between client devices and FPGA/UART driver executables
#[derive(Parser, Debug)]
#[command(name = APP_NAME, version = VERSION, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to ./bridge.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the bridge
    Start {
        /// Deployment variant: led (port 3001) or cpu (port 8080)
        #[arg(long)]
        variant: Option<Variant>,

        /// Listener port
        #[arg(short, long)]
        port: Option<u16>,

        /// Static asset directory
        #[arg(long)]
        public_dir: Option<PathBuf>,
    },

    /// Print the addresses client devices can use
    Addresses,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Execute command
    if let Err(e) = run(cli).await {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize structured logging with tracing
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the CLI command
async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Start {
            variant,
            port,
            public_dir,
        } => {
            info!("Starting {} v{}", APP_NAME, VERSION);

            let mut config = Config::load(cli.config.as_deref())?;
            if let Some(variant) = variant {
                config.set_variant(variant);
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(public_dir) = public_dir {
                config.public_dir = public_dir;
            }
            config.validate()?;

            info!("Variant: {}", config.variant);
            info!("LED driver: {}", config.led.program.display());
            info!("CPU driver: {}", config.cpu.program.display());
            info!("Static assets: {}", config.public_dir.display());

            let server = ControlServer::from_config(&config);
            let listener = server.bind().await?;

            let report = discover_addresses(&config).await;
            info!("Environment: {}", report.environment);
            println!("{}", report.banner(config.variant.title(), config.port));

            server.run(listener, shutdown_signal()).await?;

            info!("Shutting down bridge");
            Ok(())
        }
        Commands::Addresses => {
            let config = Config::load(cli.config.as_deref())?;
            let report = discover_addresses(&config).await;
            println!("Environment: {}", report.environment);
            println!("Primary:     {}", report.primary);
            if let Some(guest) = &report.guest {
                println!("WSL guest:   {}", guest);
            }
            if let Some(host) = &report.host {
                println!("Host LAN:    {}", host);
            }
            println!("Use:         http://{}:{}", report.lan_address(), config.port);
            Ok(())
        }
        Commands::Version => {
            println!("{} v{}", APP_NAME, VERSION);
            Ok(())
        }
    }
}

/// Resolve all address candidates once, off the async workers
async fn discover_addresses(config: &Config) -> AddressReport {
    let network = config.network.clone();
    match tokio::task::spawn_blocking(move || platform::resolve_report(&network)).await {
        Ok(report) => report,
        Err(e) => {
            error!("Address discovery failed: {}", e);
            AddressReport {
                environment: platform::HostEnvironment::Native,
                primary: platform::ResolvedAddress::localhost(),
                guest: None,
                host: None,
            }
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
