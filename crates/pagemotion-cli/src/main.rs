use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pagemotion_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "pagemotion")]
#[command(author, version, about = "Landing page motion engines, previewed in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ~/.config/pagemotion/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive preview of a page
    Preview {
        /// Page fixture (TOML); the bundled landing page when omitted
        #[arg(short, long)]
        page: Option<PathBuf>,
        /// Behave as if the user asked for reduced motion
        #[arg(long)]
        reduced_motion: bool,
    },
    /// Run a page headlessly and print the final element states
    Simulate {
        /// Page fixture (TOML); the bundled landing page when omitted
        #[arg(short, long)]
        page: Option<PathBuf>,
        /// Number of frames to run
        #[arg(short, long, default_value_t = 120)]
        frames: u64,
        /// Scroll the window to this position before the first frame
        #[arg(long)]
        scroll_to: Option<f64>,
        /// Behave as if the user asked for reduced motion
        #[arg(long)]
        reduced_motion: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Pace frames in real time instead of running them back to back
        #[arg(long)]
        realtime: bool,
    },
    /// Show the effective configuration
    Config {
        /// Only print the configuration file path
        #[arg(long)]
        path: bool,
        /// Write the defaults to the configuration file if it does not exist
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // The preview owns the terminal, so it only logs when RUST_LOG asks for it
    let interactive = matches!(cli.command, Some(Commands::Preview { .. }) | None);
    if !interactive || std::env::var("RUST_LOG").is_ok() {
        init_logging(&config);
    }

    match cli.command {
        Some(Commands::Preview {
            page,
            reduced_motion,
        }) => commands::preview::run(config, page, reduced_motion).await,
        None => commands::preview::run(config, None, false).await,
        Some(Commands::Simulate {
            page,
            frames,
            scroll_to,
            reduced_motion,
            json,
            realtime,
        }) => {
            let options = commands::simulate::SimulateOptions {
                page,
                frames,
                scroll_to,
                reduced_motion,
                json,
                realtime,
            };
            commands::simulate::run(config, options).await
        }
        Some(Commands::Config { path, init }) => commands::config::run(&config, path, init),
    }
}

fn init_logging(config: &AppConfig) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
