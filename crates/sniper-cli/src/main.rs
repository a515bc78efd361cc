use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "sniper-cli")]
#[command(about = "Used-phone market scanner: scan listings, track deals, sync to the cloud")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scan the classifieds site for a phone model and archive the results
    Scan {
        /// Marketing name, e.g. "iPhone 15 Pro" (see `models`)
        #[arg(long)]
        model: String,
    },
    /// List the supported phone models
    Models,
    /// Print the full listing archive, highest price first
    Archive,
    /// Manage the bookmark set
    Watchlist {
        #[command(subcommand)]
        command: commands::watchlist::WatchlistCommand,
    },
    /// Generate a negotiation opener for an archived listing
    Negotiate {
        /// Listing id from the archive
        id: String,
    },
    /// Manage remote-sync credentials
    Cloud {
        #[command(subcommand)]
        command: commands::cloud::CloudCommand,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = sniper_core::load_app_config_from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scan { model } => commands::scan::run(&config, &model).await,
        Commands::Models => {
            for model in sniper_core::PhoneModel::ALL {
                println!("{model}");
            }
            Ok(())
        }
        Commands::Archive => commands::archive::run(&config).await,
        Commands::Watchlist { command } => commands::watchlist::run(&config, command).await,
        Commands::Negotiate { id } => commands::negotiate::run(&config, &id).await,
        Commands::Cloud { command } => commands::cloud::run(&config, command).await,
    }
}
