//! `cloud` command: manage the remote-sync credentials.

use clap::Subcommand;

use sniper_core::AppConfig;

#[derive(Debug, Subcommand)]
pub enum CloudCommand {
    /// Save the remote endpoint URL and access key, activating sync
    Set {
        #[arg(long)]
        url: String,
        #[arg(long)]
        key: String,
    },
    /// Show whether remote sync is active
    Status,
}

pub async fn run(config: &AppConfig, command: CloudCommand) -> anyhow::Result<()> {
    let mut store = super::open_store(config).await?;
    match command {
        CloudCommand::Set { url, key } => {
            let enabled = store.set_cloud_config(&url, &key).await?;
            if enabled {
                println!("Cloud sync enabled.");
            } else {
                println!("Credentials saved, but cloud sync is not active (check URL and key).");
            }
        }
        CloudCommand::Status => {
            let (url, _) = store.get_cloud_config().await?;
            if store.is_cloud_enabled() {
                println!("Cloud sync: active ({url})");
            } else if url.is_empty() {
                println!("Cloud sync: not configured (local-only).");
            } else {
                println!("Cloud sync: configured but inactive (local-only).");
            }
        }
    }
    Ok(())
}
