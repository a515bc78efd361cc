//! `negotiate` command: generate a negotiation opener for an archived
//! listing and print it for the user to copy.

use sniper_core::AppConfig;
use sniper_gemini::{GeminiClient, ScanOrchestrator};

pub async fn run(config: &AppConfig, id: &str) -> anyhow::Result<()> {
    let store = super::open_store(config).await?;
    let listing = store.get_listing(id).await?;

    let client = GeminiClient::from_app_config(config)?;
    let orchestrator = ScanOrchestrator::new(client);
    let message = orchestrator.negotiate(&listing).await;

    println!("Negotiation opener for \"{}\" ({}):", listing.title, listing.price);
    println!();
    println!("{message}");
    Ok(())
}
