//! `scan` command: run one scan cycle and persist the results.

use std::str::FromStr;

use sniper_core::{AppConfig, PhoneModel};
use sniper_gemini::{GeminiClient, ScanOrchestrator};

pub async fn run(config: &AppConfig, model_arg: &str) -> anyhow::Result<()> {
    let model = PhoneModel::from_str(model_arg)?;
    let store = super::open_store(config).await?;
    let client = GeminiClient::from_app_config(config)?;
    let orchestrator = ScanOrchestrator::new(client);

    tracing::info!(%model, "starting scan");
    let analysis = orchestrator.scan(model).await?;
    store.save_scan(model, &analysis).await?;

    println!("Scan: {model}");
    println!("  {}", analysis.summary);
    println!(
        "  average {} € | benchmark {} € | spread {} € | trend {}",
        analysis.average_price,
        analysis.back_market_price,
        analysis.arbitrage_spread,
        analysis.market_trend.as_str()
    );
    println!("  {}", analysis.agent_recommendation);
    println!();

    if analysis.listings.is_empty() {
        println!("No listings passed validation.");
    } else {
        for listing in &analysis.listings {
            println!(
                "  [{}] {:>8} | risk {:>3} | profit {:>7.0} € | {}",
                listing.id, listing.price, listing.risk_score, listing.profit_potential,
                listing.title
            );
            println!("      {}", listing.url);
        }
    }

    if !analysis.sources.is_empty() {
        println!();
        println!("Sources:");
        for source in &analysis.sources {
            println!("  {} — {}", source.title, source.uri);
        }
    }

    if store.is_cloud_enabled() {
        println!();
        println!("Cloud sync: mirroring in background.");
    }

    // Let the background mirror finish before the runtime shuts down.
    store.flush().await;
    Ok(())
}
