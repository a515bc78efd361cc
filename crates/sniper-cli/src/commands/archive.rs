//! `archive` command: print every listing ever seen, highest price first.

use sniper_core::AppConfig;

pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let store = super::open_store(config).await?;
    let archive = store.get_archive().await?;

    if archive.is_empty() {
        println!("Archive is empty — run a scan first.");
        return Ok(());
    }

    println!("{} archived listings:", archive.len());
    for row in archive {
        println!(
            "  [{}] {:>8} € | risk {:>3} | {} | {}",
            row.id, row.price_num, row.risk_score, row.model, row.title
        );
    }
    Ok(())
}
