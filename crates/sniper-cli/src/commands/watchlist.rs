//! `watchlist` command: list bookmarks or toggle one by listing id.

use clap::Subcommand;

use sniper_core::AppConfig;

#[derive(Debug, Subcommand)]
pub enum WatchlistCommand {
    /// Print the current bookmark set
    List,
    /// Bookmark an archived listing, or remove an existing bookmark
    Toggle {
        /// Listing id from the archive
        id: String,
    },
}

pub async fn run(config: &AppConfig, command: WatchlistCommand) -> anyhow::Result<()> {
    let store = super::open_store(config).await?;
    match command {
        WatchlistCommand::List => {
            let watchlist = store.get_watchlist().await?;
            if watchlist.is_empty() {
                println!("Watchlist is empty.");
                return Ok(());
            }
            println!("{} watched listings:", watchlist.len());
            for listing in watchlist {
                println!(
                    "  [{}] {:>8} | risk {:>3} | {}",
                    listing.id, listing.price, listing.risk_score, listing.title
                );
            }
        }
        WatchlistCommand::Toggle { id } => {
            let listing = store.get_listing(&id).await?;
            let added = store.toggle_watchlist(&listing).await?;
            if added {
                println!("Added to watchlist: {}", listing.title);
            } else {
                println!("Removed from watchlist: {}", listing.title);
            }
            // Let the background mirror finish before the runtime shuts down.
            store.flush().await;
        }
    }
    Ok(())
}
