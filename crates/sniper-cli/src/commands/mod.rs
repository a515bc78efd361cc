pub mod archive;
pub mod cloud;
pub mod negotiate;
pub mod scan;
pub mod watchlist;

use sniper_cloud::HybridStore;
use sniper_core::AppConfig;

/// Open the hybrid store for a command invocation.
pub(crate) async fn open_store(config: &AppConfig) -> anyhow::Result<HybridStore> {
    Ok(HybridStore::open(config).await?)
}
