//! The hybrid store: authoritative local sqlite plus an optional,
//! best-effort remote mirror.

use std::sync::{Arc, Mutex, PoisonError};

use sqlx::SqlitePool;
use tokio::task::JoinHandle;

use sniper_core::{AppConfig, Listing, MarketAnalysis, PhoneModel};
use sniper_db::{DbError, ListingRow};

use crate::remote::RemoteClient;

/// Explicitly constructed store context: owns the sqlite pool and the
/// optional remote client. The remote client is rebuilt wholesale whenever
/// the cloud credentials are saved; no ambient global state.
pub struct HybridStore {
    pool: SqlitePool,
    remote: Option<Arc<RemoteClient>>,
    cloud_timeout_secs: u64,
    /// Outstanding mirror tasks. Spawned detached so local callers never
    /// wait on the network, but tracked so [`HybridStore::flush`] can await
    /// them before the process (and its runtime) goes away.
    mirror_tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl HybridStore {
    /// Open the local database, run migrations, and activate the remote
    /// mirror if both credentials are already stored.
    ///
    /// Invalid stored credentials disable the mirror with a warning rather
    /// than failing startup; local operation never depends on the cloud.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the local database cannot be opened or
    /// migrated.
    pub async fn open(config: &AppConfig) -> Result<Self, DbError> {
        let pool = sniper_db::connect_pool(
            &config.db_path,
            sniper_db::PoolConfig::from_app_config(config),
        )
        .await?;
        sniper_db::run_migrations(&pool).await?;

        let mut store = Self::new(pool, None, config.cloud_request_timeout_secs);
        let (url, key) = sniper_db::get_cloud_config(&store.pool).await?;
        if !url.is_empty() && !key.is_empty() {
            store.remote = store.build_remote(&url, &key);
        }
        Ok(store)
    }

    /// Assemble a store from parts. Tests use this to pair an in-memory
    /// pool with a mock remote endpoint.
    #[must_use]
    pub fn new(pool: SqlitePool, remote: Option<RemoteClient>, cloud_timeout_secs: u64) -> Self {
        Self {
            pool,
            remote: remote.map(Arc::new),
            cloud_timeout_secs,
            mirror_tasks: Mutex::new(Vec::new()),
        }
    }

    fn track_mirror_task(&self, handle: JoinHandle<()>) {
        let mut tasks = self
            .mirror_tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
    }

    /// Await every outstanding mirror task. Call this before dropping the
    /// runtime, otherwise in-flight mirror writes are aborted mid-request.
    ///
    /// Mirror errors were already logged inside the tasks themselves, so
    /// this only waits for completion and reports nothing.
    pub async fn flush(&self) {
        let tasks: Vec<_> = self
            .mirror_tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        for task in tasks {
            let _ = task.await;
        }
    }

    fn build_remote(&self, url: &str, key: &str) -> Option<Arc<RemoteClient>> {
        match RemoteClient::new(url, key, self.cloud_timeout_secs) {
            Ok(client) => Some(Arc::new(client)),
            Err(err) => {
                tracing::warn!(error = %err, "cloud credentials rejected, staying local-only");
                None
            }
        }
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// `true` iff a remote client has been successfully constructed from
    /// stored or just-saved credentials.
    #[must_use]
    pub fn is_cloud_enabled(&self) -> bool {
        self.remote.is_some()
    }

    /// Persist a scan: upsert every validated listing into the local archive,
    /// then mirror the batch to the remote store in a detached task.
    ///
    /// The local write strictly precedes the mirror attempt, and the mirror's
    /// outcome never reaches the caller: a failed mirror leaves local state
    /// committed and logs a warning. Callers that are about to exit should
    /// [`flush`](Self::flush) so the mirror task is not aborted.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] only for the local write.
    pub async fn save_scan(
        &self,
        model: PhoneModel,
        analysis: &MarketAnalysis,
    ) -> Result<(), DbError> {
        sniper_db::upsert_listings(&self.pool, model.as_str(), &analysis.listings).await?;

        if let Some(remote) = &self.remote {
            let remote = Arc::clone(remote);
            let listings = analysis.listings.clone();
            self.track_mirror_task(tokio::spawn(async move {
                if let Err(err) = remote.upsert_listings(model.as_str(), &listings).await {
                    tracing::warn!(%model, error = %err, "cloud sync failed, local state unaffected");
                }
            }));
        }
        Ok(())
    }

    /// Toggle watchlist membership locally; mirror removals to the remote
    /// watchlist table best-effort. Returns `true` if the listing was added.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] only for the local write.
    pub async fn toggle_watchlist(&self, listing: &Listing) -> Result<bool, DbError> {
        let added = sniper_db::toggle_watchlist(&self.pool, listing).await?;

        if !added {
            if let Some(remote) = &self.remote {
                let remote = Arc::clone(remote);
                let id = listing.id.clone();
                self.track_mirror_task(tokio::spawn(async move {
                    if let Err(err) = remote.delete_watchlist_entry(&id).await {
                        tracing::warn!(listing_id = %id, error = %err, "cloud watchlist removal failed");
                    }
                }));
            }
        }
        Ok(added)
    }

    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails.
    pub async fn is_in_watchlist(&self, id: &str) -> Result<bool, DbError> {
        sniper_db::is_in_watchlist(&self.pool, id).await
    }

    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails.
    pub async fn get_watchlist(&self) -> Result<Vec<Listing>, DbError> {
        let rows = sniper_db::get_watchlist(&self.pool).await?;
        Ok(rows.into_iter().map(Listing::from).collect())
    }

    /// Full archive, highest price first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails.
    pub async fn get_archive(&self) -> Result<Vec<ListingRow>, DbError> {
        sniper_db::get_archive(&self.pool).await
    }

    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if no archived listing has that id.
    pub async fn get_listing(&self, id: &str) -> Result<Listing, DbError> {
        let row = sniper_db::get_listing(&self.pool, id).await?;
        Ok(row.into())
    }

    /// # Errors
    ///
    /// Returns [`DbError`] if a query fails.
    pub async fn get_cloud_config(&self) -> Result<(String, String), DbError> {
        sniper_db::get_cloud_config(&self.pool).await
    }

    /// Persist both cloud secrets and immediately (re)build the remote
    /// client from them. Returns whether the mirror is now active.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the local config write fails.
    pub async fn set_cloud_config(&mut self, url: &str, key: &str) -> Result<bool, DbError> {
        sniper_db::set_cloud_config(&self.pool, url, key).await?;
        self.remote = if url.is_empty() || key.is_empty() {
            None
        } else {
            self.build_remote(url, key)
        };
        Ok(self.is_cloud_enabled())
    }

    /// Direct handle to the remote client, if active. The mirror tasks use
    /// this; tests use it to exercise the remote path deterministically.
    #[must_use]
    pub fn remote(&self) -> Option<&RemoteClient> {
        self.remote.as_deref()
    }
}
