//! Best-effort remote mirroring and the hybrid local/cloud store facade.
//!
//! Local sqlite is authoritative for the running session; the remote store
//! is a convenience replica. Every remote write is wrapped so failures are
//! logged and discarded without touching the already-committed local state.

mod hybrid;
mod remote;

use thiserror::Error;

pub use hybrid::HybridStore;
pub use remote::{RemoteClient, RemoteListingRow};

/// Errors from the remote mirror client. These never propagate past the
/// mirror task boundary; callers of [`HybridStore`] only ever see
/// [`sniper_db::DbError`] from the local write.
#[derive(Debug, Error)]
pub enum CloudError {
    /// Stored credentials cannot form a valid client (bad URL, key with
    /// non-header characters).
    #[error("invalid cloud credentials: {0}")]
    Credentials(String),

    /// Network or TLS failure, or a non-2xx response from the remote store.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
