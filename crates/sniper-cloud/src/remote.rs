//! PostgREST-style client for the remote listings mirror.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Url};
use serde::Serialize;

use sniper_core::Listing;

use crate::CloudError;

/// One row of the remote `listings` table, keyed by the same listing id as
/// the local archive.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteListingRow {
    pub id: String,
    pub title: String,
    pub price_num: f64,
    pub location: String,
    pub url: String,
    pub storage_gb: Option<String>,
    pub battery_health: Option<String>,
    pub risk_score: i64,
    pub profit_potential: f64,
    pub model: String,
}

impl RemoteListingRow {
    #[must_use]
    pub fn from_listing(model: &str, listing: &Listing) -> Self {
        Self {
            id: listing.id.clone(),
            title: listing.title.clone(),
            price_num: listing.price_num,
            location: listing.location.clone(),
            url: listing.url.clone(),
            storage_gb: listing.storage_gb.clone(),
            battery_health: listing.battery_health.clone(),
            risk_score: i64::from(listing.risk_score),
            profit_potential: listing.profit_potential,
            model: model.to_string(),
        }
    }
}

/// Client for the remote relational store's REST surface.
///
/// Constructed once per effective credential set and replaced wholesale when
/// the credentials change; in-flight requests against a replaced client
/// simply complete or fail on their own.
#[derive(Debug)]
pub struct RemoteClient {
    client: Client,
    base_url: Url,
}

impl RemoteClient {
    /// Builds a client from the endpoint URL and access key.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Credentials`] if the URL does not parse or the
    /// key cannot be sent as a header, [`CloudError::Http`] if the
    /// underlying `reqwest::Client` cannot be constructed.
    pub fn new(url: &str, key: &str, timeout_secs: u64) -> Result<Self, CloudError> {
        let normalised = format!("{}/", url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| CloudError::Credentials(format!("invalid URL '{url}': {e}")))?;

        let key_value = HeaderValue::from_str(key)
            .map_err(|e| CloudError::Credentials(format!("key is not header-safe: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| CloudError::Credentials(format!("key is not header-safe: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key_value);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .default_headers(headers)
            .user_agent("phone-sniper/0.1 (cloud-sync)")
            .build()?;

        Ok(Self { client, base_url })
    }

    fn table_url(&self, table: &str) -> Url {
        // base_url always ends in '/', so join keeps the full path.
        self.base_url
            .join(&format!("rest/v1/{table}"))
            .expect("static table path is a valid URL segment")
    }

    /// Upsert a scan batch into the remote `listings` table, keyed by `id`.
    /// A conflicting id updates the existing row rather than duplicating it.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Http`] on network failure or a non-2xx status.
    pub async fn upsert_listings(&self, model: &str, listings: &[Listing]) -> Result<(), CloudError> {
        let rows: Vec<RemoteListingRow> = listings
            .iter()
            .map(|l| RemoteListingRow::from_listing(model, l))
            .collect();

        let mut url = self.table_url("listings");
        url.query_pairs_mut().append_pair("on_conflict", "id");

        self.client
            .post(url)
            .header("Prefer", "resolution=merge-duplicates")
            .json(&rows)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Remove a listing from the remote `watchlist` table.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Http`] on network failure or a non-2xx status.
    pub async fn delete_watchlist_entry(&self, listing_id: &str) -> Result<(), CloudError> {
        let mut url = self.table_url("watchlist");
        url.query_pairs_mut()
            .append_pair("listing_id", &format!("eq.{listing_id}"));

        self.client
            .delete(url)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
