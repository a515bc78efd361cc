//! Database operations for the `watchlist` table.
//!
//! The watchlist is a user-curated copy of listings with a lifecycle
//! independent of the archive: a bookmarked listing survives even after
//! later scans overwrite its id space in `listings`.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use sniper_core::{DealScore, Listing};

use crate::DbError;

/// A row from the `watchlist` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WatchlistRow {
    pub id: String,
    pub title: String,
    pub price: String,
    pub price_num: f64,
    pub location: String,
    pub url: String,
    pub time_posted: Option<String>,
    pub storage_gb: Option<String>,
    pub battery_health: Option<String>,
    pub is_vb: Option<bool>,
    pub condition: Option<String>,
    pub image_url: Option<String>,
    pub deal_score: Option<String>,
    pub agent_comment: Option<String>,
    pub arbitrage_potential: Option<String>,
    pub seller_insights: Option<String>,
    pub risk_score: i64,
    pub profit_potential: f64,
    pub added_at: DateTime<Utc>,
}

impl From<WatchlistRow> for Listing {
    fn from(row: WatchlistRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            price: row.price,
            price_num: row.price_num,
            location: row.location,
            url: row.url,
            time_posted: row.time_posted,
            storage_gb: row.storage_gb,
            battery_health: row.battery_health,
            is_vb: row.is_vb,
            condition: row.condition,
            image_url: row.image_url,
            deal_score: row.deal_score.as_deref().and_then(DealScore::parse),
            agent_comment: row.agent_comment,
            arbitrage_potential: row.arbitrage_potential,
            seller_insights: row.seller_insights,
            risk_score: u8::try_from(row.risk_score.clamp(0, 100)).unwrap_or(100),
            profit_potential: row.profit_potential,
        }
    }
}

/// Toggle a listing's watchlist membership.
///
/// Returns `true` if the listing was added, `false` if it was removed.
/// Repeated calls strictly alternate state; neither direction errors on a
/// missing or duplicate key.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if a statement fails.
pub async fn toggle_watchlist(pool: &SqlitePool, listing: &Listing) -> Result<bool, DbError> {
    if is_in_watchlist(pool, &listing.id).await? {
        sqlx::query("DELETE FROM watchlist WHERE id = $1")
            .bind(&listing.id)
            .execute(pool)
            .await?;
        return Ok(false);
    }

    sqlx::query(
        "INSERT INTO watchlist (id, title, price, price_num, location, url, time_posted, \
             storage_gb, battery_health, is_vb, condition, image_url, deal_score, \
             agent_comment, arbitrage_potential, seller_insights, risk_score, \
             profit_potential, added_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
             $17, $18, $19) \
         ON CONFLICT (id) DO NOTHING",
    )
    .bind(&listing.id)
    .bind(&listing.title)
    .bind(&listing.price)
    .bind(listing.price_num)
    .bind(&listing.location)
    .bind(&listing.url)
    .bind(&listing.time_posted)
    .bind(&listing.storage_gb)
    .bind(&listing.battery_health)
    .bind(listing.is_vb)
    .bind(&listing.condition)
    .bind(&listing.image_url)
    .bind(listing.deal_score.map(DealScore::as_str))
    .bind(&listing.agent_comment)
    .bind(&listing.arbitrage_potential)
    .bind(&listing.seller_insights)
    .bind(i64::from(listing.risk_score))
    .bind(listing.profit_potential)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(true)
}

/// Existence check by listing id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn is_in_watchlist(pool: &SqlitePool, id: &str) -> Result<bool, DbError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM watchlist WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Snapshot of the watchlist. Insertion order is not guaranteed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_watchlist(pool: &SqlitePool) -> Result<Vec<WatchlistRow>, DbError> {
    let rows = sqlx::query_as::<_, WatchlistRow>(
        "SELECT id, title, price, price_num, location, url, time_posted, storage_gb, \
             battery_health, is_vb, condition, image_url, deal_score, agent_comment, \
             arbitrage_potential, seller_insights, risk_score, profit_potential, added_at \
         FROM watchlist",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
