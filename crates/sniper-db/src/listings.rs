//! Database operations for the `listings` archive table.
//!
//! The archive is a full historical upsert table: every successful scan
//! writes its validated batch here, keyed by listing id. A repeated id
//! replaces the prior row entirely.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use sniper_core::{DealScore, Listing};

use crate::DbError;

/// A row from the `listings` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ListingRow {
    pub id: String,
    pub model: String,
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
    pub captured_at: DateTime<Utc>,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
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

const LISTING_COLUMNS: &str = "id, model, title, price, price_num, location, url, time_posted, \
     storage_gb, battery_health, is_vb, condition, image_url, deal_score, agent_comment, \
     arbitrage_potential, seller_insights, risk_score, profit_potential, captured_at";

/// Upsert a scan batch into the archive, keyed by listing id.
///
/// The whole batch is written inside one transaction, so a caller never
/// observes a partially applied scan.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails; the transaction is then
/// rolled back.
pub async fn upsert_listings(
    pool: &SqlitePool,
    model: &str,
    listings: &[Listing],
) -> Result<(), DbError> {
    let captured_at = Utc::now();
    let mut tx = pool.begin().await?;
    for listing in listings {
        sqlx::query(
            "INSERT INTO listings (id, model, title, price, price_num, location, url, \
                 time_posted, storage_gb, battery_health, is_vb, condition, image_url, \
                 deal_score, agent_comment, arbitrage_potential, seller_insights, \
                 risk_score, profit_potential, captured_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
                 $17, $18, $19, $20) \
             ON CONFLICT (id) DO UPDATE SET \
                 model = excluded.model, \
                 title = excluded.title, \
                 price = excluded.price, \
                 price_num = excluded.price_num, \
                 location = excluded.location, \
                 url = excluded.url, \
                 time_posted = excluded.time_posted, \
                 storage_gb = excluded.storage_gb, \
                 battery_health = excluded.battery_health, \
                 is_vb = excluded.is_vb, \
                 condition = excluded.condition, \
                 image_url = excluded.image_url, \
                 deal_score = excluded.deal_score, \
                 agent_comment = excluded.agent_comment, \
                 arbitrage_potential = excluded.arbitrage_potential, \
                 seller_insights = excluded.seller_insights, \
                 risk_score = excluded.risk_score, \
                 profit_potential = excluded.profit_potential, \
                 captured_at = excluded.captured_at",
        )
        .bind(&listing.id)
        .bind(model)
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
        .bind(captured_at)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

/// Full archive ordered by numeric price, highest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_archive(pool: &SqlitePool) -> Result<Vec<ListingRow>, DbError> {
    let rows = sqlx::query_as::<_, ListingRow>(&format!(
        "SELECT {LISTING_COLUMNS} FROM listings ORDER BY price_num DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Look up a single archived listing by id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has that id, [`DbError::Sqlx`] on
/// query failure.
pub async fn get_listing(pool: &SqlitePool, id: &str) -> Result<ListingRow, DbError> {
    let row = sqlx::query_as::<_, ListingRow>(&format!(
        "SELECT {LISTING_COLUMNS} FROM listings WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| DbError::NotFound(id.to_string()))
}
