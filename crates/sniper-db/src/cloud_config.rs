//! Database operations for the `config` key/value table.
//!
//! Holds the two remote-sync secrets under the `supabase_url` and
//! `supabase_key` keys. Both present and non-empty means cloud sync can be
//! activated.

use sqlx::SqlitePool;

use crate::DbError;

/// Config key for the remote endpoint URL.
pub const KEY_SUPABASE_URL: &str = "supabase_url";
/// Config key for the remote access key.
pub const KEY_SUPABASE_KEY: &str = "supabase_key";

/// Read a single config value, `None` if the key has never been set.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_config_value(pool: &SqlitePool, key: &str) -> Result<Option<String>, DbError> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM config WHERE key = $1")
        .bind(key)
        .fetch_optional(pool)
        .await?;
    Ok(value)
}

/// Write a single config value, overwriting any previous value.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the statement fails.
pub async fn set_config_value(pool: &SqlitePool, key: &str, value: &str) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO config (key, value) VALUES ($1, $2) \
         ON CONFLICT (key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;
    Ok(())
}

/// Read both remote-sync secrets. Missing keys come back as empty strings,
/// matching the "unset" presentation the config screen expects.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if a query fails.
pub async fn get_cloud_config(pool: &SqlitePool) -> Result<(String, String), DbError> {
    let url = get_config_value(pool, KEY_SUPABASE_URL)
        .await?
        .unwrap_or_default();
    let key = get_config_value(pool, KEY_SUPABASE_KEY)
        .await?
        .unwrap_or_default();
    Ok((url, key))
}

/// Persist both remote-sync secrets.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if a statement fails.
pub async fn set_cloud_config(pool: &SqlitePool, url: &str, key: &str) -> Result<(), DbError> {
    set_config_value(pool, KEY_SUPABASE_URL, url).await?;
    set_config_value(pool, KEY_SUPABASE_KEY, key).await?;
    Ok(())
}
