//! Integration tests for the local store against an in-memory sqlite
//! database. The pool is capped at one connection so every query sees the
//! same database.

use sniper_core::{DealScore, Listing};
use sniper_db::connect_memory_pool;

fn listing(id: &str, price_num: f64) -> Listing {
    Listing {
        id: id.to_string(),
        title: format!("iPhone 15 Pro {price_num}"),
        price: format!("{price_num} €"),
        price_num,
        location: "Hamburg".to_string(),
        url: "https://www.kleinanzeigen.de/s-anzeige/iphone/2345678901-173-3331".to_string(),
        time_posted: None,
        storage_gb: Some("128GB".to_string()),
        battery_health: Some("88%".to_string()),
        is_vb: Some(true),
        condition: Some("Sehr Gut".to_string()),
        image_url: None,
        deal_score: Some(DealScore::Good),
        agent_comment: None,
        arbitrage_potential: None,
        seller_insights: None,
        risk_score: 25,
        profit_potential: 110.0,
    }
}

#[tokio::test]
async fn upsert_then_archive_orders_by_price_descending() {
    let pool = connect_memory_pool().await.unwrap();
    let batch = vec![
        listing("listing-0-1", 700.0),
        listing("listing-1-1", 950.0),
        listing("listing-2-1", 820.0),
    ];
    sniper_db::upsert_listings(&pool, "iPhone 15 Pro", &batch)
        .await
        .unwrap();

    let archive = sniper_db::get_archive(&pool).await.unwrap();
    let prices: Vec<f64> = archive.iter().map(|r| r.price_num).collect();
    assert_eq!(prices, vec![950.0, 820.0, 700.0]);
    assert!(archive.iter().all(|r| r.model == "iPhone 15 Pro"));
}

#[tokio::test]
async fn repeated_upsert_overwrites_by_id_without_duplicates() {
    let pool = connect_memory_pool().await.unwrap();
    sniper_db::upsert_listings(&pool, "iPhone 14", &[listing("listing-0-7", 500.0)])
        .await
        .unwrap();

    let mut replacement = listing("listing-0-7", 450.0);
    replacement.title = "iPhone 14 price drop".to_string();
    sniper_db::upsert_listings(&pool, "iPhone 14", &[replacement])
        .await
        .unwrap();

    let archive = sniper_db::get_archive(&pool).await.unwrap();
    assert_eq!(archive.len(), 1, "second upsert must replace, not append");
    assert_eq!(archive[0].price_num, 450.0);
    assert_eq!(archive[0].title, "iPhone 14 price drop");
}

#[tokio::test]
async fn get_listing_round_trips_optional_fields() {
    let pool = connect_memory_pool().await.unwrap();
    let original = listing("listing-3-9", 640.0);
    sniper_db::upsert_listings(&pool, "iPhone 13", &[original.clone()])
        .await
        .unwrap();

    let row = sniper_db::get_listing(&pool, "listing-3-9").await.unwrap();
    let fetched: Listing = row.into();
    assert_eq!(fetched.storage_gb, original.storage_gb);
    assert_eq!(fetched.battery_health, original.battery_health);
    assert_eq!(fetched.is_vb, original.is_vb);
    assert_eq!(fetched.deal_score, Some(DealScore::Good));
    assert_eq!(fetched.risk_score, 25);
}

#[tokio::test]
async fn get_listing_unknown_id_is_not_found() {
    let pool = connect_memory_pool().await.unwrap();
    let err = sniper_db::get_listing(&pool, "listing-0-0")
        .await
        .unwrap_err();
    assert!(matches!(err, sniper_db::DbError::NotFound(_)));
}

#[tokio::test]
async fn toggle_watchlist_alternates_membership() {
    let pool = connect_memory_pool().await.unwrap();
    let item = listing("listing-1-3", 780.0);

    assert!(sniper_db::toggle_watchlist(&pool, &item).await.unwrap());
    assert!(sniper_db::is_in_watchlist(&pool, &item.id).await.unwrap());

    assert!(!sniper_db::toggle_watchlist(&pool, &item).await.unwrap());
    assert!(!sniper_db::is_in_watchlist(&pool, &item.id).await.unwrap());

    // Involution: two toggles return to the original state.
    assert!(sniper_db::toggle_watchlist(&pool, &item).await.unwrap());
    let watchlist = sniper_db::get_watchlist(&pool).await.unwrap();
    assert_eq!(watchlist.len(), 1);
    assert_eq!(watchlist[0].id, "listing-1-3");
}

#[tokio::test]
async fn watchlist_survives_archive_overwrite() {
    let pool = connect_memory_pool().await.unwrap();
    let item = listing("listing-0-5", 900.0);
    sniper_db::upsert_listings(&pool, "iPhone 16", &[item.clone()])
        .await
        .unwrap();
    sniper_db::toggle_watchlist(&pool, &item).await.unwrap();

    // A later scan overwrites the same id with different data.
    sniper_db::upsert_listings(&pool, "iPhone 16", &[listing("listing-0-5", 300.0)])
        .await
        .unwrap();

    let watchlist = sniper_db::get_watchlist(&pool).await.unwrap();
    assert_eq!(watchlist[0].price_num, 900.0, "bookmark keeps its own copy");
}

#[tokio::test]
async fn cloud_config_round_trip_and_overwrite() {
    let pool = connect_memory_pool().await.unwrap();

    let (url, key) = sniper_db::get_cloud_config(&pool).await.unwrap();
    assert!(url.is_empty() && key.is_empty(), "unset reads as empty");

    sniper_db::set_cloud_config(&pool, "https://proj.supabase.co", "anon-key")
        .await
        .unwrap();
    let (url, key) = sniper_db::get_cloud_config(&pool).await.unwrap();
    assert_eq!(url, "https://proj.supabase.co");
    assert_eq!(key, "anon-key");

    sniper_db::set_cloud_config(&pool, "https://other.supabase.co", "new-key")
        .await
        .unwrap();
    let (url, _) = sniper_db::get_cloud_config(&pool).await.unwrap();
    assert_eq!(url, "https://other.supabase.co");
}
