//! Integration tests for the remote mirror client and the hybrid store,
//! using wiremock for the remote endpoint and in-memory sqlite locally.

use std::time::Duration;

use sniper_cloud::{HybridStore, RemoteClient};
use sniper_core::{Listing, MarketAnalysis, MarketTrend, PhoneModel};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn listing(id: &str, price_num: f64) -> Listing {
    Listing {
        id: id.to_string(),
        title: "iPhone 15 Pro 256GB".to_string(),
        price: format!("{price_num} €"),
        price_num,
        location: "Köln".to_string(),
        url: "https://www.kleinanzeigen.de/s-anzeige/iphone/2345678901-173-3331".to_string(),
        time_posted: None,
        storage_gb: Some("256GB".to_string()),
        battery_health: None,
        is_vb: None,
        condition: None,
        image_url: None,
        deal_score: None,
        agent_comment: None,
        arbitrage_potential: None,
        seller_insights: None,
        risk_score: 30,
        profit_potential: 90.0,
    }
}

fn analysis(listings: Vec<Listing>) -> MarketAnalysis {
    MarketAnalysis {
        average_price: 0,
        back_market_price: 0,
        arbitrage_spread: 0,
        listings,
        sources: vec![],
        summary: "test".to_string(),
        agent_recommendation: "test".to_string(),
        market_trend: MarketTrend::Stable,
    }
}

#[tokio::test]
async fn upsert_listings_sends_merge_duplicates_upsert() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/listings"))
        .and(query_param("on_conflict", "id"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer anon-key"))
        .and(header("prefer", "resolution=merge-duplicates"))
        .and(body_partial_json(serde_json::json!([{
            "id": "listing-0-1",
            "price_num": 850.0,
            "model": "iPhone 15 Pro"
        }])))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = RemoteClient::new(&server.uri(), "anon-key", 15).unwrap();
    client
        .upsert_listings("iPhone 15 Pro", &[listing("listing-0-1", 850.0)])
        .await
        .expect("upsert should succeed");
}

#[tokio::test]
async fn delete_watchlist_entry_filters_by_listing_id() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/watchlist"))
        .and(query_param("listing_id", "eq.listing-2-9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = RemoteClient::new(&server.uri(), "anon-key", 15).unwrap();
    client
        .delete_watchlist_entry("listing-2-9")
        .await
        .expect("delete should succeed");
}

#[tokio::test]
async fn remote_error_status_surfaces_from_client() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = RemoteClient::new(&server.uri(), "anon-key", 15).unwrap();
    let err = client
        .upsert_listings("iPhone 14", &[listing("listing-0-1", 500.0)])
        .await
        .unwrap_err();
    assert!(matches!(err, sniper_cloud::CloudError::Http(_)));
}

#[tokio::test]
async fn save_scan_without_credentials_stays_local_only() {
    let pool = sniper_db::connect_memory_pool().await.unwrap();
    let store = HybridStore::new(pool, None, 15);

    assert!(!store.is_cloud_enabled());
    store
        .save_scan(
            PhoneModel::IPhone15Pro,
            &analysis(vec![listing("listing-0-4", 780.0)]),
        )
        .await
        .unwrap();

    let archive = store.get_archive().await.unwrap();
    assert_eq!(archive.len(), 1);
    assert_eq!(archive[0].id, "listing-0-4");
}

#[tokio::test]
async fn save_scan_commits_locally_even_when_remote_write_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let pool = sniper_db::connect_memory_pool().await.unwrap();
    let remote = RemoteClient::new(&server.uri(), "anon-key", 15).unwrap();
    let store = HybridStore::new(pool, Some(remote), 15);

    // The hybrid path never surfaces the remote failure.
    store
        .save_scan(
            PhoneModel::IPhone14,
            &analysis(vec![listing("listing-0-8", 420.0)]),
        )
        .await
        .expect("local write must succeed");

    let archive = store.get_archive().await.unwrap();
    assert_eq!(archive.len(), 1, "local archive is authoritative");

    // The underlying remote write does fail; the mirror task swallows this.
    let err = store
        .remote()
        .expect("remote configured")
        .upsert_listings("iPhone 14", &[listing("listing-0-8", 420.0)])
        .await
        .unwrap_err();
    assert!(matches!(err, sniper_cloud::CloudError::Http(_)));
}

#[tokio::test]
async fn flush_waits_for_in_flight_mirror_writes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/listings"))
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_millis(100)))
        .expect(1)
        .mount(&server)
        .await;

    let pool = sniper_db::connect_memory_pool().await.unwrap();
    let remote = RemoteClient::new(&server.uri(), "anon-key", 15).unwrap();
    let store = HybridStore::new(pool, Some(remote), 15);

    store
        .save_scan(
            PhoneModel::IPhone15Pro,
            &analysis(vec![listing("listing-0-2", 810.0)]),
        )
        .await
        .unwrap();

    // save_scan returns while the mirror write is still in flight; flush
    // must block until it lands or the expect(1) fails on drop.
    store.flush().await;
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn set_cloud_config_persists_and_activates_mirror() {
    let pool = sniper_db::connect_memory_pool().await.unwrap();
    let mut store = HybridStore::new(pool, None, 15);
    assert!(!store.is_cloud_enabled());

    let enabled = store
        .set_cloud_config("https://proj.supabase.co", "anon-key")
        .await
        .unwrap();
    assert!(enabled);
    assert!(store.is_cloud_enabled());

    let (url, key) = store.get_cloud_config().await.unwrap();
    assert_eq!(url, "https://proj.supabase.co");
    assert_eq!(key, "anon-key");

    // Clearing either secret deactivates the mirror.
    let enabled = store.set_cloud_config("", "").await.unwrap();
    assert!(!enabled);
}

#[tokio::test]
async fn invalid_saved_credentials_disable_mirror_without_error() {
    let pool = sniper_db::connect_memory_pool().await.unwrap();
    let mut store = HybridStore::new(pool, None, 15);

    let enabled = store
        .set_cloud_config("not a url", "anon-key")
        .await
        .unwrap();
    assert!(!enabled, "bad URL falls back to local-only");

    // The bad credentials are still persisted for the user to inspect.
    let (url, _) = store.get_cloud_config().await.unwrap();
    assert_eq!(url, "not a url");
}

#[tokio::test]
async fn watchlist_toggle_mirrors_removal_only() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/watchlist"))
        .and(query_param("listing_id", "eq.listing-1-6"))
        .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_millis(50)))
        .expect(1)
        .mount(&server)
        .await;

    let pool = sniper_db::connect_memory_pool().await.unwrap();
    let remote = RemoteClient::new(&server.uri(), "anon-key", 15).unwrap();
    let store = HybridStore::new(pool, Some(remote), 15);

    let item = listing("listing-1-6", 700.0);
    assert!(store.toggle_watchlist(&item).await.unwrap());
    assert!(store.is_in_watchlist("listing-1-6").await.unwrap());
    assert!(!store.toggle_watchlist(&item).await.unwrap());
    assert!(!store.is_in_watchlist("listing-1-6").await.unwrap());

    // Only the removal reaches the remote, and flush waits for it.
    store.flush().await;
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
