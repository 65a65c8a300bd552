//! Integration tests for fetching the catalog over HTTP.
//!
//! Each test starts a loopback stub (see [`StubCatalog`]) and points a real
//! `CatalogClient` at it.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;
use url::Url;
use vitrine_integration_tests::{StubCatalog, sample_catalog};
use vitrine_storefront::catalog::{CatalogClient, CatalogListing, CatalogSource, FetchError};
use vitrine_storefront::config::CatalogConfig;
use vitrine_storefront::state::AppState;

#[tokio::test]
async fn test_fetch_decodes_catalog() {
    let stub = StubCatalog::json(&sample_catalog()).await;
    let state = AppState::new(stub.config()).unwrap();

    let catalog = state.catalog().fetch().await.unwrap();

    assert_eq!(catalog.products.len(), 3);
    let first = catalog.products.first().unwrap();
    assert_eq!(first.name, "VESTIDO TRANSPASSE BOW");
    assert_eq!(first.sizes.len(), 3);
    assert!(!first.size("PP").unwrap().available);
}

#[tokio::test]
async fn test_listing_all_products() {
    let stub = StubCatalog::json(&sample_catalog()).await;
    let state = AppState::new(stub.config()).unwrap();
    let mut listing = state.listing();

    let products = listing.fetch(false).await.unwrap();
    assert_eq!(products.len(), 3);
    assert_eq!(listing.item_count(), 3);
}

#[tokio::test]
async fn test_listing_on_sale_only() {
    let stub = StubCatalog::json(&sample_catalog()).await;
    let state = AppState::new(stub.config()).unwrap();
    let mut listing = state.listing();

    listing.fetch(true).await.unwrap();

    assert_eq!(listing.item_count(), 2);
    assert!(listing.products().iter().all(|p| p.on_sale));

    let dress = listing.product_at(0);
    assert_eq!(dress.name(), "dress");
    assert_eq!(dress.actual_price(), "R$ 19,90");
    assert!(dress.has_discount());
    assert_eq!(
        dress.product().actual_amount(),
        Decimal::new(1990, 2)
    );
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let stub = StubCatalog::raw(StatusCode::INTERNAL_SERVER_ERROR, "oops").await;
    let state = AppState::new(stub.config()).unwrap();

    let err = state.catalog().fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Status(500)), "got {err:?}");
}

#[tokio::test]
async fn test_not_found_status_is_error() {
    let stub = StubCatalog::raw(StatusCode::NOT_FOUND, "").await;
    let state = AppState::new(stub.config()).unwrap();

    let err = state.catalog().fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Status(404)), "got {err:?}");
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let stub = StubCatalog::raw(StatusCode::OK, "{\"products\": [").await;
    let state = AppState::new(stub.config()).unwrap();

    let err = state.catalog().fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_missing_field_is_decode_error() {
    let stub = StubCatalog::json(&json!({
        "products": [{ "name": "No price", "on_sale": false, "sizes": [] }]
    }))
    .await;
    let state = AppState::new(stub.config()).unwrap();

    let err = state.catalog().fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_list() {
    let good = StubCatalog::json(&sample_catalog()).await;
    let state = AppState::new(good.config()).unwrap();
    let mut listing = state.listing();
    listing.fetch(false).await.unwrap();

    let bad = StubCatalog::raw(StatusCode::BAD_GATEWAY, "").await;
    let client = CatalogClient::new(&bad.config().catalog).unwrap();
    let mut failing = CatalogListing::new(client, state.cart().clone())
        .with_products(listing.products().to_vec());

    assert!(failing.fetch(false).await.is_err());
    assert_eq!(failing.item_count(), 3);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let config = CatalogConfig {
        endpoint: Url::parse("http://127.0.0.1:9/unreachable").unwrap(),
        request_timeout: Some(Duration::from_secs(2)),
    };
    let client = CatalogClient::new(&config).unwrap();

    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
}
