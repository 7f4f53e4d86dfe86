//! Package-to-offer flow against a fake freight API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use envios_core::{Locale, ShippingPackage};
use envios_freight::{QuoteAdapter, QuoteError};
use envios_integration_tests::{
    FAST_QUOTE, FakeFreightApi, FakeResponse, TEST_TOKEN, line_item, package,
};
use rust_decimal::Decimal;

// =============================================================================
// Offers
// =============================================================================

#[tokio::test]
async fn test_single_quote_becomes_single_offer() {
    let api = FakeFreightApi::start(FakeResponse::ok(FAST_QUOTE)).await.unwrap();
    let adapter = QuoteAdapter::new(api.config()).unwrap();

    let offers = adapter.calculate_shipping(&package()).await;

    assert_eq!(offers.len(), 1);
    let offer = &offers[0];
    assert_eq!(offer.id, "olist-envios.abc");
    assert!(offer.is_own());
    assert_eq!(offer.label, "Fast (2 dias úteis)");
    assert_eq!(offer.cost, Decimal::new(199, 1));
    assert_eq!(offer.delivery_time, 2);
    assert_eq!(offer.metadata.carrier, "abc");
    assert_eq!(offer.metadata.delivery_time_label.as_deref(), Some("2 dias úteis"));
}

#[tokio::test]
async fn test_english_labels() {
    let api = FakeFreightApi::start(FakeResponse::ok(FAST_QUOTE)).await.unwrap();
    let config = envios_freight::FreightConfig {
        locale: Locale::En,
        ..api.config()
    };
    let adapter = QuoteAdapter::new(config).unwrap();

    let offers = adapter.calculate_shipping(&package()).await;
    assert_eq!(offers[0].label, "Fast (2 business days)");
}

#[tokio::test]
async fn test_one_day_is_singular() {
    let body = r#"{"quotes":[{"carrier_slug":"abc","display_name":"Fast","total_cost":19.9,"delivery_time":1}]}"#;
    let api = FakeFreightApi::start(FakeResponse::ok(body)).await.unwrap();
    let adapter = QuoteAdapter::new(api.config()).unwrap();

    let offers = adapter.calculate_shipping(&package()).await;
    assert_eq!(offers[0].label, "Fast (1 dia útil)");
}

#[tokio::test]
async fn test_quote_without_cost_is_dropped() {
    let body = r#"{"quotes":[
        {"carrier_slug":"pac","display_name":"PAC","total_cost":25.5,"delivery_time":7},
        {"carrier_slug":"broken","display_name":"Broken","delivery_time":3},
        {"carrier_slug":"sedex","display_name":"SEDEX","total_cost":"42.10","delivery_time":2}
    ]}"#;
    let api = FakeFreightApi::start(FakeResponse::ok(body)).await.unwrap();
    let adapter = QuoteAdapter::new(api.config()).unwrap();

    let offers = adapter.calculate_shipping(&package()).await;

    let ids: Vec<_> = offers.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, ["olist-envios.pac", "olist-envios.sedex"]);
    assert_eq!(offers[1].cost, Decimal::new(4210, 2));
}

#[tokio::test]
async fn test_duplicate_carriers_stay_separate() {
    let body = r#"{"quotes":[
        {"carrier_name":"Jadlog","total_cost":30,"delivery_time":4},
        {"carrier_name":"Jadlog","total_cost":35,"delivery_time":2}
    ]}"#;
    let api = FakeFreightApi::start(FakeResponse::ok(body)).await.unwrap();
    let adapter = QuoteAdapter::new(api.config()).unwrap();

    let offers = adapter.calculate_shipping(&package()).await;

    assert_eq!(offers.len(), 2);
    assert_eq!(offers[0].id, "olist-envios.jadlog");
    assert_eq!(offers[1].id, "olist-envios.jadlog-2");
    assert_eq!(offers[0].label, "Jadlog (4 dias úteis)");
}

#[tokio::test]
async fn test_empty_quote_list() {
    let api = FakeFreightApi::start(FakeResponse::ok(r#"{"quotes":[]}"#))
        .await
        .unwrap();
    let adapter = QuoteAdapter::new(api.config()).unwrap();

    assert!(adapter.quote(&package()).await.unwrap().is_empty());
}

// =============================================================================
// Request
// =============================================================================

#[tokio::test]
async fn test_request_carries_token_and_converted_package() {
    let api = FakeFreightApi::start(FakeResponse::ok(FAST_QUOTE)).await.unwrap();
    let adapter = QuoteAdapter::new(api.config()).unwrap();

    let package = package().with_item(envios_core::LineItem {
        needs_shipping: false,
        ..line_item("ebook")
    });
    adapter.calculate_shipping(&package).await;

    let requests = api.quote_requests().await;
    assert_eq!(requests.len(), 1);

    let request = &requests[0];
    assert_eq!(request.integration_id.as_deref(), Some(TEST_TOKEN));
    assert_eq!(request.content_type.as_deref(), Some("application/json"));

    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["to"]["postal_code"], "01310100");

    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["reference"], "42");
    assert_eq!(products[0]["quantity"], 1);
    assert_eq!(products[0]["weight"], 1.0);
}

#[tokio::test]
async fn test_nothing_to_ship_makes_no_call() {
    let api = FakeFreightApi::start(FakeResponse::ok(FAST_QUOTE)).await.unwrap();
    let adapter = QuoteAdapter::new(api.config()).unwrap();

    let virtual_only = ShippingPackage::new("01310-100").with_item(envios_core::LineItem {
        needs_shipping: false,
        ..line_item("ebook")
    });
    let empty = ShippingPackage::new("01310-100");

    assert!(adapter.calculate_shipping(&virtual_only).await.is_empty());
    assert!(adapter.calculate_shipping(&empty).await.is_empty());
    assert_eq!(api.quote_hits(), 0);
}

#[tokio::test]
async fn test_formatting_only_postal_code_makes_no_call() {
    let api = FakeFreightApi::start(FakeResponse::ok(FAST_QUOTE)).await.unwrap();
    let adapter = QuoteAdapter::new(api.config()).unwrap();

    let package = ShippingPackage::new(" -.- ").with_item(line_item("42"));

    assert!(adapter.calculate_shipping(&package).await.is_empty());
    assert_eq!(api.quote_hits(), 0);
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_created_status_is_success() {
    let api = FakeFreightApi::start(FakeResponse::ok(FAST_QUOTE).with_status(StatusCode::CREATED))
        .await
        .unwrap();
    let adapter = QuoteAdapter::new(api.config()).unwrap();

    assert_eq!(adapter.calculate_shipping(&package()).await.len(), 1);
}

#[tokio::test]
async fn test_non_success_status_offers_nothing() {
    for status in [
        StatusCode::ACCEPTED,
        StatusCode::UNAUTHORIZED,
        StatusCode::UNPROCESSABLE_ENTITY,
        StatusCode::INTERNAL_SERVER_ERROR,
    ] {
        let api = FakeFreightApi::start(FakeResponse::ok(FAST_QUOTE).with_status(status))
            .await
            .unwrap();
        let adapter = QuoteAdapter::new(api.config()).unwrap();

        assert!(adapter.calculate_shipping(&package()).await.is_empty());

        let result = adapter.quote(&package()).await;
        assert!(
            matches!(result, Err(QuoteError::Upstream { status: s, .. }) if s == status.as_u16())
        );
    }
}

#[tokio::test]
async fn test_malformed_body_offers_nothing() {
    let api = FakeFreightApi::start(FakeResponse::ok("<html>oops</html>")).await.unwrap();
    let adapter = QuoteAdapter::new(api.config()).unwrap();

    assert!(adapter.calculate_shipping(&package()).await.is_empty());
    assert!(matches!(
        adapter.quote(&package()).await,
        Err(QuoteError::MalformedResponse(_))
    ));
}
