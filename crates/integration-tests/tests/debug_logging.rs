//! Debug-mode request/response dumps.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::time::Duration;

use envios_freight::adapter::DEBUG_TARGET;
use envios_freight::{FreightConfig, QuoteAdapter};
use envios_integration_tests::{FAST_QUOTE, FakeFreightApi, FakeResponse, LogCapture, package};

#[tokio::test]
async fn test_debug_mode_logs_request_and_response() {
    let api = FakeFreightApi::start(FakeResponse::ok(FAST_QUOTE)).await.unwrap();
    let adapter = QuoteAdapter::new(FreightConfig {
        debug: true,
        ..api.config()
    })
    .unwrap();

    let logs = LogCapture::default();
    let offers = {
        let _guard = logs.set_default();
        adapter.calculate_shipping(&package()).await
    };

    assert_eq!(offers.len(), 1);

    let lines = logs.lines_for(DEBUG_TARGET);
    assert_eq!(lines.len(), 2, "{lines:?}");
    assert!(lines[0].contains("INFO"));
    assert!(lines[0].contains("Freight quote request"));
    assert!(lines[0].contains(r#""postal_code":"01310100""#));
    assert!(lines[1].contains("Freight quote response"));
    assert!(lines[1].contains(FAST_QUOTE));
}

#[tokio::test]
async fn test_debug_mode_off_is_silent() {
    let api = FakeFreightApi::start(FakeResponse::ok(FAST_QUOTE)).await.unwrap();
    let adapter = QuoteAdapter::new(api.config()).unwrap();

    let logs = LogCapture::default();
    let offers = {
        let _guard = logs.set_default();
        adapter.calculate_shipping(&package()).await
    };

    assert_eq!(offers.len(), 1);
    assert!(logs.lines_for(DEBUG_TARGET).is_empty());
    assert!(!logs.contents().contains(FAST_QUOTE));
}

#[tokio::test]
async fn test_debug_mode_logs_transport_error() {
    let api = FakeFreightApi::start(
        FakeResponse::ok(FAST_QUOTE).with_delay(Duration::from_millis(1500)),
    )
    .await
    .unwrap();
    let adapter = QuoteAdapter::new(FreightConfig {
        debug: true,
        timeout: Duration::from_millis(200),
        ..api.config()
    })
    .unwrap();

    let logs = LogCapture::default();
    let offers = {
        let _guard = logs.set_default();
        adapter.calculate_shipping(&package()).await
    };

    assert!(offers.is_empty());

    let lines = logs.lines_for(DEBUG_TARGET);
    assert_eq!(lines.len(), 2, "{lines:?}");
    assert!(lines[1].contains("Freight quote response"));
    assert!(lines[1].contains("error="));
    assert!(!lines[1].contains(FAST_QUOTE));
}

#[tokio::test]
async fn test_cache_hit_is_not_dumped() {
    let api = FakeFreightApi::start(FakeResponse::ok(FAST_QUOTE)).await.unwrap();
    let adapter = QuoteAdapter::new(FreightConfig {
        debug: true,
        ..api.config()
    })
    .unwrap();

    adapter.calculate_shipping(&package()).await;

    let logs = LogCapture::default();
    let offers = {
        let _guard = logs.set_default();
        adapter.calculate_shipping(&package()).await
    };

    assert_eq!(offers.len(), 1);
    assert!(logs.lines_for(DEBUG_TARGET).is_empty());
}
