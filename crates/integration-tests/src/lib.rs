//! Integration tests for Envios.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p envios-integration-tests
//! ```
//!
//! No external services are needed: [`FakeFreightApi`] serves the two freight
//! endpoints on an ephemeral local port and records what it receives, so the
//! real `reqwest` client is exercised end to end.
//!
//! # Test Categories
//!
//! - `quote_flow` - Package to offers through the HTTP client
//! - `quote_cache` - Cache hits, expiry and what is never cached
//! - `uninstall` - Uninstall webhook delivery
//! - `checkout_routes` - Service routes through `tower::ServiceExt::oneshot`
//! - `debug_logging` - Request/response dumps when debug mode is on

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError};
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use envios_core::{LineItem, ShippingPackage};
use envios_freight::FreightConfig;
use rust_decimal::Decimal;
use secrecy::SecretString;
use tokio::sync::Mutex;

/// Token every fake-backed config carries.
pub const TEST_TOKEN: &str = "test-integration-token";

/// A request the fake API received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub integration_id: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// What the quote endpoint answers with.
#[derive(Debug, Clone)]
pub struct FakeResponse {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl FakeResponse {
    /// 200 with the given body.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    /// Same body, different status.
    #[must_use]
    pub const fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Wait before answering.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug)]
struct FakeState {
    response: Mutex<FakeResponse>,
    quote_hits: AtomicUsize,
    quote_requests: Mutex<Vec<RecordedRequest>>,
    uninstall_requests: Mutex<Vec<RecordedRequest>>,
}

/// Local stand-in for the freight API.
///
/// The server task lives until the test runtime shuts down.
#[derive(Debug, Clone)]
pub struct FakeFreightApi {
    addr: SocketAddr,
    state: Arc<FakeState>,
}

impl FakeFreightApi {
    /// Start a fake API answering every quote with `response`.
    ///
    /// # Errors
    ///
    /// Returns error if no local port can be bound.
    pub async fn start(response: FakeResponse) -> std::io::Result<Self> {
        let state = Arc::new(FakeState {
            response: Mutex::new(response),
            quote_hits: AtomicUsize::new(0),
            quote_requests: Mutex::new(Vec::new()),
            uninstall_requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/freights/woocommerce", post(quote))
            .route("/v1/webhook/ecommerce/woocommerce/app-uninstall", post(uninstall))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, state })
    }

    /// Base URL to put in [`FreightConfig::api_base_url`].
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Enabled config with a token, pointed at this server.
    #[must_use]
    pub fn config(&self) -> FreightConfig {
        FreightConfig {
            integration_token: Some(SecretString::from(TEST_TOKEN)),
            api_base_url: self.base_url(),
            timeout: Duration::from_secs(2),
            ..FreightConfig::default()
        }
    }

    /// Replace the quote response for subsequent requests.
    pub async fn respond_with(&self, response: FakeResponse) {
        *self.state.response.lock().await = response;
    }

    /// Number of quote requests received.
    #[must_use]
    pub fn quote_hits(&self) -> usize {
        self.state.quote_hits.load(Ordering::SeqCst)
    }

    /// Quote requests received, in arrival order.
    pub async fn quote_requests(&self) -> Vec<RecordedRequest> {
        self.state.quote_requests.lock().await.clone()
    }

    /// Uninstall webhooks received, in arrival order.
    pub async fn uninstall_requests(&self) -> Vec<RecordedRequest> {
        self.state.uninstall_requests.lock().await.clone()
    }
}

fn record(headers: &HeaderMap, body: String) -> RecordedRequest {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    RecordedRequest {
        integration_id: header("x-integration-id"),
        content_type: header("content-type"),
        body,
    }
}

async fn quote(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    state.quote_hits.fetch_add(1, Ordering::SeqCst);
    state.quote_requests.lock().await.push(record(&headers, body));

    let response = state.response.lock().await.clone();
    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }

    (response.status, response.body)
}

async fn uninstall(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    state.uninstall_requests.lock().await.push(record(&headers, body));
    StatusCode::OK
}

// =============================================================================
// Log capture
// =============================================================================

/// Collects formatted log lines in memory.
///
/// Install with [`LogCapture::set_default`] inside a current-thread test so
/// only that test's events are recorded.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buffer: Arc<std::sync::Mutex<Vec<u8>>>,
}

/// Writer handed to the fmt layer for each event.
#[derive(Debug)]
pub struct LogCaptureWriter {
    buffer: Arc<std::sync::Mutex<Vec<u8>>>,
}

impl std::io::Write for LogCaptureWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogCapture {
    /// Record every event at INFO and above on this thread until the guard
    /// is dropped.
    #[must_use]
    pub fn set_default(&self) -> tracing::subscriber::DefaultGuard {
        let buffer = Arc::clone(&self.buffer);
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_target(true)
            .with_writer(move || LogCaptureWriter {
                buffer: Arc::clone(&buffer),
            })
            .finish();

        tracing::subscriber::set_default(subscriber)
    }

    /// Everything logged so far.
    #[must_use]
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Lines logged under `target`.
    #[must_use]
    pub fn lines_for(&self, target: &str) -> Vec<String> {
        let needle = format!("{target}:");
        self.contents()
            .lines()
            .filter(|line| line.contains(&needle))
            .map(str::to_string)
            .collect()
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// One shippable 1 kg, 10 cm cube line worth 49.90.
#[must_use]
pub fn line_item(reference: &str) -> LineItem {
    LineItem {
        reference: Some(reference.to_string()),
        unit_price: Decimal::new(4990, 2),
        quantity: 1,
        weight: 1.0,
        length: 10.0,
        width: 10.0,
        height: 10.0,
        needs_shipping: true,
    }
}

/// A package to São Paulo with a single shippable line.
#[must_use]
pub fn package() -> ShippingPackage {
    ShippingPackage::new("01310-100").with_item(line_item("42"))
}

/// The single-quote body used throughout the tests.
pub const FAST_QUOTE: &str = r#"{"quotes":[{"carrier_slug":"abc","display_name":"Fast","total_cost":19.9,"delivery_time":2}]}"#;
