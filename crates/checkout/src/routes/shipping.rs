//! Shipping rate route.
//!
//! Always answers 200 once the package parses. A quote failure is logged by
//! the adapter and shows up here as an empty `rates` list; checkout then hides
//! the method.

use axum::{Json, extract::State};
use envios_core::{METHOD_ID, ShippingPackage, ShippingRateOffer};
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;

/// Rates offered by the shipping method for one package.
#[derive(Debug, Clone, Serialize)]
pub struct RatesResponse {
    pub method_id: &'static str,
    pub title: String,
    pub rates: Vec<ShippingRateOffer>,
}

/// Quote a package.
///
/// `POST /shipping/rates`
#[instrument(skip_all)]
pub async fn rates(
    State(state): State<AppState>,
    Json(package): Json<ShippingPackage>,
) -> Json<RatesResponse> {
    let rates = state.adapter().calculate_shipping(&package).await;
    tracing::debug!(rates = rates.len(), "Shipping rates calculated");

    Json(RatesResponse {
        method_id: METHOD_ID,
        title: state.config().freight.title.clone(),
        rates,
    })
}
