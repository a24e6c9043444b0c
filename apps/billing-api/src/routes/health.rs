//! Health check for monitoring.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Number of registered currencies
    pub currencies: usize,
    /// Number of registered accounts
    pub accounts: usize,
    /// RFC 3339
    pub server_time: String,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.store.read().await;

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        currencies: store.currencies().len(),
        accounts: store.accounts().len(),
        server_time: Utc::now().to_rfc3339(),
    })
}
