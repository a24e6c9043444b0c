//! # Billing API
//!
//! HTTP JSON server for currencies, accounts and bill calculation.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Billing API Layers                              │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Middleware                                                      │  │
//! │  │  CatchPanicLayer → TraceLayer (request_id) → CorsLayer (opt.)   │  │
//! │  └───────────────────────────────┬──────────────────────────────────┘  │
//! │                                  │                                      │
//! │  ┌────────────────┐  ┌───────────▼────┐  ┌────────────────────────────┐│
//! │  │ currency routes│  │ account routes │  │ bill + health routes       ││
//! │  │                │  │                │  │                            ││
//! │  │ • create       │  │ • create       │  │ • calculate_bill           ││
//! │  │ • list / get   │  │ • list / get   │  │ • health                   ││
//! │  └───────┬────────┘  └───────┬────────┘  └─────────────┬──────────────┘│
//! │          └───────────────────┼─────────────────────────┘               │
//! │                              ▼                                          │
//! │               AppState { Arc<RwLock<Store>> }                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (all optional):
//! - `BILLING_HOST` - Interface to bind (default: 0.0.0.0)
//! - `BILLING_PORT` - HTTP port (default: 3000)
//! - `BILLING_LOG_FILTER` - Tracing filter, `RUST_LOG` wins if set
//! - `BILLING_CORS_PERMISSIVE` - Allow any origin (default: false)
//! - `BILLING_CONFIG` - TOML file with the same keys (default: billing.toml)

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

// Re-exports
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::AppState;

use std::any::Any;

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Builds the application router with middleware and state attached.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = Uuid::new_v4();
        tracing::info_span!(
            "http_request",
            %request_id,
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    let app = routes::routes().with_state(state).layer(trace);

    let app = if config.cors_permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };

    app.layer(CatchPanicLayer::custom(handle_panic))
}

/// Turns a handler panic into a 500 with the usual error body.
fn handle_panic(_panic: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::internal("Internal server error").into_response()
}
