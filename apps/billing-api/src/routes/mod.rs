//! # Routes Module
//!
//! HTTP handlers, grouped by resource.
//!
//! ## Route Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Method  Path                        Handler                 Success    │
//! │  ──────  ──────────────────────────  ──────────────────────  ───────    │
//! │  POST    /currencies                 create_currency         201        │
//! │  GET     /currencies                 list_currencies         200        │
//! │  GET     /currencies/:currency       get_currency            200        │
//! │  POST    /accounts                   create_account          201        │
//! │  GET     /accounts                   list_accounts           200        │
//! │  GET     /accounts/:accountId        get_account             200        │
//! │  POST    /accounts/:accountId/bill   calculate_bill          201        │
//! │  GET     /health                     health                  200        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod account;
pub mod billing;
pub mod currency;
pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// All routes, before state and middleware are attached.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/currencies",
            post(currency::create_currency).get(currency::list_currencies),
        )
        .route("/currencies/:currency", get(currency::get_currency))
        .route(
            "/accounts",
            post(account::create_account).get(account::list_accounts),
        )
        .route("/accounts/:account_id", get(account::get_account))
        .route("/accounts/:account_id/bill", post(billing::calculate_bill))
        .route("/health", get(health::health))
}
