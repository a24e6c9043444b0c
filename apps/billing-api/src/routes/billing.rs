//! # Bill Route
//!
//! ## Calculation Flow
//! ```text
//! POST /accounts/acme/bill
//!   { "billingPeriodStart": "2025-07-01", "billingPeriodEnd": "2025-08-01",
//!     "transactionCount": 150 }
//!      │
//!      ▼
//! store.read() ──► BillCalculator::calculate_bill("acme", request)
//!      │                 │
//!      │                 ├── field mistyped → 400 VALIDATION_ERROR
//!      │                 ├── rule broken    → 400 INVALID_INPUT
//!      │                 ├── no account     → 404 NOT_FOUND
//!      │                 └── BillBreakdown
//!      ▼
//! 201 { "baseFeeGbp": 50.0, "transactionFeeGbp": 5.0, ... }
//! ```
//!
//! Nothing is stored; 201 is kept for existing clients.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use billing_core::{BillBreakdown, CalculateBillRequest};

use crate::error::ApiResult;
use crate::state::AppState;

/// `POST /accounts/:accountId/bill`
pub async fn calculate_bill(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    payload: Result<Json<CalculateBillRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<BillBreakdown>)> {
    let Json(request) = payload?;

    let store = state.store.read().await;
    let bill = store.bill_calculator().calculate_bill(&account_id, &request)?;

    Ok((StatusCode::CREATED, Json(bill)))
}
