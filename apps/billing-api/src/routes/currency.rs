//! # Currency Routes
//!
//! Create, list and fetch billing currencies.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use billing_core::validation::validate_create_currency;
use billing_core::{CreateCurrencyRequest, Currency};

use crate::error::ApiResult;
use crate::state::AppState;

/// `POST /currencies`
///
/// ## Flow
/// 1. Parse body (unknown fields rejected)
/// 2. Validate code and fee, collecting every field error
/// 3. Store under the write lock; duplicate code is a 409
pub async fn create_currency(
    State(state): State<AppState>,
    payload: Result<Json<CreateCurrencyRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Currency>)> {
    let Json(body) = payload?;
    let new_currency = validate_create_currency(&body)?;

    let mut store = state.store.write().await;
    let currency = store.create_currency(new_currency)?.clone();

    Ok((StatusCode::CREATED, Json(currency)))
}

/// `GET /currencies`
pub async fn list_currencies(State(state): State<AppState>) -> Json<Vec<Currency>> {
    let store = state.store.read().await;
    Json(store.currencies().find_all().to_vec())
}

/// `GET /currencies/:currency`
pub async fn get_currency(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<Currency>> {
    let store = state.store.read().await;
    let currency = store.currencies().find_one(&code)?.clone();
    Ok(Json(currency))
}
