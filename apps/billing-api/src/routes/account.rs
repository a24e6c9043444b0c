//! # Account Routes
//!
//! Create, list and fetch billable accounts.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use billing_core::validation::validate_create_account;
use billing_core::{Account, CreateAccountRequest};

use crate::error::ApiResult;
use crate::state::AppState;

/// `POST /accounts`
///
/// ## Errors
/// - 400: body malformed or a field breaks a rule
/// - 404: the currency does not exist (checked before the id)
/// - 409: the account id is taken
pub async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Account>)> {
    let Json(body) = payload?;
    let new_account = validate_create_account(&body)?;

    let mut store = state.store.write().await;
    let account = store.create_account(new_account)?.clone();

    Ok((StatusCode::CREATED, Json(account)))
}

/// `GET /accounts`
pub async fn list_accounts(State(state): State<AppState>) -> Json<Vec<Account>> {
    let store = state.store.read().await;
    Json(store.accounts().find_all().to_vec())
}

/// `GET /accounts/:accountId`
pub async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> ApiResult<Json<Account>> {
    let store = state.store.read().await;
    let account = store.accounts().find_one(&account_id)?.clone();
    Ok(Json(account))
}
