//! Login endpoint
//!
//! Login checks an email/password pair and returns the account. No session
//! or token is issued.

use axum::{extract::State, routing::post, Router};
use serde::Deserialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::account::{AccountError, AccountView};

pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AccountView>, ApiError> {
    debug!(email = %request.email, "Login request");

    let account = state
        .lifecycle
        .authenticate(&request.email, &request.password)
        .await
        .map_err(login_error)?;

    Ok(Json(account))
}

/// Unknown emails answer like wrong passwords so login does not reveal
/// which emails exist
fn login_error(err: AccountError) -> ApiError {
    match err {
        AccountError::AccountNotFound { message } => {
            ApiError::unauthorized(message).with_code("invalid_credential")
        }
        other => ApiError::from(other),
    }
}
