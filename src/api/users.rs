//! Account management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::account::{AccountId, AccountSort, AccountView};
use crate::infrastructure::account::{RegisterAccountRequest, UpdateAccountRequest};

pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(register_user))
        .route(
            "/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/{id}/change-password", post(change_password))
        .route("/{id}/activate", put(activate_user))
        .route("/{id}/deactivate", put(deactivate_user))
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterUserApiRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserApiRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// A missing `newPassword` is reported by the strength rules, not the parser
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordApiRequest {
    pub old_password: String,
    #[serde(default)]
    pub new_password: Option<String>,
}

/// Path ids are parsed by hand so a bad id gets the JSON error body
fn parse_account_id(raw: &str) -> Result<AccountId, ApiError> {
    raw.parse::<i64>()
        .map(AccountId::new)
        .map_err(|_| ApiError::bad_request(format!("Invalid user id '{}'", raw)).with_code("invalid_id"))
}

/// GET /users?sort=name
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Vec<AccountView>>, ApiError> {
    let sort = match query.sort.as_deref() {
        None => AccountSort::default(),
        Some(raw) => AccountSort::parse(raw).ok_or_else(|| {
            ApiError::bad_request(format!(
                "Unknown sort field '{}'; expected id, name or email",
                raw
            ))
            .with_code("invalid_sort")
        })?,
    };

    debug!(sort = ?sort, "Listing users");

    let accounts = state.directory.list(sort).await?;
    Ok(Json(accounts))
}

/// POST /users
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserApiRequest>,
) -> Result<(StatusCode, Json<AccountView>), ApiError> {
    debug!(email = %request.email, "Registering user");

    let account = state
        .directory
        .register(RegisterAccountRequest {
            name: request.name,
            email: request.email,
            credential: request.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(account)))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AccountView>, ApiError> {
    let id = parse_account_id(&id)?;
    debug!(account_id = %id, "Getting user");

    Ok(Json(state.directory.get(id).await?))
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserApiRequest>,
) -> Result<Json<AccountView>, ApiError> {
    let id = parse_account_id(&id)?;
    debug!(account_id = %id, "Updating user");

    let account = state
        .directory
        .update(
            id,
            UpdateAccountRequest {
                name: request.name,
                email: request.email,
            },
        )
        .await?;

    Ok(Json(account))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_account_id(&id)?;
    debug!(account_id = %id, "Deleting user");

    state.directory.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /users/{id}/change-password
pub async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ChangePasswordApiRequest>,
) -> Result<Json<AccountView>, ApiError> {
    let id = parse_account_id(&id)?;
    debug!(account_id = %id, "Changing password");

    let account = state
        .lifecycle
        .change_credential(id, &request.old_password, request.new_password.as_deref())
        .await?;

    Ok(Json(account))
}

/// PUT /users/{id}/activate
pub async fn activate_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AccountView>, ApiError> {
    let id = parse_account_id(&id)?;
    debug!(account_id = %id, "Activating user");

    Ok(Json(state.lifecycle.activate(id).await?))
}

/// PUT /users/{id}/deactivate
pub async fn deactivate_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AccountView>, ApiError> {
    let id = parse_account_id(&id)?;
    debug!(account_id = %id, "Deactivating user");

    Ok(Json(state.lifecycle.deactivate(id).await?))
}
