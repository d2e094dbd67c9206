use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};

use crate::AppState;
use crate::db_access::{CheckUserRequest, CreateUserRequest, DbResponse, GetUserRequest};
use crate::error::{Result, handle_rejection};

/// Register a new user.
#[utoipa::path(
    post,
    path = "/create_user",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Payload failed validation"),
        (status = 401, description = "Username or email already registered"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<DbResponse> {
    let Json(request) = payload.map_err(handle_rejection)?;
    Ok(state.db.create_user(request).await)
}

/// Check whether a username and email are still available.
#[utoipa::path(
    post,
    path = "/check_user",
    tag = "users",
    request_body = CheckUserRequest,
    responses(
        (status = 200, description = "Both fields are available"),
        (status = 401, description = "Username or email already registered"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn check_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CheckUserRequest>, JsonRejection>,
) -> Result<DbResponse> {
    let Json(request) = payload.map_err(handle_rejection)?;
    Ok(state.db.check_user(request).await)
}

/// Look up a user by username.
#[utoipa::path(
    get,
    path = "/get_user",
    tag = "users",
    params(GetUserRequest),
    responses(
        (status = 200, description = "User found"),
        (status = 404, description = "No user with that username"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Query(request): Query<GetUserRequest>,
) -> DbResponse {
    state.db.get_user(request).await
}
