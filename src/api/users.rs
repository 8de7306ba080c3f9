//! User management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::user::{UpdateUser, User},
    services::users::DEFAULT_ROLE,
    AppState,
};

use super::AuthenticatedUser;

/// List users with filtering and pagination
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("username" = Option<String>, Query, description = "Substring filter, case-insensitive"),
        ("deleted" = Option<String>, Query, description = "Exactly \"true\" or \"false\""),
        ("page" = Option<i64>, Query, description = "Zero-based page index"),
        ("size" = Option<i64>, Query, description = "Page size"),
        ("sortOrder" = Option<String>, Query, description = "ASC or DESC")
    ),
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 400, description = "Invalid filter value"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<User>>> {
    let users = state.services.users.list(&params).await?;
    Ok(Json(users))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = User,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(user): Json<User>,
) -> AppResult<(StatusCode, Json<User>)> {
    let created = state.services.users.register(user, DEFAULT_ROLE).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a user by username
#[utoipa::path(
    get,
    path = "/users/{username}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(username): Path<String>,
) -> AppResult<Json<User>> {
    let user = state.services.users.get(&username).await?;
    Ok(Json(user))
}

/// Update a user
#[utoipa::path(
    patch,
    path = "/users/{username}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("username" = String, Path, description = "Username")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(username): Path<String>,
    Json(update): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    let user = state.services.users.update(&username, update).await?;
    Ok(Json(user))
}

/// Soft-delete a user
#[utoipa::path(
    delete,
    path = "/users/{username}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User deleted", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(username): Path<String>,
) -> AppResult<Json<User>> {
    let user = state.services.users.remove(&username).await?;
    Ok(Json(user))
}
