//! Lender management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::lender::{Lender, UpdateLender},
    AppState,
};

use super::AuthenticatedUser;

/// List lenders with filtering and pagination
#[utoipa::path(
    get,
    path = "/lenders",
    tag = "lenders",
    security(("bearer_auth" = [])),
    params(
        ("name" = Option<String>, Query, description = "Substring filter, case-insensitive"),
        ("deleted" = Option<String>, Query, description = "Exactly \"true\" or \"false\""),
        ("page" = Option<i64>, Query, description = "Zero-based page index"),
        ("size" = Option<i64>, Query, description = "Page size"),
        ("sortOrder" = Option<String>, Query, description = "ASC or DESC")
    ),
    responses(
        (status = 200, description = "List of lenders", body = Vec<Lender>),
        (status = 400, description = "Invalid filter value")
    )
)]
pub async fn list_lenders(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<Lender>>> {
    let lenders = state.services.lenders.list(&params).await?;
    Ok(Json(lenders))
}

/// Create a new lender; lended books must already exist
#[utoipa::path(
    post,
    path = "/lenders",
    tag = "lenders",
    security(("bearer_auth" = [])),
    request_body = Lender,
    responses(
        (status = 201, description = "Lender created", body = Lender),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Referenced book not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_lender(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(lender): Json<Lender>,
) -> AppResult<(StatusCode, Json<Lender>)> {
    let created = state.services.lenders.create(lender).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a lender by name
#[utoipa::path(
    get,
    path = "/lenders/{name}",
    tag = "lenders",
    security(("bearer_auth" = [])),
    params(("name" = String, Path, description = "Lender name")),
    responses(
        (status = 200, description = "Lender details", body = Lender),
        (status = 404, description = "Lender not found")
    )
)]
pub async fn get_lender(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(name): Path<String>,
) -> AppResult<Json<Lender>> {
    let lender = state.services.lenders.get(&name).await?;
    Ok(Json(lender))
}

/// Update a lender
#[utoipa::path(
    patch,
    path = "/lenders/{name}",
    tag = "lenders",
    security(("bearer_auth" = [])),
    params(("name" = String, Path, description = "Lender name")),
    request_body = UpdateLender,
    responses(
        (status = 200, description = "Lender updated", body = Lender),
        (status = 404, description = "Lender or referenced book not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_lender(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(name): Path<String>,
    Json(update): Json<UpdateLender>,
) -> AppResult<Json<Lender>> {
    let lender = state.services.lenders.update(&name, update).await?;
    Ok(Json(lender))
}

/// Soft-delete a lender
#[utoipa::path(
    delete,
    path = "/lenders/{name}",
    tag = "lenders",
    security(("bearer_auth" = [])),
    params(("name" = String, Path, description = "Lender name")),
    responses(
        (status = 200, description = "Lender deleted", body = Lender),
        (status = 404, description = "Lender not found")
    )
)]
pub async fn delete_lender(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(name): Path<String>,
) -> AppResult<Json<Lender>> {
    let lender = state.services.lenders.remove(&name).await?;
    Ok(Json(lender))
}
