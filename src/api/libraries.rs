//! Library management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::library::{Library, UpdateLibrary},
    AppState,
};

use super::AuthenticatedUser;

/// List libraries with filtering and pagination
#[utoipa::path(
    get,
    path = "/libraries",
    tag = "libraries",
    security(("bearer_auth" = [])),
    params(
        ("name" = Option<String>, Query, description = "Substring filter, case-insensitive"),
        ("deleted" = Option<String>, Query, description = "Exactly \"true\" or \"false\""),
        ("page" = Option<i64>, Query, description = "Zero-based page index"),
        ("size" = Option<i64>, Query, description = "Page size"),
        ("sortOrder" = Option<String>, Query, description = "ASC or DESC")
    ),
    responses(
        (status = 200, description = "List of libraries", body = Vec<Library>),
        (status = 400, description = "Invalid filter value")
    )
)]
pub async fn list_libraries(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<Library>>> {
    let libraries = state.services.libraries.list(&params).await?;
    Ok(Json(libraries))
}

/// Create a new library; books and lenders must already exist
#[utoipa::path(
    post,
    path = "/libraries",
    tag = "libraries",
    security(("bearer_auth" = [])),
    request_body = Library,
    responses(
        (status = 201, description = "Library created", body = Library),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Referenced book or lender not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_library(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(library): Json<Library>,
) -> AppResult<(StatusCode, Json<Library>)> {
    let created = state.services.libraries.create(library).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a library by name
#[utoipa::path(
    get,
    path = "/libraries/{name}",
    tag = "libraries",
    security(("bearer_auth" = [])),
    params(("name" = String, Path, description = "Library name")),
    responses(
        (status = 200, description = "Library details", body = Library),
        (status = 404, description = "Library not found")
    )
)]
pub async fn get_library(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(name): Path<String>,
) -> AppResult<Json<Library>> {
    let library = state.services.libraries.get(&name).await?;
    Ok(Json(library))
}

/// Update a library
#[utoipa::path(
    patch,
    path = "/libraries/{name}",
    tag = "libraries",
    security(("bearer_auth" = [])),
    params(("name" = String, Path, description = "Library name")),
    request_body = UpdateLibrary,
    responses(
        (status = 200, description = "Library updated", body = Library),
        (status = 404, description = "Library, book or lender not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_library(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(name): Path<String>,
    Json(update): Json<UpdateLibrary>,
) -> AppResult<Json<Library>> {
    let library = state.services.libraries.update(&name, update).await?;
    Ok(Json(library))
}

/// Soft-delete a library
#[utoipa::path(
    delete,
    path = "/libraries/{name}",
    tag = "libraries",
    security(("bearer_auth" = [])),
    params(("name" = String, Path, description = "Library name")),
    responses(
        (status = 200, description = "Library deleted", body = Library),
        (status = 404, description = "Library not found")
    )
)]
pub async fn delete_library(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(name): Path<String>,
) -> AppResult<Json<Library>> {
    let library = state.services.libraries.remove(&name).await?;
    Ok(Json(library))
}
