//! Author management endpoints. Authors expose no delete route.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::author::{Author, UpdateAuthor},
    AppState,
};

use super::AuthenticatedUser;

/// List authors with filtering and pagination
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("name" = Option<String>, Query, description = "Substring filter, case-insensitive"),
        ("deleted" = Option<String>, Query, description = "Exactly \"true\" or \"false\""),
        ("page" = Option<i64>, Query, description = "Zero-based page index"),
        ("size" = Option<i64>, Query, description = "Page size"),
        ("sortOrder" = Option<String>, Query, description = "ASC or DESC")
    ),
    responses(
        (status = 200, description = "List of authors", body = Vec<Author>),
        (status = 400, description = "Invalid filter value")
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.authors.list(&params).await?;
    Ok(Json(authors))
}

/// Create a new author; authored books must already exist
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    security(("bearer_auth" = [])),
    request_body = Author,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Referenced book not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(author): Json<Author>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let created = state.services.authors.create(author).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get an author by name
#[utoipa::path(
    get,
    path = "/authors/{name}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("name" = String, Path, description = "Author name")),
    responses(
        (status = 200, description = "Author details", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(name): Path<String>,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.get(&name).await?;
    Ok(Json(author))
}

/// Update an author
#[utoipa::path(
    patch,
    path = "/authors/{name}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("name" = String, Path, description = "Author name")),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 404, description = "Author or referenced book not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(name): Path<String>,
    Json(update): Json<UpdateAuthor>,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.update(&name, update).await?;
    Ok(Json(author))
}
