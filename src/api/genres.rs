//! Genre management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::genre::{Genre, UpdateGenre},
    AppState,
};

use super::AuthenticatedUser;

/// List genres with filtering and pagination
#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    security(("bearer_auth" = [])),
    params(
        ("name" = Option<String>, Query, description = "Substring filter, case-insensitive"),
        ("deleted" = Option<String>, Query, description = "Exactly \"true\" or \"false\""),
        ("page" = Option<i64>, Query, description = "Zero-based page index"),
        ("size" = Option<i64>, Query, description = "Page size"),
        ("sortOrder" = Option<String>, Query, description = "ASC or DESC")
    ),
    responses(
        (status = 200, description = "List of genres", body = Vec<Genre>),
        (status = 400, description = "Invalid filter value")
    )
)]
pub async fn list_genres(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<Genre>>> {
    let genres = state.services.genres.list(&params).await?;
    Ok(Json(genres))
}

/// Create a new genre
#[utoipa::path(
    post,
    path = "/genres",
    tag = "genres",
    security(("bearer_auth" = [])),
    request_body = Genre,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_genre(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(genre): Json<Genre>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    let created = state.services.genres.create(genre).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a genre by name
#[utoipa::path(
    get,
    path = "/genres/{name}",
    tag = "genres",
    security(("bearer_auth" = [])),
    params(("name" = String, Path, description = "Genre name")),
    responses(
        (status = 200, description = "Genre details", body = Genre),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn get_genre(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(name): Path<String>,
) -> AppResult<Json<Genre>> {
    let genre = state.services.genres.get(&name).await?;
    Ok(Json(genre))
}

/// Update a genre
#[utoipa::path(
    patch,
    path = "/genres/{name}",
    tag = "genres",
    security(("bearer_auth" = [])),
    params(("name" = String, Path, description = "Genre name")),
    request_body = UpdateGenre,
    responses(
        (status = 200, description = "Genre updated", body = Genre),
        (status = 404, description = "Genre not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_genre(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(name): Path<String>,
    Json(update): Json<UpdateGenre>,
) -> AppResult<Json<Genre>> {
    let genre = state.services.genres.update(&name, update).await?;
    Ok(Json(genre))
}

/// Soft-delete a genre, refused while a live book references it
#[utoipa::path(
    delete,
    path = "/genres/{name}",
    tag = "genres",
    security(("bearer_auth" = [])),
    params(("name" = String, Path, description = "Genre name")),
    responses(
        (status = 200, description = "Genre deleted", body = Genre),
        (status = 404, description = "Genre not found"),
        (status = 409, description = "Genre still referenced by a book")
    )
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(name): Path<String>,
) -> AppResult<Json<Genre>> {
    let genre = state.services.genres.remove(&name).await?;
    Ok(Json(genre))
}
