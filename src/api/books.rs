//! Book management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::book::{Book, UpdateBook},
    AppState,
};

use super::AuthenticatedUser;

/// List books with filtering and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("title" = Option<String>, Query, description = "Substring filter, case-insensitive"),
        ("deleted" = Option<String>, Query, description = "Exactly \"true\" or \"false\""),
        ("page" = Option<i64>, Query, description = "Zero-based page index"),
        ("size" = Option<i64>, Query, description = "Page size"),
        ("sortOrder" = Option<String>, Query, description = "ASC or DESC")
    ),
    responses(
        (status = 200, description = "List of books", body = Vec<Book>),
        (status = 400, description = "Invalid filter value")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list(&params).await?;
    Ok(Json(books))
}

/// Create a new book; unknown genres are created on the fly
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = Book,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Title already taken")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(book): Json<Book>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.books.create(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a book by title
#[utoipa::path(
    get,
    path = "/books/{title}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("title" = String, Path, description = "Book title")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(title): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get(&title).await?;
    Ok(Json(book))
}

/// Update a book
#[utoipa::path(
    patch,
    path = "/books/{title}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("title" = String, Path, description = "Book title")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Title already taken")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(title): Path<String>,
    Json(update): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.update(&title, update).await?;
    Ok(Json(book))
}

/// Hard-delete a book, refused while any library, author or lender
/// references it
#[utoipa::path(
    delete,
    path = "/books/{title}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("title" = String, Path, description = "Book title")),
    responses(
        (status = 200, description = "Book deleted", body = Book),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book still referenced")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(title): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.remove(&title).await?;
    Ok(Json(book))
}
