//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppResult;
use crate::models::genre::{Genre, GenreRow};
use crate::models::validate;

/// Database row for a book
#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Wire representation of a book. Genres are nested one level deep (the
/// only association that is not flattened to bare natural keys).
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct Book {
    #[validate(custom(function = "validate::title"))]
    pub title: String,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    #[validate(nested)]
    pub genres: Vec<Genre>,
}

impl Book {
    /// Map a stored row plus its linked genres (insertion order) to the
    /// wire representation, re-validating on the way out.
    pub fn from_row(row: &BookRow, genres: &[GenreRow]) -> AppResult<Book> {
        let genres = genres
            .iter()
            .map(Genre::from_row)
            .collect::<AppResult<Vec<_>>>()?;

        let book = Book {
            title: row.title.clone(),
            deleted: row.deleted,
            genres,
        };
        book.validate()?;
        Ok(book)
    }
}

/// Partial update payload. An absent or empty genre list leaves the
/// association unchanged; a non-empty list replaces it wholesale.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(custom(function = "validate::title"))]
    pub title: Option<String>,
    #[validate(nested)]
    pub genres: Option<Vec<Genre>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_row(title: &str) -> BookRow {
        BookRow {
            id: 7,
            title: title.to_string(),
            deleted: false,
            created_at: Utc::now(),
            modified_at: Utc::now(),
        }
    }

    fn genre_row(id: i64, name: &str) -> GenreRow {
        GenreRow {
            id,
            name: name.to_string(),
            deleted: false,
            created_at: Utc::now(),
            modified_at: Utc::now(),
        }
    }

    #[test]
    fn test_from_row_nests_genres_in_order() {
        let genres = vec![genre_row(1, "Tragedy"), genre_row(2, "Classic")];
        let book = Book::from_row(&book_row("The Great Gatsby"), &genres).unwrap();
        assert_eq!(book.title, "The Great Gatsby");
        let names: Vec<_> = book.genres.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Tragedy", "Classic"]);
    }

    #[test]
    fn test_from_row_rejects_corrupt_title() {
        assert!(Book::from_row(&book_row("ab"), &[]).is_err());
    }

    #[test]
    fn test_from_row_rejects_corrupt_genre() {
        let genres = vec![genre_row(1, "x")];
        assert!(Book::from_row(&book_row("1984"), &genres).is_err());
    }
}
