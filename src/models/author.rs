//! Author model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppResult;
use crate::models::book::BookRow;
use crate::models::validate;

/// Database row for an author
#[derive(Debug, Clone, FromRow)]
pub struct AuthorRow {
    pub id: i64,
    pub name: String,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Wire representation of an author; authored books are flattened to
/// their titles.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[validate(custom(function = "validate::name"))]
    pub name: String,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    #[validate(custom(function = "validate::title_list"))]
    pub authored_books: Vec<String>,
}

impl Author {
    pub fn from_row(row: &AuthorRow, books: &[BookRow]) -> AppResult<Author> {
        let author = Author {
            name: row.name.clone(),
            deleted: row.deleted,
            authored_books: books.iter().map(|b| b.title.clone()).collect(),
        };
        author.validate()?;
        Ok(author)
    }
}

/// Partial update payload. An absent or empty book list leaves the
/// association unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthor {
    #[validate(custom(function = "validate::name"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate::title_list"))]
    pub authored_books: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author_row(name: &str) -> AuthorRow {
        AuthorRow {
            id: 3,
            name: name.to_string(),
            deleted: false,
            created_at: Utc::now(),
            modified_at: Utc::now(),
        }
    }

    fn book_row(id: i64, title: &str) -> BookRow {
        BookRow {
            id,
            title: title.to_string(),
            deleted: false,
            created_at: Utc::now(),
            modified_at: Utc::now(),
        }
    }

    #[test]
    fn test_from_row_flattens_titles_in_order() {
        let books = vec![
            book_row(1, "To Kill a Mockingbird"),
            book_row(2, "The Great Gatsby"),
        ];
        let author = Author::from_row(&author_row("Harper Lee"), &books).unwrap();
        assert_eq!(
            author.authored_books,
            vec!["To Kill a Mockingbird", "The Great Gatsby"]
        );
    }

    #[test]
    fn test_from_row_rejects_corrupt_name() {
        assert!(Author::from_row(&author_row("ab"), &[]).is_err());
    }

    #[test]
    fn test_from_row_rejects_corrupt_book_title() {
        let books = vec![book_row(1, "x")];
        assert!(Author::from_row(&author_row("Harper Lee"), &books).is_err());
    }
}
