//! Library model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppResult;
use crate::models::book::BookRow;
use crate::models::lender::LenderRow;
use crate::models::validate;

/// Database row for a library
#[derive(Debug, Clone, FromRow)]
pub struct LibraryRow {
    pub id: i64,
    pub name: String,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Wire representation of a library; both associations are flattened to
/// natural keys (book titles, lender names).
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct Library {
    #[validate(custom(function = "validate::title"))]
    pub name: String,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    #[validate(custom(function = "validate::title_list"))]
    pub books: Vec<String>,
    #[serde(default)]
    #[validate(custom(function = "validate::name_list"))]
    pub lenders: Vec<String>,
}

impl Library {
    pub fn from_row(
        row: &LibraryRow,
        books: &[BookRow],
        lenders: &[LenderRow],
    ) -> AppResult<Library> {
        let library = Library {
            name: row.name.clone(),
            deleted: row.deleted,
            books: books.iter().map(|b| b.title.clone()).collect(),
            lenders: lenders.iter().map(|l| l.name.clone()).collect(),
        };
        library.validate()?;
        Ok(library)
    }
}

/// Partial update payload. Absent or empty association lists are left
/// unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateLibrary {
    #[validate(custom(function = "validate::title"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate::title_list"))]
    pub books: Option<Vec<String>>,
    #[validate(custom(function = "validate::name_list"))]
    pub lenders: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_row_flattens_both_associations() {
        let row = LibraryRow {
            id: 2,
            name: "Bodleian Library".to_string(),
            deleted: false,
            created_at: Utc::now(),
            modified_at: Utc::now(),
        };
        let books = vec![BookRow {
            id: 1,
            title: "1984".to_string(),
            deleted: false,
            created_at: Utc::now(),
            modified_at: Utc::now(),
        }];
        let lenders = vec![LenderRow {
            id: 1,
            name: "Mike".to_string(),
            deleted: false,
            created_at: Utc::now(),
            modified_at: Utc::now(),
        }];
        let library = Library::from_row(&row, &books, &lenders).unwrap();
        assert_eq!(library.books, vec!["1984"]);
        assert_eq!(library.lenders, vec!["Mike"]);
    }

    #[test]
    fn test_library_name_uses_title_rule() {
        // Three characters is enough for a library name, unlike user names.
        let row = LibraryRow {
            id: 2,
            name: "LoC".to_string(),
            deleted: false,
            created_at: Utc::now(),
            modified_at: Utc::now(),
        };
        assert!(Library::from_row(&row, &[], &[]).is_ok());
    }
}
