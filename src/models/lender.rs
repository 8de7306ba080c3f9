//! Lender model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppResult;
use crate::models::book::BookRow;
use crate::models::validate;

/// Database row for a lender
#[derive(Debug, Clone, FromRow)]
pub struct LenderRow {
    pub id: i64,
    pub name: String,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Wire representation of a lender; lent books are flattened to titles.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lender {
    #[validate(custom(function = "validate::name"))]
    pub name: String,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    #[validate(custom(function = "validate::title_list"))]
    pub lended_books: Vec<String>,
}

impl Lender {
    pub fn from_row(row: &LenderRow, books: &[BookRow]) -> AppResult<Lender> {
        let lender = Lender {
            name: row.name.clone(),
            deleted: row.deleted,
            lended_books: books.iter().map(|b| b.title.clone()).collect(),
        };
        lender.validate()?;
        Ok(lender)
    }
}

/// Partial update payload. An absent or empty book list leaves the
/// association unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLender {
    #[validate(custom(function = "validate::name"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate::title_list"))]
    pub lended_books: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_row_flattens_titles() {
        let row = LenderRow {
            id: 5,
            name: "Jake".to_string(),
            deleted: false,
            created_at: Utc::now(),
            modified_at: Utc::now(),
        };
        let books = vec![BookRow {
            id: 1,
            title: "The Great Gatsby".to_string(),
            deleted: false,
            created_at: Utc::now(),
            modified_at: Utc::now(),
        }];
        let lender = Lender::from_row(&row, &books).unwrap();
        assert_eq!(lender.name, "Jake");
        assert_eq!(lender.lended_books, vec!["The Great Gatsby"]);
    }
}
