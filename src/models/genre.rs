//! Genre model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppResult;
use crate::models::validate;

/// Database row for a genre
#[derive(Debug, Clone, FromRow)]
pub struct GenreRow {
    pub id: i64,
    pub name: String,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Wire representation of a genre
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct Genre {
    #[validate(custom(function = "validate::title"))]
    pub name: String,
    #[serde(default)]
    pub deleted: bool,
}

impl Genre {
    /// Map a stored row to its wire representation, re-validating so a
    /// corrupt row cannot silently reach a caller.
    pub fn from_row(row: &GenreRow) -> AppResult<Genre> {
        let genre = Genre {
            name: row.name.clone(),
            deleted: row.deleted,
        };
        genre.validate()?;
        Ok(genre)
    }
}

/// Partial update payload; absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateGenre {
    #[validate(custom(function = "validate::title"))]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, deleted: bool) -> GenreRow {
        GenreRow {
            id: 1,
            name: name.to_string(),
            deleted,
            created_at: Utc::now(),
            modified_at: Utc::now(),
        }
    }

    #[test]
    fn test_from_row_copies_fields() {
        let genre = Genre::from_row(&row("Tragedy", false)).unwrap();
        assert_eq!(genre.name, "Tragedy");
        assert!(!genre.deleted);
    }

    #[test]
    fn test_from_row_rejects_corrupt_name() {
        assert!(Genre::from_row(&row("ab", false)).is_err());
        assert!(Genre::from_row(&row("   ", false)).is_err());
    }

    #[test]
    fn test_deleted_flag_round_trips() {
        let genre = Genre::from_row(&row("Classic", true)).unwrap();
        assert!(genre.deleted);
    }
}
