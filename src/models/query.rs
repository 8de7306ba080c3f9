//! List-query compilation: filters and pagination
//!
//! List endpoints take a loose string-to-string query map. This module
//! compiles it into a closed set of filter specifications (AND-composed)
//! plus a page window, rejecting malformed values before they reach the
//! repository layer.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// Sort direction over the natural-key column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(format!("invalid sort direction: {}", s)),
        }
    }
}

/// A single recognized filter. Composition across filters is logical AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSpec {
    /// Case-insensitive substring match on the natural-key column.
    KeyContains(String),
    /// Exact match on the soft-delete flag.
    DeletedEquals(bool),
}

/// Zero-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub sort: SortDirection,
}

impl PageRequest {
    /// Row offset of this window. Saturates instead of overflowing;
    /// `from_params` rejects windows past `i64::MAX` rows up front.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: SortDirection::Desc,
        }
    }
}

/// Compiled list query: filters plus page window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filters: Vec<FilterSpec>,
    pub page: PageRequest,
}

impl ListQuery {
    /// Compile the raw query-parameter map for one entity kind.
    ///
    /// `key_field` names the entity's substring-filter parameter ("title"
    /// for books, "username" for users, "name" elsewhere). Unrecognized
    /// parameters are ignored. When `deleted` is absent, both live and
    /// soft-deleted records pass, so administrative listings can see
    /// everything.
    pub fn from_params(key_field: &str, params: &HashMap<String, String>) -> AppResult<Self> {
        let mut filters = Vec::new();

        if let Some(needle) = params.get(key_field) {
            filters.push(FilterSpec::KeyContains(needle.clone()));
        }

        if let Some(raw) = params.get("deleted") {
            // Lexically exact, case-sensitive: "True" or "1" are rejected.
            let value = match raw.as_str() {
                "true" => true,
                "false" => false,
                _ => {
                    return Err(AppError::validation(
                        "deleted",
                        "deleted parameter should be true or false",
                    ))
                }
            };
            filters.push(FilterSpec::DeletedEquals(value));
        }

        let page = parse_number(params, "page", 0)?;
        let size = parse_number(params, "size", DEFAULT_PAGE_SIZE)?;
        if size <= 0 {
            return Err(AppError::validation("size", "size must be positive"));
        }
        // The scan offset is page * size; reject windows it cannot express.
        if page.checked_mul(size).is_none() {
            return Err(AppError::validation("page", "page is out of range"));
        }

        let sort = match params.get("sortOrder") {
            Some(raw) => raw
                .parse::<SortDirection>()
                .map_err(|reason| AppError::validation("sortOrder", reason))?,
            None => SortDirection::default(),
        };

        Ok(Self {
            filters,
            page: PageRequest { page, size, sort },
        })
    }
}

fn parse_number(params: &HashMap<String, String>, key: &str, default: i64) -> AppResult<i64> {
    match params.get(key) {
        None => Ok(default),
        Some(raw) => {
            let value: i64 = raw
                .parse()
                .map_err(|_| AppError::validation(key, format!("{} must be a number", key)))?;
            if value < 0 {
                return Err(AppError::validation(key, format!("{} must not be negative", key)));
            }
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_unspecified() {
        let query = ListQuery::from_params("title", &params(&[])).unwrap();
        assert!(query.filters.is_empty());
        assert_eq!(query.page.page, 0);
        assert_eq!(query.page.size, 5);
        assert_eq!(query.page.sort, SortDirection::Desc);
    }

    #[test]
    fn test_key_filter_captured() {
        let query = ListQuery::from_params("title", &params(&[("title", "gatsby")])).unwrap();
        assert_eq!(
            query.filters,
            vec![FilterSpec::KeyContains("gatsby".to_string())]
        );
    }

    #[test]
    fn test_deleted_filter_lexical() {
        let query = ListQuery::from_params("name", &params(&[("deleted", "true")])).unwrap();
        assert_eq!(query.filters, vec![FilterSpec::DeletedEquals(true)]);

        let query = ListQuery::from_params("name", &params(&[("deleted", "false")])).unwrap();
        assert_eq!(query.filters, vec![FilterSpec::DeletedEquals(false)]);
    }

    #[test]
    fn test_deleted_filter_rejects_other_values() {
        for bad in ["True", "FALSE", "1", "0", "yes", ""] {
            let result = ListQuery::from_params("name", &params(&[("deleted", bad)]));
            assert!(result.is_err(), "expected rejection for {:?}", bad);
        }
    }

    #[test]
    fn test_filters_compose() {
        let query = ListQuery::from_params(
            "username",
            &params(&[("username", "ali"), ("deleted", "false")]),
        )
        .unwrap();
        assert_eq!(query.filters.len(), 2);
        assert!(query
            .filters
            .contains(&FilterSpec::KeyContains("ali".to_string())));
        assert!(query.filters.contains(&FilterSpec::DeletedEquals(false)));
    }

    #[test]
    fn test_unrecognized_keys_ignored() {
        let query =
            ListQuery::from_params("title", &params(&[("publisher", "penguin")])).unwrap();
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_page_and_size_parsed() {
        let query =
            ListQuery::from_params("title", &params(&[("page", "3"), ("size", "10")])).unwrap();
        assert_eq!(query.page.page, 3);
        assert_eq!(query.page.size, 10);
    }

    #[test]
    fn test_bad_page_rejected() {
        assert!(ListQuery::from_params("title", &params(&[("page", "x")])).is_err());
        assert!(ListQuery::from_params("title", &params(&[("page", "-1")])).is_err());
        assert!(ListQuery::from_params("title", &params(&[("size", "0")])).is_err());
    }

    #[test]
    fn test_oversized_page_window_rejected() {
        let huge = i64::MAX.to_string();
        let result =
            ListQuery::from_params("title", &params(&[("page", &huge), ("size", "5")]));
        assert!(result.is_err());

        // Largest expressible window still parses.
        let query =
            ListQuery::from_params("title", &params(&[("page", &huge), ("size", "1")])).unwrap();
        assert_eq!(query.page.offset(), i64::MAX);
    }

    #[test]
    fn test_sort_order_parsed_case_insensitive() {
        let query =
            ListQuery::from_params("title", &params(&[("sortOrder", "asc")])).unwrap();
        assert_eq!(query.page.sort, SortDirection::Asc);
        assert!(ListQuery::from_params("title", &params(&[("sortOrder", "sideways")])).is_err());
    }
}
