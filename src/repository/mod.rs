//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod genres;
pub mod lenders;
pub mod libraries;
pub mod users;

use sqlx::{Pool, Postgres};

use crate::models::query::{FilterSpec, ListQuery};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub genres: genres::GenresRepository,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub lenders: lenders::LendersRepository,
    pub libraries: libraries::LibrariesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            genres: genres::GenresRepository::new(pool.clone()),
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            lenders: lenders::LendersRepository::new(pool.clone()),
            libraries: libraries::LibrariesRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Translate a compiled list query into a paged scan over one table.
///
/// `key_column` is the natural-key column; it receives the substring
/// filter and drives the sort. Returns the SQL plus the string bind
/// parameters in order (the deleted flag is a plain boolean literal).
pub(crate) fn scan_sql(table: &str, key_column: &str, query: &ListQuery) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut params: Vec<String> = Vec::new();

    for filter in &query.filters {
        match filter {
            FilterSpec::KeyContains(needle) => {
                params.push(format!("%{}%", needle.to_lowercase()));
                conditions.push(format!("LOWER({}) LIKE ${}", key_column, params.len()));
            }
            FilterSpec::DeletedEquals(value) => {
                conditions.push(format!("deleted = {}", value));
            }
        }
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        "SELECT * FROM {}{} ORDER BY {} {} LIMIT {} OFFSET {}",
        table,
        where_clause,
        key_column,
        query.page.sort.as_sql(),
        query.page.size,
        query.page.offset(),
    );

    (sql, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::query::{ListQuery, PageRequest, SortDirection};
    use std::collections::HashMap;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_scan_sql_defaults() {
        let query = ListQuery::from_params("title", &params(&[])).unwrap();
        let (sql, binds) = scan_sql("books", "title", &query);
        assert_eq!(
            sql,
            "SELECT * FROM books ORDER BY title DESC LIMIT 5 OFFSET 0"
        );
        assert!(binds.is_empty());
    }

    #[test]
    fn test_scan_sql_substring_filter_lowercased() {
        let query = ListQuery::from_params("title", &params(&[("title", "Gatsby")])).unwrap();
        let (sql, binds) = scan_sql("books", "title", &query);
        assert!(sql.contains("WHERE LOWER(title) LIKE $1"));
        assert_eq!(binds, vec!["%gatsby%"]);
    }

    #[test]
    fn test_scan_sql_composes_filters_with_and() {
        let query = ListQuery::from_params(
            "name",
            &params(&[("name", "lee"), ("deleted", "false")]),
        )
        .unwrap();
        let (sql, binds) = scan_sql("authors", "name", &query);
        assert!(sql.contains("LOWER(name) LIKE $1"));
        assert!(sql.contains(" AND "));
        assert!(sql.contains("deleted = false"));
        assert_eq!(binds.len(), 1);
    }

    #[test]
    fn test_scan_sql_page_window() {
        let query =
            ListQuery::from_params("title", &params(&[("page", "2"), ("size", "10")])).unwrap();
        let (sql, _) = scan_sql("books", "title", &query);
        assert!(sql.ends_with("LIMIT 10 OFFSET 20"));
    }

    #[test]
    fn test_scan_sql_offset_saturates_on_extreme_pages() {
        // from_params rejects these windows; a hand-built query must still
        // produce a valid non-negative offset rather than overflow.
        let query = ListQuery {
            filters: Vec::new(),
            page: PageRequest {
                page: i64::MAX,
                size: 5,
                sort: SortDirection::Desc,
            },
        };
        let (sql, _) = scan_sql("books", "title", &query);
        assert!(sql.ends_with(&format!("OFFSET {}", i64::MAX)));
    }
}
