//! Authors repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::author::AuthorRow,
    models::book::BookRow,
    models::query::ListQuery,
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<AuthorRow>> {
        let row =
            sqlx::query_as::<_, AuthorRow>("SELECT * FROM authors WHERE name = $1 AND NOT deleted")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row)
    }

    pub async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM authors WHERE name = $1 AND NOT deleted)",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Authored books in insertion order.
    pub async fn books_of(&self, author_id: i64) -> AppResult<Vec<BookRow>> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT b.* FROM books b
            JOIN author_books ab ON ab.book_id = b.id
            WHERE ab.author_id = $1
            ORDER BY ab.position
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, name: &str, book_ids: &[i64]) -> AppResult<AuthorRow> {
        let mut tx = self.pool.begin().await?;

        let row =
            sqlx::query_as::<_, AuthorRow>("INSERT INTO authors (name) VALUES ($1) RETURNING *")
                .bind(name)
                .fetch_one(&mut *tx)
                .await?;

        for (position, book_id) in book_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO author_books (author_id, book_id, position) VALUES ($1, $2, $3)",
            )
            .bind(row.id)
            .bind(book_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: i64,
        name: Option<&str>,
        book_ids: Option<&[i64]>,
    ) -> AppResult<AuthorRow> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            UPDATE authors
            SET name = COALESCE($2, name), modified_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(book_ids) = book_ids {
            sqlx::query("DELETE FROM author_books WHERE author_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            for (position, book_id) in book_ids.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO author_books (author_id, book_id, position) VALUES ($1, $2, $3)",
                )
                .bind(id)
                .bind(book_id)
                .bind(position as i32)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(row)
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<AuthorRow>> {
        let (sql, params) = super::scan_sql("authors", "name", query);
        let mut scan = sqlx::query_as::<_, AuthorRow>(&sql);
        for param in params {
            scan = scan.bind(param);
        }
        Ok(scan.fetch_all(&self.pool).await?)
    }

    /// Does any non-deleted author list this book as authored?
    pub async fn references_book(&self, book_id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM author_books ab
                JOIN authors a ON a.id = ab.author_id
                WHERE ab.book_id = $1 AND NOT a.deleted
            )
            "#,
        )
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
