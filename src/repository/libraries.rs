//! Libraries repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::BookRow,
    models::lender::LenderRow,
    models::library::LibraryRow,
    models::query::ListQuery,
    models::{DeletionPolicy, EntityKind},
};

#[derive(Clone)]
pub struct LibrariesRepository {
    pool: Pool<Postgres>,
}

impl LibrariesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<LibraryRow>> {
        let row = sqlx::query_as::<_, LibraryRow>(
            "SELECT * FROM libraries WHERE name = $1 AND NOT deleted",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM libraries WHERE name = $1 AND NOT deleted)",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn books_of(&self, library_id: i64) -> AppResult<Vec<BookRow>> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT b.* FROM books b
            JOIN library_books lb ON lb.book_id = b.id
            WHERE lb.library_id = $1
            ORDER BY lb.position
            "#,
        )
        .bind(library_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn lenders_of(&self, library_id: i64) -> AppResult<Vec<LenderRow>> {
        let rows = sqlx::query_as::<_, LenderRow>(
            r#"
            SELECT l.* FROM lenders l
            JOIN library_lenders ll ON ll.lender_id = l.id
            WHERE ll.library_id = $1
            ORDER BY ll.position
            "#,
        )
        .bind(library_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(
        &self,
        name: &str,
        book_ids: &[i64],
        lender_ids: &[i64],
    ) -> AppResult<LibraryRow> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, LibraryRow>(
            "INSERT INTO libraries (name) VALUES ($1) RETURNING *",
        )
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;

        for (position, book_id) in book_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO library_books (library_id, book_id, position) VALUES ($1, $2, $3)",
            )
            .bind(row.id)
            .bind(book_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        for (position, lender_id) in lender_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO library_lenders (library_id, lender_id, position) VALUES ($1, $2, $3)",
            )
            .bind(row.id)
            .bind(lender_id)
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
        lender_ids: Option<&[i64]>,
    ) -> AppResult<LibraryRow> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, LibraryRow>(
            r#"
            UPDATE libraries
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
            sqlx::query("DELETE FROM library_books WHERE library_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            for (position, book_id) in book_ids.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO library_books (library_id, book_id, position) VALUES ($1, $2, $3)",
                )
                .bind(id)
                .bind(book_id)
                .bind(position as i32)
                .execute(&mut *tx)
                .await?;
            }
        }

        if let Some(lender_ids) = lender_ids {
            sqlx::query("DELETE FROM library_lenders WHERE library_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            for (position, lender_id) in lender_ids.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO library_lenders (library_id, lender_id, position) VALUES ($1, $2, $3)",
                )
                .bind(id)
                .bind(lender_id)
                .bind(position as i32)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(row)
    }

    /// Remove a library according to the kind's deletion policy (soft).
    /// Its book and lender references are library-owned and die with it;
    /// the link rows stay behind the deleted flag.
    pub async fn remove(&self, id: i64) -> AppResult<LibraryRow> {
        let sql = match EntityKind::Library.deletion_policy() {
            Some(DeletionPolicy::Soft) => {
                "UPDATE libraries SET deleted = TRUE, modified_at = now() WHERE id = $1 RETURNING *"
            }
            Some(DeletionPolicy::Hard) => "DELETE FROM libraries WHERE id = $1 RETURNING *",
            None => {
                return Err(AppError::Internal("libraries do not support deletion".into()))
            }
        };

        let row = sqlx::query_as::<_, LibraryRow>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<LibraryRow>> {
        let (sql, params) = super::scan_sql("libraries", "name", query);
        let mut scan = sqlx::query_as::<_, LibraryRow>(&sql);
        for param in params {
            scan = scan.bind(param);
        }
        Ok(scan.fetch_all(&self.pool).await?)
    }

    /// Does any non-deleted library list this book?
    pub async fn references_book(&self, book_id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM library_books lb
                JOIN libraries l ON l.id = lb.library_id
                WHERE lb.book_id = $1 AND NOT l.deleted
            )
            "#,
        )
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
