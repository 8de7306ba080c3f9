//! Lenders repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::BookRow,
    models::lender::LenderRow,
    models::query::ListQuery,
    models::{DeletionPolicy, EntityKind},
};

#[derive(Clone)]
pub struct LendersRepository {
    pool: Pool<Postgres>,
}

impl LendersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<LenderRow>> {
        let row =
            sqlx::query_as::<_, LenderRow>("SELECT * FROM lenders WHERE name = $1 AND NOT deleted")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row)
    }

    pub async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM lenders WHERE name = $1 AND NOT deleted)",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Lent books in insertion order.
    pub async fn books_of(&self, lender_id: i64) -> AppResult<Vec<BookRow>> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT b.* FROM books b
            JOIN lender_books lb ON lb.book_id = b.id
            WHERE lb.lender_id = $1
            ORDER BY lb.position
            "#,
        )
        .bind(lender_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, name: &str, book_ids: &[i64]) -> AppResult<LenderRow> {
        let mut tx = self.pool.begin().await?;

        let row =
            sqlx::query_as::<_, LenderRow>("INSERT INTO lenders (name) VALUES ($1) RETURNING *")
                .bind(name)
                .fetch_one(&mut *tx)
                .await?;

        for (position, book_id) in book_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO lender_books (lender_id, book_id, position) VALUES ($1, $2, $3)",
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
    ) -> AppResult<LenderRow> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, LenderRow>(
            r#"
            UPDATE lenders
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
            sqlx::query("DELETE FROM lender_books WHERE lender_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            for (position, book_id) in book_ids.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO lender_books (lender_id, book_id, position) VALUES ($1, $2, $3)",
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

    /// Remove a lender according to the kind's deletion policy (soft).
    pub async fn remove(&self, id: i64) -> AppResult<LenderRow> {
        let sql = match EntityKind::Lender.deletion_policy() {
            Some(DeletionPolicy::Soft) => {
                "UPDATE lenders SET deleted = TRUE, modified_at = now() WHERE id = $1 RETURNING *"
            }
            Some(DeletionPolicy::Hard) => "DELETE FROM lenders WHERE id = $1 RETURNING *",
            None => return Err(AppError::Internal("lenders do not support deletion".into())),
        };

        let row = sqlx::query_as::<_, LenderRow>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<LenderRow>> {
        let (sql, params) = super::scan_sql("lenders", "name", query);
        let mut scan = sqlx::query_as::<_, LenderRow>(&sql);
        for param in params {
            scan = scan.bind(param);
        }
        Ok(scan.fetch_all(&self.pool).await?)
    }

    /// Does any non-deleted lender list this book as lent?
    pub async fn references_book(&self, book_id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM lender_books lb
                JOIN lenders l ON l.id = lb.lender_id
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
