//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::BookRow,
    models::genre::GenreRow,
    models::query::ListQuery,
    models::{DeletionPolicy, EntityKind},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn find_by_title(&self, title: &str) -> AppResult<Option<BookRow>> {
        let row =
            sqlx::query_as::<_, BookRow>("SELECT * FROM books WHERE title = $1 AND NOT deleted")
                .bind(title)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row)
    }

    pub async fn exists_by_title(&self, title: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM books WHERE title = $1 AND NOT deleted)",
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Linked genres in insertion order.
    pub async fn genres_of(&self, book_id: i64) -> AppResult<Vec<GenreRow>> {
        let rows = sqlx::query_as::<_, GenreRow>(
            r#"
            SELECT g.* FROM genres g
            JOIN book_genres bg ON bg.genre_id = g.id
            WHERE bg.book_id = $1
            ORDER BY bg.position
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert a book and its genre links in one transaction.
    pub async fn create(&self, title: &str, genre_ids: &[i64]) -> AppResult<BookRow> {
        let mut tx = self.pool.begin().await?;

        let row =
            sqlx::query_as::<_, BookRow>("INSERT INTO books (title) VALUES ($1) RETURNING *")
                .bind(title)
                .fetch_one(&mut *tx)
                .await?;

        for (position, genre_id) in genre_ids.iter().enumerate() {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id, position) VALUES ($1, $2, $3)")
                .bind(row.id)
                .bind(genre_id)
                .bind(position as i32)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(row)
    }

    /// Apply a field update and an optional wholesale genre replacement
    /// in one transaction.
    pub async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        genre_ids: Option<&[i64]>,
    ) -> AppResult<BookRow> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, BookRow>(
            r#"
            UPDATE books
            SET title = COALESCE($2, title), modified_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(genre_ids) = genre_ids {
            sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            for (position, genre_id) in genre_ids.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO book_genres (book_id, genre_id, position) VALUES ($1, $2, $3)",
                )
                .bind(id)
                .bind(genre_id)
                .bind(position as i32)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(row)
    }

    /// Remove a book according to the kind's deletion policy (hard). Genre
    /// links cascade with the row, as do links still held by soft-deleted
    /// owners; the referential guard has already ruled out live ones.
    pub async fn remove(&self, id: i64) -> AppResult<BookRow> {
        let sql = match EntityKind::Book.deletion_policy() {
            Some(DeletionPolicy::Hard) => "DELETE FROM books WHERE id = $1 RETURNING *",
            Some(DeletionPolicy::Soft) => {
                "UPDATE books SET deleted = TRUE, modified_at = now() WHERE id = $1 RETURNING *"
            }
            None => return Err(AppError::Internal("books do not support deletion".into())),
        };

        let row = sqlx::query_as::<_, BookRow>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<BookRow>> {
        let (sql, params) = super::scan_sql("books", "title", query);
        let mut scan = sqlx::query_as::<_, BookRow>(&sql);
        for param in params {
            scan = scan.bind(param);
        }
        Ok(scan.fetch_all(&self.pool).await?)
    }

    /// Does any non-deleted book reference this genre?
    pub async fn references_genre(&self, genre_id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM book_genres bg
                JOIN books b ON b.id = bg.book_id
                WHERE bg.genre_id = $1 AND NOT b.deleted
            )
            "#,
        )
        .bind(genre_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
