//! Genres repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::genre::GenreRow,
    models::query::ListQuery,
    models::{DeletionPolicy, EntityKind},
};

#[derive(Clone)]
pub struct GenresRepository {
    pool: Pool<Postgres>,
}

impl GenresRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<GenreRow>> {
        let row =
            sqlx::query_as::<_, GenreRow>("SELECT * FROM genres WHERE name = $1 AND NOT deleted")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row)
    }

    pub async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM genres WHERE name = $1 AND NOT deleted)",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn create(&self, name: &str) -> AppResult<GenreRow> {
        let row =
            sqlx::query_as::<_, GenreRow>("INSERT INTO genres (name) VALUES ($1) RETURNING *")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        Ok(row)
    }

    /// Find a live genre by name or create it. The one deliberate upsert
    /// in the model: book payloads may name genres that do not exist yet.
    pub async fn resolve_or_create(&self, name: &str) -> AppResult<GenreRow> {
        if let Some(row) = self.find_by_name(name).await? {
            return Ok(row);
        }
        self.create(name).await
    }

    pub async fn update_name(&self, id: i64, name: &str) -> AppResult<GenreRow> {
        let row = sqlx::query_as::<_, GenreRow>(
            "UPDATE genres SET name = $2, modified_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Remove a genre according to the kind's deletion policy (soft).
    pub async fn remove(&self, id: i64) -> AppResult<GenreRow> {
        let sql = match EntityKind::Genre.deletion_policy() {
            Some(DeletionPolicy::Soft) => {
                "UPDATE genres SET deleted = TRUE, modified_at = now() WHERE id = $1 RETURNING *"
            }
            Some(DeletionPolicy::Hard) => "DELETE FROM genres WHERE id = $1 RETURNING *",
            None => return Err(AppError::Internal("genres do not support deletion".into())),
        };

        let row = sqlx::query_as::<_, GenreRow>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<GenreRow>> {
        let (sql, params) = super::scan_sql("genres", "name", query);
        let mut scan = sqlx::query_as::<_, GenreRow>(&sql);
        for param in params {
            scan = scan.bind(param);
        }
        Ok(scan.fetch_all(&self.pool).await?)
    }
}
