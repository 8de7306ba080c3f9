//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::query::ListQuery,
    models::user::UserRow,
    models::{DeletionPolicy, EntityKind},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Look up a non-deleted user by username (case-sensitive).
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT * FROM app_users WHERE username = $1 AND NOT deleted",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Uniqueness pre-check among non-deleted users.
    pub async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM app_users WHERE username = $1 AND NOT deleted)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> AppResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO app_users (username, password, role) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(
        &self,
        id: i64,
        username: Option<&str>,
        password_hash: Option<&str>,
    ) -> AppResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE app_users
            SET username = COALESCE($2, username),
                password = COALESCE($3, password),
                modified_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Remove a user according to the kind's deletion policy (soft).
    pub async fn remove(&self, id: i64) -> AppResult<UserRow> {
        let sql = match EntityKind::User.deletion_policy() {
            Some(DeletionPolicy::Soft) => {
                "UPDATE app_users SET deleted = TRUE, modified_at = now() WHERE id = $1 RETURNING *"
            }
            Some(DeletionPolicy::Hard) => "DELETE FROM app_users WHERE id = $1 RETURNING *",
            None => return Err(AppError::Internal("users do not support deletion".into())),
        };

        let row = sqlx::query_as::<_, UserRow>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<UserRow>> {
        let (sql, params) = super::scan_sql("app_users", "username", query);
        let mut scan = sqlx::query_as::<_, UserRow>(&sql);
        for param in params {
            scan = scan.bind(param);
        }
        Ok(scan.fetch_all(&self.pool).await?)
    }
}
