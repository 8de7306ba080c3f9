//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use std::collections::HashMap;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::query::ListQuery,
    models::user::{UpdateUser, User, UserClaims, UserRow},
    repository::Repository,
};

pub const DEFAULT_ROLE: &str = "USER";

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    auth: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, auth: AuthConfig) -> Self {
        Self { repository, auth }
    }

    /// Authenticate by username and password, returning a JWT token and
    /// the account row. A missing user and a wrong password produce the
    /// same error so callers cannot enumerate accounts.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<(String, UserRow)> {
        let invalid = || AppError::Authentication("Invalid username or password".to_string());

        let row = self
            .repository
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, &row.password) {
            return Err(invalid());
        }

        let token = self.token_for(&row)?;
        Ok((token, row))
    }

    fn token_for(&self, row: &UserRow) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.auth.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: row.username.clone(),
            role: row.role.clone(),
            exp,
            iat: now,
        };

        claims
            .create_token(&self.auth.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Register a new account with the given role. Shared by signup,
    /// the admin create endpoint and the seed loader.
    pub async fn register(&self, user: User, role: &str) -> AppResult<User> {
        user.validate()?;
        let password = user
            .password
            .as_deref()
            .ok_or_else(|| AppError::validation("password", "password is required"))?;

        if self
            .repository
            .users
            .exists_by_username(&user.username)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "User with the username already exists: {}",
                user.username
            )));
        }

        let hash = hash_password(password)?;
        let row = self
            .repository
            .users
            .create(&user.username, &hash, role)
            .await?;

        User::from_row(&row)
    }

    pub async fn list(&self, params: &HashMap<String, String>) -> AppResult<Vec<User>> {
        let query = ListQuery::from_params("username", params)?;
        let rows = self.repository.users.list(&query).await?;
        rows.iter().map(User::from_row).collect()
    }

    pub async fn get(&self, username: &str) -> AppResult<User> {
        let row = self.find(username).await?;
        User::from_row(&row)
    }

    pub async fn update(&self, username: &str, update: UpdateUser) -> AppResult<User> {
        update.validate()?;
        let row = self.find(username).await?;

        if let Some(new_username) = update.username.as_deref() {
            if new_username != row.username
                && self.repository.users.exists_by_username(new_username).await?
            {
                return Err(AppError::Conflict(format!(
                    "User with the username already exists: {}",
                    new_username
                )));
            }
        }

        let hash = match update.password.as_deref() {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let row = self
            .repository
            .users
            .update(row.id, update.username.as_deref(), hash.as_deref())
            .await?;

        User::from_row(&row)
    }

    pub async fn remove(&self, username: &str) -> AppResult<User> {
        let row = self.find(username).await?;
        let row = self.repository.users.remove(row.id).await?;
        User::from_row(&row)
    }

    async fn find(&self, username: &str) -> AppResult<UserRow> {
        self.repository
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Couldn't find user with the username: {}", username))
            })
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against its stored hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("secret1").unwrap();
        assert!(verify_password("secret1", &hash));
        assert!(!verify_password("secret2", &hash));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(!verify_password("secret1", "not-a-hash"));
    }
}
