//! User model, auth payloads and JWT claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppResult;
use crate::models::validate;

/// Database row for a user account
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    /// Argon2 hash, never serialized back to callers
    pub password: String,
    pub role: String,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Wire representation of a user. The password field carries the plain
/// input on signup/create and is never serialized in responses; the
/// at-rest value is an opaque hash that would not fit the input rule.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct User {
    #[validate(custom(function = "validate::name"))]
    pub username: String,
    #[serde(skip_serializing)]
    #[validate(custom(function = "validate::password"))]
    pub password: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

impl User {
    pub fn from_row(row: &UserRow) -> AppResult<User> {
        let user = User {
            username: row.username.clone(),
            password: None,
            deleted: row.deleted,
        };
        user.validate()?;
        Ok(user)
    }
}

/// Partial update payload; a present password is re-hashed on the way in.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(custom(function = "validate::name"))]
    pub username: Option<String>,
    #[validate(custom(function = "validate::password"))]
    pub password: Option<String>,
}

/// JWT claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and verify a JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_row_omits_password() {
        let row = UserRow {
            id: 1,
            username: "alice".to_string(),
            password: "$argon2id$v=19$m=19456,t=2,p=1$someslt$somehash".to_string(),
            role: "USER".to_string(),
            deleted: false,
            created_at: Utc::now(),
            modified_at: Utc::now(),
        };
        let user = User::from_row(&row).unwrap();
        assert_eq!(user.username, "alice");
        assert!(user.password.is_none());
    }

    #[test]
    fn test_password_never_serialized() {
        let user = User {
            username: "alice".to_string(),
            password: Some("secret1".to_string()),
            deleted: false,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_claims_round_trip() {
        let claims = UserClaims {
            sub: "alice".to_string(),
            role: "USER".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
        };
        let token = claims.create_token("test-secret").unwrap();
        let parsed = UserClaims::from_token(&token, "test-secret").unwrap();
        assert_eq!(parsed.sub, "alice");
        assert_eq!(parsed.role, "USER");
    }

    #[test]
    fn test_claims_reject_wrong_secret() {
        let claims = UserClaims {
            sub: "alice".to_string(),
            role: "USER".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
        };
        let token = claims.create_token("test-secret").unwrap();
        assert!(UserClaims::from_token(&token, "other-secret").is_err());
    }
}
