//! Authentication service
//!
//! Issues and verifies HS256 bearer tokens. The server acts as its own
//! identity provider: credentials are checked against the users table and
//! the signed claims carry the user's uuid as subject.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::AuthConfig;
use crate::models::User;
use crate::services::UserService;
use crate::{Error, Result};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid,
    pub email: String,
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct AuthService {
    users: UserService,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(users: UserService, config: AuthConfig) -> Self {
        Self { users, config }
    }

    pub async fn login(&self, input: LoginInput) -> Result<LoginResponse> {
        input.validate()?;

        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| Error::Unauthorized("invalid credentials".to_string()))?;

        if !self.users.verify_password(&user, &input.password)? {
            return Err(Error::Unauthorized("invalid credentials".to_string()));
        }

        let token = self.generate_token(&user)?;

        Ok(LoginResponse { token, user })
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenClaims> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| Error::Unauthorized(format!("invalid token: {e}")))
    }

    fn generate_token(&self, user: &User) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: user.uuid,
            email: user.email.clone(),
            is_admin: user.is_admin,
            iat: now,
            exp: now + self.config.token_ttl_seconds,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| Error::Internal(format!("failed to sign token: {e}")))
    }
}
