//! User service
//!
//! Passwords are hashed with argon2; hashes never leave the service layer
//! except through [`UserService::verify_password`].

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::db::{Database, UserRepository};
use crate::models::User;
use crate::{Error, Result};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    #[validate(length(min = 1, message = "user name is required"))]
    pub name: String,
    #[validate(email(message = "user email is invalid"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    pub is_admin: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    #[validate(length(min = 1, message = "user name is required"))]
    pub name: Option<String>,
    #[validate(email(message = "user email is invalid"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct UserService {
    db: Database,
}

impl UserService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn repository(&self) -> UserRepository {
        self.db.repository()
    }

    pub async fn create(&self, input: CreateUserInput) -> Result<User> {
        input.validate()?;

        let repository = self.repository();

        if repository.find_by_email(&input.email).await?.is_some() {
            return Err(Error::Conflict(
                "a user with this email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&input.password)?;

        repository
            .insert(
                &input.name,
                &input.email,
                &password_hash,
                input.is_admin.unwrap_or(false),
            )
            .await
    }

    pub async fn find_all(&self) -> Result<Vec<User>> {
        self.repository().find_all().await
    }

    pub async fn find_by_uuid(&self, uuid: &Uuid) -> Result<User> {
        self.repository()
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| Error::NotFound("user not found".to_string()))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.repository().find_by_email(email).await
    }

    pub async fn update(&self, uuid: &Uuid, input: UpdateUserInput) -> Result<User> {
        input.validate()?;

        let repository = self.repository();

        let mut user = repository
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| Error::NotFound("user not found".to_string()))?;

        if let Some(email) = input.email {
            if email != user.email && repository.find_by_email(&email).await?.is_some() {
                return Err(Error::Conflict(
                    "a user with this email already exists".to_string(),
                ));
            }
            user.email = email;
        }

        if let Some(name) = input.name {
            user.name = name;
        }
        if let Some(password) = input.password {
            user.password_hash = hash_password(&password)?;
        }
        if let Some(is_admin) = input.is_admin {
            user.is_admin = is_admin;
        }

        repository.update(&user).await
    }

    pub async fn delete(&self, uuid: &Uuid) -> Result<()> {
        let repository = self.repository();

        let user = repository
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| Error::NotFound("user not found".to_string()))?;

        repository.delete(user.id).await?;
        Ok(())
    }

    pub fn verify_password(&self, user: &User, password: &str) -> Result<bool> {
        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|e| Error::Internal(format!("stored password hash is invalid: {e}")))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Internal(format!("failed to hash password: {e}")))
}
