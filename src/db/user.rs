//! User repository

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

use super::{read_uuid, DbSession, Repository};
use crate::models::User;
use crate::Result;

#[derive(Debug, Clone)]
pub struct UserRepository {
    session: DbSession,
}

impl Repository for UserRepository {
    fn with_session(session: DbSession) -> Self {
        Self { session }
    }
}

impl UserRepository {
    pub async fn insert(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<User> {
        let now = Utc::now();
        let uuid = Uuid::new_v4();

        let row = self
            .session
            .fetch_one(
                sqlx::query(
                    "INSERT INTO users (uuid, name, email, password_hash, is_admin, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                     RETURNING id, uuid, name, email, password_hash, is_admin, created_at, updated_at",
                )
                .bind(uuid.to_string())
                .bind(name)
                .bind(email)
                .bind(password_hash)
                .bind(is_admin)
                .bind(now)
                .bind(now),
            )
            .await?;

        map_row(&row)
    }

    pub async fn find_all(&self) -> Result<Vec<User>> {
        let rows = self
            .session
            .fetch_all(sqlx::query(
                "SELECT id, uuid, name, email, password_hash, is_admin, created_at, updated_at
                 FROM users
                 ORDER BY id",
            ))
            .await?;

        rows.iter().map(map_row).collect()
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = self
            .session
            .fetch_optional(
                sqlx::query(
                    "SELECT id, uuid, name, email, password_hash, is_admin, created_at, updated_at
                     FROM users
                     WHERE id = ?1",
                )
                .bind(id),
            )
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<User>> {
        let row = self
            .session
            .fetch_optional(
                sqlx::query(
                    "SELECT id, uuid, name, email, password_hash, is_admin, created_at, updated_at
                     FROM users
                     WHERE uuid = ?1",
                )
                .bind(uuid.to_string()),
            )
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = self
            .session
            .fetch_optional(
                sqlx::query(
                    "SELECT id, uuid, name, email, password_hash, is_admin, created_at, updated_at
                     FROM users
                     WHERE email = ?1",
                )
                .bind(email),
            )
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn update(&self, user: &User) -> Result<User> {
        let now = Utc::now();

        let row = self
            .session
            .fetch_one(
                sqlx::query(
                    "UPDATE users
                     SET name = ?1, email = ?2, password_hash = ?3, is_admin = ?4, updated_at = ?5
                     WHERE id = ?6
                     RETURNING id, uuid, name, email, password_hash, is_admin, created_at, updated_at",
                )
                .bind(&user.name)
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(user.is_admin)
                .bind(now)
                .bind(user.id),
            )
            .await?;

        map_row(&row)
    }

    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = self
            .session
            .execute(sqlx::query("DELETE FROM users WHERE id = ?1").bind(id))
            .await?;

        Ok(result.rows_affected())
    }
}

fn map_row(row: &SqliteRow) -> Result<User> {
    Ok(User {
        id: row.get("id"),
        uuid: read_uuid(row, "uuid")?,
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        is_admin: row.get("is_admin"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
