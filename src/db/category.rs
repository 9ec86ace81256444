//! Category repository

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

use super::{read_uuid, DbSession, Repository};
use crate::models::Category;
use crate::Result;

#[derive(Debug, Clone)]
pub struct CategoryRepository {
    session: DbSession,
}

impl Repository for CategoryRepository {
    fn with_session(session: DbSession) -> Self {
        Self { session }
    }
}

impl CategoryRepository {
    pub async fn insert(&self, name: &str, description: Option<&str>) -> Result<Category> {
        let now = Utc::now();
        let uuid = Uuid::new_v4();

        let row = self
            .session
            .fetch_one(
                sqlx::query(
                    "INSERT INTO categories (uuid, name, description, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     RETURNING id, uuid, name, description, created_at, updated_at",
                )
                .bind(uuid.to_string())
                .bind(name)
                .bind(description)
                .bind(now)
                .bind(now),
            )
            .await?;

        map_row(&row)
    }

    pub async fn find_all(&self) -> Result<Vec<Category>> {
        let rows = self
            .session
            .fetch_all(sqlx::query(
                "SELECT id, uuid, name, description, created_at, updated_at
                 FROM categories
                 ORDER BY id",
            ))
            .await?;

        rows.iter().map(map_row).collect()
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Category>> {
        let row = self
            .session
            .fetch_optional(
                sqlx::query(
                    "SELECT id, uuid, name, description, created_at, updated_at
                     FROM categories
                     WHERE id = ?1",
                )
                .bind(id),
            )
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Category>> {
        let row = self
            .session
            .fetch_optional(
                sqlx::query(
                    "SELECT id, uuid, name, description, created_at, updated_at
                     FROM categories
                     WHERE uuid = ?1",
                )
                .bind(uuid.to_string()),
            )
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let row = self
            .session
            .fetch_optional(
                sqlx::query(
                    "SELECT id, uuid, name, description, created_at, updated_at
                     FROM categories
                     WHERE name = ?1",
                )
                .bind(name),
            )
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn update(&self, category: &Category) -> Result<Category> {
        let now = Utc::now();

        let row = self
            .session
            .fetch_one(
                sqlx::query(
                    "UPDATE categories
                     SET name = ?1, description = ?2, updated_at = ?3
                     WHERE id = ?4
                     RETURNING id, uuid, name, description, created_at, updated_at",
                )
                .bind(&category.name)
                .bind(category.description.as_deref())
                .bind(now)
                .bind(category.id),
            )
            .await?;

        map_row(&row)
    }

    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = self
            .session
            .execute(sqlx::query("DELETE FROM categories WHERE id = ?1").bind(id))
            .await?;

        Ok(result.rows_affected())
    }
}

fn map_row(row: &SqliteRow) -> Result<Category> {
    Ok(Category {
        id: row.get("id"),
        uuid: read_uuid(row, "uuid")?,
        name: row.get("name"),
        description: row.get("description"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
