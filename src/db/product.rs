//! Product repository
//!
//! Product rows are always read joined against their category so the public
//! view carries the category uuid instead of the internal rowid.

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

use super::{read_uuid, DbSession, Repository};
use crate::models::Product;
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct ProductRepository {
    session: DbSession,
}

impl Repository for ProductRepository {
    fn with_session(session: DbSession) -> Self {
        Self { session }
    }
}

impl ProductRepository {
    pub async fn insert(
        &self,
        name: &str,
        description: Option<&str>,
        price: f64,
        stock: i64,
        category_id: i64,
    ) -> Result<Product> {
        let now = Utc::now();
        let uuid = Uuid::new_v4();

        self.session
            .execute(
                sqlx::query(
                    "INSERT INTO products (uuid, name, description, price, stock, category_id, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                )
                .bind(uuid.to_string())
                .bind(name)
                .bind(description)
                .bind(price)
                .bind(stock)
                .bind(category_id)
                .bind(now)
                .bind(now),
            )
            .await?;

        self.find_by_uuid(&uuid)
            .await?
            .ok_or_else(|| Error::Internal("inserted product row not found".to_string()))
    }

    pub async fn find_all(&self) -> Result<Vec<Product>> {
        let rows = self
            .session
            .fetch_all(sqlx::query(
                "SELECT p.id, p.uuid, p.name, p.description, p.price, p.stock,
                        p.category_id, c.uuid AS category_uuid, p.created_at, p.updated_at
                 FROM products p
                 JOIN categories c ON c.id = p.category_id
                 ORDER BY p.id",
            ))
            .await?;

        rows.iter().map(map_row).collect()
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        let row = self
            .session
            .fetch_optional(
                sqlx::query(
                    "SELECT p.id, p.uuid, p.name, p.description, p.price, p.stock,
                            p.category_id, c.uuid AS category_uuid, p.created_at, p.updated_at
                     FROM products p
                     JOIN categories c ON c.id = p.category_id
                     WHERE p.id = ?1",
                )
                .bind(id),
            )
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Product>> {
        let row = self
            .session
            .fetch_optional(
                sqlx::query(
                    "SELECT p.id, p.uuid, p.name, p.description, p.price, p.stock,
                            p.category_id, c.uuid AS category_uuid, p.created_at, p.updated_at
                     FROM products p
                     JOIN categories c ON c.id = p.category_id
                     WHERE p.uuid = ?1",
                )
                .bind(uuid.to_string()),
            )
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Product>> {
        let row = self
            .session
            .fetch_optional(
                sqlx::query(
                    "SELECT p.id, p.uuid, p.name, p.description, p.price, p.stock,
                            p.category_id, c.uuid AS category_uuid, p.created_at, p.updated_at
                     FROM products p
                     JOIN categories c ON c.id = p.category_id
                     WHERE p.name = ?1",
                )
                .bind(name),
            )
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn update(&self, product: &Product) -> Result<Product> {
        let now = Utc::now();

        self.session
            .execute(
                sqlx::query(
                    "UPDATE products
                     SET name = ?1, description = ?2, price = ?3, stock = ?4,
                         category_id = ?5, updated_at = ?6
                     WHERE id = ?7",
                )
                .bind(&product.name)
                .bind(product.description.as_deref())
                .bind(product.price)
                .bind(product.stock)
                .bind(product.category_id)
                .bind(now)
                .bind(product.id),
            )
            .await?;

        self.find_by_id(product.id)
            .await?
            .ok_or_else(|| Error::Internal("updated product row not found".to_string()))
    }

    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = self
            .session
            .execute(sqlx::query("DELETE FROM products WHERE id = ?1").bind(id))
            .await?;

        Ok(result.rows_affected())
    }
}

fn map_row(row: &SqliteRow) -> Result<Product> {
    Ok(Product {
        id: row.get("id"),
        uuid: read_uuid(row, "uuid")?,
        name: row.get("name"),
        description: row.get("description"),
        price: row.get("price"),
        stock: row.get("stock"),
        category_id: row.get("category_id"),
        category_uuid: read_uuid(row, "category_uuid")?,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
