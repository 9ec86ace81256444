//! Sale repository
//!
//! Sale rows are read joined against product and client so the public view
//! carries their uuids.

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

use super::{read_uuid, DbSession, Repository};
use crate::models::Sale;
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct SaleRepository {
    session: DbSession,
}

impl Repository for SaleRepository {
    fn with_session(session: DbSession) -> Self {
        Self { session }
    }
}

impl SaleRepository {
    pub async fn insert(
        &self,
        value: f64,
        discount: f64,
        product_id: i64,
        client_id: i64,
    ) -> Result<Sale> {
        let now = Utc::now();
        let uuid = Uuid::new_v4();

        self.session
            .execute(
                sqlx::query(
                    "INSERT INTO sales (uuid, value, discount, product_id, client_id, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                )
                .bind(uuid.to_string())
                .bind(value)
                .bind(discount)
                .bind(product_id)
                .bind(client_id)
                .bind(now)
                .bind(now),
            )
            .await?;

        self.find_by_uuid(&uuid)
            .await?
            .ok_or_else(|| Error::Internal("inserted sale row not found".to_string()))
    }

    pub async fn find_all(&self) -> Result<Vec<Sale>> {
        let rows = self
            .session
            .fetch_all(sqlx::query(
                "SELECT s.id, s.uuid, s.value, s.discount, s.product_id, s.client_id,
                        p.uuid AS product_uuid, c.uuid AS client_uuid, s.created_at, s.updated_at
                 FROM sales s
                 JOIN products p ON p.id = s.product_id
                 JOIN clients c ON c.id = s.client_id
                 ORDER BY s.id",
            ))
            .await?;

        rows.iter().map(map_row).collect()
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Sale>> {
        let row = self
            .session
            .fetch_optional(
                sqlx::query(
                    "SELECT s.id, s.uuid, s.value, s.discount, s.product_id, s.client_id,
                            p.uuid AS product_uuid, c.uuid AS client_uuid, s.created_at, s.updated_at
                     FROM sales s
                     JOIN products p ON p.id = s.product_id
                     JOIN clients c ON c.id = s.client_id
                     WHERE s.id = ?1",
                )
                .bind(id),
            )
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Sale>> {
        let row = self
            .session
            .fetch_optional(
                sqlx::query(
                    "SELECT s.id, s.uuid, s.value, s.discount, s.product_id, s.client_id,
                            p.uuid AS product_uuid, c.uuid AS client_uuid, s.created_at, s.updated_at
                     FROM sales s
                     JOIN products p ON p.id = s.product_id
                     JOIN clients c ON c.id = s.client_id
                     WHERE s.uuid = ?1",
                )
                .bind(uuid.to_string()),
            )
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn update(&self, sale: &Sale) -> Result<Sale> {
        let now = Utc::now();

        self.session
            .execute(
                sqlx::query(
                    "UPDATE sales
                     SET value = ?1, discount = ?2, product_id = ?3, client_id = ?4, updated_at = ?5
                     WHERE id = ?6",
                )
                .bind(sale.value)
                .bind(sale.discount)
                .bind(sale.product_id)
                .bind(sale.client_id)
                .bind(now)
                .bind(sale.id),
            )
            .await?;

        self.find_by_id(sale.id)
            .await?
            .ok_or_else(|| Error::Internal("updated sale row not found".to_string()))
    }

    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = self
            .session
            .execute(sqlx::query("DELETE FROM sales WHERE id = ?1").bind(id))
            .await?;

        Ok(result.rows_affected())
    }
}

fn map_row(row: &SqliteRow) -> Result<Sale> {
    Ok(Sale {
        id: row.get("id"),
        uuid: read_uuid(row, "uuid")?,
        value: row.get("value"),
        discount: row.get("discount"),
        product_id: row.get("product_id"),
        product_uuid: read_uuid(row, "product_uuid")?,
        client_id: row.get("client_id"),
        client_uuid: read_uuid(row, "client_uuid")?,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
