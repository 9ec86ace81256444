//! Client repository

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

use super::{read_uuid, DbSession, Repository};
use crate::models::Client;
use crate::Result;

#[derive(Debug, Clone)]
pub struct ClientRepository {
    session: DbSession,
}

impl Repository for ClientRepository {
    fn with_session(session: DbSession) -> Self {
        Self { session }
    }
}

pub struct NewClient<'a> {
    pub name: &'a str,
    pub document: &'a str,
    pub email: &'a str,
    pub address: &'a str,
    pub zip_code: &'a str,
    pub number: &'a str,
    pub city: &'a str,
    pub state: &'a str,
}

impl ClientRepository {
    pub async fn insert(&self, new: NewClient<'_>) -> Result<Client> {
        let now = Utc::now();
        let uuid = Uuid::new_v4();

        let row = self
            .session
            .fetch_one(
                sqlx::query(
                    "INSERT INTO clients (uuid, name, document, email, address, zip_code, number, city, state, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                     RETURNING id, uuid, name, document, email, address, zip_code, number, city, state, created_at, updated_at",
                )
                .bind(uuid.to_string())
                .bind(new.name)
                .bind(new.document)
                .bind(new.email)
                .bind(new.address)
                .bind(new.zip_code)
                .bind(new.number)
                .bind(new.city)
                .bind(new.state)
                .bind(now)
                .bind(now),
            )
            .await?;

        map_row(&row)
    }

    pub async fn find_all(&self) -> Result<Vec<Client>> {
        let rows = self
            .session
            .fetch_all(sqlx::query(
                "SELECT id, uuid, name, document, email, address, zip_code, number, city, state, created_at, updated_at
                 FROM clients
                 ORDER BY id",
            ))
            .await?;

        rows.iter().map(map_row).collect()
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Client>> {
        let row = self
            .session
            .fetch_optional(
                sqlx::query(
                    "SELECT id, uuid, name, document, email, address, zip_code, number, city, state, created_at, updated_at
                     FROM clients
                     WHERE id = ?1",
                )
                .bind(id),
            )
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Client>> {
        let row = self
            .session
            .fetch_optional(
                sqlx::query(
                    "SELECT id, uuid, name, document, email, address, zip_code, number, city, state, created_at, updated_at
                     FROM clients
                     WHERE uuid = ?1",
                )
                .bind(uuid.to_string()),
            )
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn find_by_document(&self, document: &str) -> Result<Option<Client>> {
        let row = self
            .session
            .fetch_optional(
                sqlx::query(
                    "SELECT id, uuid, name, document, email, address, zip_code, number, city, state, created_at, updated_at
                     FROM clients
                     WHERE document = ?1",
                )
                .bind(document),
            )
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn update(&self, client: &Client) -> Result<Client> {
        let now = Utc::now();

        let row = self
            .session
            .fetch_one(
                sqlx::query(
                    "UPDATE clients
                     SET name = ?1, document = ?2, email = ?3, address = ?4, zip_code = ?5,
                         number = ?6, city = ?7, state = ?8, updated_at = ?9
                     WHERE id = ?10
                     RETURNING id, uuid, name, document, email, address, zip_code, number, city, state, created_at, updated_at",
                )
                .bind(&client.name)
                .bind(&client.document)
                .bind(&client.email)
                .bind(&client.address)
                .bind(&client.zip_code)
                .bind(&client.number)
                .bind(&client.city)
                .bind(&client.state)
                .bind(now)
                .bind(client.id),
            )
            .await?;

        map_row(&row)
    }

    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = self
            .session
            .execute(sqlx::query("DELETE FROM clients WHERE id = ?1").bind(id))
            .await?;

        Ok(result.rows_affected())
    }
}

fn map_row(row: &SqliteRow) -> Result<Client> {
    Ok(Client {
        id: row.get("id"),
        uuid: read_uuid(row, "uuid")?,
        name: row.get("name"),
        document: row.get("document"),
        email: row.get("email"),
        address: row.get("address"),
        zip_code: row.get("zip_code"),
        number: row.get("number"),
        city: row.get("city"),
        state: row.get("state"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
