//! Client service

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::db::{client::NewClient, ClientRepository, Database};
use crate::models::Client;
use crate::{Error, Result};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientInput {
    #[validate(length(min = 1, message = "client name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "client document is required"))]
    pub document: String,
    #[validate(email(message = "client email is invalid"))]
    pub email: String,
    #[validate(length(min = 1, message = "client address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "client zip code is required"))]
    pub zip_code: String,
    #[validate(length(min = 1, message = "client number is required"))]
    pub number: String,
    #[validate(length(min = 1, message = "client city is required"))]
    pub city: String,
    #[validate(length(min = 2, max = 2, message = "client state must be two letters"))]
    pub state: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientInput {
    #[validate(length(min = 1, message = "client name is required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "client document is required"))]
    pub document: Option<String>,
    #[validate(email(message = "client email is invalid"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "client address is required"))]
    pub address: Option<String>,
    #[validate(length(min = 1, message = "client zip code is required"))]
    pub zip_code: Option<String>,
    #[validate(length(min = 1, message = "client number is required"))]
    pub number: Option<String>,
    #[validate(length(min = 1, message = "client city is required"))]
    pub city: Option<String>,
    #[validate(length(min = 2, max = 2, message = "client state must be two letters"))]
    pub state: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ClientService {
    db: Database,
}

impl ClientService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn repository(&self) -> ClientRepository {
        self.db.repository()
    }

    pub async fn create(&self, input: CreateClientInput) -> Result<Client> {
        input.validate()?;

        let repository = self.repository();

        if repository.find_by_document(&input.document).await?.is_some() {
            return Err(Error::Conflict(
                "a client with this document already exists".to_string(),
            ));
        }

        repository
            .insert(NewClient {
                name: &input.name,
                document: &input.document,
                email: &input.email,
                address: &input.address,
                zip_code: &input.zip_code,
                number: &input.number,
                city: &input.city,
                state: &input.state,
            })
            .await
    }

    pub async fn find_all(&self) -> Result<Vec<Client>> {
        self.repository().find_all().await
    }

    pub async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Client> {
        self.repository()
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| Error::NotFound("client not found".to_string()))
    }

    pub async fn update(&self, uuid: &Uuid, input: UpdateClientInput) -> Result<Client> {
        input.validate()?;

        let repository = self.repository();

        let mut client = repository
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| Error::NotFound("client not found".to_string()))?;

        if let Some(document) = input.document {
            if document != client.document
                && repository.find_by_document(&document).await?.is_some()
            {
                return Err(Error::Conflict(
                    "a client with this document already exists".to_string(),
                ));
            }
            client.document = document;
        }

        if let Some(name) = input.name {
            client.name = name;
        }
        if let Some(email) = input.email {
            client.email = email;
        }
        if let Some(address) = input.address {
            client.address = address;
        }
        if let Some(zip_code) = input.zip_code {
            client.zip_code = zip_code;
        }
        if let Some(number) = input.number {
            client.number = number;
        }
        if let Some(city) = input.city {
            client.city = city;
        }
        if let Some(state) = input.state {
            client.state = state;
        }

        repository.update(&client).await
    }

    pub async fn delete(&self, uuid: &Uuid) -> Result<()> {
        let repository = self.repository();

        let client = repository
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| Error::NotFound("client not found".to_string()))?;

        repository.delete(client.id).await?;
        Ok(())
    }
}
