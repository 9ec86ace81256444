//! Sales service

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::db::{ClientRepository, Database, ProductRepository, SaleRepository};
use crate::models::Sale;
use crate::{Error, Result};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleInput {
    #[validate(range(min = 0.0, message = "sale value must not be negative"))]
    pub value: f64,
    #[validate(range(min = 0.0, message = "discount must not be negative"))]
    pub discount: Option<f64>,
    pub product_uuid: Uuid,
    pub client_uuid: Uuid,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSaleInput {
    #[validate(range(min = 0.0, message = "sale value must not be negative"))]
    pub value: Option<f64>,
    #[validate(range(min = 0.0, message = "discount must not be negative"))]
    pub discount: Option<f64>,
    pub product_uuid: Option<Uuid>,
    pub client_uuid: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct SalesService {
    db: Database,
}

impl SalesService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn repository(&self) -> SaleRepository {
        self.db.repository()
    }

    fn products(&self) -> ProductRepository {
        self.db.repository()
    }

    fn clients(&self) -> ClientRepository {
        self.db.repository()
    }

    pub async fn create(&self, input: CreateSaleInput) -> Result<Sale> {
        input.validate()?;

        let discount = input.discount.unwrap_or(0.0);
        if discount > input.value {
            return Err(Error::Validation(
                "discount must not exceed the sale value".to_string(),
            ));
        }

        let product = self
            .products()
            .find_by_uuid(&input.product_uuid)
            .await?
            .ok_or_else(|| Error::NotFound("product not found".to_string()))?;

        let client = self
            .clients()
            .find_by_uuid(&input.client_uuid)
            .await?
            .ok_or_else(|| Error::NotFound("client not found".to_string()))?;

        self.repository()
            .insert(input.value, discount, product.id, client.id)
            .await
    }

    pub async fn find_all(&self) -> Result<Vec<Sale>> {
        self.repository().find_all().await
    }

    pub async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Sale> {
        self.repository()
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| Error::NotFound("sale not found".to_string()))
    }

    pub async fn update(&self, uuid: &Uuid, input: UpdateSaleInput) -> Result<Sale> {
        input.validate()?;

        let repository = self.repository();

        let mut sale = repository
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| Error::NotFound("sale not found".to_string()))?;

        if let Some(value) = input.value {
            sale.value = value;
        }
        if let Some(discount) = input.discount {
            sale.discount = discount;
        }
        if sale.discount > sale.value {
            return Err(Error::Validation(
                "discount must not exceed the sale value".to_string(),
            ));
        }

        if let Some(product_uuid) = input.product_uuid {
            let product = self
                .products()
                .find_by_uuid(&product_uuid)
                .await?
                .ok_or_else(|| Error::NotFound("product not found".to_string()))?;
            sale.product_id = product.id;
        }

        if let Some(client_uuid) = input.client_uuid {
            let client = self
                .clients()
                .find_by_uuid(&client_uuid)
                .await?
                .ok_or_else(|| Error::NotFound("client not found".to_string()))?;
            sale.client_id = client.id;
        }

        repository.update(&sale).await
    }

    pub async fn delete(&self, uuid: &Uuid) -> Result<()> {
        let repository = self.repository();

        let sale = repository
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| Error::NotFound("sale not found".to_string()))?;

        repository.delete(sale.id).await?;
        Ok(())
    }
}
