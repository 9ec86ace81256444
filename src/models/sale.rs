use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    #[serde(skip_serializing)]
    pub id: i64,
    pub uuid: Uuid,
    pub value: f64,
    pub discount: f64,
    #[serde(skip_serializing)]
    pub product_id: i64,
    pub product_uuid: Uuid,
    #[serde(skip_serializing)]
    pub client_id: i64,
    pub client_uuid: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
