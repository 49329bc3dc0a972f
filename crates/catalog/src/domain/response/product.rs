use crate::model::product::Product as ProductModel;
use chrono::{NaiveDateTime, SecondsFormat};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub available: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

fn to_rfc3339(dt: NaiveDateTime) -> String {
    dt.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<ProductModel> for ProductResponse {
    fn from(value: ProductModel) -> Self {
        ProductResponse {
            id: value.id,
            name: value.name,
            price: value.price,
            available: value.available,
            created_at: value.created_at.map(to_rfc3339),
            updated_at: value.updated_at.map(to_rfc3339),
        }
    }
}
