use crate::domain::{
    requests::product::FindAllProducts,
    response::{pagination::Paginated, product::ProductResponse},
};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<Paginated<ProductResponse>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ProductResponse, ServiceError>;
    async fn validate_products(&self, ids: &[i32]) -> Result<Vec<ProductResponse>, ServiceError>;
}
