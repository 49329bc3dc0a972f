use crate::domain::{
    requests::product::{CreateProductRequest, UpdateProductRequest},
    response::product::ProductResponse,
};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductResponse, ServiceError>;
    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ProductResponse, ServiceError>;
    async fn trash_product(&self, id: i32) -> Result<ProductResponse, ServiceError>;
}
