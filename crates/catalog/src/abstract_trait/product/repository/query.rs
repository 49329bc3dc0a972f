use crate::{domain::requests::product::FindAllProducts, model::product::Product as ProductModel};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    /// One page of available products and the count of all available rows.
    async fn find_available(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError>;
    async fn find_available_by_id(&self, id: i32)
    -> Result<Option<ProductModel>, RepositoryError>;
    /// Every row whose id is in `ids`, available or not.
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<ProductModel>, RepositoryError>;
}
