pub mod command;
pub mod query;

use crate::{
    abstract_trait::product::repository::DynProductQueryRepository,
    model::product::Product as ProductModel,
};
use shared::errors::ServiceError;
use tracing::error;

pub(crate) fn product_not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Product with id {id} doesn't exist"))
}

/// Loads an available product, treating soft-deleted rows as missing.
pub(crate) async fn find_available_product(
    query: &DynProductQueryRepository,
    id: i32,
) -> Result<ProductModel, ServiceError> {
    match query.find_available_by_id(id).await {
        Ok(Some(product)) => Ok(product),
        Ok(None) => {
            error!("❌ Product not found with ID: {id}");
            Err(product_not_found(id))
        }
        Err(e) => {
            error!("❌ Database error while finding product ID {id}: {e:?}");
            Err(ServiceError::Repo(e))
        }
    }
}
