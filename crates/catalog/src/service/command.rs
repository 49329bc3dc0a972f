use crate::{
    abstract_trait::product::{
        repository::{DynProductCommandRepository, DynProductQueryRepository},
        service::ProductCommandServiceTrait,
    },
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::product::ProductResponse,
    },
    service::{find_available_product, product_not_found},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, TracingContext},
};
use tracing::info;

const TRACER_NAME: &str = "product-command-service";

#[derive(Clone)]
pub struct ProductCommandService {
    pub query: DynProductQueryRepository,
    pub command: DynProductCommandRepository,
    pub metrics: Metrics,
}

impl ProductCommandService {
    pub fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_command_service");

        Self {
            query,
            command,
            metrics,
        }
    }
}

fn write_error(id: i32, err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::NotFound => product_not_found(id),
        other => ServiceError::Repo(other),
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        info!("🏗️ Creating product: {}", req.name);

        let tracing_ctx = TracingContext::start(
            TRACER_NAME,
            "product_create",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "create"),
                KeyValue::new("product.name", req.name.clone()),
            ],
        );

        match self.command.create_product(req).await {
            Ok(product) => {
                tracing_ctx.success(&self.metrics, Method::Post, "Product created");
                Ok(ProductResponse::from(product))
            }
            Err(e) => {
                let msg = format!("❌ Failed to create product: {e:?}");
                tracing_ctx.failure(&self.metrics, Method::Post, &msg);
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        info!("🔄 Updating product ID: {}", req.id);

        let tracing_ctx = TracingContext::start(
            TRACER_NAME,
            "product_update",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "update"),
                KeyValue::new("product.id", req.id.to_string()),
            ],
        );

        let current = match find_available_product(&self.query, req.id).await {
            Ok(product) => product,
            Err(e) => {
                tracing_ctx.failure(&self.metrics, Method::Put, &e.to_string());
                return Err(e);
            }
        };

        if !req.has_changes() {
            tracing_ctx.success(&self.metrics, Method::Put, "Nothing to update");
            return Ok(ProductResponse::from(current));
        }

        match self.command.update_product(req).await {
            Ok(product) => {
                tracing_ctx.success(&self.metrics, Method::Put, "Product updated");
                Ok(ProductResponse::from(product))
            }
            Err(e) => {
                let msg = format!("❌ Failed to update product: {e:?}");
                tracing_ctx.failure(&self.metrics, Method::Put, &msg);
                Err(write_error(req.id, e))
            }
        }
    }

    async fn trash_product(&self, id: i32) -> Result<ProductResponse, ServiceError> {
        info!("🗑️ Removing product ID: {id}");

        let tracing_ctx = TracingContext::start(
            TRACER_NAME,
            "product_trash",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "trash"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        if let Err(e) = find_available_product(&self.query, id).await {
            tracing_ctx.failure(&self.metrics, Method::Delete, &e.to_string());
            return Err(e);
        }

        match self.command.trash_product(id).await {
            Ok(product) => {
                tracing_ctx.success(&self.metrics, Method::Delete, "Product marked unavailable");
                Ok(ProductResponse::from(product))
            }
            Err(e) => {
                let msg = format!("❌ Failed to remove product: {e:?}");
                tracing_ctx.failure(&self.metrics, Method::Delete, &msg);
                Err(write_error(id, e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_row_on_write_names_the_product() {
        let err = write_error(7, RepositoryError::NotFound);

        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(err.to_string(), "Product with id 7 doesn't exist");
    }

    #[test]
    fn other_write_failures_stay_repository_errors() {
        let err = write_error(7, RepositoryError::Sqlx(sqlx::Error::PoolTimedOut));

        assert!(matches!(err, ServiceError::Repo(RepositoryError::Sqlx(_))));
    }
}
