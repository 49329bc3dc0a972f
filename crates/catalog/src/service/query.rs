use crate::{
    abstract_trait::product::{
        repository::DynProductQueryRepository, service::ProductQueryServiceTrait,
    },
    domain::{
        requests::product::FindAllProducts,
        response::{
            pagination::{PageMeta, Paginated},
            product::ProductResponse,
        },
    },
    service::find_available_product,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use std::collections::BTreeSet;
use tracing::{error, info};

const TRACER_NAME: &str = "product-query-service";

#[derive(Clone)]
pub struct ProductQueryService {
    pub query: DynProductQueryRepository,
    pub metrics: Metrics,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_query_service");

        Self { query, metrics }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<Paginated<ProductResponse>, ServiceError> {
        info!(
            "🔍 Finding all products | Page: {}, Limit: {}",
            req.page, req.limit
        );

        let page = req.page.max(1);
        let limit = req.limit.max(1);

        let tracing_ctx = TracingContext::start(
            TRACER_NAME,
            "product_find_all",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_all"),
                KeyValue::new("page", page),
                KeyValue::new("limit", limit),
            ],
        );

        let normalized = FindAllProducts { page, limit };

        let (products, total) = match self.query.find_available(&normalized).await {
            Ok(res) => res,
            Err(e) => {
                let msg = format!("❌ Failed to fetch products: {e:?}");
                tracing_ctx.failure(&self.metrics, Method::Get, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        let data: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

        tracing_ctx.success(&self.metrics, Method::Get, "Products retrieved from DB");
        info!("✅ Found {} products (total: {total})", data.len());

        Ok(Paginated {
            data,
            meta: PageMeta::new(total, page, limit),
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<ProductResponse, ServiceError> {
        info!("🆔 Finding product by ID: {id}");

        let tracing_ctx = TracingContext::start(
            TRACER_NAME,
            "product_find_by_id",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        match find_available_product(&self.query, id).await {
            Ok(product) => {
                tracing_ctx.success(&self.metrics, Method::Get, "Product retrieved from DB");
                Ok(ProductResponse::from(product))
            }
            Err(e) => {
                tracing_ctx.failure(&self.metrics, Method::Get, &e.to_string());
                Err(e)
            }
        }
    }

    async fn validate_products(&self, ids: &[i32]) -> Result<Vec<ProductResponse>, ServiceError> {
        let unique: Vec<i32> = ids
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        info!(
            "🧾 Validating {} product IDs ({} distinct)",
            ids.len(),
            unique.len()
        );

        let tracing_ctx = TracingContext::start(
            TRACER_NAME,
            "product_validate",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "validate_products"),
                KeyValue::new("ids.count", unique.len() as i64),
            ],
        );

        // soft-deleted rows still count as existing here
        let products = match self.query.find_by_ids(&unique).await {
            Ok(products) => products,
            Err(e) => {
                let msg = format!("❌ Failed to fetch products for validation: {e:?}");
                tracing_ctx.failure(&self.metrics, Method::Get, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        if products.len() != unique.len() {
            error!(
                "❌ Expected {} products, found {}",
                unique.len(),
                products.len()
            );
            tracing_ctx.failure(&self.metrics, Method::Get, "Some products were not found");
            return Err(ServiceError::ValidationFailed(
                "Some products were not found".to_string(),
            ));
        }

        tracing_ctx.success(&self.metrics, Method::Get, "Products validated");

        Ok(products.into_iter().map(ProductResponse::from).collect())
    }
}
