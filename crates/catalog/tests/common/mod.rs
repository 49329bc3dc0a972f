#![allow(dead_code)]

use async_trait::async_trait;
use catalog::{
    abstract_trait::product::{
        repository::{
            DynProductCommandRepository, DynProductQueryRepository, ProductCommandRepositoryTrait,
            ProductQueryRepositoryTrait,
        },
        service::{DynProductCommandService, DynProductQueryService},
    },
    di::DependenciesInject,
    domain::requests::product::{CreateProductRequest, FindAllProducts, UpdateProductRequest},
    handler::ProductRpcHandler,
    model::product::Product,
};
use chrono::Utc;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::KafkaTrait,
    errors::{RepositoryError, ServiceError},
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use tokio::sync::Mutex;

/// Products table kept in memory. Ids are handed out like a SERIAL column.
#[derive(Default)]
pub struct InMemoryProducts {
    rows: Mutex<Vec<Product>>,
    update_calls: AtomicUsize,
}

impl InMemoryProducts {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn rows(&self) -> Vec<Product> {
        self.rows.lock().await.clone()
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryProducts {
    async fn find_available(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        let rows = self.rows.lock().await;
        let available: Vec<&Product> = rows.iter().filter(|p| p.available).collect();

        let offset = usize::try_from(req.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(req.limit).unwrap_or(usize::MAX);
        let page = available
            .iter()
            .skip(offset)
            .take(limit)
            .map(|p| (*p).clone())
            .collect();

        Ok((page, available.len() as i64))
    }

    async fn find_available_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|p| p.id == id && p.available).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, RepositoryError> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().filter(|p| ids.contains(&p.id)).cloned().collect())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryProducts {
    async fn create_product(&self, req: &CreateProductRequest) -> Result<Product, RepositoryError> {
        let mut rows = self.rows.lock().await;
        let now = Utc::now().naive_utc();

        let product = Product {
            id: rows.len() as i32 + 1,
            name: req.name.clone(),
            price: req.price,
            available: true,
            created_at: Some(now),
            updated_at: Some(now),
        };
        rows.push(product.clone());

        Ok(product)
    }

    async fn update_product(&self, req: &UpdateProductRequest) -> Result<Product, RepositoryError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        let mut rows = self.rows.lock().await;
        let product = rows
            .iter_mut()
            .find(|p| p.id == req.id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(name) = &req.name {
            product.name = name.clone();
        }
        if let Some(price) = req.price {
            product.price = price;
        }
        product.updated_at = Some(Utc::now().naive_utc());

        Ok(product.clone())
    }

    async fn trash_product(&self, id: i32) -> Result<Product, RepositoryError> {
        let mut rows = self.rows.lock().await;
        let product = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        product.available = false;
        product.updated_at = Some(Utc::now().naive_utc());

        Ok(product.clone())
    }
}

pub struct TestCatalog {
    pub store: Arc<InMemoryProducts>,
    pub query: DynProductQueryService,
    pub command: DynProductCommandService,
    pub registry: Registry,
}

impl TestCatalog {
    pub fn new() -> Self {
        let store = InMemoryProducts::new();
        let mut registry = Registry::default();

        let di = DependenciesInject::from_repositories(
            store.clone() as DynProductQueryRepository,
            store.clone() as DynProductCommandRepository,
            &mut registry,
        );

        Self {
            store,
            query: di.product_query,
            command: di.product_command,
            registry,
        }
    }

    pub fn handler(&self) -> ProductRpcHandler {
        ProductRpcHandler::new(self.query.clone(), self.command.clone())
    }

    pub async fn seed(&self, name: &str, price: f64) -> i32 {
        let req = create_request(name, price);
        self.store
            .create_product(&req)
            .await
            .expect("seed product")
            .id
    }
}

pub fn create_request(name: &str, price: f64) -> CreateProductRequest {
    CreateProductRequest {
        name: name.to_string(),
        price,
    }
}

pub fn update_request(id: i32, name: Option<&str>, price: Option<f64>) -> UpdateProductRequest {
    UpdateProductRequest {
        id,
        name: name.map(str::to_string),
        price,
    }
}

#[derive(Debug, Clone)]
pub struct PublishedMessage {
    pub topic: String,
    pub key: String,
    pub value: Vec<u8>,
    pub headers: Vec<(String, String)>,
}

/// Captures everything published instead of talking to a broker.
#[derive(Default)]
pub struct RecordingPublisher {
    pub messages: Mutex<Vec<PublishedMessage>>,
}

#[async_trait]
impl KafkaTrait for RecordingPublisher {
    async fn publish(
        &self,
        topic: &str,
        key: &str,
        value: &[u8],
        headers: &[(&str, &str)],
    ) -> Result<(), ServiceError> {
        self.messages.lock().await.push(PublishedMessage {
            topic: topic.to_string(),
            key: key.to_string(),
            value: value.to_vec(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
        Ok(())
    }
}
