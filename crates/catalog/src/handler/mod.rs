mod payload;
mod pattern;

pub use self::payload::parse_payload;
pub use self::pattern::RpcPattern;

use crate::{
    abstract_trait::product::service::{DynProductCommandService, DynProductQueryService},
    domain::requests::product::{
        CreateProductRequest, FindAllProducts, FindByIdProduct, UpdateProductRequest,
        ValidateProductsRequest,
    },
};
use serde::Serialize;
use serde_json::Value;
use shared::errors::{AppErrorRpc, ErrorResponse, ServiceError};
use tracing::{info, warn};

/// Routes an inbound `(pattern, payload)` pair to the catalog services and
/// turns the outcome into a JSON value or a structured error.
#[derive(Clone)]
pub struct ProductRpcHandler {
    pub query: DynProductQueryService,
    pub command: DynProductCommandService,
}

impl ProductRpcHandler {
    pub fn new(query: DynProductQueryService, command: DynProductCommandService) -> Self {
        Self { query, command }
    }

    pub async fn handle(&self, pattern: &str, payload: &[u8]) -> Result<Value, ErrorResponse> {
        info!("Handling RPC request: {pattern}");

        match self.dispatch(pattern, payload).await {
            Ok(value) => {
                info!("RPC request {pattern} handled successfully");
                Ok(value)
            }
            Err(err) => {
                warn!("RPC request {pattern} failed: {err}");
                Err(ErrorResponse::from(err))
            }
        }
    }

    async fn dispatch(&self, pattern: &str, payload: &[u8]) -> Result<Value, AppErrorRpc> {
        match pattern.parse::<RpcPattern>()? {
            RpcPattern::CreateProduct => {
                let req: CreateProductRequest = parse_payload(payload)?;
                to_json(self.command.create_product(&req).await?)
            }
            RpcPattern::FindAllProducts => {
                let req: FindAllProducts = parse_payload(payload)?;
                to_json(self.query.find_all(&req).await?)
            }
            RpcPattern::FindOneProduct => {
                let req: FindByIdProduct = parse_payload(payload)?;
                to_json(self.query.find_by_id(req.id).await?)
            }
            RpcPattern::UpdateProduct => {
                let req: UpdateProductRequest = parse_payload(payload)?;
                to_json(self.command.update_product(&req).await?)
            }
            RpcPattern::RemoveProduct => {
                let req: FindByIdProduct = parse_payload(payload)?;
                to_json(self.command.trash_product(req.id).await?)
            }
            RpcPattern::ValidateProducts => {
                let req: ValidateProductsRequest = parse_payload(payload)?;
                to_json(self.query.validate_products(&req.ids).await?)
            }
        }
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value, AppErrorRpc> {
    serde_json::to_value(value)
        .map_err(|e| AppErrorRpc::from(ServiceError::Internal(e.to_string())))
}
