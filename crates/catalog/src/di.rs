use crate::{
    abstract_trait::product::{
        repository::{DynProductCommandRepository, DynProductQueryRepository},
        service::{DynProductCommandService, DynProductQueryService},
    },
    handler::ProductRpcHandler,
    repository::{command::ProductCommandRepository, query::ProductQueryRepository},
    service::{command::ProductCommandService, query::ProductQueryService},
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_query", &"ProductQueryService")
            .field("product_command", &"ProductCommandService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(pool: ConnectionPool, registry: &mut Registry) -> Self {
        let product_query_repo =
            Arc::new(ProductQueryRepository::new(pool.clone())) as DynProductQueryRepository;
        let product_command_repo =
            Arc::new(ProductCommandRepository::new(pool)) as DynProductCommandRepository;

        Self::from_repositories(product_query_repo, product_command_repo, registry)
    }

    /// Wires the services over any repository implementation.
    pub fn from_repositories(
        query_repo: DynProductQueryRepository,
        command_repo: DynProductCommandRepository,
        registry: &mut Registry,
    ) -> Self {
        let product_query = Arc::new(ProductQueryService::new(query_repo.clone(), registry))
            as DynProductQueryService;

        let product_command = Arc::new(ProductCommandService::new(
            query_repo,
            command_repo,
            registry,
        )) as DynProductCommandService;

        Self {
            product_query,
            product_command,
        }
    }

    pub fn rpc_handler(&self) -> ProductRpcHandler {
        ProductRpcHandler::new(self.product_query.clone(), self.product_command.clone())
    }
}
