mod error;
mod repository;
mod rpc;
mod service;

pub use self::error::ErrorResponse;
pub use self::repository::RepositoryError;
pub use self::rpc::AppErrorRpc;
pub use self::service::ServiceError;
