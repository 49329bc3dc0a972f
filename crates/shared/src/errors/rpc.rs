use crate::errors::{error::ErrorResponse, service::ServiceError};
use axum::http::StatusCode;
use thiserror::Error;
use tracing::error;

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum AppErrorRpc {
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("There are no subscribers listening to that message (\"{0}\")")]
    UnknownPattern(String),
}

impl From<AppErrorRpc> for ErrorResponse {
    fn from(err: AppErrorRpc) -> Self {
        let bad_request = StatusCode::BAD_REQUEST.as_u16();
        let internal = StatusCode::INTERNAL_SERVER_ERROR.as_u16();

        match err {
            AppErrorRpc::Service(service_err) => match service_err {
                ServiceError::NotFound(msg) | ServiceError::ValidationFailed(msg) => {
                    ErrorResponse::new(bad_request, msg)
                }

                ServiceError::Validation(errors) => ErrorResponse::new(bad_request, errors.join("; ")),

                other => {
                    error!("unhandled service failure: {other}");
                    ErrorResponse::new(internal, INTERNAL_MESSAGE)
                }
            },

            AppErrorRpc::Payload(err) => {
                ErrorResponse::new(bad_request, format!("Malformed payload: {err}"))
            }

            unknown @ AppErrorRpc::UnknownPattern(_) => {
                ErrorResponse::new(bad_request, unknown.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::repository::RepositoryError;

    #[test]
    fn not_found_keeps_message_and_client_status() {
        let err = AppErrorRpc::from(ServiceError::NotFound(
            "Product with id 7 doesn't exist".into(),
        ));

        let response = ErrorResponse::from(err);

        assert_eq!(response.status, 400);
        assert_eq!(response.message, "Product with id 7 doesn't exist");
    }

    #[test]
    fn validation_messages_are_joined() {
        let err = AppErrorRpc::from(ServiceError::Validation(vec![
            "name: Name is required".into(),
            "price: Price cannot be negative".into(),
        ]));

        let response = ErrorResponse::from(err);

        assert_eq!(response.status, 400);
        assert_eq!(
            response.message,
            "name: Name is required; price: Price cannot be negative"
        );
    }

    #[test]
    fn store_failures_are_opaque() {
        let err = AppErrorRpc::from(ServiceError::Repo(RepositoryError::Sqlx(
            sqlx::Error::PoolTimedOut,
        )));

        let response = ErrorResponse::from(err);

        assert_eq!(response.status, 500);
        assert_eq!(response.message, "Internal server error");
    }

    #[test]
    fn unknown_pattern_is_a_client_error() {
        let response = ErrorResponse::from(AppErrorRpc::UnknownPattern("drop_table".into()));

        assert_eq!(response.status, 400);
        assert!(response.message.contains("drop_table"));
    }

    #[test]
    fn untranslated_repository_not_found_is_a_server_fault() {
        let err = AppErrorRpc::from(ServiceError::Repo(RepositoryError::NotFound));

        let response = ErrorResponse::from(err);

        assert_eq!(response.status, 500);
        assert_eq!(response.message, "Internal server error");
    }
}
