use bookstore_api::model::error::ModelError;
use thiserror::Error;
use tonic::{Code, Status, transport};
use tracing::error;

/// Application error types.
///
/// Represents all possible errors that can occur in the bookstore service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Internal application error.
    ///
    /// Represents unexpected internal errors that occur during service operation.
    #[error("internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),

    /// The requested resource does not exist.
    #[error("{resource} `{id}` not found")]
    NotFound { resource: &'static str, id: String },

    /// Request or model conversion error.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// gRPC status error.
    ///
    /// Represents gRPC protocol-level errors.
    #[error("status error: {0}")]
    Status(#[from] Status),
}

/// Application result type.
///
/// Type alias for Result with `AppError` as the error type.
/// Used throughout the application for consistent error handling.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found<I: ToString>(resource: &'static str, id: I) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

macro_rules! impl_internal_errors {
    ( $( $type:ty ),* $(,)? ) => {
        $(
        impl From<$type> for AppError {
            fn from(err: $type) -> Self {
                AppError::Internal(Box::new(err))
            }
        }
        )*
    };
}
impl_internal_errors!(
    config::ConfigError,
    transport::Error,
    std::io::Error,
    serde_json::Error,
);

impl From<AppError> for Status {
    /// Converts application errors to gRPC status codes.
    ///
    /// Internal errors are logged and surfaced without their details.
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound { .. } => Self::not_found(err.to_string()),
            AppError::Model(err) => err.into(),
            AppError::Status(status) => status,
            AppError::Internal(_) => {
                error!("internal service error: {}", err);
                Self::internal(Code::Internal.description())
            }
        }
    }
}
