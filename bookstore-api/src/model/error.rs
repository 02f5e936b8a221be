use thiserror::Error;
use tonic::Status;

use crate::codec::timestamp::TimestampError;

/// Errors raised while turning wire messages into domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid field `{field}`: {source}")]
    InvalidTimestamp {
        field: &'static str,
        #[source]
        source: TimestampError,
    },
}

pub type ModelResult<T> = Result<T, ModelError>;

impl From<ModelError> for Status {
    fn from(err: ModelError) -> Self {
        Self::invalid_argument(err.to_string())
    }
}
