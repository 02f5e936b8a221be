//! Bookstore gRPC service.
//!
//! Serves a catalog of books and their reviews. Every call passes through the
//! same pipeline: HTTP Basic authentication first, then access logging.

use grpc_common::{
    auth::authenticator::AuthenticatorArc,
    pipeline::{Pipeline, PipelineBuilder, access_log::AccessLogStage, auth::AuthStage},
};

pub mod book;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod review;
pub mod tracing;

#[cfg(test)]
pub(crate) mod testing;

/// Stages shared by every operation, in order.
pub fn pipeline_builder(authenticator: AuthenticatorArc) -> PipelineBuilder {
    Pipeline::builder()
        .stage(AuthStage::new(authenticator))
        .stage(AccessLogStage::new())
}

pub fn create_pipeline(authenticator: AuthenticatorArc) -> Pipeline {
    pipeline_builder(authenticator).build()
}
