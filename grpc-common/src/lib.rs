//! Common utilities and types for gRPC services.
//!
//! This crate provides the shared call pipeline that every inbound gRPC call
//! passes through, along with the credential handling used by its
//! authentication stage.

pub mod auth;
pub mod pipeline;
