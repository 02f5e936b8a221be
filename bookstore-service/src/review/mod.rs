//! Book review module.
//!
//! Reviews are read-only over gRPC; they are created when the store is seeded.

/// gRPC service adapter for reviews.
pub mod adapter;

/// Review query manager for data retrieval.
pub mod query_manager;

/// Review repository abstraction and implementations.
pub mod repository;
