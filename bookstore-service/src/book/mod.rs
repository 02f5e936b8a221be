//! Book catalog module.
//!
//! Provides the book operations of the service:
//! - gRPC adapter for handling book service requests
//! - Command handler for adding books
//! - Query manager for retrieving book data
//! - Repository abstraction for data persistence

/// Book creation command handler.
pub mod add_book_command;

/// gRPC service adapter for books.
pub mod adapter;

/// Book query manager for data retrieval.
pub mod query_manager;

/// Book repository abstraction and implementations.
pub mod repository;
