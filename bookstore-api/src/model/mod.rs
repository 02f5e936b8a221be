//! Model definitions for the bookstore service.
//!
//! This module contains the domain models, parsed service requests, and
//! error types for the bookstore API.

/// Book model definitions and utilities.
pub mod book;
/// Book service request structures.
pub mod book_service;
/// Error handling and types for the bookstore service.
pub mod error;
/// Fully-qualified RPC operation names.
pub mod operation;
/// Review model definitions.
pub mod review;
/// Review service request structures.
pub mod review_service;
