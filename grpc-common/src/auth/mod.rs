//! Authentication utilities for gRPC services.
//!
//! This module provides types and traits for handling username/password
//! authentication carried in call metadata.

/// Authentication traits and utilities.
pub mod authenticator;

/// Basic credentials and authenticated principals.
pub mod credentials;

/// In-memory authenticator backed by a fixed user table.
pub mod memory;
