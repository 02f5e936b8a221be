//! Tracing and observability module.
//!
//! Provides structured logging and span export for the bookstore service.

/// Tracer configuration and initialization.
pub mod tracer;
