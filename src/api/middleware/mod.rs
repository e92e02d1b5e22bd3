//! HTTP middleware for request processing and protection.
//!
//! Provides rate limiting, CORS, cache headers, and observability middleware.

pub mod cache_control;
pub mod cors;
pub mod rate_limit;
pub mod tracing;
