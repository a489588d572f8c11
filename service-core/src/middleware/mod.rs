//! HTTP middleware shared by micros services.

pub mod metrics;
pub mod security_headers;
pub mod tracing;
