//! Shared plumbing for micros HTTP services: listener configuration, the
//! common error type, request middleware, tracing setup and the auth-service
//! gRPC client.

pub mod config;
pub mod error;
pub mod grpc;
pub mod middleware;
pub mod observability;
