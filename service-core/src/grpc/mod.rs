//! gRPC client side of service-to-service calls.
//!
//! Services talk to auth-service through [`AuthClient`]; each call carries the
//! caller's request id and, when OTLP is enabled, the W3C trace context.
//! Failures come back as `tonic::Status` and convert into `AppError`.

pub mod auth_client;
pub mod error;
pub mod metadata;

/// Code generated from `proto/micros/auth/v1`.
pub mod proto {
    pub mod auth {
        tonic::include_proto!("micros.auth.v1");
    }
}

pub use auth_client::{AuthClient, AuthClientConfig};
pub use metadata::{
    REQUEST_ID_KEY, TRACEPARENT_KEY, inject_trace_context, inject_trace_context_with_request_id,
};
pub use tonic::{Code, Status};
