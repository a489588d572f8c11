//! Auth service gRPC client for service-to-service communication.

use std::time::Duration;
use tonic::Request;
use tonic::transport::{Channel, Endpoint};

use super::metadata::{inject_trace_context, inject_trace_context_with_request_id};
use super::proto::auth::auth_test_service_client::AuthTestServiceClient;
use super::proto::auth::{TestDataRequest, TestDataResponse, UserInfoRequest, UserInfoResponse};

/// Configuration for the auth service client.
#[derive(Clone, Debug)]
pub struct AuthClientConfig {
    /// The gRPC endpoint of the auth service (e.g., "http://auth-service:50051").
    pub endpoint: String,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Deadline applied to every call.
    pub request_timeout: Duration,
}

impl Default for AuthClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:50051".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(5),
        }
    }
}

/// Auth service client for calling auth-service via gRPC.
///
/// Cloning is cheap: clones share the underlying channel.
#[derive(Clone)]
pub struct AuthClient {
    client: AuthTestServiceClient<Channel>,
    request_timeout: Duration,
}

impl AuthClient {
    /// Create a new auth client with the given configuration.
    pub async fn new(config: AuthClientConfig) -> Result<Self, tonic::transport::Error> {
        let channel = Endpoint::from_shared(config.endpoint)?
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .connect()
            .await?;

        Ok(Self {
            client: AuthTestServiceClient::new(channel),
            request_timeout: config.request_timeout,
        })
    }

    fn request<T>(&self, message: T, request_id: Option<&str>) -> Request<T> {
        let mut request = Request::new(message);
        request.set_timeout(self.request_timeout);
        match request_id {
            Some(request_id) => inject_trace_context_with_request_id(&mut request, request_id),
            None => inject_trace_context(&mut request),
        }
        request
    }

    /// Round-trip a test message through auth-service.
    pub async fn get_test_data(
        &self,
        message: &str,
        request_id: Option<&str>,
    ) -> Result<TestDataResponse, tonic::Status> {
        let request = self.request(
            TestDataRequest {
                message: message.to_string(),
            },
            request_id,
        );
        let response = self.client.clone().get_test_data(request).await?;
        Ok(response.into_inner())
    }

    /// Fetch the profile auth-service holds for `user_id`.
    pub async fn get_user_info(
        &self,
        user_id: &str,
        request_id: Option<&str>,
    ) -> Result<UserInfoResponse, tonic::Status> {
        let request = self.request(
            UserInfoRequest {
                user_id: user_id.to_string(),
            },
            request_id,
        );
        let response = self.client.clone().get_user_info(request).await?;
        Ok(response.into_inner())
    }
}
