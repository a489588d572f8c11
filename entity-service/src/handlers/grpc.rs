//! Calls into the sibling auth-service over gRPC.

use axum::{extract::State, http::HeaderMap, Json};
use service_core::error::AppError;
use service_core::grpc::AuthClient;
use service_core::middleware::tracing::REQUEST_ID_HEADER;

use crate::dtos::{StatusMessageData, TestDataPayload, UserInfoPayload, STATUS_OK};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::startup::AppState;

const TEST_MESSAGE: &str = "Hello from entity service!";

pub async fn test_grpc(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StatusMessageData<TestDataPayload>>, ApiError> {
    tracing::info!("Start TestGrpc endpoint");

    let client = auth_client(&state)?;
    let response = client
        .get_test_data(TEST_MESSAGE, request_id(&headers))
        .await
        .map_err(upstream_failure)?;

    tracing::info!(
        message = %response.message,
        status = response.status,
        timestamp = %response.timestamp,
        "Successfully received response from auth gRPC service"
    );

    Ok(Json(StatusMessageData::new(
        STATUS_OK,
        "gRPC call successful",
        TestDataPayload {
            message: response.message,
            status: response.status,
            timestamp: response.timestamp,
        },
    )))
}

pub async fn test_grpc_user_info(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    headers: HeaderMap,
) -> Result<Json<StatusMessageData<UserInfoPayload>>, ApiError> {
    tracing::info!("Start TestGetUserInfo endpoint");

    let client = auth_client(&state)?;
    let response = client
        .get_user_info(&claims.user_id.to_string(), request_id(&headers))
        .await
        .map_err(upstream_failure)?;

    tracing::info!(user_id = %response.user_id, "Received user info from auth gRPC service");

    Ok(Json(StatusMessageData::new(
        STATUS_OK,
        "User info retrieved successfully",
        UserInfoPayload {
            user_id: response.user_id,
            username: response.username,
            email: response.email,
            role: response.role,
            permissions: response.permissions,
        },
    )))
}

fn auth_client(state: &AppState) -> Result<&AuthClient, ApiError> {
    state
        .auth_client
        .as_ref()
        .ok_or_else(|| ApiError::Upstream("gRPC client is not initialized".to_string()))
}

fn request_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
}

fn upstream_failure(status: service_core::grpc::Status) -> ApiError {
    let detail = status.message().to_string();
    let error = AppError::from(status);
    tracing::error!(error = %error, "Failed to call auth gRPC service");
    ApiError::Upstream(format!("Failed to call auth service: {}", detail))
}
