//! Request bodies and the JSON envelopes every endpoint responds with.

use serde::{Deserialize, Serialize};

use crate::models::Claims;

pub const STATUS_SUCCESS: &str = "Success";
pub const STATUS_OK: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// Body of create and update requests.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EntityRequest {
    #[serde(default)]
    pub description: Option<String>,
}

/// `{status, message}`
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusMessage {
    pub status: String,
    pub message: String,
}

impl StatusMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            message: message.into(),
        }
    }
}

/// `{status, message, data}`
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusMessageData<T> {
    pub status: String,
    pub message: String,
    pub data: T,
}

impl<T> StatusMessageData<T> {
    pub fn new(status: &str, message: impl Into<String>, data: T) -> Self {
        Self {
            status: status.to_string(),
            message: message.into(),
            data,
        }
    }
}

/// `{status, message, error}`; only used for server-side failures.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusMessageError {
    pub status: String,
    pub message: String,
    pub error: String,
}

/// Payload of `GET /entity/check`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub permissions: Vec<String>,
    /// RFC 3339 expiry of the presented token
    pub exp: String,
}

impl From<&Claims> for ProfileResponse {
    fn from(claims: &Claims) -> Self {
        Self {
            user_id: claims.user_id.to_string(),
            username: claims.username.clone(),
            email: claims.email.clone(),
            role: claims.role.clone(),
            permissions: claims.permissions.clone(),
            exp: claims
                .expires_at()
                .map(|t| t.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
                .unwrap_or_default(),
        }
    }
}

/// `data` of `GET /entity/test-grpc`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TestDataPayload {
    pub message: String,
    pub status: i32,
    pub timestamp: String,
}

/// `data` of `GET /entity/test-grpc-user-info`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfoPayload {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub permissions: Vec<String>,
}
