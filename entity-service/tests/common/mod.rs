//! Shared setup for entity-service integration tests.
//!
//! Builds the full router over an in-memory store so the HTTP contract can be
//! exercised with `oneshot` without PostgreSQL.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use chrono::Utc;
use entity_service::{
    build_router,
    models::Claims,
    services::{InMemoryEntityStore, JwtService},
    AppState,
};
use http_body_util::BodyExt;
use secrecy::Secret;
use std::sync::Arc;
use tower::util::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "entity-service-test-secret";

pub const ALICE_ID: &str = "11111111-1111-1111-1111-111111111111";
pub const BOB_ID: &str = "22222222-2222-2222-2222-222222222222";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryEntityStore>,
    pub jwt: JwtService,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryEntityStore::new());
        let jwt = JwtService::new(&Secret::new(TEST_JWT_SECRET.to_string()))
            .expect("Failed to create JWT service");
        let state = AppState::new(store.clone(), jwt.clone());

        Self {
            router: build_router(state),
            store,
            jwt,
        }
    }

    pub fn token_for(&self, user_id: &str, username: &str) -> String {
        self.jwt
            .issue(&claims(user_id, username, Utc::now().timestamp() + 3600))
            .expect("Failed to issue token")
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }
}

pub fn claims(user_id: &str, username: &str, exp: i64) -> Claims {
    Claims {
        user_id: Uuid::parse_str(user_id).unwrap(),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        role: "user".to_string(),
        permissions: vec!["entity:read".to_string(), "entity:write".to_string()],
        exp,
        iat: Some(Utc::now().timestamp()),
    }
}

/// Sign an arbitrary payload, bypassing the `Claims` type.
pub fn sign_raw(payload: &serde_json::Value, secret: &str) -> String {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        payload,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
