use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, patch, post},
    Router,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;
use service_core::grpc::{AuthClient, AuthClientConfig};
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::EntityConfig;
use crate::handlers;
use crate::middleware::auth_middleware;
use crate::services::{Database, EntityStore, JwtService, MongoDb, RedisService};

const AUTH_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Handles shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntityStore>,
    pub jwt: JwtService,
    pub auth_client: Option<AuthClient>,
    pub mongo: Option<MongoDb>,
    pub redis: Option<RedisService>,
}

impl AppState {
    /// State with only the mandatory parts; auxiliary connections are absent.
    pub fn new(store: Arc<dyn EntityStore>, jwt: JwtService) -> Self {
        Self {
            store,
            jwt,
            auth_client: None,
            mongo: None,
            redis: None,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let entity_routes = Router::new()
        .route("/get", get(handlers::get_entity))
        .route("/create", post(handlers::create_entity))
        .route("/update/:id", patch(handlers::update_entity))
        .route("/delete/:id", delete(handlers::delete_entity))
        .route("/check", get(handlers::user_info))
        .route("/test-grpc", get(handlers::test_grpc))
        .route("/test-grpc-user-info", get(handlers::test_grpc_user_info))
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .nest("/api/v1/entity", entity_routes)
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            },
        ))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: EntityConfig) -> Result<Self, AppError> {
        let db = Database::connect(&config.database).await.map_err(|e| {
            tracing::error!("Failed to connect to PostgreSQL: {}", e);
            e
        })?;
        db.run_migrations().await?;

        let jwt = JwtService::new(&config.jwt.secret).map_err(AppError::ConfigError)?;

        let mut state = AppState::new(Arc::new(db), jwt);
        state.auth_client = connect_auth_client(&config).await;

        if let Some(mongo) = &config.mongodb {
            let client = MongoDb::connect(mongo.uri.expose_secret(), &mongo.database).await?;
            state.mongo = Some(client);
        }

        if let Some(redis) = &config.redis {
            let service = RedisService::new(redis).await.map_err(AppError::InternalError)?;
            state.redis = Some(service);
        }

        let app = build_router(state);

        let addr = config.common.bind_addr();
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

/// A missing or unreachable auth-service disables the gRPC routes instead of
/// failing startup.
async fn connect_auth_client(config: &EntityConfig) -> Option<AuthClient> {
    let Some(endpoint) = config.auth_service.endpoint.clone() else {
        tracing::info!("AUTH_SERVICE_ENDPOINT not set, gRPC client disabled");
        return None;
    };

    let client_config = AuthClientConfig {
        endpoint: endpoint.clone(),
        connect_timeout: AUTH_CONNECT_TIMEOUT,
        request_timeout: config.auth_service.timeout,
    };

    match AuthClient::new(client_config).await {
        Ok(client) => {
            tracing::info!(endpoint = %endpoint, "Connected to auth-service gRPC");
            Some(client)
        }
        Err(e) => {
            tracing::warn!(endpoint = %endpoint, error = %e, "Failed to create auth gRPC client");
            None
        }
    }
}
