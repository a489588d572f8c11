use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::services::metrics::get_metrics;
use crate::startup::AppState;

const SERVICE: &str = "entity-service";

/// Liveness: the entity store answers.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": SERVICE,
                "version": env!("CARGO_PKG_VERSION")
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Entity store health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "service": SERVICE,
                    "version": env!("CARGO_PKG_VERSION")
                })),
            )
        }
    }
}

/// Readiness: the store plus every configured auxiliary connection.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let mut ready = true;
    let mut checks = serde_json::Map::new();

    let store = match state.store.health_check().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::error!(error = %e, "Entity store readiness check failed");
            ready = false;
            "down"
        }
    };
    checks.insert("database".to_string(), json!(store));

    if let Some(mongo) = &state.mongo {
        let status = match mongo.health_check().await {
            Ok(()) => "up",
            Err(e) => {
                tracing::error!(error = %e, "MongoDB readiness check failed");
                ready = false;
                "down"
            }
        };
        checks.insert("mongodb".to_string(), json!(status));
    }

    if let Some(redis) = &state.redis {
        let status = match redis.health_check().await {
            Ok(()) => "up",
            Err(e) => {
                tracing::error!(error = %e, "Redis readiness check failed");
                ready = false;
                "down"
            }
        };
        checks.insert("redis".to_string(), json!(status));
    }

    let (code, status) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    (
        code,
        Json(json!({
            "status": status,
            "service": SERVICE,
            "checks": checks
        })),
    )
}

pub async fn metrics() -> impl IntoResponse {
    get_metrics()
}
