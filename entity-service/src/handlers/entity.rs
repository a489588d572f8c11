//! Ownership-scoped CRUD over the caller's entities.
//!
//! Every store call passes the owner taken from the verified claims; there is
//! no code path that touches another user's rows.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use uuid::Uuid;

use crate::dtos::{EntityRequest, StatusMessage, StatusMessageData, STATUS_SUCCESS};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{Claims, Entity};
use crate::services::metrics::record_entity_operation;
use crate::startup::AppState;

pub async fn get_entity(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<StatusMessageData<Vec<Entity>>>, ApiError> {
    tracing::info!("Start GetEntity");
    log_caller(&claims);

    let result = state
        .store
        .list(claims.owner())
        .await
        .map(|entities| {
            Json(StatusMessageData::new(
                STATUS_SUCCESS,
                "Entities retrieved successfully",
                entities,
            ))
        })
        .map_err(|e| ApiError::storage("Failed to query entities", e));

    observe("list", result)
}

pub async fn create_entity(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    body: Result<Json<EntityRequest>, JsonRejection>,
) -> Result<Json<StatusMessage>, ApiError> {
    tracing::info!("Start CreateEntity");
    log_caller(&claims);

    let result = async {
        let Json(request) = parse_body(body)?;
        let entity = state
            .store
            .create(claims.owner(), request.description)
            .await
            .map_err(|e| ApiError::storage("Failed to create entity", e))?;
        tracing::debug!(entity_id = %entity.id, "Entity stored");
        Ok::<_, ApiError>(Json(StatusMessage::success("Entity created successfully")))
    }
    .await;

    observe("create", result)
}

pub async fn update_entity(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    body: Result<Json<EntityRequest>, JsonRejection>,
) -> Result<Json<StatusMessage>, ApiError> {
    tracing::info!("Start UpdateEntity");
    log_caller(&claims);

    let result = async {
        let id = parse_id(&id)?;
        let Json(request) = parse_body(body)?;
        let rows_affected = state
            .store
            .update(claims.owner(), id, request.description)
            .await
            .map_err(|e| ApiError::storage("Failed to update entity", e))?;
        tracing::debug!(entity_id = %id, rows_affected, "Update applied");
        Ok::<_, ApiError>(Json(StatusMessage::success("Entities updated successfully")))
    }
    .await;

    observe("update", result)
}

pub async fn delete_entity(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<StatusMessage>, ApiError> {
    tracing::info!("Start DeleteEntity");
    log_caller(&claims);

    let result = async {
        let id = parse_id(&id)?;
        let rows_affected = state
            .store
            .delete(claims.owner(), id)
            .await
            .map_err(|e| ApiError::storage("Failed to delete entities", e))?;
        tracing::debug!(entity_id = %id, rows_affected, "Delete applied");
        Ok::<_, ApiError>(Json(StatusMessage::success("Entities deleted successfully")))
    }
    .await;

    observe("delete", result)
}

pub(crate) fn log_caller(claims: &Claims) {
    tracing::debug!(
        email = %claims.email,
        exp = ?claims.expires_at(),
        "Attempting to get user"
    );
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|e| {
        tracing::debug!(id = %raw, error = %e, "Rejected entity id");
        ApiError::InvalidEntityId
    })
}

fn parse_body(
    body: Result<Json<EntityRequest>, JsonRejection>,
) -> Result<Json<EntityRequest>, ApiError> {
    body.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        ApiError::InvalidBody
    })
}

fn observe<T>(operation: &'static str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    let status = match &result {
        Ok(_) => 200,
        Err(e) => e.status_code().as_u16(),
    };
    record_entity_operation(operation, status);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert!(parse_id("5f0c6f4e-4d3b-4a52-9a59-9d8a0f3c2b11").is_ok());
        assert!(matches!(parse_id("not-a-uuid"), Err(ApiError::InvalidEntityId)));
        assert!(matches!(parse_id(""), Err(ApiError::InvalidEntityId)));
    }
}
