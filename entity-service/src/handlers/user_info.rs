use axum::Json;

use crate::dtos::ProfileResponse;
use crate::handlers::entity::log_caller;
use crate::middleware::AuthUser;

/// Echo the caller's verified claims. Never touches the store.
pub async fn user_info(AuthUser(claims): AuthUser) -> Json<ProfileResponse> {
    tracing::info!("Start UserInfo");
    log_caller(&claims);

    Json(ProfileResponse::from(&claims))
}
