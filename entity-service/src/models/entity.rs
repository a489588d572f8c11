use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::OwnerId;

/// A user-owned record. `user_id` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Entity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity {
    pub fn new(owner: OwnerId, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: owner.as_uuid(),
            description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, owner: OwnerId) -> bool {
        self.user_id == owner.as_uuid()
    }
}
