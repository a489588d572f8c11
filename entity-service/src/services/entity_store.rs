//! Ownership-scoped persistence for entities.

use async_trait::async_trait;
use chrono::Utc;
use service_core::error::AppError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Entity, OwnerId};

/// Every operation takes the caller's [`OwnerId`] and only ever sees rows
/// belonging to it. Update and delete report the number of rows affected;
/// zero means "no such entity for this owner".
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn list(&self, owner: OwnerId) -> Result<Vec<Entity>, AppError>;

    async fn create(&self, owner: OwnerId, description: Option<String>)
        -> Result<Entity, AppError>;

    async fn update(
        &self,
        owner: OwnerId,
        id: Uuid,
        description: Option<String>,
    ) -> Result<u64, AppError>;

    async fn delete(&self, owner: OwnerId, id: Uuid) -> Result<u64, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

/// Process-local store for tests and database-less runs.
#[derive(Default)]
pub struct InMemoryEntityStore {
    entities: RwLock<HashMap<Uuid, Entity>>,
    operations: AtomicUsize,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of list/create/update/delete calls served so far.
    pub fn operation_count(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    /// Every stored entity regardless of owner.
    pub async fn snapshot(&self) -> Vec<Entity> {
        self.entities.read().await.values().cloned().collect()
    }

    fn record_operation(&self) {
        self.operations.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn list(&self, owner: OwnerId) -> Result<Vec<Entity>, AppError> {
        self.record_operation();
        let mut entities: Vec<Entity> = self
            .entities
            .read()
            .await
            .values()
            .filter(|e| e.is_owned_by(owner))
            .cloned()
            .collect();
        entities.sort_by_key(|e| e.created_at);
        Ok(entities)
    }

    async fn create(
        &self,
        owner: OwnerId,
        description: Option<String>,
    ) -> Result<Entity, AppError> {
        self.record_operation();
        let entity = Entity::new(owner, description);
        self.entities
            .write()
            .await
            .insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn update(
        &self,
        owner: OwnerId,
        id: Uuid,
        description: Option<String>,
    ) -> Result<u64, AppError> {
        self.record_operation();
        let mut entities = self.entities.write().await;
        match entities.get_mut(&id) {
            Some(entity) if entity.is_owned_by(owner) => {
                entity.description = description;
                entity.updated_at = Utc::now();
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn delete(&self, owner: OwnerId, id: Uuid) -> Result<u64, AppError> {
        self.record_operation();
        let mut entities = self.entities.write().await;
        if entities.get(&id).is_some_and(|e| e.is_owned_by(owner)) {
            entities.remove(&id);
            Ok(1)
        } else {
            Ok(0)
        }
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> OwnerId {
        OwnerId::from(Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap())
    }

    fn bob() -> OwnerId {
        OwnerId::from(Uuid::parse_str("22222222-2222-2222-2222-222222222222").unwrap())
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_owner() {
        let store = InMemoryEntityStore::new();
        store.create(alice(), Some("buy milk".into())).await.unwrap();
        store.create(bob(), Some("walk dog".into())).await.unwrap();

        let alice_entities = store.list(alice()).await.unwrap();
        assert_eq!(alice_entities.len(), 1);
        assert_eq!(alice_entities[0].description.as_deref(), Some("buy milk"));
        assert_eq!(alice_entities[0].user_id, alice().as_uuid());
    }

    #[tokio::test]
    async fn test_update_by_other_owner_affects_nothing() {
        let store = InMemoryEntityStore::new();
        let entity = store.create(alice(), Some("buy milk".into())).await.unwrap();

        let affected = store
            .update(bob(), entity.id, Some("hijacked".into()))
            .await
            .unwrap();
        assert_eq!(affected, 0);

        let affected = store
            .update(alice(), entity.id, Some("buy oat milk".into()))
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let stored = store.list(alice()).await.unwrap();
        assert_eq!(stored[0].description.as_deref(), Some("buy oat milk"));
        assert_eq!(stored[0].user_id, alice().as_uuid());
    }

    #[tokio::test]
    async fn test_delete_by_other_owner_affects_nothing() {
        let store = InMemoryEntityStore::new();
        let entity = store.create(alice(), None).await.unwrap();

        assert_eq!(store.delete(bob(), entity.id).await.unwrap(), 0);
        assert_eq!(store.snapshot().await.len(), 1);

        assert_eq!(store.delete(alice(), entity.id).await.unwrap(), 1);
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_id_affects_nothing() {
        let store = InMemoryEntityStore::new();
        assert_eq!(store.update(alice(), Uuid::new_v4(), None).await.unwrap(), 0);
        assert_eq!(store.delete(alice(), Uuid::new_v4()).await.unwrap(), 0);
        assert_eq!(store.operation_count(), 2);
    }
}
