//! PostgreSQL entity store.

use async_trait::async_trait;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::{Duration, Instant};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::models::{Entity, OwnerId};
use crate::services::entity_store::EntityStore;
use crate::services::metrics::record_db_query;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(config), fields(service = "entity-service"))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(config.url())
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }
}

#[async_trait]
impl EntityStore for Database {
    #[instrument(skip(self), fields(owner = %owner))]
    async fn list(&self, owner: OwnerId) -> Result<Vec<Entity>, AppError> {
        let start = Instant::now();
        let entities = sqlx::query_as::<_, Entity>(
            r#"
            SELECT id, user_id, description, created_at, updated_at
            FROM entities
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(owner.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        record_db_query("list", start.elapsed());

        Ok(entities)
    }

    #[instrument(skip(self, description), fields(owner = %owner))]
    async fn create(
        &self,
        owner: OwnerId,
        description: Option<String>,
    ) -> Result<Entity, AppError> {
        let start = Instant::now();
        let entity = sqlx::query_as::<_, Entity>(
            r#"
            INSERT INTO entities (id, user_id, description)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, description, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner.as_uuid())
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        record_db_query("create", start.elapsed());

        info!(entity_id = %entity.id, "Entity created");
        Ok(entity)
    }

    #[instrument(skip(self, description), fields(owner = %owner, entity_id = %id))]
    async fn update(
        &self,
        owner: OwnerId,
        id: Uuid,
        description: Option<String>,
    ) -> Result<u64, AppError> {
        let start = Instant::now();
        let result = sqlx::query(
            r#"
            UPDATE entities
            SET description = $3, updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(owner.as_uuid())
        .bind(id)
        .bind(description)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        record_db_query("update", start.elapsed());

        Ok(result.rows_affected())
    }

    #[instrument(skip(self), fields(owner = %owner, entity_id = %id))]
    async fn delete(&self, owner: OwnerId, id: Uuid) -> Result<u64, AppError> {
        let start = Instant::now();
        let result = sqlx::query("DELETE FROM entities WHERE user_id = $1 AND id = $2")
            .bind(owner.as_uuid())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        record_db_query("delete", start.elapsed());

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }
}
