//! Configuration module for entity-service.

use secrecy::{ExposeSecret, Secret, SecretString};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct EntityConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub auth_service: AuthServiceConfig,
    pub mongodb: Option<MongoConfig>,
    pub redis: Option<RedisConfig>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: SecretString,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 signing secret shared with auth-service.
    pub secret: SecretString,
}

#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// gRPC endpoint of auth-service. `None` disables the sibling calls.
    pub endpoint: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: SecretString,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: SecretString,
}

impl EntityConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "JWT_SECRET must not be empty"
            )));
        }

        Ok(Self {
            common,
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "entity-service".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            otlp_endpoint: optional("OTLP_ENDPOINT"),
            database: DatabaseConfig {
                url: Secret::new(required("DATABASE_URL")?),
                max_connections: parsed("DATABASE_MAX_CONNECTIONS", 10),
                min_connections: parsed("DATABASE_MIN_CONNECTIONS", 2),
            },
            jwt: JwtConfig {
                secret: Secret::new(jwt_secret),
            },
            auth_service: AuthServiceConfig {
                endpoint: optional("AUTH_SERVICE_ENDPOINT"),
                timeout: Duration::from_secs(parsed("AUTH_GRPC_TIMEOUT_SECS", 5)),
            },
            mongodb: optional("MONGODB_URI").map(|uri| MongoConfig {
                uri: Secret::new(uri),
                database: env::var("MONGODB_DATABASE")
                    .unwrap_or_else(|_| "entity_db".to_string()),
            }),
            redis: optional("REDIS_URL").map(|url| RedisConfig {
                url: Secret::new(url),
            }),
        })
    }
}

impl DatabaseConfig {
    pub fn url(&self) -> &str {
        self.url.expose_secret()
    }
}

fn required(key: &str) -> Result<String, AppError> {
    env::var(key)
        .map_err(|_| AppError::ConfigError(anyhow::anyhow!("{} is required but not set", key)))
}

/// Unset and blank values are both treated as absent.
fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
