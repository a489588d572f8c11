pub mod database;
pub mod entity_store;
pub mod jwt;
pub mod metrics;
pub mod mongo;
pub mod redis;

pub use database::Database;
pub use entity_store::{EntityStore, InMemoryEntityStore};
pub use jwt::JwtService;
pub use mongo::MongoDb;
pub use self::redis::RedisService;
