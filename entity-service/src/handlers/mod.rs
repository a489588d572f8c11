pub mod entity;
pub mod grpc;
pub mod health;
pub mod user_info;

pub use entity::{create_entity, delete_entity, get_entity, update_entity};
pub use grpc::{test_grpc, test_grpc_user_info};
pub use health::{health_check, metrics, readiness_check};
pub use user_info::user_info;
