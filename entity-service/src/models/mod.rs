pub mod claims;
pub mod entity;

pub use claims::{Claims, OwnerId};
pub use entity::Entity;
