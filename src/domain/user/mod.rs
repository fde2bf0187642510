// src/domain/user/mod.rs
pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{NewUser, User, UserUpdate, TRASH_RETENTION_DAYS};
pub use repository::{UserCleanupStats, UserListFilter, UserRepository, UserStats};
pub use value_objects::{UserId, UserStatus};
