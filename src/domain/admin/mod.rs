// src/domain/admin/mod.rs
pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{Admin, AdminUpdate, NewAdmin};
pub use repository::AdminRepository;
pub use value_objects::{AdminId, Email, Grant, PasswordHash, Role};
