// src/domain/role/mod.rs
pub mod entity;
pub mod repository;

pub use entity::{NewRoleRecord, RoleRecord, RoleRecordUpdate};
pub use repository::RoleRepository;
