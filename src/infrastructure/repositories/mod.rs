// src/infrastructure/repositories/mod.rs
pub mod error;
pub mod postgres_activity_log;
pub mod postgres_admin;
pub mod postgres_catalog;
pub mod postgres_event;
pub mod postgres_post;
pub mod postgres_role;
pub mod postgres_user;

pub use error::map_sqlx;
pub use postgres_activity_log::PostgresActivityLogRepository;
pub use postgres_admin::PostgresAdminRepository;
pub use postgres_catalog::PostgresCatalogRepository;
pub use postgres_event::PostgresEventRepository;
pub use postgres_post::PostgresPostRepository;
pub use postgres_role::PostgresRoleRepository;
pub use postgres_user::PostgresUserRepository;
