pub mod admins;
pub mod audit;
pub mod catalog;
pub mod events;
pub mod posts;
pub mod roles;
pub mod users;
