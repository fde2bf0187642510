pub mod activity;
pub mod auth;
pub mod catalog;
pub mod events;
pub mod posts;
pub mod roles;
pub mod users;
