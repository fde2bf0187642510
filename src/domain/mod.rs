pub mod admin;
pub mod audit;
pub mod catalog;
pub mod errors;
pub mod event;
pub mod post;
pub mod role;
pub mod user;
