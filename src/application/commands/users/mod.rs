// src/application/commands/users/mod.rs
mod create;
mod lifecycle;
mod service;
mod update;

pub use create::CreateUserCommand;
pub use service::UserCommandService;
pub use update::UpdateUserCommand;
