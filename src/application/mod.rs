// src/application/mod.rs
pub mod commands;
pub mod dto;
pub mod error;
pub mod export;
pub mod permission;
pub mod ports;
pub mod queries;
pub mod recorder;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
