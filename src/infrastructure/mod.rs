// src/infrastructure/mod.rs
pub mod database;
pub mod enrichment;
pub mod repositories;
pub mod security;
pub mod time;
