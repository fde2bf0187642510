// src/infrastructure/enrichment/mod.rs
pub mod geoip;
pub mod user_agent;

pub use geoip::MaxMindResolver;
pub use user_agent::WootheeInspector;
