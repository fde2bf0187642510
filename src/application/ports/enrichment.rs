// src/application/ports/enrichment.rs
use crate::domain::audit::{DeviceInfo, GeoLocation};
use async_trait::async_trait;

/// Parses a raw User-Agent string into device information.
pub trait UserAgentInspector: Send + Sync {
    fn inspect(&self, user_agent: &str) -> Option<DeviceInfo>;
}

/// Resolves a client IP to a coarse geographic location.
#[async_trait]
pub trait GeoIpResolver: Send + Sync {
    async fn resolve(&self, ip: &str) -> Option<GeoLocation>;
}
