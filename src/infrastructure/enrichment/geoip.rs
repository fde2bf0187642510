// src/infrastructure/enrichment/geoip.rs
use crate::application::ports::enrichment::GeoIpResolver;
use crate::domain::audit::GeoLocation;
use async_trait::async_trait;
use maxminddb::Reader;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::trace;

/// MaxMind GeoLite2 City lookups against a local .mmdb file. Optional: when
/// no database path is configured the resolver is simply absent and log
/// entries carry no location.
pub struct MaxMindResolver {
    reader: Arc<Reader<Vec<u8>>>,
}

impl MaxMindResolver {
    pub fn open(path: &str) -> Result<Self, maxminddb::MaxMindDbError> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self {
            reader: Arc::new(reader),
        })
    }
}

#[async_trait]
impl GeoIpResolver for MaxMindResolver {
    async fn resolve(&self, ip: &str) -> Option<GeoLocation> {
        let ip_addr: IpAddr = ip.parse().ok()?;

        let result = self.reader.lookup(ip_addr).ok()?;
        let city: maxminddb::geoip2::City = result.decode().ok()??;

        let country = city.country.iso_code.map(String::from);
        let city_name = city.city.names.english.map(|s| s.to_string());

        trace!(ip, ?country, ?city_name, "geoip lookup");

        Some(GeoLocation {
            country,
            city: city_name,
        })
    }
}
