use crate::domain::model::{Coordinate, DeliverySpecs};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of per-venue pricing data.
///
/// Implementations return [`DopcError::VenueLookupError`] when the venue is
/// unknown or the directory cannot be reached, and
/// [`DopcError::ValidationError`] when the payload is malformed.
///
/// [`DopcError::VenueLookupError`]: crate::utils::error::DopcError::VenueLookupError
/// [`DopcError::ValidationError`]: crate::utils::error::DopcError::ValidationError
#[async_trait]
pub trait VenueDirectory: Send + Sync {
    async fn venue_location(&self, venue_slug: &str) -> Result<Coordinate>;
    async fn delivery_specs(&self, venue_slug: &str) -> Result<DeliverySpecs>;
}

pub trait ConfigProvider: Send + Sync {
    fn port(&self) -> u16;
    fn venue_service_url(&self) -> &str;
    fn delivery_price_route(&self) -> &str;
    fn environment(&self) -> Environment;
    fn request_timeout_secs(&self) -> u64;
    fn verbose(&self) -> bool;
    fn json_logs(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Test,
    Development,
    #[default]
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Environment::Test => "test",
            Environment::Development => "development",
            Environment::Production => "production",
        };
        f.write_str(name)
    }
}
