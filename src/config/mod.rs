#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_route, validate_url};

pub use crate::domain::ports::Environment;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DELIVERY_PRICE_ROUTE: &str = "/api/v1/delivery-order-price";
pub const DEFAULT_VENUE_SERVICE_URL: &str =
    "https://consumer-api.development.dev.woltapi.com/home-assignment-api/v1/venues";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_positive_number("port", u64::from(config.port()), 1)?;
    validate_url("venue_service_url", config.venue_service_url())?;
    validate_route("delivery_price_route", config.delivery_price_route())?;
    validate_positive_number("request_timeout_secs", config.request_timeout_secs(), 1)?;
    Ok(())
}
