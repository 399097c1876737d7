use crate::config::{
    validate_provider, Environment, DEFAULT_DELIVERY_PRICE_ROUTE, DEFAULT_PORT,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_VENUE_SERVICE_URL,
};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "dopc")]
#[command(about = "Delivery order price calculator service")]
pub struct CliConfig {
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, env = "VENUE_SERVICE_URL", default_value = DEFAULT_VENUE_SERVICE_URL)]
    pub venue_service_url: String,

    #[arg(long, env = "DELIVERY_PRICE_ROUTE", default_value = DEFAULT_DELIVERY_PRICE_ROUTE)]
    pub delivery_price_route: String,

    #[arg(long, env = "DOPC_ENV", value_enum, default_value_t = Environment::Production)]
    pub environment: Environment,

    #[arg(long, env = "VENUE_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    /// Path to a TOML configuration file; replaces all other settings
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn port(&self) -> u16 {
        self.port
    }

    fn venue_service_url(&self) -> &str {
        &self.venue_service_url
    }

    fn delivery_price_route(&self) -> &str {
        &self.delivery_price_route
    }

    fn environment(&self) -> Environment {
        self.environment
    }

    fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }

    fn verbose(&self) -> bool {
        self.verbose
    }

    fn json_logs(&self) -> bool {
        self.json_logs
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::try_parse_from(["dopc"]).unwrap();

        assert_eq!(config.delivery_price_route, DEFAULT_DELIVERY_PRICE_ROUTE);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert!(config.config.is_none());
    }

    #[test]
    fn test_flags_override_and_validate() {
        let config = CliConfig::try_parse_from([
            "dopc",
            "--port",
            "8080",
            "--venue-service-url",
            "http://localhost:9000/venues",
            "--delivery-price-route",
            "/api/v2/price",
            "--environment",
            "development",
        ])
        .unwrap();

        assert_eq!(config.port(), 8080);
        assert_eq!(config.environment(), Environment::Development);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_route_fails_validation() {
        let config = CliConfig::try_parse_from([
            "dopc",
            "--delivery-price-route",
            "/price",
        ])
        .unwrap();

        assert!(config.validate().is_err());
    }
}
