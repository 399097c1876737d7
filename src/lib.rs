pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::HttpVenueDirectory;
pub use config::toml_config::TomlConfig;
pub use core::quote::QuoteService;
pub use domain::model::{DeliveryOrderPrice, PriceBreakdown, QuoteRequest};
pub use utils::error::{DopcError, ErrorKind, Result};
