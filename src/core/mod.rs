pub mod geo;
pub mod price;
pub mod quote;
pub mod range;

pub use crate::domain::model::{Coordinate, DeliverySpecs, DistanceRange, PriceBreakdown, QuoteRequest};
pub use crate::domain::ports::{ConfigProvider, VenueDirectory};
pub use crate::utils::error::Result;
