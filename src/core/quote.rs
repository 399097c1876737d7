use crate::core::{geo, price};
use crate::domain::model::{PriceBreakdown, QuoteRequest};
use crate::domain::ports::VenueDirectory;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Runs a full quote: venue lookups, distance, tier selection and pricing.
pub struct QuoteService<D: VenueDirectory> {
    directory: D,
}

impl<D: VenueDirectory> QuoteService<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub async fn quote(&self, request: &QuoteRequest) -> Result<PriceBreakdown> {
        request.validate()?;
        let venue_slug = request.venue_slug.as_str();

        tracing::debug!(venue_slug, "Fetching venue location and delivery specs");
        let (venue_location, specs) = tokio::try_join!(
            self.directory.venue_location(venue_slug),
            self.directory.delivery_specs(venue_slug),
        )?;
        specs.validate()?;

        let distance = geo::distance_meters(&venue_location, &request.user_location);
        tracing::debug!(venue_slug, distance, "Computed delivery distance");

        let breakdown = price::calculate_delivery(request.cart_value, distance, &specs)?;

        tracing::info!(
            venue_slug,
            cart_value = breakdown.cart_value,
            distance = breakdown.delivery_distance,
            delivery_fee = breakdown.delivery_fee,
            total_price = breakdown.total_price,
            "Quote computed"
        );
        Ok(breakdown)
    }
}
