use crate::domain::model::{Coordinate, DeliverySpecs, DynamicVenue, StaticVenue};
use crate::domain::ports::VenueDirectory;
use crate::utils::error::{DopcError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Venue directory backed by the `{base}/{slug}/static` and
/// `{base}/{slug}/dynamic` HTTP endpoints.
#[derive(Debug, Clone)]
pub struct HttpVenueDirectory {
    client: Client,
    base_url: String,
}

impl HttpVenueDirectory {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn venue_url(&self, venue_slug: &str, section: &str) -> String {
        format!("{}/{}/{}", self.base_url, venue_slug, section)
    }

    async fn fetch<T: DeserializeOwned>(&self, venue_slug: &str, section: &str) -> Result<T> {
        let url = self.venue_url(venue_slug, section);
        tracing::debug!("Making venue request to: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!("Venue request to {} failed: {}", url, e);
            DopcError::venue_lookup(venue_slug, format!("request failed: {}", e))
        })?;

        let status = response.status();
        tracing::debug!("Venue response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Err(DopcError::venue_lookup(venue_slug, "venue not found"));
        }
        if !status.is_success() {
            return Err(DopcError::venue_lookup(
                venue_slug,
                format!("directory responded with HTTP status {}", status),
            ));
        }

        let body = response.bytes().await.map_err(|e| {
            DopcError::venue_lookup(venue_slug, format!("failed to read response: {}", e))
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!("Malformed {} payload for venue {}: {}", section, venue_slug, e);
            DopcError::validation(format!("{} venue payload", section), e.to_string())
        })
    }
}

#[async_trait]
impl VenueDirectory for HttpVenueDirectory {
    async fn venue_location(&self, venue_slug: &str) -> Result<Coordinate> {
        let venue: StaticVenue = self.fetch(venue_slug, "static").await?;
        Coordinate::try_from(venue.venue_raw.location)
    }

    async fn delivery_specs(&self, venue_slug: &str) -> Result<DeliverySpecs> {
        let venue: DynamicVenue = self.fetch(venue_slug, "dynamic").await?;
        let specs = venue.venue_raw.delivery_specs;
        specs.validate()?;
        Ok(specs)
    }
}
