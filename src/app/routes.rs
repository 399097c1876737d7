//! HTTP routes for the delivery order price service.

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::quote::QuoteService;
use crate::core::VenueDirectory;
use crate::domain::model::{DeliveryOrderPrice, QuoteQuery, QuoteRequest};
use crate::domain::ports::Environment;
use crate::utils::error::{DopcError, ErrorKind};

/// Error body returned for every failed quote
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for DopcError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = match kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::VenueLookup => StatusCode::NOT_FOUND,
            ErrorKind::DeliveryImpossible => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match kind {
            ErrorKind::Unexpected => tracing::error!("Quote failed: {}", self),
            _ => tracing::warn!("Quote rejected: {}", self),
        }

        let body = ErrorBody {
            error: kind.code(),
            message: self.user_friendly_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the service router. Request logging is skipped in the test environment.
pub fn router<D: VenueDirectory + 'static>(
    service: QuoteService<D>,
    delivery_price_route: &str,
    environment: Environment,
) -> Router {
    let banner = format!(
        "You made it!\n\nAvailable endpoint:\n- {}\n",
        delivery_price_route
    );

    let router = Router::new()
        .route(
            "/",
            get(move || {
                let banner = banner.clone();
                async move { banner }
            }),
        )
        .route(delivery_price_route, get(delivery_order_price::<D>))
        .fallback(unknown_endpoint)
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(service));

    if environment == Environment::Test {
        router
    } else {
        router.layer(TraceLayer::new_for_http())
    }
}

/// `GET {route}?venue_slug=&cart_value=&user_lat=&user_lon=`
async fn delivery_order_price<D: VenueDirectory + 'static>(
    State(service): State<Arc<QuoteService<D>>>,
    RawQuery(raw): RawQuery,
) -> Result<Json<DeliveryOrderPrice>, DopcError> {
    let query = QuoteQuery::from_query_string(raw.as_deref().unwrap_or_default())?;
    let request = QuoteRequest::try_from(query)?;
    let breakdown = service.quote(&request).await?;
    Ok(Json(breakdown.into()))
}

async fn unknown_endpoint() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "unknown endpoint")
}
