use crate::utils::error::{DopcError, Result};
use crate::utils::validation::{
    parse_integer, parse_number, require, validate_finite, validate_non_negative, validate_range,
    validate_slug, Validate,
};
use serde::{Deserialize, Serialize};

/// A point on the globe. Only constructible through [`Coordinate::new`], so
/// longitude is always in [-180, 180) and latitude in [-90, 90].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lon: f64,
    lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Result<Self> {
        validate_range("longitude", lon, -180.0, 180.0, false)?;
        validate_range("latitude", lat, -90.0, 90.0, true)?;
        Ok(Self { lon, lat })
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }
}

/// Venue location as the directory sends it: `[longitude, latitude]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub coordinates: [f64; 2],
}

impl TryFrom<Location> for Coordinate {
    type Error = DopcError;

    fn try_from(location: Location) -> Result<Self> {
        let [lon, lat] = location.coordinates;
        Coordinate::new(lon, lat)
    }
}

/// One pricing tier. A tier with `max == 0` has no upper bound and means
/// delivery is not possible that far away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRange {
    pub min: i64,
    pub max: i64,
    #[serde(rename = "a")]
    pub constant_amount: i64,
    #[serde(rename = "b")]
    pub multiplier: f64,
    #[serde(default)]
    pub flag: Option<bool>,
}

impl DistanceRange {
    pub fn is_sentinel(&self) -> bool {
        self.max == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryPricing {
    pub base_price: i64,
    pub distance_ranges: Vec<DistanceRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliverySpecs {
    pub order_minimum_no_surcharge: i64,
    pub delivery_pricing: DeliveryPricing,
}

impl Validate for DeliverySpecs {
    fn validate(&self) -> Result<()> {
        validate_non_negative("order_minimum_no_surcharge", self.order_minimum_no_surcharge)?;
        validate_non_negative("delivery_pricing.base_price", self.delivery_pricing.base_price)?;

        let ranges = &self.delivery_pricing.distance_ranges;
        if ranges.len() < 2 {
            return Err(DopcError::validation(
                "delivery_pricing.distance_ranges",
                format!("must have at least two ranges, got {}", ranges.len()),
            ));
        }

        for (i, range) in ranges.iter().enumerate() {
            let field = format!("delivery_pricing.distance_ranges[{}]", i);
            validate_non_negative(&format!("{}.min", field), range.min)?;
            validate_non_negative(&format!("{}.a", field), range.constant_amount)?;
            validate_finite(&format!("{}.b", field), range.multiplier)?;
            if !range.is_sentinel() && range.max <= range.min {
                return Err(DopcError::validation(
                    format!("{}.max", field),
                    format!("max {} must exceed min {} or be 0", range.max, range.min),
                ));
            }
        }

        if let Some(pair) = ranges.windows(2).find(|pair| pair[0].min >= pair[1].min) {
            return Err(DopcError::validation(
                "delivery_pricing.distance_ranges",
                format!(
                    "ranges must be sorted ascending by min ({} is followed by {})",
                    pair[0].min, pair[1].min
                ),
            ));
        }

        Ok(())
    }
}

// Venue directory envelopes. Only the fields used for pricing are modelled.

#[derive(Debug, Clone, Deserialize)]
pub struct StaticVenue {
    pub venue_raw: StaticVenueRaw,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaticVenueRaw {
    pub location: Location,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DynamicVenue {
    pub venue_raw: DynamicVenueRaw,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DynamicVenueRaw {
    pub delivery_specs: DeliverySpecs,
}

/// Result of a quote. Money in minor currency units, distance in metres.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub total_price: i64,
    pub small_order_surcharge: i64,
    pub cart_value: i64,
    pub delivery_fee: i64,
    pub delivery_distance: i64,
}

/// JSON body returned by the delivery order price endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOrderPrice {
    pub total_price: i64,
    pub small_order_surcharge: i64,
    pub cart_value: i64,
    pub delivery: DeliveryDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub fee: i64,
    pub distance: i64,
}

impl From<PriceBreakdown> for DeliveryOrderPrice {
    fn from(breakdown: PriceBreakdown) -> Self {
        Self {
            total_price: breakdown.total_price,
            small_order_surcharge: breakdown.small_order_surcharge,
            cart_value: breakdown.cart_value,
            delivery: DeliveryDetails {
                fee: breakdown.delivery_fee,
                distance: breakdown.delivery_distance,
            },
        }
    }
}

/// Raw query string parameters, before coercion.
#[derive(Debug, Clone, Default)]
pub struct QuoteQuery {
    pub venue_slug: Option<String>,
    pub cart_value: Option<String>,
    pub user_lat: Option<String>,
    pub user_lon: Option<String>,
}

impl QuoteQuery {
    /// Parses an `application/x-www-form-urlencoded` query string.
    ///
    /// A known parameter given twice is a `ValidationError`; unknown
    /// parameters are ignored.
    pub fn from_query_string(raw: &str) -> Result<Self> {
        let mut query = Self::default();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            let slot = match key.as_ref() {
                "venue_slug" => &mut query.venue_slug,
                "cart_value" => &mut query.cart_value,
                "user_lat" => &mut query.user_lat,
                "user_lon" => &mut query.user_lon,
                _ => continue,
            };
            if slot.is_some() {
                return Err(DopcError::validation(key, "parameter given more than once"));
            }
            *slot = Some(value.into_owned());
        }
        Ok(query)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    pub venue_slug: String,
    pub cart_value: i64,
    pub user_location: Coordinate,
}

impl QuoteRequest {
    pub fn new(venue_slug: &str, cart_value: i64, user_lat: f64, user_lon: f64) -> Result<Self> {
        let request = Self {
            venue_slug: venue_slug.to_string(),
            cart_value,
            user_location: Coordinate::new(user_lon, user_lat).map_err(rename_coordinate_field)?,
        };
        request.validate()?;
        Ok(request)
    }
}

impl Validate for QuoteRequest {
    fn validate(&self) -> Result<()> {
        validate_slug("venue_slug", &self.venue_slug)?;
        validate_non_negative("cart_value", self.cart_value)
    }
}

impl TryFrom<QuoteQuery> for QuoteRequest {
    type Error = DopcError;

    fn try_from(query: QuoteQuery) -> Result<Self> {
        let venue_slug = require("venue_slug", &query.venue_slug)?;
        let cart_value = parse_integer("cart_value", require("cart_value", &query.cart_value)?)?;
        let user_lat = parse_number("user_lat", require("user_lat", &query.user_lat)?)?;
        let user_lon = parse_number("user_lon", require("user_lon", &query.user_lon)?)?;

        QuoteRequest::new(venue_slug, cart_value, user_lat, user_lon)
    }
}

// Report user coordinates under their query parameter names.
fn rename_coordinate_field(err: DopcError) -> DopcError {
    match err {
        DopcError::ValidationError { field, reason } => {
            let field = match field.as_str() {
                "latitude" => "user_lat".to_string(),
                "longitude" => "user_lon".to_string(),
                _ => field,
            };
            DopcError::ValidationError { field, reason }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;

    fn range(min: i64, max: i64) -> DistanceRange {
        DistanceRange {
            min,
            max,
            constant_amount: 0,
            multiplier: 0.0,
            flag: None,
        }
    }

    fn specs(ranges: Vec<DistanceRange>) -> DeliverySpecs {
        DeliverySpecs {
            order_minimum_no_surcharge: 1000,
            delivery_pricing: DeliveryPricing {
                base_price: 190,
                distance_ranges: ranges,
            },
        }
    }

    #[test]
    fn test_coordinate_bounds() {
        assert!(Coordinate::new(-180.0, -90.0).is_ok());
        assert!(Coordinate::new(179.999, 90.0).is_ok());
        assert!(Coordinate::new(180.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, 90.1).is_err());
        assert!(Coordinate::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_location_converts_longitude_first() {
        let coordinate = Coordinate::try_from(Location {
            coordinates: [24.93087, 60.17094],
        })
        .unwrap();
        assert_eq!(coordinate.lon(), 24.93087);
        assert_eq!(coordinate.lat(), 60.17094);

        // latitude out of range once the pair is read as [lon, lat]
        let err = Coordinate::try_from(Location {
            coordinates: [60.0, 124.0],
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_delivery_specs_deserialize_directory_payload() {
        let payload = serde_json::json!({
            "order_minimum_no_surcharge": 1000,
            "delivery_pricing": {
                "base_price": 190,
                "distance_ranges": [
                    {"min": 0, "max": 500, "a": 0, "b": 0.0, "flag": null},
                    {"min": 500, "max": 1000, "a": 100, "b": 1, "flag": true},
                    {"min": 1000, "max": 0, "a": 0, "b": 0, "flag": null}
                ]
            }
        });

        let specs: DeliverySpecs = serde_json::from_value(payload).unwrap();
        assert!(specs.validate().is_ok());

        let ranges = &specs.delivery_pricing.distance_ranges;
        assert_eq!(ranges[1].constant_amount, 100);
        assert_eq!(ranges[1].multiplier, 1.0);
        assert_eq!(ranges[1].flag, Some(true));
        assert_eq!(ranges[0].flag, None);
        assert!(ranges[2].is_sentinel());
    }

    #[test]
    fn test_delivery_specs_rejects_fractional_money() {
        let payload = serde_json::json!({
            "order_minimum_no_surcharge": 10.5,
            "delivery_pricing": {"base_price": 190, "distance_ranges": []}
        });
        assert!(serde_json::from_value::<DeliverySpecs>(payload).is_err());
    }

    #[test]
    fn test_distance_bounds_are_whole_metres() {
        let payload = serde_json::json!({
            "order_minimum_no_surcharge": 1000,
            "delivery_pricing": {
                "base_price": 190,
                "distance_ranges": [
                    {"min": 0, "max": 500.5, "a": 0, "b": 0, "flag": null},
                    {"min": 500.5, "max": 0, "a": 0, "b": 0, "flag": null}
                ]
            }
        });
        assert!(serde_json::from_value::<DeliverySpecs>(payload).is_err());
    }

    #[test]
    fn test_delivery_specs_validation() {
        assert!(specs(vec![range(0, 500), range(500, 0)]).validate().is_ok());

        // fewer than two ranges
        assert!(specs(vec![range(0, 0)]).validate().is_err());

        // not sorted
        assert!(specs(vec![range(500, 1000), range(0, 500), range(1000, 0)])
            .validate()
            .is_err());

        // max below min
        assert!(specs(vec![range(0, 500), range(900, 600), range(1000, 0)])
            .validate()
            .is_err());

        let mut negative = specs(vec![range(0, 500), range(500, 0)]);
        negative.delivery_pricing.base_price = -1;
        assert!(negative.validate().is_err());

        let mut infinite = specs(vec![range(0, 500), range(500, 0)]);
        infinite.delivery_pricing.distance_ranges[0].multiplier = f64::INFINITY;
        assert!(infinite.validate().is_err());
    }

    #[test]
    fn test_wire_format() {
        let body = DeliveryOrderPrice::from(PriceBreakdown {
            total_price: 1190,
            small_order_surcharge: 0,
            cart_value: 1000,
            delivery_fee: 190,
            delivery_distance: 177,
        });

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "total_price": 1190,
                "small_order_surcharge": 0,
                "cart_value": 1000,
                "delivery": {"fee": 190, "distance": 177}
            })
        );
    }

    #[test]
    fn test_quote_request_from_query() {
        let query = QuoteQuery {
            venue_slug: Some("home-assignment-venue-helsinki".to_string()),
            cart_value: Some("1000".to_string()),
            user_lat: Some("60.17094".to_string()),
            user_lon: Some("24.93087".to_string()),
        };

        let request = QuoteRequest::try_from(query).unwrap();
        assert_eq!(request.venue_slug, "home-assignment-venue-helsinki");
        assert_eq!(request.cart_value, 1000);
        assert_eq!(request.user_location.lat(), 60.17094);
        assert_eq!(request.user_location.lon(), 24.93087);
    }

    #[test]
    fn test_quote_request_rejects_bad_parameters() {
        let valid = QuoteQuery {
            venue_slug: Some("venue".to_string()),
            cart_value: Some("0".to_string()),
            user_lat: Some("0".to_string()),
            user_lon: Some("0".to_string()),
        };
        assert!(QuoteRequest::try_from(valid.clone()).is_ok());

        let cases = [
            (QuoteQuery { venue_slug: None, ..valid.clone() }, "venue_slug"),
            (QuoteQuery { venue_slug: Some("Bad Slug".to_string()), ..valid.clone() }, "venue_slug"),
            (QuoteQuery { cart_value: Some("-1".to_string()), ..valid.clone() }, "cart_value"),
            (QuoteQuery { cart_value: Some("1.5".to_string()), ..valid.clone() }, "cart_value"),
            (QuoteQuery { user_lat: Some("91".to_string()), ..valid.clone() }, "user_lat"),
            (QuoteQuery { user_lon: Some("180".to_string()), ..valid.clone() }, "user_lon"),
            (QuoteQuery { user_lon: None, ..valid.clone() }, "user_lon"),
        ];

        for (query, expected_field) in cases {
            match QuoteRequest::try_from(query) {
                Err(DopcError::ValidationError { field, .. }) => assert_eq!(field, expected_field),
                other => panic!("expected validation error on {}, got {:?}", expected_field, other),
            }
        }
    }

    #[test]
    fn test_query_string_parsing() {
        let query = QuoteQuery::from_query_string(
            "venue_slug=home-assignment-venue-helsinki&cart_value=1000&user_lat=60.17094&user_lon=24.93087&extra=1",
        )
        .unwrap();
        assert_eq!(query.venue_slug.as_deref(), Some("home-assignment-venue-helsinki"));
        assert_eq!(query.cart_value.as_deref(), Some("1000"));
        assert!(QuoteRequest::try_from(query).is_ok());

        let encoded = QuoteQuery::from_query_string("venue_slug=a%2Db&user_lat=%2D1.5").unwrap();
        assert_eq!(encoded.venue_slug.as_deref(), Some("a-b"));
        assert_eq!(encoded.user_lat.as_deref(), Some("-1.5"));
        assert_eq!(encoded.cart_value, None);

        assert!(QuoteQuery::from_query_string("").is_ok());
    }

    #[test]
    fn test_query_string_rejects_duplicate_parameters() {
        let err = QuoteQuery::from_query_string(
            "venue_slug=a&venue_slug=b&cart_value=1&user_lat=0&user_lon=0",
        )
        .unwrap_err();
        match err {
            DopcError::ValidationError { field, .. } => assert_eq!(field, "venue_slug"),
            other => panic!("expected validation error, got {:?}", other),
        }

        // repeated unknown parameters are still ignored
        assert!(QuoteQuery::from_query_string("x=1&x=2").is_ok());
    }
}
