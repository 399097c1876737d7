#![allow(dead_code)]

use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};

pub const VENUE_SLUG: &str = "home-assignment-venue-helsinki";

/// Venue at [24.93087, 60.17094]; a user at [24.93545, 60.17012] is 269 m away.
pub const VENUE_LON: f64 = 24.93087;
pub const VENUE_LAT: f64 = 60.17094;
pub const NEAR_USER_LON: f64 = 24.93545;
pub const NEAR_USER_LAT: f64 = 60.17012;

pub fn static_payload(lon: f64, lat: f64) -> Value {
    json!({
        "venue_raw": {
            "name": "Home Assignment Venue Helsinki",
            "location": {"coordinates": [lon, lat]}
        }
    })
}

pub fn dynamic_payload() -> Value {
    json!({
        "venue_raw": {
            "delivery_specs": {
                "order_minimum_no_surcharge": 1000,
                "delivery_enabled": true,
                "delivery_pricing": {
                    "base_price": 190,
                    "max_distance_meters": 2000,
                    "distance_ranges": [
                        {"min": 0, "max": 500, "a": 0, "b": 0.0, "flag": null},
                        {"min": 500, "max": 1000, "a": 100, "b": 0.0, "flag": null},
                        {"min": 1000, "max": 1500, "a": 200, "b": 0.0, "flag": null},
                        {"min": 1500, "max": 2000, "a": 200, "b": 1.0, "flag": null},
                        {"min": 2000, "max": 0, "a": 0, "b": 0.0, "flag": null}
                    ]
                }
            }
        }
    })
}

pub async fn mock_venue<'a>(
    server: &'a MockServer,
    slug: &str,
    static_body: Value,
    dynamic_body: Value,
) -> (Mock<'a>, Mock<'a>) {
    let static_path = format!("/venues/{}/static", slug);
    let dynamic_path = format!("/venues/{}/dynamic", slug);

    let static_mock = server
        .mock_async(|when, then| {
            when.method(GET).path(static_path);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(static_body);
        })
        .await;

    let dynamic_mock = server
        .mock_async(|when, then| {
            when.method(GET).path(dynamic_path);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(dynamic_body);
        })
        .await;

    (static_mock, dynamic_mock)
}
