use crate::utils::error::{DopcError, Result};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug pattern"));

static ROUTE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/api/v[0-9]+/[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid route pattern")
});

/// Largest integer an IEEE double represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

// --- configuration checks -------------------------------------------------

/// Accepts absolute `http` or `https` URLs only.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DopcError::ConfigError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DopcError::ConfigError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(DopcError::ConfigError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Route path such as `/api/v1/delivery-order-price`.
pub fn validate_route(field_name: &str, route: &str) -> Result<()> {
    if !ROUTE_PATTERN.is_match(route) {
        return Err(DopcError::ConfigError {
            field: field_name.to_string(),
            value: route.to_string(),
            reason: "Route must look like /api/v1/some-name".to_string(),
        });
    }
    Ok(())
}

/// Fails with `ConfigError` when `value` is below `min_value`.
pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(DopcError::ConfigError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

// --- input and payload checks ----------------------------------------------

pub fn validate_slug(field_name: &str, value: &str) -> Result<()> {
    if !SLUG_PATTERN.is_match(value) {
        return Err(DopcError::validation(field_name, "invalid venue url slug"));
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: i64) -> Result<()> {
    if value < 0 {
        return Err(DopcError::validation(
            field_name,
            format!("must be non-negative, got {}", value),
        ));
    }
    Ok(())
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(DopcError::validation(field_name, "must be a finite number"));
    }
    Ok(())
}

/// Inclusive lower bound, inclusive or exclusive upper bound.
pub fn validate_range(
    field_name: &str,
    value: f64,
    min: f64,
    max: f64,
    max_inclusive: bool,
) -> Result<()> {
    validate_finite(field_name, value)?;

    let above_max = if max_inclusive { value > max } else { value >= max };
    if value < min || above_max {
        let closing = if max_inclusive { ']' } else { ')' };
        return Err(DopcError::validation(
            field_name,
            format!("value {} outside [{}, {}{}", value, min, max, closing),
        ));
    }
    Ok(())
}

/// Present and not blank after trimming; the trimmed value is returned.
pub fn require<'a>(field_name: &str, value: &'a Option<String>) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DopcError::validation(field_name, "is required")),
    }
}

/// Parses a query-string number. Integral floats such as `"10.0"` are accepted.
pub fn parse_number(field_name: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| DopcError::validation(field_name, format!("'{}' is not a number", raw)))?;
    validate_finite(field_name, value)?;
    Ok(value)
}

pub fn parse_integer(field_name: &str, raw: &str) -> Result<i64> {
    let value = parse_number(field_name, raw)?;
    if value.fract() != 0.0 || value.abs() > MAX_SAFE_INTEGER {
        return Err(DopcError::validation(field_name, "must be an integer"));
    }
    Ok(value as i64)
}
