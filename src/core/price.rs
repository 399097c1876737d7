use crate::core::range::select_range;
use crate::domain::model::{DeliverySpecs, PriceBreakdown};
use crate::utils::error::{DopcError, Result};

// i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

fn overflow(what: &str) -> DopcError {
    DopcError::UnexpectedError {
        message: format!("{} overflows the integer price range", what),
    }
}

/// Distance-based part of the delivery fee, `multiplier * distance / 10`.
///
/// Rounded once, half away from zero, so 2.5 becomes 3 and -2.5 becomes -3.
pub fn distance_fee(multiplier: f64, distance: i64) -> Result<i64> {
    let fee = (multiplier * distance as f64 / 10.0).round();
    if !fee.is_finite() || fee < -I64_UPPER || fee >= I64_UPPER {
        return Err(overflow("distance fee"));
    }
    Ok(fee as i64)
}

/// Fails with `UnexpectedError` only when a sum leaves the `i64` range.
pub fn compose_price(
    cart_value: i64,
    order_minimum_no_surcharge: i64,
    base_price: i64,
    constant_amount: i64,
    multiplier: f64,
    distance: i64,
) -> Result<PriceBreakdown> {
    let variable_fee = distance_fee(multiplier, distance)?;
    let delivery_fee = base_price
        .checked_add(constant_amount)
        .and_then(|fee| fee.checked_add(variable_fee))
        .ok_or_else(|| overflow("delivery fee"))?;
    let small_order_surcharge = order_minimum_no_surcharge
        .checked_sub(cart_value)
        .ok_or_else(|| overflow("small order surcharge"))?
        .max(0);
    let total_price = cart_value
        .checked_add(small_order_surcharge)
        .and_then(|sum| sum.checked_add(delivery_fee))
        .ok_or_else(|| overflow("total price"))?;

    Ok(PriceBreakdown {
        total_price,
        small_order_surcharge,
        cart_value,
        delivery_fee,
        delivery_distance: distance,
    })
}

/// Prices a delivery whose distance is already known.
///
/// Fails with `DeliveryImpossibleError` when the distance falls in the
/// unbounded tier.
pub fn calculate_delivery(
    cart_value: i64,
    distance: i64,
    specs: &DeliverySpecs,
) -> Result<PriceBreakdown> {
    let pricing = &specs.delivery_pricing;
    let range = select_range(distance, &pricing.distance_ranges)?;

    if range.is_sentinel() {
        tracing::debug!(distance, min = range.min, "distance beyond deliverable range");
        return Err(DopcError::DeliveryImpossibleError { distance });
    }

    compose_price(
        cart_value,
        specs.order_minimum_no_surcharge,
        pricing.base_price,
        range.constant_amount,
        range.multiplier,
        distance,
    )
}
