use crate::domain::model::DistanceRange;
use crate::utils::error::{DopcError, Result};

/// Picks the tier with the greatest `min` not above `distance`.
///
/// A distance equal to a tier's `min` belongs to that tier. Ranges are
/// expected sorted ascending by `min`; if the first tier already starts above
/// the distance, the first tier is returned.
pub fn select_range(distance: i64, ranges: &[DistanceRange]) -> Result<&DistanceRange> {
    if distance < 0 {
        return Err(DopcError::validation(
            "distance",
            format!("must be non-negative, got {}", distance),
        ));
    }
    if ranges.len() < 2 {
        return Err(DopcError::validation(
            "distance_ranges",
            format!("must have at least two ranges, got {}", ranges.len()),
        ));
    }

    let selected = ranges
        .iter()
        .rev()
        .find(|range| range.min <= distance)
        .unwrap_or(&ranges[0]);

    Ok(selected)
}
