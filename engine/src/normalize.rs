//! @ai:module:intent Map a raw metric value onto the 0-100 scale of its category
//! @ai:module:layer domain
//! @ai:module:public_api normalize, scale, round_score, FLAT_SCORE
//! @ai:module:depends_on stats, model
//! @ai:module:stateless true

use crate::category::Category;
use crate::model::Metric;
use crate::stats::{Range, StatsTable};

/// Score given to every value of a metric that has no variance in its category.
pub const FLAT_SCORE: i64 = 100;

/// @ai:intent Normalize a metric against its category's observed range
/// @ai:effects pure
/// @ai:post None when the range is unknown or the value is not a finite number
/// @ai:edge_cases min == max yields FLAT_SCORE regardless of direction
/// @ai:edge_cases values outside the observed range are not clamped
pub fn normalize(stats: &StatsTable, category: &Category, metric: &Metric) -> Option<i64> {
    let range = stats.range(category, &metric.key)?;
    let value = metric.value.as_finite()?;
    Some(scale(value, range, metric.higher_better))
}

/// @ai:intent Linear min-max rescale to 0-100, inverted for lower-is-better metrics
/// @ai:effects pure
/// @ai:example (50, [0, 200], true) -> 25
/// @ai:example (50, [0, 200], false) -> 75
pub fn scale(value: f64, range: Range, higher_better: bool) -> i64 {
    if range.is_flat() {
        return FLAT_SCORE;
    }

    let mut t = (value - range.min) / range.span();
    if !higher_better {
        t = 1.0 - t;
    }

    round_score(t * 100.0)
}

/// @ai:intent Round to the nearest integer, halves away from zero
/// @ai:effects pure
/// @ai:example (62.5) -> 63
/// @ai:example (-2.5) -> -3
pub fn round_score(value: f64) -> i64 {
    value.round() as i64
}
