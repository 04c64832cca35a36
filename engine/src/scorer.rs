//! @ai:module:intent Combine a category's weighted core metrics into one performance score
//! @ai:module:layer domain
//! @ai:module:public_api score, breakdown, ScoreBreakdown, Contribution
//! @ai:module:depends_on normalize, profile, stats
//! @ai:module:stateless true

use crate::model::Product;
use crate::normalize::{normalize, round_score};
use crate::profile::ProfileSet;
use crate::stats::StatsTable;
use serde::Serialize;

/// @ai:intent One core metric that took part in an aggregate score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub key: String,
    pub label: String,
    pub weight: f64,
    pub normalized: i64,
}

/// @ai:intent Aggregate score with the metrics it was computed from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub score: i64,
    pub contributions: Vec<Contribution>,
    /// Core keys the product lacks or that could not be normalized
    pub skipped: Vec<String>,
}

impl ScoreBreakdown {
    /// @ai:intent Sum of weights actually used
    pub fn weight_used(&self) -> f64 {
        self.contributions.iter().map(|c| c.weight).sum()
    }
}

/// @ai:intent Aggregate performance score of a product within its category
/// @ai:effects pure
/// @ai:idempotent true
/// @ai:post None when the category has no profile or no core metric normalizes
pub fn score(stats: &StatsTable, profiles: &ProfileSet, product: &Product) -> Option<i64> {
    breakdown(stats, profiles, product).map(|b| b.score)
}

/// @ai:intent Weighted mean of normalized core metrics, renormalized over the metrics present
/// @ai:effects pure
/// @ai:edge_cases missing core metrics are excluded from numerator and denominator, never counted as zero
pub fn breakdown(
    stats: &StatsTable,
    profiles: &ProfileSet,
    product: &Product,
) -> Option<ScoreBreakdown> {
    let profile = profiles.get(&product.category)?;

    let mut contributions = Vec::with_capacity(profile.core_metrics.len());
    let mut skipped = Vec::new();

    for def in &profile.core_metrics {
        let normalized = product
            .metric(&def.key)
            .and_then(|metric| normalize(stats, &product.category, metric));

        match normalized {
            Some(normalized) => contributions.push(Contribution {
                key: def.key.clone(),
                label: def.label.clone(),
                weight: def.weight,
                normalized,
            }),
            None => skipped.push(def.key.clone()),
        }
    }

    if contributions.is_empty() {
        tracing::debug!(product = %product.id, "no core metric could be normalized");
        return None;
    }

    let weight_sum: f64 = contributions.iter().map(|c| c.weight).sum();
    if weight_sum <= 0.0 {
        return None;
    }

    let weighted: f64 = contributions
        .iter()
        .map(|c| c.weight * c.normalized as f64)
        .sum();

    Some(ScoreBreakdown {
        score: round_score(weighted / weight_sum),
        contributions,
        skipped,
    })
}
