//! @ai:module:intent Compare two products: scores, verdict and per-metric rows
//! @ai:module:layer application
//! @ai:module:public_api compare, ComparisonResult, CompareOptions, MetricRow, Verdict, Side, RadarSeries, TIE_THRESHOLD
//! @ai:module:depends_on scorer, normalize, card, collate
//! @ai:module:stateless true

use crate::card::{build_card, ProductCard};
use crate::collate::compare_labels;
use crate::model::{format_value, Metric, MetricValue, Product, PLACEHOLDER};
use crate::normalize::normalize;
use crate::profile::ProfileSet;
use crate::scorer::score;
use crate::stats::StatsTable;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Score gaps up to this size are reported as a tie.
pub const TIE_THRESHOLD: i64 = 2;

/// @ai:intent Display toggles of a comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareOptions {
    /// Restrict rows to the category profile's core metrics
    pub only_profile_metrics: bool,
    /// Show raw values instead of normalized scores
    pub show_raw: bool,
}

/// @ai:intent Which product of the pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// @ai:intent Outcome of comparing two aggregate scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "margin", rename_all = "snake_case")]
pub enum Verdict {
    Tied,
    ALeads(i64),
    BLeads(i64),
    InsufficientCoreMetrics,
    CrossCategory,
}

impl Verdict {
    /// @ai:intent Classify a same-category score pair
    /// @ai:effects pure
    /// @ai:example (Some(70), Some(69)) -> Tied
    /// @ai:example (Some(73), Some(70)) -> ALeads(3)
    /// @ai:example (Some(70), None) -> InsufficientCoreMetrics
    pub fn from_scores(a: Option<i64>, b: Option<i64>) -> Self {
        match (a, b) {
            (Some(a), Some(b)) => {
                let delta = a - b;
                if delta.abs() <= TIE_THRESHOLD {
                    Verdict::Tied
                } else if delta > 0 {
                    Verdict::ALeads(delta)
                } else {
                    Verdict::BLeads(-delta)
                }
            }
            _ => Verdict::InsufficientCoreMetrics,
        }
    }

    /// @ai:intent The leading side, if any
    pub fn leader(&self) -> Option<Side> {
        match self {
            Verdict::ALeads(_) => Some(Side::A),
            Verdict::BLeads(_) => Some(Side::B),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Tied => write!(f, "tied (gap <= {})", TIE_THRESHOLD),
            Verdict::ALeads(margin) => write!(f, "A leads +{}", margin),
            Verdict::BLeads(margin) => write!(f, "B leads +{}", margin),
            Verdict::InsufficientCoreMetrics => {
                write!(f, "insufficient core metrics to compute an aggregate score")
            }
            Verdict::CrossCategory => write!(f, "cross-category, for reference only"),
        }
    }
}

/// @ai:intent One metric compared across both products
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub key: String,
    pub label: String,
    pub unit: String,
    pub a: Option<MetricValue>,
    pub b: Option<MetricValue>,
    /// Only populated for same-category comparisons
    pub a_normalized: Option<i64>,
    pub b_normalized: Option<i64>,
}

impl MetricRow {
    pub fn raw(&self, side: Side) -> Option<&MetricValue> {
        match side {
            Side::A => self.a.as_ref(),
            Side::B => self.b.as_ref(),
        }
    }

    pub fn normalized(&self, side: Side) -> Option<i64> {
        match side {
            Side::A => self.a_normalized,
            Side::B => self.b_normalized,
        }
    }

    /// @ai:intent Raw value with the row unit, or the placeholder when the side lacks the metric
    /// @ai:effects pure
    pub fn raw_text(&self, side: Side) -> String {
        self.raw(side)
            .map(|value| format_value(value, &self.unit))
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    /// @ai:intent Text to show for one side under the current display toggle
    /// @ai:effects pure
    /// @ai:post raw text when show_raw is set or no normalized score exists
    pub fn display(&self, side: Side, show_raw: bool) -> String {
        match self.normalized(side) {
            Some(normalized) if !show_raw => normalized.to_string(),
            _ => self.raw_text(side),
        }
    }

    /// @ai:intent Bar fill percentage for one side; zero without a normalized score
    pub fn fill(&self, side: Side) -> i64 {
        self.normalized(side).unwrap_or(0)
    }

    /// @ai:intent True when neither product carries the metric
    pub fn is_placeholder(&self) -> bool {
        self.a.is_none() && self.b.is_none()
    }
}

/// @ai:intent Normalized core-metric series for a radar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSeries {
    pub labels: Vec<String>,
    pub a: Vec<i64>,
    pub b: Vec<i64>,
}

/// @ai:intent Complete comparison of two products, recomputed on demand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub a: ProductCard,
    pub b: ProductCard,
    pub same_category: bool,
    /// Cross-category results carry no scores and are for reference only
    pub advisory: bool,
    pub score_a: Option<i64>,
    pub score_b: Option<i64>,
    pub delta: Option<i64>,
    pub verdict: Verdict,
    pub rows: Vec<MetricRow>,
    pub show_raw: bool,
    pub radar: Option<RadarSeries>,
}

impl ComparisonResult {
    pub fn card(&self, side: Side) -> &ProductCard {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    pub fn score(&self, side: Side) -> Option<i64> {
        match side {
            Side::A => self.score_a,
            Side::B => self.score_b,
        }
    }

    /// @ai:intent Score as text, placeholder when absent
    pub fn score_text(&self, side: Side) -> String {
        self.score(side)
            .map(|s| s.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    /// @ai:intent One-line description of what the comparison means
    /// @ai:effects pure
    pub fn subtitle(&self) -> String {
        if self.same_category {
            format!(
                "{} · aggregate scores and normalized values are comparable",
                self.a.category.label()
            )
        } else {
            format!(
                "cross-category: {} vs {} (scores are not comparable; compare within one category)",
                self.a.category.label(),
                self.b.category.label()
            )
        }
    }
}

/// @ai:intent Compare two products under the catalog's statistics and profiles
/// @ai:effects pure
/// @ai:post cross-category results have no scores and advisory == true
/// @ai:post missing data never errors; it surfaces as None or placeholder rows
pub fn compare(
    stats: &StatsTable,
    profiles: &ProfileSet,
    a: &Product,
    b: &Product,
    options: CompareOptions,
) -> ComparisonResult {
    let same_category = a.category == b.category;

    let (score_a, score_b, verdict) = if same_category {
        let score_a = score(stats, profiles, a);
        let score_b = score(stats, profiles, b);
        (score_a, score_b, Verdict::from_scores(score_a, score_b))
    } else {
        (None, None, Verdict::CrossCategory)
    };

    let delta = match (score_a, score_b) {
        (Some(sa), Some(sb)) => Some(sa - sb),
        _ => None,
    };

    let rows = row_plans(profiles, a, b, options.only_profile_metrics && same_category)
        .into_iter()
        .map(|plan| build_row(stats, a, b, plan, same_category))
        .collect();

    let radar = if same_category {
        radar_series(stats, profiles, a, b)
    } else {
        None
    };

    ComparisonResult {
        a: build_card(a, profiles),
        b: build_card(b, profiles),
        same_category,
        advisory: !same_category,
        score_a,
        score_b,
        delta,
        verdict,
        rows,
        show_raw: options.show_raw,
        radar,
    }
}

/// @ai:intent Row descriptor: key plus the metric whose label/unit describe the row
struct RowPlan<'p> {
    key: String,
    descriptor: Option<&'p Metric>,
}

/// @ai:intent Decide which metric rows appear and in what order
/// @ai:effects pure
fn row_plans<'p>(
    profiles: &ProfileSet,
    a: &'p Product,
    b: &'p Product,
    profile_only: bool,
) -> Vec<RowPlan<'p>> {
    if profile_only {
        if let Some(profile) = profiles.get(&a.category) {
            return profile
                .keys()
                .map(|key| RowPlan {
                    key: key.to_string(),
                    descriptor: a.metric(key).or_else(|| b.metric(key)),
                })
                .collect();
        }
    }

    let mut seen = HashSet::new();
    let mut plans: Vec<RowPlan<'p>> = a
        .metrics
        .iter()
        .chain(b.metrics.iter())
        .filter(|m| seen.insert(m.key.as_str()))
        .map(|m| RowPlan {
            key: m.key.clone(),
            descriptor: Some(m),
        })
        .collect();

    plans.sort_by(|x, y| compare_labels(plan_label(x), plan_label(y)));
    plans
}

fn plan_label<'s>(plan: &'s RowPlan<'_>) -> &'s str {
    plan.descriptor
        .map(|m| m.display_label())
        .unwrap_or(plan.key.as_str())
}

/// @ai:intent Fill one row with raw values and, for same-category pairs, normalized scores
/// @ai:effects pure
fn build_row(
    stats: &StatsTable,
    a: &Product,
    b: &Product,
    plan: RowPlan<'_>,
    same_category: bool,
) -> MetricRow {
    let metric_a = a.metric(&plan.key);
    let metric_b = b.metric(&plan.key);

    let unit = plan
        .descriptor
        .and_then(Metric::unit)
        .or_else(|| metric_a.and_then(Metric::unit))
        .or_else(|| metric_b.and_then(Metric::unit))
        .unwrap_or("")
        .to_string();

    let (a_normalized, b_normalized) = if same_category {
        (
            metric_a.and_then(|m| normalize(stats, &a.category, m)),
            metric_b.and_then(|m| normalize(stats, &b.category, m)),
        )
    } else {
        (None, None)
    };

    MetricRow {
        label: plan_label(&plan).to_string(),
        key: plan.key,
        unit,
        a: metric_a.map(|m| m.value.clone()),
        b: metric_b.map(|m| m.value.clone()),
        a_normalized,
        b_normalized,
    }
}

/// @ai:intent Normalized core metrics of both products, zero where unavailable
/// @ai:effects pure
fn radar_series(
    stats: &StatsTable,
    profiles: &ProfileSet,
    a: &Product,
    b: &Product,
) -> Option<RadarSeries> {
    let profile = profiles.get(&a.category)?;

    let series = |product: &Product| -> Vec<i64> {
        profile
            .keys()
            .map(|key| {
                product
                    .metric(key)
                    .and_then(|m| normalize(stats, &product.category, m))
                    .unwrap_or(0)
            })
            .collect()
    };

    Some(RadarSeries {
        labels: profile.core_metrics.iter().map(|m| m.label.clone()).collect(),
        a: series(a),
        b: series(b),
    })
}
