//! @ai:module:intent Per-category, per-metric value ranges derived from the catalog
//! @ai:module:layer domain
//! @ai:module:public_api Range, StatsTable, build_stats
//! @ai:module:stateless true

use crate::category::Category;
use crate::model::Product;
use serde::Serialize;
use std::collections::BTreeMap;

/// @ai:intent Observed minimum and maximum of a metric within one category
/// @ai:invariant min <= max
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// @ai:intent Range containing a single value
    pub fn point(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    fn include(&mut self, value: f64) {
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// @ai:intent True when the metric shows no variance in its category
    pub fn is_flat(&self) -> bool {
        self.min == self.max
    }
}

/// @ai:intent Immutable category -> metric key -> range table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StatsTable {
    categories: BTreeMap<Category, BTreeMap<String, Range>>,
}

impl StatsTable {
    /// @ai:intent Range of one metric in one category
    /// @ai:effects pure
    pub fn range(&self, category: &Category, key: &str) -> Option<Range> {
        self.categories.get(category)?.get(key).copied()
    }

    /// @ai:intent All metric ranges of one category
    /// @ai:effects pure
    pub fn category(&self, category: &Category) -> Option<&BTreeMap<String, Range>> {
        self.categories.get(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.keys()
    }

    /// @ai:intent Total number of (category, metric) entries
    pub fn metric_count(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// @ai:intent Compute min/max for every metric with at least one finite value, per category
/// @ai:effects pure
/// @ai:post no entry exists for a metric that never has a finite value in its category
/// @ai:edge_cases non-finite and non-numeric values are skipped without error
pub fn build_stats(products: &[Product]) -> StatsTable {
    let mut categories: BTreeMap<Category, BTreeMap<String, Range>> = BTreeMap::new();

    for product in products {
        for metric in &product.metrics {
            let Some(value) = metric.value.as_finite() else {
                continue;
            };

            categories
                .entry(product.category.clone())
                .or_default()
                .entry(metric.key.clone())
                .and_modify(|range| range.include(value))
                .or_insert_with(|| Range::point(value));
        }
    }

    tracing::debug!(
        categories = categories.len(),
        "built metric statistics for {} products",
        products.len()
    );

    StatsTable { categories }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Metric, MetricValue};

    fn phone(id: &str, battery: impl Into<MetricValue>) -> Product {
        Product::new(id, Category::Phone, id)
            .with_metric(Metric::new("battery", "电池容量", battery))
    }

    #[test]
    fn test_min_max_per_category() {
        let products = vec![
            phone("a", 4000.0),
            phone("b", 5500.0),
            phone("c", 4800.0),
            Product::new("car", Category::Car, "Car")
                .with_metric(Metric::new("battery", "电池", 75.0)),
        ];

        let stats = build_stats(&products);

        assert_eq!(
            stats.range(&Category::Phone, "battery"),
            Some(Range { min: 4000.0, max: 5500.0 })
        );
        assert_eq!(stats.range(&Category::Car, "battery"), Some(Range::point(75.0)));
        assert_eq!(stats.metric_count(), 2);
    }

    #[test]
    fn test_ignores_non_finite_values() {
        let products = vec![phone("a", 4000.0), phone("b", "N/A"), phone("c", f64::INFINITY)];

        let stats = build_stats(&products);
        assert_eq!(stats.range(&Category::Phone, "battery"), Some(Range::point(4000.0)));
    }

    #[test]
    fn test_no_entry_when_only_value_is_non_numeric() {
        let products = vec![
            phone("a", 4000.0),
            Product::new("b", Category::Phone, "b").with_metric(Metric::new("x", "X", "N/A")),
        ];

        let stats = build_stats(&products);
        assert_eq!(stats.range(&Category::Phone, "x"), None);
        assert!(stats.range(&Category::Phone, "battery").is_some());
    }

    #[test]
    fn test_category_without_finite_values_is_absent() {
        let products = vec![
            Product::new("b", Category::Car, "b").with_metric(Metric::new("x", "X", "N/A")),
        ];

        let stats = build_stats(&products);
        assert!(stats.category(&Category::Car).is_none());
        assert!(stats.is_empty());
    }

    #[test]
    fn test_independent_of_input_order() {
        let mut products = vec![phone("a", 4000.0), phone("b", 5500.0), phone("c", 4800.0)];
        let forward = build_stats(&products);
        products.reverse();
        assert_eq!(build_stats(&products), forward);
    }

    #[test]
    fn test_numeric_text_counts() {
        let products = vec![phone("a", "3900"), phone("b", 4100.0)];
        let stats = build_stats(&products);
        assert_eq!(
            stats.range(&Category::Phone, "battery"),
            Some(Range { min: 3900.0, max: 4100.0 })
        );
    }
}
