//! @ai:module:intent Fuzzy product search backed by the skim matching algorithm
//! @ai:module:layer infrastructure
//! @ai:module:public_api FuzzySearch, FieldWeights
//! @ai:module:depends_on arena_engine::search, config
//! @ai:module:stateless true

use crate::config::SearchConfig;
use arena_engine::{compare_labels, Product, SearchHit, SearchRecord, Searchable};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::cmp::Ordering;

/// @ai:intent Relative importance of each searchable field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldWeights {
    pub name: f64,
    pub brand: f64,
    pub aliases: f64,
    pub keywords: f64,
    pub year: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            name: 0.45,
            brand: 0.15,
            aliases: 0.25,
            keywords: 0.10,
            year: 0.05,
        }
    }
}

/// @ai:intent Searchable implementation over names, brands, aliases, keywords and years
pub struct FuzzySearch {
    matcher: SkimMatcherV2,
    weights: FieldWeights,
    min_query_len: usize,
    limit: usize,
}

impl FuzzySearch {
    pub fn new(min_query_len: usize, limit: usize) -> Self {
        Self {
            matcher: SkimMatcherV2::default().ignore_case(),
            weights: FieldWeights::default(),
            min_query_len,
            limit,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.min_query_len, config.limit)
    }

    pub fn with_weights(mut self, weights: FieldWeights) -> Self {
        self.weights = weights;
        self
    }

    fn field_score(&self, text: &str, query: &str) -> f64 {
        self.matcher.fuzzy_match(text, query).unwrap_or(0) as f64
    }

    fn best_of(&self, texts: &[String], query: &str) -> f64 {
        texts
            .iter()
            .map(|t| self.field_score(t, query))
            .fold(0.0, f64::max)
    }

    /// @ai:intent Weighted match score of one record; zero when no field matches
    /// @ai:effects pure
    pub fn relevance(&self, record: &SearchRecord<'_>, query: &str) -> f64 {
        let w = &self.weights;
        let brand = record.brand.map_or(0.0, |b| self.field_score(b, query));
        let year = record.year.as_deref().map_or(0.0, |y| self.field_score(y, query));

        w.name * self.field_score(record.name, query)
            + w.brand * brand
            + w.aliases * self.best_of(record.aliases, query)
            + w.keywords * self.best_of(record.keywords, query)
            + w.year * year
    }
}

impl Default for FuzzySearch {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl Searchable for FuzzySearch {
    fn search<'a>(&self, query: &str, pool: &[&'a Product]) -> Vec<SearchHit<'a>> {
        let query = query.trim();
        if query.chars().count() < self.min_query_len {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit<'a>> = pool
            .iter()
            .map(|product| SearchHit {
                product: *product,
                relevance: self.relevance(&SearchRecord::from_product(product), query),
            })
            .filter(|hit| hit.relevance > 0.0)
            .collect();

        hits.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(Ordering::Equal)
                .then_with(|| compare_labels(&a.product.name, &b.product.name))
        });
        hits.truncate(self.limit);
        hits
    }
}
