//! @ai:module:intent Rank the products of one category by aggregate score
//! @ai:module:layer application
//! @ai:module:public_api Leaderboard, LeaderboardEntry, LeaderboardBuilder, LeaderboardTrait
//! @ai:module:depends_on arena_engine::catalog
//! @ai:module:stateless true

use arena_engine::{compare_labels, Catalog, Category};
use serde::Serialize;
use std::cmp::Ordering;

/// @ai:intent One ranked product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub score: Option<i64>,
}

/// @ai:intent Ranked products of a category with summary figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    pub category: Category,
    pub generated_at: String,
    pub entries: Vec<LeaderboardEntry>,
    pub scored: usize,
    pub average_score: Option<f64>,
}

/// @ai:intent Trait for building category leaderboards
pub trait LeaderboardTrait {
    fn build(&self, catalog: &Catalog, category: &Category) -> Leaderboard;
}

/// @ai:intent Builds leaderboards from catalog scores
pub struct LeaderboardBuilder;

impl LeaderboardBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LeaderboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LeaderboardTrait for LeaderboardBuilder {
    /// @ai:intent Score every product of the category and sort best first
    /// @ai:effects pure
    /// @ai:edge_cases unscored products rank last; equal scores fall back to name order
    fn build(&self, catalog: &Catalog, category: &Category) -> Leaderboard {
        let mut scored: Vec<(Option<i64>, &str, &str)> = catalog
            .products()
            .iter()
            .filter(|p| &p.category == category)
            .map(|p| (catalog.score(p), p.id.as_str(), p.name.as_str()))
            .collect();

        scored.sort_by(|a, b| by_score(a.0, b.0).then_with(|| compare_labels(a.2, b.2)));

        let entries: Vec<LeaderboardEntry> = scored
            .iter()
            .enumerate()
            .map(|(i, (score, id, name))| LeaderboardEntry {
                rank: i + 1,
                id: id.to_string(),
                name: name.to_string(),
                score: *score,
            })
            .collect();

        let scores: Vec<i64> = entries.iter().filter_map(|e| e.score).collect();

        Leaderboard {
            category: category.clone(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            scored: scores.len(),
            average_score: average(scores.iter().map(|s| *s as f64)),
            entries,
        }
    }
}

/// Descending, with None after every score.
fn by_score(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// @ai:intent Mean of the values, None when empty
/// @ai:effects pure
fn average<I: Iterator<Item = f64>>(iter: I) -> Option<f64> {
    let (sum, count) = iter.fold((0.0, 0u32), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

/// @ai:intent Convenience wrapper around the default builder
/// @ai:effects pure
pub fn leaderboard(catalog: &Catalog, category: &Category) -> Leaderboard {
    LeaderboardBuilder::new().build(catalog, category)
}
