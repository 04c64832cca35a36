//! @ai:module:intent Everything a command needs: configuration, catalog, column feed and search
//! @ai:module:layer application
//! @ai:module:public_api Arena
//! @ai:module:depends_on config, columns, search, lookup
//! @ai:module:stateless false

use crate::columns::{load_posts, ColumnFeed};
use crate::config::ArenaConfig;
use crate::lookup::{resolve_product, LookupError};
use crate::search::FuzzySearch;
use anyhow::{Context, Result};
use arena_engine::{random_pick, Catalog, CategoryFilter, ComparisonResult, Product, Session, Slot};
use std::path::Path;
use tracing::{info, warn};

/// @ai:intent Loaded application state shared by the CLI commands
pub struct Arena {
    pub config: ArenaConfig,
    pub catalog: Catalog,
    pub feed: ColumnFeed,
    pub searcher: FuzzySearch,
}

impl Arena {
    /// @ai:intent Load the catalog and column feed named by the configuration
    /// @ai:effects fs:read
    /// @ai:post Err when the catalog or profiles are unusable; a broken column file only empties the feed
    pub fn load(config: ArenaConfig) -> Result<Self> {
        let profiles = config.profile_set().context("Invalid profile configuration")?;
        let catalog = Catalog::load(&config.paths.products, profiles).with_context(|| {
            format!("Failed to load catalog {}", config.paths.products.display())
        })?;

        info!(
            "Catalog ready: {} products, {} metric ranges",
            catalog.len(),
            catalog.stats().metric_count()
        );

        let feed = Self::load_feed(&config.paths.columns);
        let searcher = FuzzySearch::from_config(&config.search);

        Ok(Self {
            config,
            catalog,
            feed,
            searcher,
        })
    }

    /// @ai:intent Column feed from a file, empty when the file is missing or invalid
    /// @ai:effects fs:read
    pub fn load_feed(path: &Path) -> ColumnFeed {
        match load_posts(path) {
            Ok(posts) => ColumnFeed::new(posts),
            Err(e) => {
                warn!("Column feed unavailable: {:#}", e);
                ColumnFeed::default()
            }
        }
    }

    /// @ai:intent Session scoped to a category filter
    pub fn session(&self, filter: CategoryFilter) -> Session {
        let mut session = Session::new();
        session.set_filter(filter);
        session
    }

    /// @ai:intent Resolve a product reference within a session's pool
    pub fn resolve<'a>(
        &'a self,
        session: &Session,
        input: &str,
    ) -> Result<&'a Product, LookupError> {
        resolve_product(&self.catalog, &self.searcher, session, input)
    }

    /// @ai:intent Resolve both references into the session and compare them
    /// @ai:effects state:write
    pub fn compare_pair(
        &self,
        session: &mut Session,
        a: &str,
        b: &str,
        only_profile: bool,
        raw: bool,
    ) -> Result<ComparisonResult> {
        let product_a = self.resolve(session, a)?;
        let product_b = self.resolve(session, b)?;
        session.pick(Slot::A, product_a);
        session.pick(Slot::B, product_b);

        let options = self.config.compare_options(only_profile, raw);
        session
            .compare(&self.catalog, options)
            .ok_or_else(|| anyhow::anyhow!("Comparison requires two picked products"))
    }

    /// @ai:intent Fill both slots randomly from the session pool, preferring two different products
    /// @ai:effects state:write
    pub fn random_pair(&self, session: &mut Session, seed: u64) -> Option<ComparisonResult> {
        let first = session.pick_random(&self.catalog, Slot::A, seed)?;
        let others: Vec<&Product> = session
            .pool(&self.catalog)
            .into_iter()
            .filter(|p| p.id != first.id)
            .collect();

        let second = random_pick(&others, seed.wrapping_add(1)).unwrap_or(first);
        session.pick(Slot::B, second);

        let options = self.config.compare_options(false, false);
        session.compare(&self.catalog, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_engine::Category;
    use tempfile::TempDir;

    const PRODUCTS: &str = r#"[
        {"id": "a", "category": "car", "name": "Alpha",
         "metrics": [{"key": "sales", "label": "销量", "value": 10}]},
        {"id": "b", "category": "car", "name": "Bravo",
         "metrics": [{"key": "sales", "label": "销量", "value": 20}]},
        {"id": "p", "category": "phone", "name": "Pocket"}
    ]"#;

    fn arena(temp: &TempDir) -> Arena {
        let products = temp.path().join("products.json");
        std::fs::write(&products, PRODUCTS).unwrap();

        let mut config = ArenaConfig::default();
        config.paths.products = products;
        config.paths.columns = temp.path().join("missing-columns.json");
        Arena::load(config).unwrap()
    }

    #[test]
    fn test_missing_columns_file_is_not_fatal() {
        let temp = TempDir::new().unwrap();
        let arena = arena(&temp);

        assert_eq!(arena.catalog.len(), 3);
        assert!(arena.feed.is_empty());
    }

    #[test]
    fn test_missing_catalog_is_an_error() {
        let temp = TempDir::new().unwrap();
        let mut config = ArenaConfig::default();
        config.paths.products = temp.path().join("nope.json");

        assert!(Arena::load(config).is_err());
    }

    #[test]
    fn test_compare_pair_by_id_and_name() {
        let temp = TempDir::new().unwrap();
        let arena = arena(&temp);
        let mut session = arena.session(CategoryFilter::All);

        let result = arena.compare_pair(&mut session, "a", "bravo", false, false).unwrap();
        assert_eq!(result.score_b, Some(100));
        assert_eq!(session.picked(Slot::B), Some("b"));
    }

    #[test]
    fn test_unknown_reference_is_lookup_error() {
        let temp = TempDir::new().unwrap();
        let arena = arena(&temp);
        let mut session = arena.session(CategoryFilter::All);

        let err = arena.compare_pair(&mut session, "a", "zzzz", false, false).unwrap_err();
        assert!(err.downcast_ref::<LookupError>().is_some());
    }

    #[test]
    fn test_random_pair_picks_distinct_products() {
        let temp = TempDir::new().unwrap();
        let arena = arena(&temp);
        let mut session = arena.session(CategoryFilter::Only(Category::Car));

        let result = arena.random_pair(&mut session, 9).unwrap();
        assert_ne!(result.a.id, result.b.id);
        assert!(result.same_category);
    }
}
