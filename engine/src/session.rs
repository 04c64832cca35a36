//! @ai:module:intent Explicit comparison session: category filter plus the A/B picks
//! @ai:module:layer application
//! @ai:module:public_api Session, Slot
//! @ai:module:depends_on catalog, search, compare
//! @ai:module:stateless false

use crate::catalog::Catalog;
use crate::category::CategoryFilter;
use crate::compare::{CompareOptions, ComparisonResult};
use crate::model::Product;
use crate::search::{random_pick, search_pool, Searchable};
use std::fmt;

/// @ai:intent One of the two comparison slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    A,
    B,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::A => write!(f, "A"),
            Slot::B => write!(f, "B"),
        }
    }
}

/// @ai:intent The single active selection; every change is one synchronous step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    filter: CategoryFilter,
    pick_a: Option<String>,
    pick_b: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// @ai:intent Change the category filter; clears both picks
    /// @ai:effects state:write
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.clear_all();
    }

    /// @ai:intent Put a product into a slot
    /// @ai:effects state:write
    pub fn pick(&mut self, slot: Slot, product: &Product) {
        let id = Some(product.id.clone());
        match slot {
            Slot::A => self.pick_a = id,
            Slot::B => self.pick_b = id,
        }
    }

    /// @ai:intent Id of the product in a slot
    pub fn picked(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::A => self.pick_a.as_deref(),
            Slot::B => self.pick_b.as_deref(),
        }
    }

    /// @ai:effects state:write
    pub fn clear(&mut self, slot: Slot) {
        match slot {
            Slot::A => self.pick_a = None,
            Slot::B => self.pick_b = None,
        }
    }

    /// @ai:effects state:write
    pub fn clear_all(&mut self) {
        self.pick_a = None;
        self.pick_b = None;
    }

    /// @ai:intent Exchange the A and B picks
    /// @ai:effects state:write
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.pick_a, &mut self.pick_b);
    }

    /// @ai:intent Products visible under the current filter
    /// @ai:effects pure
    pub fn pool<'c>(&self, catalog: &'c Catalog) -> Vec<&'c Product> {
        search_pool(catalog.products(), &self.filter)
    }

    /// @ai:intent Resolve user input to a product: a pre-picked id wins, else the top search hit
    /// @ai:effects pure
    /// @ai:post None when the pre-pick is unknown and the search finds nothing
    pub fn resolve<'c>(
        &self,
        catalog: &'c Catalog,
        searcher: &dyn Searchable,
        query: &str,
        prepick_id: Option<&str>,
    ) -> Option<&'c Product> {
        if let Some(product) = prepick_id.and_then(|id| catalog.get(id)) {
            return Some(product);
        }
        searcher.best(query.trim(), &self.pool(catalog))
    }

    /// @ai:intent Pick a random product from the current pool into a slot
    /// @ai:effects state:write
    pub fn pick_random<'c>(
        &mut self,
        catalog: &'c Catalog,
        slot: Slot,
        seed: u64,
    ) -> Option<&'c Product> {
        let product = random_pick(&self.pool(catalog), seed)?;
        self.pick(slot, product);
        Some(product)
    }

    /// @ai:intent Both picked products, if both slots are filled and still in the catalog
    /// @ai:effects pure
    pub fn pair<'c>(&self, catalog: &'c Catalog) -> Option<(&'c Product, &'c Product)> {
        let a = catalog.get(self.pick_a.as_deref()?)?;
        let b = catalog.get(self.pick_b.as_deref()?)?;
        Some((a, b))
    }

    /// @ai:intent Compare the current pair; None until both slots are filled
    /// @ai:effects pure
    pub fn compare(&self, catalog: &Catalog, options: CompareOptions) -> Option<ComparisonResult> {
        let (a, b) = self.pair(catalog)?;
        Some(catalog.compare(a, b, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::model::Metric;
    use crate::profile::ProfileSet;
    use crate::search::SearchHit;

    /// Case-insensitive substring match on names
    struct NameContains;

    impl Searchable for NameContains {
        fn search<'a>(&self, query: &str, pool: &[&'a Product]) -> Vec<SearchHit<'a>> {
            let query = query.to_lowercase();
            pool.iter()
                .filter(|p| p.name.to_lowercase().contains(&query))
                .map(|p| SearchHit {
                    product: *p,
                    relevance: 1.0,
                })
                .collect()
        }
    }

    fn catalog() -> Catalog {
        let products = vec![
            Product::new("c1", Category::Car, "Model 3")
                .with_metric(Metric::new("sales", "销量", 10.0)),
            Product::new("c2", Category::Car, "Model Y")
                .with_metric(Metric::new("sales", "销量", 20.0)),
            Product::new("p1", Category::Phone, "Pixel 9"),
        ];
        Catalog::new(products, ProfileSet::builtin()).unwrap()
    }

    #[test]
    fn test_compare_requires_both_picks() {
        let catalog = catalog();
        let mut session = Session::new();

        session.pick(Slot::A, catalog.get("c1").unwrap());
        assert!(session.compare(&catalog, CompareOptions::default()).is_none());

        session.pick(Slot::B, catalog.get("c2").unwrap());
        let result = session.compare(&catalog, CompareOptions::default()).unwrap();
        assert_eq!(result.score_a, Some(0));
        assert_eq!(result.score_b, Some(100));
    }

    #[test]
    fn test_swap_exchanges_slots() {
        let catalog = catalog();
        let mut session = Session::new();
        session.pick(Slot::A, catalog.get("c1").unwrap());
        session.pick(Slot::B, catalog.get("p1").unwrap());

        session.swap();

        assert_eq!(session.picked(Slot::A), Some("p1"));
        assert_eq!(session.picked(Slot::B), Some("c1"));
    }

    #[test]
    fn test_changing_filter_clears_picks() {
        let catalog = catalog();
        let mut session = Session::new();
        session.pick(Slot::A, catalog.get("c1").unwrap());

        session.set_filter(CategoryFilter::Only(Category::Phone));

        assert_eq!(session.picked(Slot::A), None);
        assert_eq!(session.pool(&catalog).len(), 1);
    }

    #[test]
    fn test_resolve_prefers_prepick_then_search() {
        let catalog = catalog();
        let session = Session::new();

        let product = session.resolve(&catalog, &NameContains, "pixel", Some("c2")).unwrap();
        assert_eq!(product.id, "c2");

        let product = session.resolve(&catalog, &NameContains, " pixel ", None).unwrap();
        assert_eq!(product.id, "p1");

        let product = session.resolve(&catalog, &NameContains, "pixel", Some("gone")).unwrap();
        assert_eq!(product.id, "p1");

        assert!(session.resolve(&catalog, &NameContains, "walkman", None).is_none());
    }

    #[test]
    fn test_resolve_searches_only_filtered_pool() {
        let catalog = catalog();
        let mut session = Session::new();
        session.set_filter(CategoryFilter::Only(Category::Car));

        assert!(session.resolve(&catalog, &NameContains, "pixel", None).is_none());
    }

    #[test]
    fn test_pick_random_fills_slot_from_pool() {
        let catalog = catalog();
        let mut session = Session::new();
        session.set_filter(CategoryFilter::Only(Category::Phone));

        let product = session.pick_random(&catalog, Slot::B, 42).unwrap();
        assert_eq!(product.id, "p1");
        assert_eq!(session.picked(Slot::B), Some("p1"));
    }
}
