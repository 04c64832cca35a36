//! @ai:module:intent Search collaborator seam: product pools, searchable records and the Searchable trait
//! @ai:module:layer domain
//! @ai:module:public_api Searchable, SearchHit, SearchRecord, search_pool, random_pick
//! @ai:module:stateless true

use crate::category::CategoryFilter;
use crate::model::Product;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

/// @ai:intent Fields of a product a search backend may index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRecord<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub brand: Option<&'a str>,
    pub aliases: &'a [String],
    pub keywords: &'a [String],
    pub year: Option<String>,
}

impl<'a> SearchRecord<'a> {
    /// @ai:intent Project a product onto its searchable fields
    /// @ai:effects pure
    pub fn from_product(product: &'a Product) -> Self {
        Self {
            id: &product.id,
            name: &product.name,
            brand: product.brand.as_deref(),
            aliases: &product.aliases,
            keywords: &product.keywords,
            year: product.year.map(|y| y.to_string()),
        }
    }
}

/// @ai:intent A ranked match returned by a search backend
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub product: &'a Product,
    /// Backend-defined relevance, higher is better
    pub relevance: f64,
}

/// @ai:intent Capability trait for fuzzy product search
pub trait Searchable {
    /// @ai:intent Rank the pool against a query, best match first
    fn search<'a>(&self, query: &str, pool: &[&'a Product]) -> Vec<SearchHit<'a>>;

    /// @ai:intent Best match, if any
    fn best<'a>(&self, query: &str, pool: &[&'a Product]) -> Option<&'a Product> {
        self.search(query, pool).first().map(|hit| hit.product)
    }
}

/// @ai:intent Products visible under a category filter, in catalog order
/// @ai:effects pure
pub fn search_pool<'a>(products: &'a [Product], filter: &CategoryFilter) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| filter.matches(&p.category))
        .collect()
}

/// @ai:intent Deterministically pick one product from a pool for a seed
/// @ai:effects pure
/// @ai:post None only for an empty pool
pub fn random_pick<'a>(pool: &[&'a Product], seed: u64) -> Option<&'a Product> {
    let mut rng = StdRng::seed_from_u64(seed);
    pool.choose(&mut rng).copied()
}
