//! @ai:module:intent Load and validate the product catalog and derive its statistics
//! @ai:module:layer application
//! @ai:module:public_api Catalog, validate_products
//! @ai:module:depends_on model, profile, stats, scorer, compare, error
//! @ai:module:stateless false

use crate::compare::{compare, CompareOptions, ComparisonResult};
use crate::error::{Error, Result};
use crate::model::Product;
use crate::profile::ProfileSet;
use crate::scorer::{breakdown, score, ScoreBreakdown};
use crate::stats::{build_stats, StatsTable};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// @ai:intent A loaded catalog with its id index, profiles and derived statistics
/// @ai:invariant stats always reflect products; both change only through reload
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    by_id: HashMap<String, usize>,
    profiles: ProfileSet,
    stats: StatsTable,
}

impl Catalog {
    /// @ai:intent Validate products and derive statistics
    /// @ai:effects pure
    pub fn new(products: Vec<Product>, profiles: ProfileSet) -> Result<Self> {
        validate_products(&products)?;

        let stats = build_stats(&products);
        let by_id = index_by_id(&products);
        report_unused_profile_keys(&profiles, &stats);

        tracing::info!(
            products = products.len(),
            metrics = stats.metric_count(),
            "catalog loaded"
        );

        Ok(Self {
            products,
            by_id,
            profiles,
            stats,
        })
    }

    /// @ai:intent Parse a JSON array of products
    /// @ai:effects pure
    pub fn from_json_str(json: &str, profiles: ProfileSet) -> Result<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products, profiles)
    }

    /// @ai:intent Read and parse a catalog file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path, profiles: ProfileSet) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&content, profiles)
    }

    /// @ai:intent Replace the products and rebuild index and statistics
    /// @ai:effects state:write
    /// @ai:post on error the catalog is left unchanged
    pub fn reload(&mut self, products: Vec<Product>) -> Result<()> {
        let fresh = Self::new(products, self.profiles.clone())?;
        *self = fresh;
        Ok(())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn profiles(&self) -> &ProfileSet {
        &self.profiles
    }

    pub fn stats(&self) -> &StatsTable {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// @ai:intent Look up a product by id
    /// @ai:effects pure
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.by_id.get(id).map(|&i| &self.products[i])
    }

    /// @ai:intent Aggregate score of a product against this catalog
    /// @ai:effects pure
    pub fn score(&self, product: &Product) -> Option<i64> {
        score(&self.stats, &self.profiles, product)
    }

    /// @ai:intent Aggregate score with per-metric contributions
    /// @ai:effects pure
    pub fn breakdown(&self, product: &Product) -> Option<ScoreBreakdown> {
        breakdown(&self.stats, &self.profiles, product)
    }

    /// @ai:intent Compare two products against this catalog
    /// @ai:effects pure
    pub fn compare(&self, a: &Product, b: &Product, options: CompareOptions) -> ComparisonResult {
        compare(&self.stats, &self.profiles, a, b, options)
    }
}

/// @ai:intent Reject catalogs with empty ids, duplicate ids or duplicate metric keys
/// @ai:effects pure
pub fn validate_products(products: &[Product]) -> Result<()> {
    let mut ids = HashSet::new();

    for product in products {
        if product.id.trim().is_empty() {
            return Err(Error::InvalidCatalog(format!(
                "product '{}' has an empty id",
                product.name
            )));
        }
        if !ids.insert(product.id.as_str()) {
            return Err(Error::InvalidCatalog(format!(
                "duplicate product id '{}'",
                product.id
            )));
        }

        let mut keys = HashSet::new();
        for metric in &product.metrics {
            if !keys.insert(metric.key.as_str()) {
                return Err(Error::InvalidCatalog(format!(
                    "product '{}' has duplicate metric key '{}'",
                    product.id, metric.key
                )));
            }
        }
    }

    Ok(())
}

fn index_by_id(products: &[Product]) -> HashMap<String, usize> {
    products
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.clone(), i))
        .collect()
}

/// @ai:intent Log profile keys that can never contribute in a category that has data
/// @ai:effects log
fn report_unused_profile_keys(profiles: &ProfileSet, stats: &StatsTable) {
    for (category, profile) in profiles.iter() {
        let Some(ranges) = stats.category(category) else {
            continue;
        };
        for key in profile.keys().filter(|key| !ranges.contains_key(*key)) {
            tracing::debug!(%category, key, "profile metric has no numeric values in catalog");
        }
    }
}
