//! @ai:module:intent Scoring core for side-by-side product comparison
//! @ai:module:layer domain
//! @ai:module:public_api catalog, category, card, collate, compare, error, model, normalize, output, profile, render, scorer, search, session, stats
//! @ai:module:stateless true
//!
//! # Arena Engine
//!
//! Turns a catalog of heterogeneous product metrics into comparable 0-100
//! scores per category and combines them into weighted performance scores.
//!
//! ## Example
//!
//! ```rust,no_run
//! use arena_engine::{output, Catalog, CompareOptions, ProfileSet};
//! use std::path::Path;
//!
//! let catalog = Catalog::load(Path::new("data/products.json"), ProfileSet::builtin()).unwrap();
//! let a = catalog.get("rtx-4070").unwrap();
//! let b = catalog.get("rx-7800xt").unwrap();
//!
//! let result = catalog.compare(a, b, CompareOptions::default());
//! println!("{}", output::format_comparison(&result, output::OutputFormat::Text));
//! ```

pub mod card;
pub mod catalog;
pub mod category;
pub mod collate;
pub mod compare;
pub mod error;
pub mod model;
pub mod normalize;
pub mod output;
pub mod profile;
pub mod render;
pub mod scorer;
pub mod search;
pub mod session;
pub mod stats;

pub use card::{build_card, CardRow, ProductCard};
pub use catalog::{validate_products, Catalog};
pub use category::{Category, CategoryFilter};
pub use collate::{compare_labels, sort_labels};
pub use compare::{
    compare, CompareOptions, ComparisonResult, MetricRow, RadarSeries, Side, Verdict,
    TIE_THRESHOLD,
};
pub use error::{Error, Result};
pub use model::{format_value, Metric, MetricValue, Product, PLACEHOLDER};
pub use normalize::{normalize, round_score, scale};
pub use output::{format_breakdown, format_comparison, format_stats, to_json, OutputFormat};
pub use profile::{CategoryProfile, CoreMetric, ProfileSet};
pub use render::Renderable;
pub use scorer::{breakdown, score, Contribution, ScoreBreakdown};
pub use search::{random_pick, search_pool, SearchHit, SearchRecord, Searchable};
pub use session::{Session, Slot};
pub use stats::{build_stats, Range, StatsTable};
