//! @ai:module:intent Configuration structs for the arena application
//! @ai:module:layer infrastructure
//! @ai:module:public_api ArenaConfig, PathConfig, CompareConfig, SearchConfig, ColumnsConfig
//! @ai:module:stateless true

use arena_engine::{Category, CategoryProfile, CompareOptions, ProfileSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// @ai:intent Main configuration for the arena application
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub compare: CompareConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub columns: ColumnsConfig,
    /// Per-category overrides keyed by category key; replace the built-in profile wholesale
    #[serde(default)]
    pub profiles: BTreeMap<String, CategoryProfile>,
}

/// @ai:intent Locations of catalog data and generated reports
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default = "default_products")]
    pub products: PathBuf,
    #[serde(default = "default_columns")]
    pub columns: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// @ai:intent Default display toggles for comparisons
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompareConfig {
    #[serde(default)]
    pub only_profile_metrics: bool,
    #[serde(default)]
    pub show_raw: bool,
}

/// @ai:intent Search tuning
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

/// @ai:intent Column feed presentation
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnsConfig {
    #[serde(default = "default_columns_limit")]
    pub limit: usize,
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
    /// Origin and path that share links are built on
    #[serde(default)]
    pub base_url: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            products: default_products(),
            columns: default_columns(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: default_min_query_len(),
            limit: default_search_limit(),
        }
    }
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            limit: default_columns_limit(),
            excerpt_chars: default_excerpt_chars(),
            base_url: String::new(),
        }
    }
}

fn default_products() -> PathBuf {
    PathBuf::from("data/products.json")
}

fn default_columns() -> PathBuf {
    PathBuf::from("data/columns.json")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_min_query_len() -> usize {
    2
}

fn default_search_limit() -> usize {
    10
}

fn default_columns_limit() -> usize {
    6
}

fn default_excerpt_chars() -> usize {
    200
}

impl ArenaConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Built-in profiles with the configured overrides applied
    /// @ai:effects pure
    pub fn profile_set(&self) -> arena_engine::Result<ProfileSet> {
        ProfileSet::builtin().with_overrides(
            self.profiles
                .iter()
                .map(|(key, profile)| (Category::from(key.as_str()), profile.clone())),
        )
    }

    /// @ai:intent Comparison options from the configured defaults and command-line flags
    /// @ai:effects pure
    pub fn compare_options(&self, only_profile: bool, raw: bool) -> CompareOptions {
        CompareOptions {
            only_profile_metrics: self.compare.only_profile_metrics || only_profile,
            show_raw: self.compare.show_raw || raw,
        }
    }
}
