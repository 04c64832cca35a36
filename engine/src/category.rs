//! @ai:module:intent Define product categories, their display labels and category filters
//! @ai:module:layer domain
//! @ai:module:public_api Category, CategoryFilter
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::fmt;

/// @ai:intent Product category drawn from an open string enumeration
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    PcPart,
    Cpu,
    Phone,
    Car,
    Electronics,
    Other(String),
}

impl Category {
    /// @ai:intent Categories the catalog ships display labels for
    pub const KNOWN: [Category; 5] = [
        Category::PcPart,
        Category::Cpu,
        Category::Phone,
        Category::Car,
        Category::Electronics,
    ];

    /// @ai:intent Convert category to its catalog key
    /// @ai:effects pure
    /// @ai:example (Category::PcPart) -> "pc_part"
    pub fn as_str(&self) -> &str {
        match self {
            Category::PcPart => "pc_part",
            Category::Cpu => "cpu",
            Category::Phone => "phone",
            Category::Car => "car",
            Category::Electronics => "electronics",
            Category::Other(key) => key,
        }
    }

    /// @ai:intent Fixed display label in the catalog language; unknown categories show their key
    /// @ai:effects pure
    pub fn label(&self) -> &str {
        match self {
            Category::PcPart => "电脑配件",
            Category::Cpu => "CPU",
            Category::Phone => "手机",
            Category::Car => "汽车",
            Category::Electronics => "电子产品",
            Category::Other(key) => key,
        }
    }
}

impl From<&str> for Category {
    fn from(key: &str) -> Self {
        match key {
            "pc_part" => Category::PcPart,
            "cpu" => Category::Cpu,
            "phone" => Category::Phone,
            "car" => Category::Car,
            "electronics" => Category::Electronics,
            other => Category::Other(other.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(key: String) -> Self {
        match Category::from(key.as_str()) {
            Category::Other(_) => Category::Other(key),
            known => known,
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(key) => key,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Restricts the product pool to all categories or a single one
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// @ai:intent Check whether a category passes the filter
    /// @ai:effects pure
    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(only) => only == category,
        }
    }

    /// @ai:intent Display label of the filter
    /// @ai:effects pure
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "全部",
            CategoryFilter::Only(category) => category.label(),
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(key: &str) -> Self {
        match key.trim() {
            "" | "all" => CategoryFilter::All,
            other => CategoryFilter::Only(Category::from(other)),
        }
    }
}

impl From<Option<Category>> for CategoryFilter {
    fn from(category: Option<Category>) -> Self {
        category.map(CategoryFilter::Only).unwrap_or_default()
    }
}
