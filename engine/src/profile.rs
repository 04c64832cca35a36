//! @ai:module:intent Category performance profiles: weighted core metrics per category
//! @ai:module:layer domain
//! @ai:module:public_api CoreMetric, CategoryProfile, ProfileSet
//! @ai:module:stateless true

use crate::category::Category;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// @ai:intent A metric that contributes to a category's aggregate score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreMetric {
    pub key: String,
    pub label: String,
    pub weight: f64,
}

/// @ai:intent Ordered, weighted core metrics for one category
/// @ai:invariant weights are positive and finite; keys are unique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProfile {
    #[serde(default)]
    pub label: String,
    pub core_metrics: Vec<CoreMetric>,
}

impl CategoryProfile {
    /// @ai:intent Build a profile from (key, label, weight) triples
    /// @ai:effects pure
    pub fn new(label: &str, metrics: &[(&str, &str, f64)]) -> Self {
        Self {
            label: label.to_string(),
            core_metrics: metrics
                .iter()
                .map(|(key, label, weight)| CoreMetric {
                    key: key.to_string(),
                    label: label.to_string(),
                    weight: *weight,
                })
                .collect(),
        }
    }

    /// @ai:intent Core metric keys in profile order
    /// @ai:effects pure
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.core_metrics.iter().map(|m| m.key.as_str())
    }

    /// @ai:intent Check weights and key uniqueness
    /// @ai:effects pure
    pub fn validate(&self, category: &Category) -> Result<()> {
        let invalid = |message: String| Error::InvalidProfile {
            category: category.to_string(),
            message,
        };

        if self.core_metrics.is_empty() {
            return Err(invalid("profile has no core metrics".to_string()));
        }

        let mut seen = HashSet::new();
        for metric in &self.core_metrics {
            if !metric.weight.is_finite() || metric.weight <= 0.0 {
                return Err(invalid(format!(
                    "weight of '{}' must be a positive number, got {}",
                    metric.key, metric.weight
                )));
            }
            if !seen.insert(metric.key.as_str()) {
                return Err(invalid(format!("duplicate core metric '{}'", metric.key)));
            }
        }

        Ok(())
    }
}

/// @ai:intent At most one profile per category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileSet {
    profiles: BTreeMap<Category, CategoryProfile>,
}

impl ProfileSet {
    /// @ai:intent Profiles that ship with the catalog
    /// @ai:effects pure
    pub fn builtin() -> Self {
        let mut profiles = BTreeMap::new();

        profiles.insert(
            Category::PcPart,
            CategoryProfile::new(
                "电脑配件",
                &[
                    ("3dmark_ts", "3DMark Time Spy", 0.35),
                    ("fp32_tflops", "FP32 算力", 0.25),
                    ("mem_bw", "显存带宽", 0.15),
                    ("vram", "显存容量", 0.10),
                    ("tbp", "功耗(TBP)", 0.15),
                ],
            ),
        );
        profiles.insert(
            Category::Cpu,
            CategoryProfile::new(
                "CPU",
                &[("page_loads", "网页打开数", 0.7), ("year", "年份", 0.3)],
            ),
        );
        profiles.insert(
            Category::Phone,
            CategoryProfile::new(
                "手机",
                &[
                    ("geek6_sc", "Geekbench 6 单核", 0.30),
                    ("geek6_mc", "Geekbench 6 多核", 0.30),
                    ("gpu_score", "GPU 跑分", 0.20),
                    ("battery", "电池容量", 0.10),
                    ("weight", "重量", 0.10),
                ],
            ),
        );
        profiles.insert(
            Category::Car,
            CategoryProfile::new("汽车", &[("sales", "销量", 0.60), ("price", "价格", 0.40)]),
        );

        Self { profiles }
    }

    /// @ai:intent Insert or replace the profile of a category after validating it
    /// @ai:effects state:write
    pub fn insert(
        &mut self,
        category: Category,
        profile: CategoryProfile,
    ) -> Result<Option<CategoryProfile>> {
        profile.validate(&category)?;
        Ok(self.profiles.insert(category, profile))
    }

    /// @ai:intent Apply overrides on top of this set, replacing whole profiles
    /// @ai:effects pure
    pub fn with_overrides<I>(mut self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Category, CategoryProfile)>,
    {
        for (category, profile) in overrides {
            self.insert(category, profile)?;
        }
        Ok(self)
    }

    /// @ai:intent Profile for a category, if any
    /// @ai:effects pure
    pub fn get(&self, category: &Category) -> Option<&CategoryProfile> {
        self.profiles.get(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, &CategoryProfile)> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles_are_valid() {
        let set = ProfileSet::builtin();
        assert_eq!(set.len(), 4);
        for (category, profile) in set.iter() {
            profile.validate(category).unwrap();
        }
        assert!(set.get(&Category::Electronics).is_none());
    }

    #[test]
    fn test_builtin_profile_order() {
        let set = ProfileSet::builtin();
        let keys: Vec<_> = set.get(&Category::Car).unwrap().keys().collect();
        assert_eq!(keys, vec!["sales", "price"]);
    }

    #[test]
    fn test_rejects_non_positive_weight() {
        let profile = CategoryProfile::new("x", &[("a", "A", 0.0)]);
        assert!(matches!(
            profile.validate(&Category::Phone),
            Err(Error::InvalidProfile { .. })
        ));

        let profile = CategoryProfile::new("x", &[("a", "A", f64::NAN)]);
        assert!(profile.validate(&Category::Phone).is_err());
    }

    #[test]
    fn test_rejects_duplicate_keys_and_empty_profiles() {
        let profile = CategoryProfile::new("x", &[("a", "A", 1.0), ("a", "A again", 2.0)]);
        assert!(profile.validate(&Category::Phone).is_err());

        let profile = CategoryProfile::new("x", &[]);
        assert!(profile.validate(&Category::Phone).is_err());
    }

    #[test]
    fn test_overrides_replace_and_add() {
        let set = ProfileSet::builtin()
            .with_overrides([
                (
                    Category::Car,
                    CategoryProfile::new("汽车", &[("range", "续航", 1.0)]),
                ),
                (
                    Category::Electronics,
                    CategoryProfile::new("电子产品", &[("rating", "评分", 2.0)]),
                ),
            ])
            .unwrap();

        assert_eq!(set.len(), 5);
        let keys: Vec<_> = set.get(&Category::Car).unwrap().keys().collect();
        assert_eq!(keys, vec!["range"]);
    }
}
