//! @ai:module:intent JSON export of a comparison
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter, JsonReporterTrait
//! @ai:module:stateless true

use anyhow::{Context, Result};
use arena_engine::ComparisonResult;
use serde::Serialize;
use std::path::Path;

/// @ai:intent Trait for JSON report generation
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Write the comparison as pretty JSON
    fn generate(&self, result: &ComparisonResult, output_path: &Path) -> Result<()>;
}

/// @ai:intent Comparison plus export metadata
#[derive(Serialize)]
struct JsonExport<'a> {
    generated_at: String,
    #[serde(flatten)]
    comparison: &'a ComparisonResult,
}

/// @ai:intent Writes comparison results as JSON files
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:effects fs:write
    fn generate(&self, result: &ComparisonResult, output_path: &Path) -> Result<()> {
        let export = JsonExport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            comparison: result,
        };
        let json = serde_json::to_string_pretty(&export)?;
        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_engine::{build_stats, compare, Category, CompareOptions, Metric, Product, ProfileSet};
    use tempfile::TempDir;

    #[test]
    fn test_generate_json_report() {
        let products = vec![
            Product::new("a", Category::Cpu, "Chip A")
                .with_metric(Metric::new("page_loads", "页面加载", 120.0)),
            Product::new("b", Category::Cpu, "Chip B")
                .with_metric(Metric::new("page_loads", "页面加载", 80.0)),
        ];
        let result = compare(
            &build_stats(&products),
            &ProfileSet::builtin(),
            &products[0],
            &products[1],
            CompareOptions::default(),
        );

        let temp = TempDir::new().unwrap();
        let output = temp.path().join("comparison.json");
        JsonReporter::new().generate(&result, &output).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert!(value["generated_at"].is_string());
        assert_eq!(value["score_a"], 100);
        assert_eq!(value["verdict"]["kind"], "a_leads");
    }
}
