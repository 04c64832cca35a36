//! @ai:module:intent Report generation for comparisons
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportGenerator, JsonReporter, MarkdownReporter, HtmlReporter, ChartGenerator

pub mod charts;
pub mod html_report;
pub mod json_report;
pub mod markdown_report;

pub use charts::{bar_data, radar_points, radar_series, ChartGenerator, ChartGeneratorTrait};
pub use html_report::{HtmlReporter, HtmlReporterTrait};
pub use json_report::{JsonReporter, JsonReporterTrait};
pub use markdown_report::{MarkdownReporter, MarkdownReporterTrait};

use anyhow::Result;
use arena_engine::ComparisonResult;
use std::path::Path;

/// @ai:intent Combined report generator
pub struct ReportGenerator {
    json: JsonReporter,
    markdown: MarkdownReporter,
    html: HtmlReporter,
    charts: ChartGenerator,
}

impl ReportGenerator {
    /// @ai:intent Create a new report generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            json: JsonReporter::new(),
            markdown: MarkdownReporter::new(),
            html: HtmlReporter::new(),
            charts: ChartGenerator::new(),
        }
    }

    /// @ai:intent Write the JSON, Markdown and HTML documents
    /// @ai:effects fs:write
    pub fn generate_documents(
        &self,
        result: &ComparisonResult,
        output_dir: &Path,
    ) -> Result<Vec<String>> {
        std::fs::create_dir_all(output_dir)?;

        self.json.generate(result, &output_dir.join("comparison.json"))?;
        self.markdown.generate(result, &output_dir.join("comparison.md"))?;
        self.html.generate(result, &output_dir.join("comparison.html"))?;

        Ok(vec![
            "comparison.json".to_string(),
            "comparison.md".to_string(),
            "comparison.html".to_string(),
        ])
    }

    /// @ai:intent Generate all reports and charts
    /// @ai:effects fs:write
    pub fn generate_all(
        &self,
        result: &ComparisonResult,
        output_dir: &Path,
    ) -> Result<Vec<String>> {
        let mut generated = self.generate_documents(result, output_dir)?;
        generated.extend(self.charts.generate_all(result, output_dir)?);

        tracing::info!("Reports generated in {}", output_dir.display());
        Ok(generated)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}
