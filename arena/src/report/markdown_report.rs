//! @ai:module:intent Markdown rendering and export of a comparison
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownReporter, MarkdownReporterTrait
//! @ai:module:stateless true

use anyhow::{Context, Result};
use arena_engine::{ComparisonResult, MetricRow, ProductCard, Renderable, Side, PLACEHOLDER};
use std::path::Path;

/// @ai:intent Trait for Markdown report generation
pub trait MarkdownReporterTrait: Send + Sync {
    /// @ai:intent Write the comparison as a Markdown document
    fn generate(&self, result: &ComparisonResult, output_path: &Path) -> Result<()>;
}

/// @ai:intent Renders comparisons as Markdown tables
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// @ai:intent Create a new Markdown reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Escape characters that would break a table cell
    /// @ai:effects pure
    fn cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    /// @ai:effects pure
    fn generate_header(result: &ComparisonResult) -> String {
        let mut output = format!("# {} vs {}\n\n", result.a.caption(), result.b.caption());
        output.push_str(&format!("_{}_\n\n", result.subtitle()));
        output
    }

    /// @ai:intent Score table and verdict line
    /// @ai:effects pure
    fn generate_scores(result: &ComparisonResult) -> String {
        let mut output = String::from("## Performance Score\n\n");
        output.push_str("| | A | B |\n|---|---|---|\n");
        output.push_str(&format!(
            "| Product | {} | {} |\n",
            Self::cell(&result.a.name),
            Self::cell(&result.b.name)
        ));
        output.push_str(&format!(
            "| Score | {} | {} |\n\n",
            result.score_text(Side::A),
            result.score_text(Side::B)
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", result.verdict));
        if result.advisory {
            output.push_str("> Cross-category comparison, for reference only.\n\n");
        }
        output
    }

    /// @ai:effects pure
    fn generate_card(side: Side, card: &ProductCard) -> String {
        let mut output = format!("### {}: {}\n\n", side, card.name);
        if !card.description.is_empty() {
            output.push_str(&format!("{}\n\n", card.description));
        }
        for row in &card.rows {
            output.push_str(&format!("- **{}:** {}\n", row.key, row.value));
        }
        output.push('\n');
        output
    }

    /// @ai:intent Metric table honoring the raw/normalized display toggle
    /// @ai:effects pure
    fn generate_metrics(result: &ComparisonResult) -> String {
        let mode = if result.show_raw { "raw values" } else { "normalized 0-100" };
        let mut output = format!("## Metrics ({})\n\n", mode);

        if result.rows.is_empty() {
            output.push_str("No metrics to compare.\n");
            return output;
        }

        output.push_str("| Metric | Unit | A | B |\n|--------|------|---|---|\n");
        for row in &result.rows {
            output.push_str(&Self::metric_line(row, result.show_raw));
        }
        output
    }

    fn metric_line(row: &MetricRow, show_raw: bool) -> String {
        let unit = if row.unit.is_empty() { PLACEHOLDER } else { row.unit.as_str() };
        format!(
            "| {} | {} | {} | {} |\n",
            Self::cell(&row.label),
            Self::cell(unit),
            Self::cell(&row.display(Side::A, show_raw)),
            Self::cell(&row.display(Side::B, show_raw))
        )
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderable for MarkdownReporter {
    type Output = String;

    fn render_comparison(&self, result: &ComparisonResult) -> String {
        let mut output = Self::generate_header(result);
        output.push_str(&Self::generate_scores(result));
        output.push_str("## Products\n\n");
        output.push_str(&Self::generate_card(Side::A, &result.a));
        output.push_str(&Self::generate_card(Side::B, &result.b));
        output.push_str(&Self::generate_metrics(result));
        output
    }
}

impl MarkdownReporterTrait for MarkdownReporter {
    /// @ai:effects fs:write
    fn generate(&self, result: &ComparisonResult, output_path: &Path) -> Result<()> {
        std::fs::write(output_path, self.render_comparison(result))
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(())
    }
}
