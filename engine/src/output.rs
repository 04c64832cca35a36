//! @ai:module:intent Format comparisons, scores and statistics as text or JSON
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, TextRenderer, JsonRenderer, format_comparison, format_breakdown, format_stats, to_json
//! @ai:module:depends_on compare, scorer, stats, render
//! @ai:module:stateless true

use crate::compare::{ComparisonResult, MetricRow, Side, Verdict};
use crate::model::{Product, PLACEHOLDER};
use crate::render::Renderable;
use crate::scorer::ScoreBreakdown;
use crate::stats::StatsTable;
use colored::Colorize;
use serde::Serialize;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Terminal renderer with colored highlights
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

/// @ai:intent JSON renderer for the plain comparison data
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl Renderable for TextRenderer {
    type Output = String;

    fn render_comparison(&self, result: &ComparisonResult) -> String {
        format_comparison_text(result)
    }
}

impl Renderable for JsonRenderer {
    type Output = String;

    fn render_comparison(&self, result: &ComparisonResult) -> String {
        to_json(result, self.pretty)
    }
}

/// @ai:intent Format a comparison as a string
/// @ai:effects pure
pub fn format_comparison(result: &ComparisonResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => TextRenderer.render_comparison(result),
        OutputFormat::Json => JsonRenderer { pretty: false }.render_comparison(result),
        OutputFormat::JsonPretty => JsonRenderer { pretty: true }.render_comparison(result),
    }
}

/// @ai:intent Format a comparison as human-readable text
/// @ai:effects pure
fn format_comparison_text(result: &ComparisonResult) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} vs {}\n",
        result.a.caption().cyan().bold(),
        result.b.caption().magenta().bold()
    ));
    output.push_str(&format!("{}\n\n", result.subtitle().dimmed()));

    for side in [Side::A, Side::B] {
        let card = result.card(side);
        output.push_str(&format!("  [{}] {}\n", side, card.name.bold()));
        if !card.description.is_empty() {
            output.push_str(&format!("      {}\n", card.description.dimmed()));
        }
        for row in &card.rows {
            output.push_str(&format!("      {}: {}\n", row.key, row.value));
        }
    }

    output.push('\n');
    output.push_str(&format!(
        "Score  A: {}  B: {}\n",
        result.score_text(Side::A).bold(),
        result.score_text(Side::B).bold()
    ));

    let verdict = result.verdict.to_string();
    let verdict = match result.verdict {
        Verdict::ALeads(_) | Verdict::BLeads(_) => verdict.green().bold(),
        Verdict::Tied => verdict.yellow().bold(),
        Verdict::InsufficientCoreMetrics | Verdict::CrossCategory => verdict.dimmed(),
    };
    output.push_str(&format!("Verdict: {}\n\n", verdict));

    output.push_str(&format!(
        "Metrics ({}, {}):\n",
        result.rows.len(),
        if result.show_raw { "raw values" } else { "normalized" }
    ));

    for row in &result.rows {
        output.push_str(&format_row_text(row, result.show_raw));
    }

    output
}

/// @ai:intent Format one metric row with both sides and normalized hints
/// @ai:effects pure
fn format_row_text(row: &MetricRow, show_raw: bool) -> String {
    let mut line = format!("  {}", row.label.bold());
    if !row.unit.is_empty() {
        line.push_str(&format!(" ({})", row.unit.dimmed()));
    }
    line.push('\n');

    for side in [Side::A, Side::B] {
        let hint = row
            .normalized(side)
            .map(|n| format!("normalized {}", n))
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        line.push_str(&format!(
            "    {}: {:<16} {}\n",
            side,
            row.display(side, show_raw),
            hint.dimmed()
        ));
    }

    line
}

/// @ai:intent Format a product's score breakdown
/// @ai:effects pure
pub fn format_breakdown(
    product: &Product,
    breakdown: Option<&ScoreBreakdown>,
    format: OutputFormat,
) -> String {
    #[derive(Serialize)]
    struct ScoreView<'a> {
        id: &'a str,
        name: &'a str,
        category: &'a str,
        score: Option<i64>,
        breakdown: Option<&'a ScoreBreakdown>,
    }

    let view = ScoreView {
        id: &product.id,
        name: &product.name,
        category: product.category.as_str(),
        score: breakdown.map(|b| b.score),
        breakdown,
    };

    match format {
        OutputFormat::Json => to_json(&view, false),
        OutputFormat::JsonPretty => to_json(&view, true),
        OutputFormat::Text => format_breakdown_text(product, breakdown),
    }
}

fn format_breakdown_text(product: &Product, breakdown: Option<&ScoreBreakdown>) -> String {
    let mut output = format!(
        "{} ({})\n",
        product.name.bold(),
        product.category.label()
    );

    let Some(breakdown) = breakdown else {
        output.push_str(&format!(
            "  Score: {} {}\n",
            PLACEHOLDER,
            "(no profile or no usable core metrics)".dimmed()
        ));
        return output;
    };

    output.push_str(&format!("  Score: {}\n", breakdown.score.to_string().green().bold()));
    for c in &breakdown.contributions {
        output.push_str(&format!(
            "    {:<20} {:>4}  weight {:.2}\n",
            c.label, c.normalized, c.weight
        ));
    }
    if !breakdown.skipped.is_empty() {
        output.push_str(&format!(
            "  {} {}\n",
            "skipped:".yellow(),
            breakdown.skipped.join(", ")
        ));
    }

    output
}

/// @ai:intent Format the statistics table
/// @ai:effects pure
pub fn format_stats(stats: &StatsTable, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(stats, false),
        OutputFormat::JsonPretty => to_json(stats, true),
        OutputFormat::Text => format_stats_text(stats),
    }
}

fn format_stats_text(stats: &StatsTable) -> String {
    let mut output = String::new();

    for category in stats.categories() {
        output.push_str(&format!("{} ({})\n", category.label().bold(), category));
        if let Some(ranges) = stats.category(category) {
            for (key, range) in ranges {
                output.push_str(&format!(
                    "  {:<16} min {:<12} max {}\n",
                    key.cyan(),
                    range.min,
                    range.max
                ));
            }
        }
    }

    output.push_str(&format!("\n{} metric ranges\n", stats.metric_count()));
    output
}

/// @ai:intent Format any serializable value as JSON
/// @ai:effects pure
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(value).unwrap_or_default()
    } else {
        serde_json::to_string(value).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::compare::{compare, CompareOptions};
    use crate::model::Metric;
    use crate::profile::ProfileSet;
    use crate::stats::build_stats;

    fn result() -> ComparisonResult {
        let products = vec![
            Product::new("a", Category::Car, "Car A")
                .with_metric(Metric::new("sales", "销量", 10.0)),
            Product::new("b", Category::Car, "Car B")
                .with_metric(Metric::new("sales", "销量", 30.0)),
        ];
        let stats = build_stats(&products);
        compare(
            &stats,
            &ProfileSet::builtin(),
            &products[0],
            &products[1],
            CompareOptions::default(),
        )
    }

    #[test]
    fn test_text_contains_scores_and_verdict() {
        colored::control::set_override(false);
        let text = format_comparison(&result(), OutputFormat::Text);

        assert!(text.contains("Car A（汽车） vs Car B（汽车）"));
        assert!(text.contains("Score  A: 0  B: 100"));
        assert!(text.contains("Verdict: B leads +100"));
        assert!(text.contains("normalized 100"));
    }

    #[test]
    fn test_json_is_parseable() {
        let json = format_comparison(&result(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["score_b"], 100);
        assert_eq!(value["verdict"]["kind"], "b_leads");
        assert_eq!(value["verdict"]["margin"], 100);
        assert_eq!(value["rows"][0]["key"], "sales");
    }

    #[test]
    fn test_stats_json_is_keyed_by_category() {
        let products = vec![
            Product::new("a", Category::Car, "A").with_metric(Metric::new("sales", "销量", 10.0)),
        ];
        let json = format_stats(&build_stats(&products), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["car"]["sales"]["min"], 10.0);
    }

    #[test]
    fn test_breakdown_without_score() {
        colored::control::set_override(false);
        let product = Product::new("x", Category::Electronics, "Gadget");
        let text = format_breakdown(&product, None, OutputFormat::Text);
        assert!(text.contains("Score: —"));
    }
}
