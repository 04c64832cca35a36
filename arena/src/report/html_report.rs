//! @ai:module:intent Standalone HTML page for a comparison with score bars
//! @ai:module:layer infrastructure
//! @ai:module:public_api HtmlReporter, HtmlReporterTrait
//! @ai:module:stateless true

use anyhow::{Context, Result};
use arena_engine::{ComparisonResult, MetricRow, ProductCard, Renderable, Side, Verdict};
use html_escape::encode_text;
use std::path::Path;

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:2em auto;color:#222}\
.cards{display:flex;gap:1em}.card{flex:1;border:1px solid #ddd;border-radius:8px;padding:1em}\
.score{font-size:2em;font-weight:bold}.verdict{margin:1em 0;font-weight:bold}\
.advisory{color:#a60}.row{margin:.6em 0}.track{background:#eee;height:8px;border-radius:4px;margin:2px 0}\
.bar{height:8px;border-radius:4px}.bar.a{background:#3b82f6}.bar.b{background:#ec4899}\
.muted{color:#888}";

/// @ai:intent Trait for HTML report generation
pub trait HtmlReporterTrait: Send + Sync {
    /// @ai:intent Write the comparison as an HTML page
    fn generate(&self, result: &ComparisonResult, output_path: &Path) -> Result<()>;
}

/// @ai:intent Renders comparisons as self-contained HTML
pub struct HtmlReporter;

impl HtmlReporter {
    /// @ai:intent Create a new HTML reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Bar width in percent; scores outside 0-100 are pinned to the track
    /// @ai:effects pure
    pub fn bar_width(row: &MetricRow, side: Side) -> i64 {
        row.fill(side).clamp(0, 100)
    }

    fn render_card(side: Side, card: &ProductCard, score: &str) -> String {
        let mut html = format!(
            "<div class=\"card\"><h2>{}: {}</h2><div class=\"score\">{}</div>",
            side,
            encode_text(&card.name),
            encode_text(score)
        );
        if !card.description.is_empty() {
            html.push_str(&format!("<p class=\"muted\">{}</p>", encode_text(&card.description)));
        }
        html.push_str("<ul>");
        for row in &card.rows {
            html.push_str(&format!(
                "<li><b>{}</b>: {}</li>",
                encode_text(&row.key),
                encode_text(&row.value)
            ));
        }
        html.push_str("</ul></div>");
        html
    }

    fn render_row(row: &MetricRow, show_raw: bool) -> String {
        let mut html = format!("<div class=\"row\"><div>{}", encode_text(&row.label));
        if !row.unit.is_empty() {
            html.push_str(&format!(" <span class=\"muted\">({})</span>", encode_text(&row.unit)));
        }
        html.push_str("</div>");

        for (side, class) in [(Side::A, "a"), (Side::B, "b")] {
            html.push_str(&format!(
                "<div>{}: {}</div><div class=\"track\"><div class=\"bar {}\" style=\"width:{}%\"></div></div>",
                side,
                encode_text(&row.display(side, show_raw)),
                class,
                Self::bar_width(row, side)
            ));
        }

        html.push_str("</div>");
        html
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderable for HtmlReporter {
    type Output = String;

    fn render_comparison(&self, result: &ComparisonResult) -> String {
        let title = format!("{} vs {}", result.a.caption(), result.b.caption());
        let mut html = format!(
            "<!DOCTYPE html>\n<html lang=\"zh\">\n<head><meta charset=\"utf-8\"><title>{}</title><style>{}</style></head>\n<body>\n",
            encode_text(&title),
            STYLE
        );

        html.push_str(&format!("<h1>{}</h1>\n", encode_text(&title)));
        html.push_str(&format!("<p class=\"muted\">{}</p>\n", encode_text(&result.subtitle())));

        html.push_str("<div class=\"cards\">");
        html.push_str(&Self::render_card(Side::A, &result.a, &result.score_text(Side::A)));
        html.push_str(&Self::render_card(Side::B, &result.b, &result.score_text(Side::B)));
        html.push_str("</div>\n");

        let verdict_class = match result.verdict {
            Verdict::CrossCategory => "verdict advisory",
            _ => "verdict",
        };
        html.push_str(&format!(
            "<div class=\"{}\">{}</div>\n",
            verdict_class,
            encode_text(&result.verdict.to_string())
        ));

        html.push_str("<section>\n");
        for row in &result.rows {
            html.push_str(&Self::render_row(row, result.show_raw));
            html.push('\n');
        }
        html.push_str("</section>\n</body>\n</html>\n");
        html
    }
}

impl HtmlReporterTrait for HtmlReporter {
    /// @ai:effects fs:write
    fn generate(&self, result: &ComparisonResult, output_path: &Path) -> Result<()> {
        std::fs::write(output_path, self.render_comparison(result))
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_engine::{build_stats, compare, Category, CompareOptions, Metric, Product, ProfileSet};

    fn result(a: Product, b: Product) -> ComparisonResult {
        let products = vec![a, b];
        compare(
            &build_stats(&products),
            &ProfileSet::builtin(),
            &products[0],
            &products[1],
            CompareOptions::default(),
        )
    }

    #[test]
    fn test_names_are_escaped() {
        let html = HtmlReporter::new().render_comparison(&result(
            Product::new("a", Category::Phone, "<script>alert(1)</script>"),
            Product::new("b", Category::Phone, "Tom & Jerry"),
        ));

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Tom &amp; Jerry"));
    }

    #[test]
    fn test_bars_follow_normalized_scores() {
        let html = HtmlReporter::new().render_comparison(&result(
            Product::new("a", Category::Car, "A").with_metric(Metric::new("sales", "销量", 10.0)),
            Product::new("b", Category::Car, "B").with_metric(Metric::new("sales", "销量", 20.0)),
        ));

        assert!(html.contains("class=\"bar a\" style=\"width:0%\""));
        assert!(html.contains("class=\"bar b\" style=\"width:100%\""));
    }

    #[test]
    fn test_cross_category_is_marked_advisory() {
        let html = HtmlReporter::new().render_comparison(&result(
            Product::new("a", Category::Car, "A"),
            Product::new("b", Category::Phone, "B"),
        ));

        assert!(html.contains("verdict advisory"));
    }

    #[test]
    fn test_bar_width_is_pinned() {
        let row = MetricRow {
            key: "k".to_string(),
            label: "K".to_string(),
            unit: String::new(),
            a: None,
            b: None,
            a_normalized: Some(130),
            b_normalized: Some(-20),
        };

        assert_eq!(HtmlReporter::bar_width(&row, Side::A), 100);
        assert_eq!(HtmlReporter::bar_width(&row, Side::B), 0);
    }
}
