//! @ai:module:intent Chart generation for comparisons: metric bars and core-metric radar
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartGenerator, ChartGeneratorTrait, bar_data, radar_series, radar_points
//! @ai:module:stateless true

use anyhow::Result;
use arena_engine::{ComparisonResult, RadarSeries, Side};
use plotters::prelude::*;
use std::f64::consts::PI;
use std::path::Path;

const RADAR_RINGS: [f64; 4] = [25.0, 50.0, 75.0, 100.0];

/// @ai:intent Trait for chart generation
pub trait ChartGeneratorTrait: Send + Sync {
    /// @ai:intent Generate every chart the comparison supports; returns the file names written
    fn generate_all(&self, result: &ComparisonResult, output_dir: &Path) -> Result<Vec<String>>;
}

/// @ai:intent Generates PNG charts from comparison results
pub struct ChartGenerator;

/// @ai:intent Rows that carry a normalized score on at least one side, as (label, a, b)
/// @ai:effects pure
pub fn bar_data(result: &ComparisonResult) -> Vec<(String, i64, i64)> {
    result
        .rows
        .iter()
        .filter(|row| row.a_normalized.is_some() || row.b_normalized.is_some())
        .map(|row| (row.label.clone(), row.fill(Side::A), row.fill(Side::B)))
        .collect()
}

/// @ai:intent Radar series worth drawing: same-category comparisons with at least one core axis
/// @ai:effects pure
/// @ai:edge_cases two axes draw as a vertical line, one axis as a single spoke
pub fn radar_series(result: &ComparisonResult) -> Option<&RadarSeries> {
    result.radar.as_ref().filter(|r| !r.labels.is_empty())
}

/// @ai:intent Polygon vertices for radar values on a unit circle, first axis pointing up
/// @ai:effects pure
/// @ai:example ([100, 50]) -> [(0, 1), (0, -0.5)]
pub fn radar_points(values: &[i64]) -> Vec<(f64, f64)> {
    let n = values.len();
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let angle = axis_angle(i, n);
            let r = *value as f64 / 100.0;
            (r * angle.cos(), r * angle.sin())
        })
        .collect()
}

fn axis_angle(index: usize, axes: usize) -> f64 {
    PI / 2.0 - 2.0 * PI * index as f64 / axes as f64
}

impl ChartGenerator {
    /// @ai:intent Create a new chart generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Grouped bar chart of normalized metric scores
    /// @ai:effects fs:write
    fn generate_bar_chart(&self, result: &ComparisonResult, output_path: &Path) -> Result<()> {
        let data = bar_data(result);
        let root = BitMapBackend::new(output_path, (900, 500)).into_drawing_area();
        root.fill(&WHITE)?;

        let low = data.iter().map(|(_, a, b)| (*a).min(*b)).min().unwrap_or(0).min(0) as f64;
        let high = data.iter().map(|(_, a, b)| (*a).max(*b)).max().unwrap_or(100).max(100) as f64;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("{} vs {}", result.a.name, result.b.name),
                ("sans-serif", 25),
            )
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0f64..data.len().max(1) as f64, low..high)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(data.len().max(1))
            .y_desc("Normalized score")
            .x_label_formatter(&|x| {
                data.get(x.floor() as usize)
                    .map(|(label, _, _)| label.clone())
                    .unwrap_or_default()
            })
            .draw()?;

        chart
            .draw_series(data.iter().enumerate().map(|(i, (_, a, _))| {
                let x = i as f64;
                Rectangle::new([(x + 0.1, 0.0), (x + 0.48, *a as f64)], BLUE.mix(0.7).filled())
            }))?
            .label(result.a.name.clone())
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], BLUE.mix(0.7).filled()));

        chart
            .draw_series(data.iter().enumerate().map(|(i, (_, _, b))| {
                let x = i as f64;
                Rectangle::new([(x + 0.52, 0.0), (x + 0.9, *b as f64)], MAGENTA.mix(0.7).filled())
            }))?
            .label(result.b.name.clone())
            .legend(|(x, y)| {
                Rectangle::new([(x, y - 5), (x + 20, y + 5)], MAGENTA.mix(0.7).filled())
            });

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }

    /// @ai:intent Radar chart of the core profile metrics
    /// @ai:effects fs:write
    fn generate_radar_chart(
        &self,
        result: &ComparisonResult,
        radar: &RadarSeries,
        output_path: &Path,
    ) -> Result<()> {
        let root = BitMapBackend::new(output_path, (600, 600)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(result.a.category.label().to_string(), ("sans-serif", 25))
            .margin(30)
            .build_cartesian_2d(-1.3f64..1.3f64, -1.3f64..1.3f64)?;

        let axes = radar.labels.len();
        for ring in RADAR_RINGS {
            let mut outline = radar_points(&vec![ring as i64; axes]);
            if let Some(first) = outline.first().copied() {
                outline.push(first);
            }
            chart.draw_series(std::iter::once(PathElement::new(outline, BLACK.mix(0.2))))?;
        }

        for (i, label) in radar.labels.iter().enumerate() {
            let angle = axis_angle(i, axes);
            let tip = (angle.cos(), angle.sin());
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(0.0, 0.0), tip],
                BLACK.mix(0.2),
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                label.clone(),
                (tip.0 * 1.12 - 0.1, tip.1 * 1.12 + 0.03),
                ("sans-serif", 15),
            )))?;
        }

        for (values, color, name) in [
            (&radar.a, BLUE, &result.a.name),
            (&radar.b, MAGENTA, &result.b.name),
        ] {
            chart
                .draw_series(std::iter::once(Polygon::new(
                    radar_points(values),
                    color.mix(0.3).filled(),
                )))?
                .label(name.clone())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.mix(0.7).filled())
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

impl Default for ChartGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartGeneratorTrait for ChartGenerator {
    /// @ai:intent Bars always; radar only for same-category comparisons with a profile
    /// @ai:effects fs:write
    fn generate_all(&self, result: &ComparisonResult, output_dir: &Path) -> Result<Vec<String>> {
        std::fs::create_dir_all(output_dir)?;

        let mut generated = Vec::new();

        self.generate_bar_chart(result, &output_dir.join("bars.png"))?;
        generated.push("bars.png".to_string());

        match radar_series(result) {
            Some(radar) => {
                self.generate_radar_chart(result, radar, &output_dir.join("radar.png"))?;
                generated.push("radar.png".to_string());
            }
            None => tracing::debug!("No radar chart: cross-category or no core metrics"),
        }

        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_engine::{build_stats, compare, Category, CompareOptions, Metric, Product, ProfileSet};

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_radar_points_start_at_top_and_go_clockwise() {
        let points = radar_points(&[100, 50, 0, 100]);

        assert!(close(points[0], (0.0, 1.0)));
        assert!(close(points[1], (0.5, 0.0)));
        assert!(close(points[2], (0.0, 0.0)));
        assert!(close(points[3], (-1.0, 0.0)));
    }

    #[test]
    fn test_bar_data_skips_rows_without_scores() {
        let a =
            Product::new("a", Category::Car, "A").with_metric(Metric::new("sales", "销量", 10.0));
        let b = Product::new("b", Category::Phone, "B")
            .with_metric(Metric::new("weight", "重量", 200.0));
        let products = vec![a, b];
        let cross = compare(
            &build_stats(&products),
            &ProfileSet::builtin(),
            &products[0],
            &products[1],
            CompareOptions::default(),
        );

        assert!(bar_data(&cross).is_empty());
    }

    #[test]
    fn test_two_axis_profile_still_gets_a_radar() {
        let products = vec![
            Product::new("a", Category::Car, "A")
                .with_metric(Metric::new("sales", "销量", 10.0))
                .with_metric(Metric::new("price", "价格", 30.0)),
            Product::new("b", Category::Car, "B")
                .with_metric(Metric::new("sales", "销量", 40.0))
                .with_metric(Metric::new("price", "价格", 20.0)),
        ];
        let result = compare(
            &build_stats(&products),
            &ProfileSet::builtin(),
            &products[0],
            &products[1],
            CompareOptions::default(),
        );

        let radar = radar_series(&result).unwrap();
        assert_eq!(radar.labels.len(), 2);

        let points = radar_points(&radar.b);
        assert_eq!(points.len(), 2);
        assert!(close(points[0], (0.0, 1.0)));
    }

    #[test]
    fn test_cross_category_has_no_radar() {
        let a =
            Product::new("a", Category::Car, "A").with_metric(Metric::new("sales", "销量", 10.0));
        let b = Product::new("b", Category::Phone, "B")
            .with_metric(Metric::new("weight", "重量", 200.0));
        let products = vec![a, b];
        let cross = compare(
            &build_stats(&products),
            &ProfileSet::builtin(),
            &products[0],
            &products[1],
            CompareOptions::default(),
        );

        assert!(radar_series(&cross).is_none());
    }

    #[test]
    fn test_bar_data_uses_normalized_fill() {
        let products = vec![
            Product::new("a", Category::Car, "A").with_metric(Metric::new("sales", "销量", 10.0)),
            Product::new("b", Category::Car, "B").with_metric(Metric::new("sales", "销量", 40.0)),
        ];
        let result = compare(
            &build_stats(&products),
            &ProfileSet::builtin(),
            &products[0],
            &products[1],
            CompareOptions::default(),
        );

        assert_eq!(bar_data(&result), vec![("销量".to_string(), 0, 100)]);
    }
}
