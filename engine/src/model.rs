//! @ai:module:intent Define catalog records: products and their metrics
//! @ai:module:layer domain
//! @ai:module:public_api Product, Metric, MetricValue, PLACEHOLDER
//! @ai:module:stateless true

use crate::category::Category;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Shown wherever a value, score or metric is not available.
pub const PLACEHOLDER: &str = "—";

/// @ai:intent Raw metric value as it appears in the catalog
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
    /// Booleans, arrays and objects; kept for display, never numeric
    Other(Value),
}

impl MetricValue {
    /// @ai:intent Numeric view of the value; None for non-numeric or non-finite values
    /// @ai:effects pure
    /// @ai:example (Text(" 12.5 ")) -> Some(12.5)
    /// @ai:example (Text("N/A")) -> None
    /// @ai:edge_cases empty or whitespace-only text is non-numeric
    pub fn as_finite(&self) -> Option<f64> {
        let value = match self {
            MetricValue::Number(value) => *value,
            MetricValue::Text(text) => text.trim().parse::<f64>().ok()?,
            MetricValue::Missing | MetricValue::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(value) => write!(f, "{}", value),
            MetricValue::Text(text) => write!(f, "{}", text),
            MetricValue::Missing => write!(f, "{}", PLACEHOLDER),
            MetricValue::Other(value) => write!(f, "{}", value),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

impl From<&str> for MetricValue {
    fn from(text: &str) -> Self {
        MetricValue::Text(text.to_string())
    }
}

/// @ai:intent A single measured property of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub key: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub label: String,
    #[serde(default)]
    pub value: MetricValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Lower raw values score higher only when this is literally false
    #[serde(default = "default_higher_better", deserialize_with = "unless_false")]
    pub higher_better: bool,
}

fn default_higher_better() -> bool {
    true
}

fn unless_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value != Value::Bool(false))
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Year as a number or numeric text; anything else is treated as absent.
fn lenient_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    let year = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    Ok(year)
}

impl Metric {
    /// @ai:intent Create a higher-is-better metric without a unit
    pub fn new(key: &str, label: &str, value: impl Into<MetricValue>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            value: value.into(),
            unit: None,
            higher_better: true,
        }
    }

    /// @ai:intent Attach a display unit
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    /// @ai:intent Mark the metric as lower-is-better
    pub fn lower_is_better(mut self) -> Self {
        self.higher_better = false;
        self
    }

    /// @ai:intent Label to display, falling back to the key
    /// @ai:effects pure
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.key
        } else {
            &self.label
        }
    }

    /// @ai:intent Unit if one is set and non-empty
    /// @ai:effects pure
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref().filter(|unit| !unit.is_empty())
    }
}

/// @ai:intent Render a raw value followed by its unit
/// @ai:effects pure
/// @ai:example (Number(24), "GB") -> "24 GB"
pub fn format_value(value: &MetricValue, unit: &str) -> String {
    if unit.is_empty() {
        value.to_string()
    } else {
        format!("{} {}", value, unit)
    }
}

/// @ai:intent A catalog item that can be scored and compared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub category: Category,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "lenient_year", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// Search-only alternate names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

impl Product {
    /// @ai:intent Create a product with no optional fields and no metrics
    pub fn new(id: &str, category: Category, name: &str) -> Self {
        Self {
            id: id.to_string(),
            category,
            name: name.to_string(),
            brand: None,
            year: None,
            desc: None,
            aliases: Vec::new(),
            keywords: Vec::new(),
            metrics: Vec::new(),
        }
    }

    /// @ai:intent Append a metric
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metrics.push(metric);
        self
    }

    /// @ai:intent Look up a metric by key
    /// @ai:effects pure
    pub fn metric(&self, key: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_finite_accepts_numbers_and_numeric_text() {
        assert_eq!(MetricValue::Number(3.5).as_finite(), Some(3.5));
        assert_eq!(MetricValue::from(" 12.5 ").as_finite(), Some(12.5));
        assert_eq!(MetricValue::from("N/A").as_finite(), None);
        assert_eq!(MetricValue::from("").as_finite(), None);
        assert_eq!(MetricValue::from("inf").as_finite(), None);
        assert_eq!(MetricValue::Number(f64::NAN).as_finite(), None);
        assert_eq!(MetricValue::Missing.as_finite(), None);
    }

    #[test]
    fn test_metric_deserializes_catalog_shape() {
        let json =
            r#"{"key":"tbp","label":"功耗(TBP)","value":320,"unit":"W","higherBetter":false}"#;
        let metric: Metric = serde_json::from_str(json).unwrap();

        assert_eq!(metric.value, MetricValue::Number(320.0));
        assert_eq!(metric.unit(), Some("W"));
        assert!(!metric.higher_better);
    }

    #[test]
    fn test_metric_defaults() {
        let json = r#"{"key":"vram","value":"N/A"}"#;
        let metric: Metric = serde_json::from_str(json).unwrap();

        assert!(metric.higher_better);
        assert_eq!(metric.display_label(), "vram");
        assert_eq!(metric.value, MetricValue::from("N/A"));

        let json = r#"{"key":"vram","value":null}"#;
        let metric: Metric = serde_json::from_str(json).unwrap();
        assert_eq!(metric.value, MetricValue::Missing);
    }

    #[test]
    fn test_unexpected_value_types_are_non_numeric() {
        let json = r#"{"key":"hdr","value":true}"#;
        let metric: Metric = serde_json::from_str(json).unwrap();

        assert_eq!(metric.value, MetricValue::Other(Value::Bool(true)));
        assert_eq!(metric.value.as_finite(), None);
        assert_eq!(metric.value.to_string(), "true");

        let json = r#"{"key":"ports","value":[1,2]}"#;
        let metric: Metric = serde_json::from_str(json).unwrap();
        assert_eq!(metric.value.as_finite(), None);
    }

    #[test]
    fn test_only_literal_false_inverts_direction() {
        for (raw, expected) in [
            ("false", false),
            ("true", true),
            ("null", true),
            ("0", true),
            ("\"false\"", true),
        ] {
            let json = format!(r#"{{"key":"tbp","value":320,"higherBetter":{}}}"#, raw);
            let metric: Metric = serde_json::from_str(&json).unwrap();
            assert_eq!(metric.higher_better, expected, "higherBetter: {}", raw);
        }
    }

    #[test]
    fn test_null_or_numeric_label() {
        let metric: Metric = serde_json::from_str(r#"{"key":"vram","label":null}"#).unwrap();
        assert_eq!(metric.display_label(), "vram");

        let metric: Metric = serde_json::from_str(r#"{"key":"vram","label":5}"#).unwrap();
        assert_eq!(metric.label, "5");
    }

    #[test]
    fn test_year_accepts_numbers_and_numeric_text() {
        let parse = |year: &str| {
            let json = format!(r#"{{"id":"p","category":"phone","name":"P","year":{}}}"#, year);
            serde_json::from_str::<Product>(&json).unwrap().year
        };

        assert_eq!(parse("2023"), Some(2023));
        assert_eq!(parse(r#""2023""#), Some(2023));
        assert_eq!(parse(r#"" 2024 ""#), Some(2024));
        assert_eq!(parse(r#""soon""#), None);
        assert_eq!(parse("null"), None);
        assert_eq!(parse("2023.5"), None);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&MetricValue::Number(24.0), "GB"), "24 GB");
        assert_eq!(format_value(&MetricValue::Number(1.5), ""), "1.5");
        assert_eq!(format_value(&MetricValue::from("N/A"), "GB"), "N/A GB");
    }

    #[test]
    fn test_product_metric_lookup() {
        let product = Product::new("p1", Category::Phone, "Phone One")
            .with_metric(Metric::new("battery", "电池容量", 5000.0).with_unit("mAh"));

        assert!(product.metric("battery").is_some());
        assert!(product.metric("weight").is_none());
    }
}
