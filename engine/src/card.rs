//! @ai:module:intent Summary card view-model shown above a comparison
//! @ai:module:layer domain
//! @ai:module:public_api ProductCard, CardRow, build_card
//! @ai:module:depends_on model, profile
//! @ai:module:stateless true

use crate::category::Category;
use crate::model::{format_value, Metric, Product};
use crate::profile::ProfileSet;
use serde::Serialize;

/// Metrics listed on a card when the category has no profile.
pub const CARD_FALLBACK_METRICS: usize = 6;

/// @ai:intent One key/value line on a product card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardRow {
    pub key: String,
    pub value: String,
}

/// @ai:intent Identity and headline facts of a product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub rows: Vec<CardRow>,
}

impl ProductCard {
    /// @ai:intent Short "name（category）" caption used for picked-product hints
    /// @ai:effects pure
    pub fn caption(&self) -> String {
        format!("{}（{}）", self.name, self.category.label())
    }
}

/// @ai:intent Build a card: category, brand, year, then the profile's core metrics the product has
/// @ai:effects pure
/// @ai:edge_cases without a profile the first six metrics are shown instead
pub fn build_card(product: &Product, profiles: &ProfileSet) -> ProductCard {
    let mut rows = vec![CardRow {
        key: "品类".to_string(),
        value: product.category.label().to_string(),
    }];

    if let Some(brand) = product.brand.as_deref().filter(|b| !b.is_empty()) {
        rows.push(CardRow {
            key: "品牌".to_string(),
            value: brand.to_string(),
        });
    }

    if let Some(year) = product.year {
        rows.push(CardRow {
            key: "年份".to_string(),
            value: year.to_string(),
        });
    }

    let metric_row = |m: &Metric| CardRow {
        key: m.display_label().to_string(),
        value: format_value(&m.value, m.unit().unwrap_or("")),
    };

    match profiles.get(&product.category) {
        Some(profile) => rows.extend(
            profile
                .keys()
                .filter_map(|key| product.metric(key))
                .map(metric_row),
        ),
        None => rows.extend(
            product
                .metrics
                .iter()
                .take(CARD_FALLBACK_METRICS)
                .map(metric_row),
        ),
    }

    ProductCard {
        id: product.id.clone(),
        name: product.name.clone(),
        category: product.category.clone(),
        description: product.desc.clone().unwrap_or_default(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_card_lists_profile_metrics_in_profile_order() {
        let mut product = Product::new("c1", Category::Car, "Model Y")
            .with_metric(Metric::new("price", "价格", 26.4).with_unit("万元"))
            .with_metric(Metric::new("range", "续航", 545.0).with_unit("km"))
            .with_metric(Metric::new("sales", "销量", 45000.0));
        product.brand = Some("Tesla".to_string());
        product.year = Some(2024);

        let card = build_card(&product, &ProfileSet::builtin());
        let keys: Vec<_> = card.rows.iter().map(|r| r.key.as_str()).collect();

        assert_eq!(keys, vec!["品类", "品牌", "年份", "销量", "价格"]);
        assert_eq!(card.rows[4].value, "26.4 万元");
        assert_eq!(card.caption(), "Model Y（汽车）");
    }

    #[test]
    fn test_card_without_profile_shows_first_six_metrics() {
        let mut product = Product::new("e1", Category::Electronics, "Gadget");
        for i in 0..8 {
            product = product.with_metric(Metric::new(&format!("m{}", i), "", i as f64));
        }

        let card = build_card(&product, &ProfileSet::builtin());
        assert_eq!(card.rows.len(), 1 + CARD_FALLBACK_METRICS);
        assert_eq!(card.rows[1].key, "m0");
    }
}
