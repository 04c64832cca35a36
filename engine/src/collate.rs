//! @ai:module:intent Chinese-aware label ordering for metric rows and tag lists
//! @ai:module:layer domain
//! @ai:module:public_api compare_labels, sort_labels
//! @ai:module:stateless true

use pinyin::ToPinyin;
use std::cmp::Ordering;

/// One character's position in the zh collation order.
/// Non-Han characters come first, case-folded; Han characters follow by pinyin and tone.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum CollationUnit {
    Other(String),
    Han(&'static str, char),
}

fn collation_key(label: &str) -> Vec<CollationUnit> {
    label
        .chars()
        .map(|c| match c.to_pinyin() {
            Some(pinyin) => CollationUnit::Han(pinyin.with_tone_num_end(), c),
            None => CollationUnit::Other(c.to_lowercase().collect()),
        })
        .collect()
}

/// @ai:intent Order two labels as a zh (pinyin) collator would, breaking ties on the raw text
/// @ai:effects pure
/// @ai:post compare_labels(a, b) == Equal only when a == b
/// @ai:example ("电池", "价格") -> Less
/// @ai:example ("battery", "Boost") -> Less
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// @ai:intent Sort labels in place with compare_labels
/// @ai:effects pure
pub fn sort_labels(labels: &mut [String]) {
    labels.sort_by_cached_key(|label| (collation_key(label), label.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sorted(labels: &[&str]) -> Vec<String> {
        let mut labels: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        sort_labels(&mut labels);
        labels
    }

    #[test]
    fn test_case_insensitive_order() {
        assert_eq!(compare_labels("battery", "Boost"), Ordering::Less);
        assert_eq!(compare_labels("GPU", "cpu"), Ordering::Greater);
    }

    #[test]
    fn test_tie_break_is_total() {
        assert_eq!(compare_labels("FP32", "fp32"), Ordering::Less);
        assert_eq!(compare_labels("重量", "重量"), Ordering::Equal);
    }

    #[test]
    fn test_han_labels_follow_pinyin() {
        // dian / jia / xiao
        assert_eq!(sorted(&["销量", "价格", "电池"]), vec!["电池", "价格", "销量"]);
        // xian / shou / ping
        assert_eq!(sorted(&["显卡", "手机", "评测"]), vec!["评测", "手机", "显卡"]);
    }

    #[test]
    fn test_same_syllable_orders_by_tone() {
        // zhong1 before zhong4
        assert_eq!(compare_labels("中", "重"), Ordering::Less);
    }

    #[test]
    fn test_latin_and_digits_before_han() {
        assert_eq!(
            sorted(&["显存容量", "FP32 算力", "3DMark Time Spy"]),
            vec!["3DMark Time Spy", "FP32 算力", "显存容量"]
        );
    }
}
