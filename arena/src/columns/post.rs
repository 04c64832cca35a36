//! @ai:module:intent Column post records, excerpts, dates and share links
//! @ai:module:layer domain
//! @ai:module:public_api Post, PostPreview, excerpt, parse_date, share_link, column_link, post_id_from_fragment
//! @ai:module:stateless true

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

const ELLIPSIS: char = '…';
const POST_FRAGMENT: &str = "#post=";

/// @ai:intent A column post as stored in columns.json
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// YYYY-MM-DD or RFC 3339
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pinned: bool,
}

/// @ai:intent A post as listed in the feed, with its content cut to an excerpt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPreview {
    pub id: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub pinned: bool,
}

impl Post {
    /// @ai:intent Timestamp used for ordering, 0 when the date cannot be parsed
    /// @ai:effects pure
    pub fn timestamp(&self) -> i64 {
        parse_date(&self.date)
    }

    /// @ai:intent Preview with at most max_chars characters of content
    /// @ai:effects pure
    pub fn preview(&self, max_chars: usize, max_tags: usize) -> PostPreview {
        PostPreview {
            id: self.id.clone(),
            title: self.title.clone(),
            date: self.date.clone(),
            excerpt: excerpt(&self.content, max_chars),
            tags: self.tags.iter().take(max_tags).cloned().collect(),
            pinned: self.pinned,
        }
    }

    /// @ai:intent Post as shown when opened: every tag, content clamped to max_chars
    /// @ai:effects pure
    pub fn opened(&self, max_chars: usize) -> PostPreview {
        self.preview(max_chars, self.tags.len())
    }

    /// @ai:intent "date · tag / tag" line shown above an opened post
    /// @ai:effects pure
    pub fn meta_line(&self) -> String {
        format!("{} · {}", self.date, self.tags.join(" / "))
    }
}

/// @ai:intent Trim and cut text to max_chars characters, marking the cut with an ellipsis
/// @ai:effects pure
/// @ai:example ("  short  ", 200) -> "short"
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(max_chars).collect();
    cut.push(ELLIPSIS);
    cut
}

/// @ai:intent Epoch milliseconds of a YYYY-MM-DD or RFC 3339 date; 0 when unparseable
/// @ai:effects pure
/// @ai:example ("1970-01-02") -> 86400000
pub fn parse_date(date: &str) -> i64 {
    let date = date.trim();

    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return day
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or(0);
    }

    DateTime::parse_from_rfc3339(date)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

/// @ai:intent Direct link that opens a post
/// @ai:effects pure
/// @ai:example ("https://x.io/", "gpu guide") -> "https://x.io/#post=gpu%20guide"
pub fn share_link(base_url: &str, post_id: &str) -> String {
    format!("{}{}{}", base_url, POST_FRAGMENT, encode_component(post_id))
}

/// @ai:intent Link to the column section
/// @ai:effects pure
pub fn column_link(base_url: &str) -> String {
    format!("{}#column", base_url)
}

/// @ai:intent Post id carried by a "#post=..." fragment or a full share link
/// @ai:effects pure
/// @ai:post None when there is no post fragment or the id is empty
pub fn post_id_from_fragment(link: &str) -> Option<String> {
    let (_, encoded) = link.split_once(POST_FRAGMENT)?;
    let id = decode_component(encoded);
    (!id.is_empty()).then_some(id)
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"-_.!~*'()".contains(&byte)
}

fn encode_component(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    for &byte in text.as_bytes() {
        if is_unreserved(byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

// Malformed escapes are kept verbatim.
fn decode_component(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|h| u8::from_str_radix(h, 16).ok());
            if let Some(byte) = hex {
                decoded.push(byte);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_short_text_is_trimmed_only() {
        assert_eq!(excerpt("  hello  ", 200), "hello");
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let text = "显卡".repeat(150);
        let cut = excerpt(&text, 200);

        assert_eq!(cut.chars().count(), 201);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_opened_post_keeps_all_tags_and_clamps_body() {
        let post = Post {
            id: "long".to_string(),
            title: "Long read".to_string(),
            date: "2024-01-01".to_string(),
            content: "评测".repeat(300),
            tags: vec!["a", "b", "c", "d", "e"].into_iter().map(String::from).collect(),
            pinned: false,
        };

        let opened = post.opened(200);
        assert_eq!(opened.tags.len(), 5);
        assert_eq!(opened.excerpt.chars().count(), 201);
        assert!(opened.excerpt.ends_with('…'));
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("1970-01-02"), 86_400_000);
        assert_eq!(parse_date("1970-01-01T00:00:01Z"), 1_000);
        assert_eq!(parse_date("yesterday"), 0);
        assert_eq!(parse_date(""), 0);
    }

    #[test]
    fn test_share_link_round_trip() {
        let link = share_link("https://arena.example/", "gpu 选购");
        assert_eq!(link, "https://arena.example/#post=gpu%20%E9%80%89%E8%B4%AD");
        assert_eq!(post_id_from_fragment(&link).as_deref(), Some("gpu 选购"));
    }

    #[test]
    fn test_fragment_parsing() {
        assert_eq!(post_id_from_fragment("#post=abc").as_deref(), Some("abc"));
        assert_eq!(post_id_from_fragment("#post="), None);
        assert_eq!(post_id_from_fragment("#column"), None);
        assert_eq!(post_id_from_fragment("#post=100%").as_deref(), Some("100%"));
    }

    #[test]
    fn test_column_link() {
        assert_eq!(column_link("https://arena.example/"), "https://arena.example/#column");
    }
}
