use serde::{Deserialize, Serialize};

use super::CommentRecord;

const SITE_ROOT: &str = "https://reddit.com";

/// A submission pulled from a feed, together with its collected comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(rename = "post_id")]
    pub id: String,
    pub title: String,
    #[serde(rename = "content")]
    pub body: String,
    pub score: i64,
    #[serde(rename = "permalink")]
    pub url: String,
    pub comments: Vec<CommentRecord>,
}

impl ItemRecord {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body: String::new(),
            score: 0,
            url: String::new(),
            comments: Vec::new(),
        }
    }

    /// Build the canonical URL from a site-relative permalink.
    pub fn canonical_url(permalink: &str) -> String {
        if permalink.starts_with("http://") || permalink.starts_with("https://") {
            permalink.to_string()
        } else {
            format!("{}{}", SITE_ROOT, permalink)
        }
    }

    /// The `t3_` fullname the API uses to refer to this item.
    pub fn fullname(&self) -> String {
        format!("t3_{}", self.id)
    }

    /// Title cut to at most `max_chars` characters, never splitting a character.
    pub fn short_title(&self, max_chars: usize) -> &str {
        match self.title.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.title[..idx],
            None => &self.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_url_from_permalink() {
        assert_eq!(
            ItemRecord::canonical_url("/r/DIY/comments/abc/built_a_shed/"),
            "https://reddit.com/r/DIY/comments/abc/built_a_shed/"
        );
    }

    #[test]
    fn test_canonical_url_keeps_absolute() {
        assert_eq!(
            ItemRecord::canonical_url("https://reddit.com/r/DIY/comments/abc/"),
            "https://reddit.com/r/DIY/comments/abc/"
        );
    }

    #[test]
    fn test_fullname() {
        let item = ItemRecord::new("abc", "Shed");
        assert_eq!(item.fullname(), "t3_abc");
    }

    #[test]
    fn test_short_title_truncates() {
        let item = ItemRecord::new("abc", &"x".repeat(80));
        assert_eq!(item.short_title(50).len(), 50);
    }

    #[test]
    fn test_short_title_short_input() {
        let item = ItemRecord::new("abc", "Shed");
        assert_eq!(item.short_title(50), "Shed");
    }

    #[test]
    fn test_short_title_multibyte() {
        let item = ItemRecord::new("abc", "ééééé");
        assert_eq!(item.short_title(2), "éé");
    }

    #[test]
    fn test_serializes_with_export_keys() {
        let mut item = ItemRecord::new("abc", "Shed");
        item.body = "Text".into();
        item.url = ItemRecord::canonical_url("/r/DIY/comments/abc/");

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["post_id"], "abc");
        assert_eq!(value["title"], "Shed");
        assert_eq!(value["content"], "Text");
        assert_eq!(value["permalink"], "https://reddit.com/r/DIY/comments/abc/");
        assert!(value["comments"].as_array().unwrap().is_empty());
    }
}
