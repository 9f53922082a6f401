use serde::{Deserialize, Serialize};

/// A direct reply to an [`ItemRecord`](super::ItemRecord).
///
/// `item_id` is a back-reference to the owning item, not ownership: the record
/// is stored inside that item's `comments` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    #[serde(rename = "post_id")]
    pub item_id: String,
    #[serde(rename = "comment_id")]
    pub id: String,
    pub body: String,
    pub score: i64,
}

impl CommentRecord {
    pub fn new(item_id: &str, id: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            id: id.to_string(),
            body: String::new(),
            score: 0,
        }
    }
}
