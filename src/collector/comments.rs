use std::collections::{HashSet, VecDeque};

use crate::api::{CommentNode, RedditApi, Session};
use crate::app::Result;
use crate::domain::{CommentRecord, ItemRecord};

/// How far continuation placeholders are chased for a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Expansion {
    /// `None` resolves every placeholder; `Some(0)` drops them unfetched.
    pub max_requests: Option<usize>,
}

impl Expansion {
    pub fn unlimited() -> Self {
        Self { max_requests: None }
    }

    pub fn limited(max_requests: usize) -> Self {
        Self {
            max_requests: Some(max_requests),
        }
    }

    fn allows(&self, done: usize) -> bool {
        self.max_requests.map_or(true, |max| done < max)
    }
}

/// Direct replies to `item`, first `limit` in the order the service ranks them.
///
/// Placeholders are resolved before truncation and their contents take the
/// placeholder's position, so the result is the prefix of the fully expanded
/// reply list.
pub async fn fetch_top_level_comments(
    api: &dyn RedditApi,
    session: &Session,
    item: &ItemRecord,
    limit: usize,
    expansion: Expansion,
) -> Result<Vec<CommentRecord>> {
    let mut pending: VecDeque<CommentNode> = api.comments(session, item).await?.into();
    let mut comments = Vec::new();
    let mut expanded = HashSet::new();

    while let Some(node) = pending.pop_front() {
        match node {
            CommentNode::Comment(comment) => comments.push(comment),
            CommentNode::More(more) => {
                // count 0 marks a "continue this thread" link, not hidden replies
                if more.count == 0 || expanded.contains(&more.id) {
                    continue;
                }
                if !expansion.allows(expanded.len()) {
                    tracing::debug!("Dropping placeholder {} ({} replies)", more.id, more.count);
                    continue;
                }

                let nodes = api.expand(session, item, &more).await?;
                expanded.insert(more.id);
                for node in nodes.into_iter().rev() {
                    pending.push_front(node);
                }
            }
        }
    }

    comments.truncate(limit);
    Ok(comments)
}
