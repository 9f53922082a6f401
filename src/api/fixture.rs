//! Static, file-backed stand-in for the remote API.
//!
//! A fixture lists items in feed order, each with its comment forest. `more`
//! nodes become continuation placeholders that only resolve through
//! [`RedditApi::expand`], so the collector walks the same code path it uses
//! against the real service.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::Deserialize;

use crate::api::{CommentNode, Continuation, ListingRequest, Page, RedditApi, Session};
use crate::app::{CollectorError, Result};
use crate::config::Credentials;
use crate::domain::{CommentRecord, ItemRecord};

const PLACEHOLDER_PREFIX: &str = "more:";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub items: Vec<FixtureItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub score: i64,
    pub permalink: Option<String>,
    #[serde(default)]
    pub comments: Vec<FixtureNode>,
    /// Make every comment request for this item fail.
    pub fail: Option<FixtureFailure>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FixtureNode {
    Comment {
        id: String,
        #[serde(default)]
        body: String,
        #[serde(default)]
        score: i64,
    },
    More {
        children: Vec<FixtureNode>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureFailure {
    Network,
    RateLimit,
    Auth,
}

impl FixtureFailure {
    fn into_error(self, item_id: &str) -> CollectorError {
        match self {
            FixtureFailure::Network => {
                CollectorError::Network(format!("Connection reset fetching {}", item_id))
            }
            FixtureFailure::RateLimit => CollectorError::RateLimited {
                reset_secs: Some(60),
            },
            FixtureFailure::Auth => CollectorError::Auth(format!("403 Forbidden for {}", item_id)),
        }
    }
}

pub struct FixtureApi {
    fixture: Fixture,
    calls: AtomicUsize,
}

impl FixtureApi {
    pub fn new(fixture: Fixture) -> Self {
        Self {
            fixture,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let fixture: Fixture =
            serde_json::from_str(content).map_err(|e| CollectorError::Fixture(e.to_string()))?;
        Ok(Self::new(fixture))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Number of simulated network requests served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn find(&self, item_id: &str) -> Result<&FixtureItem> {
        let entry = self
            .fixture
            .items
            .iter()
            .find(|entry| entry.id == item_id)
            .ok_or_else(|| CollectorError::Fixture(format!("Unknown item: {}", item_id)))?;

        match entry.fail {
            Some(failure) => Err(failure.into_error(item_id)),
            None => Ok(entry),
        }
    }

    fn record(&self, entry: &FixtureItem, subreddit: &str) -> ItemRecord {
        let mut item = ItemRecord::new(&entry.id, &entry.title);
        item.body = entry.body.clone();
        item.score = entry.score;
        item.url = match &entry.permalink {
            Some(permalink) => ItemRecord::canonical_url(permalink),
            None => ItemRecord::canonical_url(&format!("/r/{}/comments/{}/", subreddit, entry.id)),
        };
        item
    }
}

/// Convert fixture nodes into API nodes. Placeholder ids encode their position
/// (`more:0.3`) so `expand` can find their children again.
fn convert(item_id: &str, nodes: &[FixtureNode], path: &str) -> Vec<CommentNode> {
    nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| match node {
            FixtureNode::Comment { id, body, score } => {
                let mut comment = CommentRecord::new(item_id, id);
                comment.body = body.clone();
                comment.score = *score;
                CommentNode::Comment(comment)
            }
            FixtureNode::More { children } => {
                let position = if path.is_empty() {
                    idx.to_string()
                } else {
                    format!("{}.{}", path, idx)
                };
                CommentNode::More(Continuation {
                    id: format!("{}{}", PLACEHOLDER_PREFIX, position),
                    count: children.len() as u64,
                    children: children
                        .iter()
                        .filter_map(|child| match child {
                            FixtureNode::Comment { id, .. } => Some(id.clone()),
                            FixtureNode::More { .. } => None,
                        })
                        .collect(),
                })
            }
        })
        .collect()
}

fn resolve<'a>(nodes: &'a [FixtureNode], placeholder: &str) -> Option<(&'a [FixtureNode], String)> {
    let position = placeholder.strip_prefix(PLACEHOLDER_PREFIX)?;
    let mut current = nodes;

    for step in position.split('.') {
        let idx: usize = step.parse().ok()?;
        match current.get(idx)? {
            FixtureNode::More { children } => current = children,
            FixtureNode::Comment { .. } => return None,
        }
    }

    Some((current, position.to_string()))
}

#[async_trait]
impl RedditApi for FixtureApi {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        credentials.require()?;
        self.record_call();
        Ok(Session::new("fixture".into(), 3600, &credentials.user_agent))
    }

    async fn listing(&self, _session: &Session, request: &ListingRequest<'_>) -> Result<Page> {
        self.record_call();

        let start = match request.after {
            Some(after) => {
                let id = after.strip_prefix("t3_").unwrap_or(after);
                self.fixture
                    .items
                    .iter()
                    .position(|entry| entry.id == id)
                    .map(|pos| pos + 1)
                    .ok_or_else(|| CollectorError::Fixture(format!("Unknown cursor: {}", after)))?
            }
            None => 0,
        };

        let items: Vec<ItemRecord> = self
            .fixture
            .items
            .iter()
            .skip(start)
            .take(request.limit)
            .map(|entry| self.record(entry, request.subreddit))
            .collect();

        let after = if start + items.len() < self.fixture.items.len() {
            items.last().map(ItemRecord::fullname)
        } else {
            None
        };

        Ok(Page { items, after })
    }

    async fn comments(&self, _session: &Session, item: &ItemRecord) -> Result<Vec<CommentNode>> {
        self.record_call();
        let entry = self.find(&item.id)?;
        Ok(convert(&item.id, &entry.comments, ""))
    }

    async fn expand(
        &self,
        _session: &Session,
        item: &ItemRecord,
        more: &Continuation,
    ) -> Result<Vec<CommentNode>> {
        self.record_call();
        let entry = self.find(&item.id)?;

        let (children, path) = resolve(&entry.comments, &more.id).ok_or_else(|| {
            CollectorError::Fixture(format!("Unknown placeholder {} on {}", more.id, item.id))
        })?;

        Ok(convert(&item.id, children, &path))
    }
}
