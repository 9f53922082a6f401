//! The collection workflow.
//!
//! ```text
//! authenticate → top items (ItemPager) → per item: top-level comments → throttle
//! ```
//!
//! Everything runs sequentially. Any error aborts the run and nothing
//! collected so far is returned.

pub mod comments;
pub mod pager;

pub use comments::{fetch_top_level_comments, Expansion};
pub use pager::ItemPager;

use std::sync::Arc;

use crate::api::{RedditApi, Session};
use crate::app::Result;
use crate::config::{CollectorConfig, Credentials};
use crate::domain::{CommentRecord, ItemRecord, Sort, TimeRange};
use crate::throttle::Throttle;

/// Parameters of one collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectRequest {
    pub subreddit: String,
    pub time_range: TimeRange,
    pub limit: usize,
    pub comment_limit: usize,
    pub expansion: Expansion,
}

impl Default for CollectRequest {
    fn default() -> Self {
        Self::from(&CollectorConfig::default())
    }
}

impl From<&CollectorConfig> for CollectRequest {
    fn from(config: &CollectorConfig) -> Self {
        Self {
            subreddit: config.subreddit.clone(),
            time_range: config.time_range,
            limit: config.limit,
            comment_limit: config.comment_limit,
            expansion: Expansion {
                max_requests: config.max_expansions,
            },
        }
    }
}

pub struct Collector {
    api: Arc<dyn RedditApi>,
    throttle: Arc<dyn Throttle>,
}

impl Collector {
    pub fn new(api: Arc<dyn RedditApi>, throttle: Arc<dyn Throttle>) -> Self {
        Self { api, throttle }
    }

    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        self.api.authenticate(credentials).await
    }

    /// Ranked items of a subreddit listing, fetched lazily in pages sized for
    /// `limit`. The caller decides where to stop.
    pub fn items<'a>(
        &'a self,
        session: &'a Session,
        subreddit: &'a str,
        sort: Sort,
        limit: usize,
    ) -> ItemPager<'a> {
        ItemPager::new(self.api.as_ref(), session, subreddit, sort, limit)
    }

    pub fn top_items<'a>(
        &'a self,
        session: &'a Session,
        subreddit: &'a str,
        time_range: TimeRange,
        limit: usize,
    ) -> ItemPager<'a> {
        self.items(session, subreddit, Sort::Top(time_range), limit)
    }

    pub async fn top_level_comments(
        &self,
        session: &Session,
        item: &ItemRecord,
        limit: usize,
        expansion: Expansion,
    ) -> Result<Vec<CommentRecord>> {
        fetch_top_level_comments(self.api.as_ref(), session, item, limit, expansion).await
    }

    pub async fn throttle(&self) {
        self.throttle.pause().await;
    }

    /// Authenticate and collect in one go.
    pub async fn run(
        &self,
        credentials: &Credentials,
        request: &CollectRequest,
    ) -> Result<Vec<ItemRecord>> {
        let session = self.authenticate(credentials).await?;
        self.collect(&session, request).await
    }

    pub async fn collect(
        &self,
        session: &Session,
        request: &CollectRequest,
    ) -> Result<Vec<ItemRecord>> {
        self.collect_with_progress(session, request, |_, _| {}).await
    }

    /// Collect items, calling `on_item` with the 1-based position of every
    /// assembled item.
    pub async fn collect_with_progress<F>(
        &self,
        session: &Session,
        request: &CollectRequest,
        mut on_item: F,
    ) -> Result<Vec<ItemRecord>>
    where
        F: FnMut(usize, &ItemRecord),
    {
        tracing::info!(
            "Collecting up to {} items from r/{} (top/{})",
            request.limit,
            request.subreddit,
            request.time_range
        );

        let mut pager = self.top_items(
            session,
            &request.subreddit,
            request.time_range,
            request.limit,
        );
        let mut items: Vec<ItemRecord> = Vec::new();

        while items.len() < request.limit {
            let Some(mut item) = pager.next().await? else {
                break;
            };

            if !items.is_empty() {
                self.throttle().await;
            }

            item.comments = self
                .top_level_comments(session, &item, request.comment_limit, request.expansion)
                .await?;

            on_item(items.len() + 1, &item);
            items.push(item);
        }

        tracing::info!("Collected {} items", items.len());
        Ok(items)
    }
}
