use std::collections::VecDeque;

use crate::api::{ListingRequest, RedditApi, Session, MAX_PAGE_SIZE};
use crate::app::Result;
use crate::domain::{ItemRecord, Sort};

/// A finite, forward-only walk over a subreddit listing.
///
/// Pages are requested only when the buffered items run out, following the
/// listing's `after` cursor until the service reports no further page. The
/// pager cannot be rewound; [`take`](ItemPager::take) consumes it.
pub struct ItemPager<'a> {
    api: &'a dyn RedditApi,
    session: &'a Session,
    subreddit: &'a str,
    sort: Sort,
    page_size: usize,
    buffer: VecDeque<ItemRecord>,
    after: Option<String>,
    exhausted: bool,
    pages_fetched: usize,
}

impl<'a> ItemPager<'a> {
    pub fn new(
        api: &'a dyn RedditApi,
        session: &'a Session,
        subreddit: &'a str,
        sort: Sort,
        page_size: usize,
    ) -> Self {
        Self {
            api,
            session,
            subreddit,
            sort,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            buffer: VecDeque::new(),
            after: None,
            exhausted: false,
            pages_fetched: 0,
        }
    }

    /// Next item in ranking order, or `None` once the listing is exhausted.
    pub async fn next(&mut self) -> Result<Option<ItemRecord>> {
        if self.buffer.is_empty() && !self.exhausted {
            self.fetch_page().await?;
        }
        Ok(self.buffer.pop_front())
    }

    /// Drain up to `limit` items.
    pub async fn take(mut self, limit: usize) -> Result<Vec<ItemRecord>> {
        let mut items = Vec::with_capacity(limit.min(MAX_PAGE_SIZE));
        while items.len() < limit {
            match self.next().await? {
                Some(item) => items.push(item),
                None => break,
            }
        }
        Ok(items)
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    async fn fetch_page(&mut self) -> Result<()> {
        let request = ListingRequest {
            subreddit: self.subreddit,
            sort: self.sort,
            after: self.after.as_deref(),
            limit: self.page_size,
        };

        let page = self.api.listing(self.session, &request).await?;
        self.pages_fetched += 1;

        tracing::debug!(
            "Fetched page {} of r/{} ({}): {} items",
            self.pages_fetched,
            self.subreddit,
            self.sort,
            page.items.len()
        );

        self.exhausted = page.after.is_none() || page.items.is_empty();
        self.after = page.after;
        self.buffer.extend(page.items);
        Ok(())
    }
}
