pub mod fixture;
pub mod http;
pub mod wire;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::app::Result;
use crate::config::Credentials;
use crate::domain::{CommentRecord, ItemRecord, Sort};

/// Upper bound the API accepts for `limit` on listing endpoints.
pub const MAX_PAGE_SIZE: usize = 100;

/// An authenticated handle to the remote API, valid for the length of a run.
#[derive(Clone)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    pub scope: String,
    pub expires_at: DateTime<Utc>,
    pub read_only: bool,
    pub user_agent: String,
}

impl Session {
    pub fn new(access_token: String, expires_in_secs: i64, user_agent: &str) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            scope: "*".to_string(),
            expires_at: Utc::now() + Duration::seconds(expires_in_secs),
            read_only: true,
            user_agent: user_agent.to_string(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("expires_at", &self.expires_at)
            .field("read_only", &self.read_only)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// One request against a subreddit listing.
#[derive(Debug, Clone, Copy)]
pub struct ListingRequest<'a> {
    pub subreddit: &'a str,
    pub sort: Sort,
    /// Fullname of the last item of the previous page
    pub after: Option<&'a str>,
    pub limit: usize,
}

/// One page of a listing. `after` is `None` on the last page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub items: Vec<ItemRecord>,
    pub after: Option<String>,
}

/// A placeholder standing in for replies the API did not return inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continuation {
    pub id: String,
    pub count: u64,
    pub children: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentNode {
    Comment(CommentRecord),
    More(Continuation),
}

/// Remote content API as seen by the collector.
///
/// Comment-returning methods yield direct replies to the item only, in the
/// order the service ranks them, with placeholders left where they appear.
#[async_trait]
pub trait RedditApi: Send + Sync {
    /// Obtain a session. Must fail before any network I/O when the client id
    /// or secret is missing.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session>;

    async fn listing(&self, session: &Session, request: &ListingRequest<'_>) -> Result<Page>;

    async fn comments(&self, session: &Session, item: &ItemRecord) -> Result<Vec<CommentNode>>;

    /// Resolve a continuation placeholder into the nodes it stands for.
    async fn expand(
        &self,
        session: &Session,
        item: &ItemRecord,
        more: &Continuation,
    ) -> Result<Vec<CommentNode>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_authorization_header() {
        let session = Session::new("tok".into(), 3600, "ua");
        assert_eq!(session.authorization(), "bearer tok");
        assert!(!session.is_expired());
        assert!(session.read_only);
    }

    #[test]
    fn test_session_expired() {
        let session = Session::new("tok".into(), -1, "ua");
        assert!(session.is_expired());
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let session = Session::new("very-secret-token".into(), 3600, "ua");
        assert!(!format!("{:?}", session).contains("very-secret-token"));
    }
}
