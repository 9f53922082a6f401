use html_escape::decode_html_entities;

use crate::api::wire::{
    CommentData, LinkData, MoreChildrenResponse, MoreData, Thing, TokenResponse,
};
use crate::api::{CommentNode, Continuation, Page, Session};
use crate::app::{CollectorError, Result};
use crate::domain::{CommentRecord, ItemRecord};

/// Turns raw API bodies into domain records.
///
/// Text fields arrive HTML-escaped (`&amp;`, `&gt;`) and are decoded here.
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn session(&self, body: &[u8], user_agent: &str) -> Result<Session> {
        let token: TokenResponse = decode(body)?;

        if let Some(error) = token.error {
            return Err(CollectorError::Auth(error));
        }

        let access_token = token
            .access_token
            .ok_or_else(|| CollectorError::Auth("Token response carried no access_token".into()))?;

        let mut session = Session::new(access_token, token.expires_in, user_agent);
        if !token.token_type.is_empty() {
            session.token_type = token.token_type;
        }
        if !token.scope.is_empty() {
            session.scope = token.scope;
        }
        Ok(session)
    }

    /// Parse a `/r/{subreddit}/{sort}` listing body.
    pub fn listing(&self, body: &[u8]) -> Result<Page> {
        let listing = match decode::<Thing>(body)? {
            Thing::Listing(listing) => listing,
            _ => return Err(CollectorError::Decode("Expected a Listing".into())),
        };

        let items = listing
            .children
            .into_iter()
            .filter_map(|thing| match thing {
                Thing::Link(link) => Some(self.item(link)),
                _ => None,
            })
            .collect();

        Ok(Page {
            items,
            after: listing.after,
        })
    }

    /// Parse a `/comments/{id}` body, keeping only direct replies to `item`.
    ///
    /// The body is a pair of listings: the submission, then its comment forest.
    pub fn comments(&self, item: &ItemRecord, body: &[u8]) -> Result<Vec<CommentNode>> {
        let things: Vec<Thing> = decode(body)?;

        let forest = things
            .into_iter()
            .nth(1)
            .and_then(|thing| match thing {
                Thing::Listing(listing) => Some(listing),
                _ => None,
            })
            .ok_or_else(|| CollectorError::Decode("Missing comment listing".into()))?;

        Ok(self.top_level(item, forest.children))
    }

    /// Parse an `/api/morechildren` body, keeping only direct replies to `item`.
    pub fn more_children(&self, item: &ItemRecord, body: &[u8]) -> Result<Vec<CommentNode>> {
        let response: MoreChildrenResponse = decode(body)?;

        if let Some(error) = response.json.errors.first() {
            return Err(CollectorError::Api {
                status: 200,
                message: error.to_string(),
            });
        }

        let things = response.json.data.map(|d| d.things).unwrap_or_default();
        Ok(self.top_level(item, things))
    }

    pub fn item(&self, link: LinkData) -> ItemRecord {
        let mut item = ItemRecord::new(&link.id, &decode_html_entities(&link.title));
        item.body = decode_html_entities(&link.selftext).to_string();
        item.score = link.score;
        item.url = ItemRecord::canonical_url(&link.permalink);
        item
    }

    /// The back-reference is taken from `item`, not from the wire `parent_id`.
    pub fn comment(&self, item: &ItemRecord, data: CommentData) -> CommentRecord {
        let mut comment = CommentRecord::new(&item.id, &data.id);
        comment.body = decode_html_entities(&data.body).to_string();
        comment.score = data.score;
        comment
    }

    fn continuation(&self, data: MoreData) -> Continuation {
        Continuation {
            id: data.id,
            count: data.count,
            children: data.children,
        }
    }

    fn top_level(&self, item: &ItemRecord, things: Vec<Thing>) -> Vec<CommentNode> {
        let parent = item.fullname();

        things
            .into_iter()
            .filter_map(|thing| match thing {
                Thing::Comment(data) if data.parent_id == parent => {
                    Some(CommentNode::Comment(self.comment(item, data)))
                }
                Thing::More(data) if data.parent_id == parent => {
                    Some(CommentNode::More(self.continuation(data)))
                }
                _ => None,
            })
            .collect()
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| CollectorError::Decode(e.to_string()))
}
