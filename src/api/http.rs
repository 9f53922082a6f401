use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::api::{
    CommentNode, Continuation, ListingRequest, Page, RedditApi, Session, MAX_PAGE_SIZE,
};
use crate::app::{CollectorError, Result};
use crate::config::{Credentials, RedditConfig};
use crate::domain::ItemRecord;
use crate::normalizer::Normalizer;

const RATELIMIT_RESET: &str = "x-ratelimit-reset";

/// reqwest-backed client for the Reddit OAuth API.
pub struct HttpApi {
    client: Client,
    auth_url: Url,
    api_url: Url,
    normalizer: Normalizer,
}

impl HttpApi {
    pub fn new(config: &RedditConfig, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            auth_url: base_url(&config.auth_url)?,
            api_url: base_url(&config.api_url)?,
            normalizer: Normalizer::new(),
        })
    }

    async fn get(&self, session: &Session, url: Url) -> Result<Vec<u8>> {
        if session.is_expired() {
            return Err(CollectorError::Auth("Session expired".into()));
        }

        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, session.authorization())
            .header(USER_AGENT, &session.user_agent)
            .send()
            .await?;

        check_status(&response)?;

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl RedditApi for HttpApi {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        let (client_id, client_secret) = credentials.require()?;

        let url = self.auth_url.join("api/v1/access_token")?;
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .basic_auth(client_id, Some(client_secret))
            .header(USER_AGENT, &credentials.user_agent)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await?;

        check_status(&response)?;

        let body = response.bytes().await?;
        let session = self.normalizer.session(&body, &credentials.user_agent)?;
        tracing::info!(
            "Authenticated (scope: {}, read-only: {})",
            session.scope,
            session.read_only
        );
        Ok(session)
    }

    async fn listing(&self, session: &Session, request: &ListingRequest<'_>) -> Result<Page> {
        let mut url = self
            .api_url
            .join(&format!("r/{}/{}", request.subreddit, request.sort.path()))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &request.limit.min(MAX_PAGE_SIZE).to_string());
            if let Some(range) = request.sort.time_range() {
                query.append_pair("t", range.as_str());
            }
            if let Some(after) = request.after {
                query.append_pair("after", after);
            }
        }

        let body = self.get(session, url).await?;
        self.normalizer.listing(&body)
    }

    async fn comments(&self, session: &Session, item: &ItemRecord) -> Result<Vec<CommentNode>> {
        let mut url = self.api_url.join(&format!("comments/{}", item.id))?;
        url.query_pairs_mut().append_pair("depth", "1");

        let body = self.get(session, url).await?;
        self.normalizer.comments(item, &body)
    }

    async fn expand(
        &self,
        session: &Session,
        item: &ItemRecord,
        more: &Continuation,
    ) -> Result<Vec<CommentNode>> {
        let mut nodes = Vec::new();

        for chunk in more.children.chunks(MAX_PAGE_SIZE) {
            let mut url = self.api_url.join("api/morechildren")?;
            url.query_pairs_mut()
                .append_pair("api_type", "json")
                .append_pair("link_id", &item.fullname())
                .append_pair("children", &chunk.join(","))
                .append_pair("limit_children", "false")
                .append_pair("depth", "1");

            let body = self.get(session, url).await?;
            nodes.extend(self.normalizer.more_children(item, &body)?);
        }

        tracing::debug!(
            "Expanded {} into {} nodes for {}",
            more.id,
            nodes.len(),
            item.id
        );
        Ok(nodes)
    }
}

/// Parse a configured host, making sure relative joins append to its path.
fn base_url(raw: &str) -> Result<Url> {
    if raw.ends_with('/') {
        Ok(Url::parse(raw)?)
    } else {
        Ok(Url::parse(&format!("{}/", raw))?)
    }
}

fn check_status(response: &Response) -> Result<()> {
    let status = response.status();

    if status.is_success() {
        return Ok(());
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(CollectorError::Auth(format!(
            "{} from {}",
            status,
            response.url()
        ))),
        StatusCode::TOO_MANY_REQUESTS => {
            let reset_secs = response
                .headers()
                .get(RATELIMIT_RESET)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<f64>().ok())
                .map(|secs| secs.ceil() as u64);
            Err(CollectorError::RateLimited { reset_secs })
        }
        _ => Err(CollectorError::Api {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or("Unknown status").to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> RedditConfig {
        // Port 9 (discard) on loopback: nothing should ever be sent there.
        RedditConfig {
            auth_url: "http://127.0.0.1:9".into(),
            api_url: "http://127.0.0.1:9".into(),
            timeout_secs: 1,
            user_agent: None,
        }
    }

    #[test]
    fn test_base_url_appends_slash() {
        let url = base_url("https://oauth.reddit.com").unwrap();
        assert_eq!(
            url.join("r/diy/top").unwrap().as_str(),
            "https://oauth.reddit.com/r/diy/top"
        );

        let url = base_url("http://localhost:8080/proxy").unwrap();
        assert_eq!(
            url.join("comments/a1").unwrap().as_str(),
            "http://localhost:8080/proxy/comments/a1"
        );
    }

    #[test]
    fn test_base_url_rejects_garbage() {
        assert!(matches!(
            base_url("not a url"),
            Err(CollectorError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_missing_id_fails_before_network() {
        let api = HttpApi::new(&unreachable_config(), "test-agent").unwrap();
        let credentials = Credentials {
            client_id: None,
            client_secret: Some("secret".into()),
            user_agent: "test-agent".into(),
        };

        let result = api.authenticate(&credentials).await;
        assert!(matches!(
            result,
            Err(CollectorError::MissingCredential("REDDIT_CLIENT_ID"))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_missing_secret_fails_before_network() {
        let api = HttpApi::new(&unreachable_config(), "test-agent").unwrap();
        let credentials = Credentials {
            client_id: Some("id".into()),
            client_secret: None,
            user_agent: "test-agent".into(),
        };

        let result = api.authenticate(&credentials).await;
        assert!(matches!(
            result,
            Err(CollectorError::MissingCredential("REDDIT_CLIENT_SECRET"))
        ));
    }

    #[tokio::test]
    async fn test_expired_session_rejected_before_request() {
        let api = HttpApi::new(&unreachable_config(), "test-agent").unwrap();
        let session = Session::new("tok".into(), -1, "test-agent");
        let item = ItemRecord::new("a1", "Shed");

        let result = api.comments(&session, &item).await;
        assert!(matches!(result, Err(CollectorError::Auth(_))));
    }
}
