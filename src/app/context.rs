use std::path::Path;
use std::sync::Arc;

use crate::api::fixture::FixtureApi;
use crate::api::http::HttpApi;
use crate::api::RedditApi;
use crate::app::error::Result;
use crate::collector::Collector;
use crate::config::{Config, Credentials};
use crate::throttle::{FixedDelay, NoDelay, Throttle};

/// Everything a command needs, built once at startup.
pub struct AppContext {
    pub config: Config,
    pub credentials: Credentials,
    pub api: Arc<dyn RedditApi>,
    pub throttle: Arc<dyn Throttle>,
}

impl AppContext {
    /// Wire up the live API, reading credentials from the environment.
    pub fn new(config: Config) -> Result<Self> {
        let credentials = Credentials::from_env(config.reddit.user_agent.as_deref());
        let api: Arc<dyn RedditApi> =
            Arc::new(HttpApi::new(&config.reddit, &credentials.user_agent)?);
        let throttle: Arc<dyn Throttle> = Arc::new(FixedDelay::new(config.collector.throttle()));

        Ok(Self {
            config,
            credentials,
            api,
            throttle,
        })
    }

    /// Serve all requests from a fixture file instead of the network.
    ///
    /// Fixture runs are not throttled.
    pub fn with_fixture(config: Config, fixture: &Path) -> Result<Self> {
        let credentials = Credentials::from_env(config.reddit.user_agent.as_deref());
        let api: Arc<dyn RedditApi> = Arc::new(FixtureApi::from_path(fixture)?);

        Ok(Self {
            config,
            credentials,
            api,
            throttle: Arc::new(NoDelay),
        })
    }

    pub fn collector(&self) -> Collector {
        Collector::new(self.api.clone(), self.throttle.clone())
    }
}
