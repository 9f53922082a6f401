use std::env;
use std::fmt;

use crate::app::{CollectorError, Result};

pub const CLIENT_ID_VAR: &str = "REDDIT_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "REDDIT_CLIENT_SECRET";
pub const USER_AGENT_VAR: &str = "REDDIT_USER_AGENT";

/// User agent sent when neither the environment nor the config file name one.
pub const FALLBACK_USER_AGENT: &str = "TestScript/1.0 by /u/yourusername";

/// API credentials read once at startup.
///
/// Presence is the only validation performed here; whether the remote service
/// accepts them is decided by `authenticate`.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub user_agent: String,
}

impl Credentials {
    pub fn new(client_id: &str, client_secret: &str, user_agent: &str) -> Self {
        Self {
            client_id: Some(client_id.to_string()),
            client_secret: Some(client_secret.to_string()),
            user_agent: user_agent.to_string(),
        }
    }

    /// Read credentials from the process environment.
    ///
    /// `configured_user_agent` sits between `REDDIT_USER_AGENT` and the
    /// literal fallback.
    pub fn from_env(configured_user_agent: Option<&str>) -> Self {
        Self::from_lookup(|key| env::var(key).ok(), configured_user_agent)
    }

    pub fn from_lookup<F>(lookup: F, configured_user_agent: Option<&str>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let user_agent = read(USER_AGENT_VAR)
            .or_else(|| configured_user_agent.map(String::from))
            .unwrap_or_else(|| FALLBACK_USER_AGENT.to_string());

        Self {
            client_id: read(CLIENT_ID_VAR),
            client_secret: read(CLIENT_SECRET_VAR),
            user_agent,
        }
    }

    /// Client id and secret, or the name of the first one missing.
    pub fn require(&self) -> Result<(&str, &str)> {
        let id = self
            .client_id
            .as_deref()
            .ok_or(CollectorError::MissingCredential(CLIENT_ID_VAR))?;
        let secret = self
            .client_secret
            .as_deref()
            .ok_or(CollectorError::MissingCredential(CLIENT_SECRET_VAR))?;
        Ok((id, secret))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_reads_all_fields() {
        let creds = Credentials::from_lookup(
            lookup(&[
                (CLIENT_ID_VAR, "id"),
                (CLIENT_SECRET_VAR, "secret"),
                (USER_AGENT_VAR, "collector/0.1 by /u/someone"),
            ]),
            None,
        );
        assert_eq!(creds.require().unwrap(), ("id", "secret"));
        assert_eq!(creds.user_agent, "collector/0.1 by /u/someone");
    }

    #[test]
    fn test_user_agent_falls_back_to_literal() {
        let creds = Credentials::from_lookup(lookup(&[]), None);
        assert_eq!(creds.user_agent, FALLBACK_USER_AGENT);
    }

    #[test]
    fn test_user_agent_prefers_config_over_literal() {
        let creds = Credentials::from_lookup(lookup(&[]), Some("configured/1.0"));
        assert_eq!(creds.user_agent, "configured/1.0");
    }

    #[test]
    fn test_env_user_agent_wins_over_config() {
        let creds = Credentials::from_lookup(
            lookup(&[(USER_AGENT_VAR, "env/1.0")]),
            Some("configured/1.0"),
        );
        assert_eq!(creds.user_agent, "env/1.0");
    }

    #[test]
    fn test_missing_client_id() {
        let creds = Credentials::from_lookup(lookup(&[(CLIENT_SECRET_VAR, "secret")]), None);
        assert!(matches!(
            creds.require(),
            Err(CollectorError::MissingCredential(CLIENT_ID_VAR))
        ));
    }

    #[test]
    fn test_missing_client_secret() {
        let creds = Credentials::from_lookup(lookup(&[(CLIENT_ID_VAR, "id")]), None);
        assert!(matches!(
            creds.require(),
            Err(CollectorError::MissingCredential(CLIENT_SECRET_VAR))
        ));
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let creds = Credentials::from_lookup(
            lookup(&[(CLIENT_ID_VAR, "  "), (CLIENT_SECRET_VAR, "secret")]),
            None,
        );
        assert!(creds.require().is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("id", "hunter2", "ua");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
