use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Missing credential: {0} is not set")]
    MissingCredential(&'static str),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limited by remote service (reset in {reset_secs:?}s)")]
    RateLimited { reset_secs: Option<u64> },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Response decoding error: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Fixture error: {0}")]
    Fixture(String),
}

impl From<reqwest::Error> for CollectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return CollectorError::Decode(err.to_string());
        }

        if let Some(status) = err.status() {
            return CollectorError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }

        CollectorError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CollectorError>;
