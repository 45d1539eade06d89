/// Generation service wire types and errors
use postdeck_domain::{CaptionCandidate, PostdeckError};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::errors::conversions::status_to_error;

/// Generation service error types
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Transport failure after the HTTP client gave up retrying
    #[error("transport error: {0}")]
    Transport(#[from] PostdeckError),

    /// The service answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Rate limit still exceeded after retries
    #[error("rate limit exceeded (retry after {retry_after:?}s)")]
    RateLimit { retry_after: Option<u64> },

    /// Credentials missing or rejected
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Response body doesn't match any known shape
    #[error("invalid response schema: {0}")]
    InvalidSchema(String),
}

impl From<GenerationError> for PostdeckError {
    fn from(value: GenerationError) -> Self {
        match value {
            GenerationError::Transport(err) => err,
            GenerationError::Api { status, message } => match StatusCode::from_u16(status) {
                Ok(code) => status_to_error(code, &message),
                Err(_) => PostdeckError::Network(format!("HTTP {status}: {message}")),
            },
            GenerationError::RateLimit { .. } => PostdeckError::Network(value.to_string()),
            GenerationError::Authentication(message) => PostdeckError::Auth(message),
            GenerationError::InvalidSchema(message) => PostdeckError::Internal(message),
        }
    }
}

/// Every response shape the service has been seen to produce.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CaptionEnvelope {
    Bare(Vec<RawCandidate>),
    Captions { captions: Vec<RawCandidate> },
    Nested { result: CaptionList },
}

#[derive(Debug, Deserialize)]
pub(crate) struct CaptionList {
    #[serde(default)]
    captions: Vec<RawCandidate>,
}

/// A candidate as sent: plain text or an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawCandidate {
    Text(String),
    Object {
        #[serde(default, alias = "text", alias = "content")]
        caption: Option<String>,
        #[serde(default)]
        hashtags: Option<RawHashtags>,
    },
}

/// Hashtags arrive either as a list or as one whitespace/comma separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawHashtags {
    List(Vec<String>),
    Joined(String),
}

impl RawHashtags {
    fn into_tags(self) -> Vec<String> {
        let raw = match self {
            Self::List(tags) => tags,
            Self::Joined(joined) => {
                joined.split([' ', ',', '\n']).map(str::to_string).collect()
            }
        };
        raw.into_iter()
            .map(|tag| tag.trim().trim_start_matches('#').to_string())
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

impl From<RawCandidate> for CaptionCandidate {
    fn from(raw: RawCandidate) -> Self {
        match raw {
            RawCandidate::Text(caption) => CaptionCandidate::new(caption),
            RawCandidate::Object { caption, hashtags } => CaptionCandidate {
                caption: caption.unwrap_or_default(),
                hashtags: hashtags.map(RawHashtags::into_tags).unwrap_or_default(),
            },
        }
    }
}

impl CaptionEnvelope {
    /// Flatten into candidates, keeping the service's order.
    pub(crate) fn into_candidates(self) -> Vec<CaptionCandidate> {
        let raw = match self {
            Self::Bare(list) => list,
            Self::Captions { captions } => captions,
            Self::Nested { result } => result.captions,
        };
        raw.into_iter().map(CaptionCandidate::from).collect()
    }
}
