//! Feed lifecycle errors

use postdeck_domain::PostdeckError;
use thiserror::Error;

use crate::errors::InfraError;

/// Result alias for feed lifecycle operations
pub type FeedResult<T> = std::result::Result<T, FeedError>;

/// Calendar feed errors
#[derive(Debug, Error)]
pub enum FeedError {
    /// Feed is already running
    #[error("Calendar feed already running")]
    AlreadyRunning,

    /// Feed is not running
    #[error("Calendar feed not running")]
    NotRunning,

    /// The first reconciliation failed, so the feed never started
    #[error("Initial calendar load failed: {0}")]
    InitialLoad(#[source] PostdeckError),

    /// Operation timed out
    #[error("Operation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Task join failed
    #[error("Task join failed: {0}")]
    TaskJoinFailed(String),
}

impl From<FeedError> for InfraError {
    fn from(err: FeedError) -> Self {
        let domain_err = match err {
            FeedError::AlreadyRunning | FeedError::NotRunning => {
                PostdeckError::InvalidInput(err.to_string())
            }
            FeedError::InitialLoad(inner) => inner,
            FeedError::Timeout { .. } | FeedError::TaskJoinFailed(_) => {
                PostdeckError::Internal(err.to_string())
            }
        };
        InfraError(domain_err)
    }
}

impl From<FeedError> for PostdeckError {
    fn from(err: FeedError) -> Self {
        InfraError::from(err).into()
    }
}
