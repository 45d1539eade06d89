//! Port interface for the caption generation service

use async_trait::async_trait;
use postdeck_domain::{
    CaptionCandidate, CaptionRequest, OptimizeCaptionRequest, RepurposeRequest, Result,
};

/// Remote caption generator.
///
/// Implementations normalize whatever the service returns into a candidate
/// list before handing it back. An empty list is a valid answer; transport
/// failures are `PostdeckError::Network`.
#[async_trait]
pub trait CaptionGenerator: Send + Sync {
    /// Fresh captions for a post or an uploaded attachment
    async fn generate_caption(&self, request: &CaptionRequest) -> Result<Vec<CaptionCandidate>>;

    /// Improved versions of an existing caption
    async fn optimize_caption(
        &self,
        request: &OptimizeCaptionRequest,
    ) -> Result<Vec<CaptionCandidate>>;

    /// Rewrites of one post for other platforms
    async fn repurpose_content(&self, request: &RepurposeRequest) -> Result<Vec<CaptionCandidate>>;
}
