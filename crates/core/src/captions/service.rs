//! Caption service - regeneration and generation helpers
//!
//! A regenerated caption replaces the post body as a whole-document upsert.
//! Nothing is written unless generation succeeded with a usable candidate
//! and the request is still the active one for its edit session.

use std::sync::Arc;

use postdeck_domain::{
    CaptionCandidate, CaptionRequest, OptimizeCaptionRequest, OwnerScope, Post, PostdeckError,
    RegenerateCaption, RepurposeRequest, Result,
};
use tracing::{debug, info, instrument, warn};

use super::ports::CaptionGenerator;
use super::session::{EditSessions, RequestTicket};
use crate::calendar::ports::{BlobStore, PostRepository};

/// Result of a regeneration that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum RegenerateOutcome {
    /// The post was rewritten with the new caption.
    Applied(Post),
    /// The session moved on before the result arrived; nothing was written.
    Superseded,
}

/// Caption suggestions for a freshly uploaded attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCaptionRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub goal: String,
    pub tone: String,
    pub platforms: Vec<String>,
}

/// Caption service
pub struct CaptionService {
    posts: Arc<dyn PostRepository>,
    generator: Arc<dyn CaptionGenerator>,
    sessions: Arc<EditSessions>,
    blobs: Option<Arc<dyn BlobStore>>,
}

impl CaptionService {
    /// Create a new caption service
    pub fn new(
        posts: Arc<dyn PostRepository>,
        generator: Arc<dyn CaptionGenerator>,
        sessions: Arc<EditSessions>,
    ) -> Self {
        Self { posts, generator, sessions, blobs: None }
    }

    /// Enable attachment uploads for `suggest_for_media`
    pub fn with_blob_store(mut self, blobs: Arc<dyn BlobStore>) -> Self {
        self.blobs = Some(blobs);
        self
    }

    pub fn sessions(&self) -> &Arc<EditSessions> {
        &self.sessions
    }

    /// Regenerate one post's caption.
    ///
    /// # Errors
    /// - `Validation` when goal or tone is blank (before any call)
    /// - `NotFound` when the post does not exist
    /// - `Network` when the generation service cannot be reached
    /// - `EmptyResult` when the service returned no usable caption
    #[instrument(skip(self, request), fields(owner = %scope, post_id = %request.post_id))]
    pub async fn regenerate(
        &self,
        scope: &OwnerScope,
        request: &RegenerateCaption,
        ticket: &RequestTicket,
    ) -> Result<RegenerateOutcome> {
        require("goal", &request.goal)?;
        require("tone", &request.tone)?;

        let post = self
            .posts
            .get_post(scope, &request.post_id)
            .await?
            .ok_or_else(|| PostdeckError::NotFound(format!("post {}", request.post_id)))?;

        let generation_request = CaptionRequest {
            media_url: post.media_url.clone(),
            goal: request.goal.clone(),
            tone: request.tone.clone(),
            prompt_text: post.content.clone().filter(|c| !c.trim().is_empty()),
            platforms: vec![request.platform.clone()],
        };

        let candidates = self.generator.generate_caption(&generation_request).await?;
        let candidate = first_usable(candidates)?;

        if !self.sessions.is_current(ticket) {
            debug!(session = %ticket.session(), "discarding superseded caption");
            return Ok(RegenerateOutcome::Superseded);
        }

        let updated = Post { content: Some(candidate.to_post_content()), ..post };
        self.posts.upsert_post(scope, updated.clone()).await?;
        info!("caption regenerated");
        Ok(RegenerateOutcome::Applied(updated))
    }

    /// Improve an existing caption without touching any post
    pub async fn optimize(
        &self,
        request: &OptimizeCaptionRequest,
    ) -> Result<Vec<CaptionCandidate>> {
        require("caption", &request.caption)?;
        usable(self.generator.optimize_caption(request).await?)
    }

    /// Rewrite content for other platforms without touching any post
    pub async fn repurpose(&self, request: &RepurposeRequest) -> Result<Vec<CaptionCandidate>> {
        require("content", &request.content)?;
        if request.target_platforms.is_empty() {
            return Err(PostdeckError::validation(
                "targetPlatforms",
                "Select at least one platform",
            ));
        }
        usable(self.generator.repurpose_content(request).await?)
    }

    /// Upload an attachment, then ask for captions describing it
    #[instrument(skip(self, request), fields(owner = %scope, file = %request.file_name))]
    pub async fn suggest_for_media(
        &self,
        scope: &OwnerScope,
        request: MediaCaptionRequest,
    ) -> Result<(String, Vec<CaptionCandidate>)> {
        let blobs = self
            .blobs
            .as_ref()
            .ok_or_else(|| PostdeckError::Config("No blob store configured".to_string()))?;
        require("goal", &request.goal)?;
        require("tone", &request.tone)?;
        if request.bytes.is_empty() {
            return Err(PostdeckError::validation("file", "Please choose a file to upload"));
        }

        let path = format!("{}/{}", scope.as_str(), request.file_name);
        let media_url = blobs.upload(request.bytes, &path).await?;

        let generation_request = CaptionRequest {
            media_url: Some(media_url.clone()),
            goal: request.goal,
            tone: request.tone,
            prompt_text: None,
            platforms: request.platforms,
        };
        let candidates = usable(self.generator.generate_caption(&generation_request).await?)?;
        Ok((media_url, candidates))
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PostdeckError::validation(field, format!("Please provide a {field}")));
    }
    Ok(())
}

fn usable(candidates: Vec<CaptionCandidate>) -> Result<Vec<CaptionCandidate>> {
    let total = candidates.len();
    let kept: Vec<CaptionCandidate> =
        candidates.into_iter().filter(|candidate| !candidate.is_blank()).collect();
    if kept.is_empty() {
        warn!(returned = total, "generation service returned no usable captions");
        return Err(PostdeckError::EmptyResult(
            "The service returned no captions for this input".to_string(),
        ));
    }
    Ok(kept)
}

fn first_usable(candidates: Vec<CaptionCandidate>) -> Result<CaptionCandidate> {
    usable(candidates)?
        .into_iter()
        .next()
        .ok_or_else(|| PostdeckError::Internal("usable candidate list was empty".to_string()))
}
