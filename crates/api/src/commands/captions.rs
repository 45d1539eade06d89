//! Caption commands
//!
//! The edit modal opens a session, issues any number of regenerations and
//! closes the session. Only the newest request of an open session writes.

use postdeck_core::{MediaCaptionRequest, RegenerateOutcome, SessionId};
use postdeck_domain::{
    CaptionCandidate, OptimizeCaptionRequest, OwnerScope, Post, RegenerateCaption,
    RepurposeRequest,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::utils::command_helpers::{execute_command, CommandResult};
use crate::AppContext;

/// Upload-and-suggest form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
pub struct MediaCaptionInput {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub goal: String,
    pub tone: String,
    #[serde(default)]
    pub platforms: Vec<String>,
}

/// Stored media location plus caption suggestions for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaCaptionResponse {
    pub media_url: String,
    pub candidates: Vec<CaptionCandidate>,
}

pub fn open_caption_session(ctx: &AppContext) -> SessionId {
    ctx.sessions.open()
}

/// Results still in flight for this session are discarded on arrival.
pub fn close_caption_session(ctx: &AppContext, session: SessionId) {
    ctx.sessions.close(session);
}

/// Regenerate one post's caption inside an edit session.
///
/// Returns `None` when a newer request or closing the session superseded
/// this one; the post is then left as it was.
pub async fn regenerate_caption(
    ctx: &AppContext,
    owner: &OwnerScope,
    session: SessionId,
    request: RegenerateCaption,
) -> CommandResult<Option<Post>> {
    let ticket = ctx.sessions.begin_request(session);
    execute_command("captions::regenerate_caption", || async {
        Ok(match ctx.captions.regenerate(owner, &request, &ticket).await? {
            RegenerateOutcome::Applied(post) => Some(post),
            RegenerateOutcome::Superseded => {
                debug!(%session, post_id = %request.post_id, "Regeneration superseded");
                None
            }
        })
    })
    .await
}

pub async fn optimize_caption(
    ctx: &AppContext,
    request: OptimizeCaptionRequest,
) -> CommandResult<Vec<CaptionCandidate>> {
    execute_command("captions::optimize_caption", || ctx.captions.optimize(&request)).await
}

pub async fn repurpose_content(
    ctx: &AppContext,
    request: RepurposeRequest,
) -> CommandResult<Vec<CaptionCandidate>> {
    execute_command("captions::repurpose_content", || ctx.captions.repurpose(&request)).await
}

pub async fn suggest_captions_for_media(
    ctx: &AppContext,
    owner: &OwnerScope,
    input: MediaCaptionInput,
) -> CommandResult<MediaCaptionResponse> {
    let request = MediaCaptionRequest {
        file_name: input.file_name,
        bytes: input.bytes,
        goal: input.goal,
        tone: input.tone,
        platforms: input.platforms,
    };
    execute_command("captions::suggest_captions_for_media", || async {
        let (media_url, candidates) = ctx.captions.suggest_for_media(owner, request).await?;
        Ok(MediaCaptionResponse { media_url, candidates })
    })
    .await
}
