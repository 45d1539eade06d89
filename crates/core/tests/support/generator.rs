use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use postdeck_core::CaptionGenerator;
use postdeck_domain::{
    CaptionCandidate, CaptionRequest, OptimizeCaptionRequest, RepurposeRequest,
    Result as DomainResult,
};

type Reply = DomainResult<Vec<CaptionCandidate>>;

/// Scripted mock for `CaptionGenerator`.
///
/// Replies are served in order; once the script runs out every call returns
/// an empty candidate list. Requests are recorded for assertions.
#[derive(Default, Clone)]
pub struct MockGenerator {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<CaptionRequest>>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn captions(self, captions: &[&str]) -> Self {
        self.reply(Ok(captions.iter().map(|c| CaptionCandidate::new(*c)).collect()))
    }

    pub fn requests(&self) -> Vec<CaptionRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next(&self) -> Reply {
        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[async_trait]
impl CaptionGenerator for MockGenerator {
    async fn generate_caption(&self, request: &CaptionRequest) -> Reply {
        self.requests.lock().unwrap().push(request.clone());
        self.next()
    }

    async fn optimize_caption(&self, _request: &OptimizeCaptionRequest) -> Reply {
        self.next()
    }

    async fn repurpose_content(&self, _request: &RepurposeRequest) -> Reply {
        self.next()
    }
}
