//! CaptionService regeneration flow

#[allow(dead_code)]
mod support;

use std::sync::Arc;

use postdeck_core::{CaptionService, EditSessions, MediaCaptionRequest, RegenerateOutcome};
use postdeck_domain::{
    CaptionCandidate, OptimizeCaptionRequest, OwnerScope, PostStatus, PostdeckError,
    RegenerateCaption, RepurposeRequest,
};
use support::fixtures::post;
use support::generator::MockGenerator;
use support::store::{MockBlobStore, MockStore};

fn request(post_id: &str) -> RegenerateCaption {
    RegenerateCaption {
        post_id: post_id.to_string(),
        platform: "Instagram".to_string(),
        goal: "engagement".to_string(),
        tone: "playful".to_string(),
    }
}

fn setup(generator: MockGenerator) -> (MockStore, CaptionService) {
    let store = MockStore::new()
        .with_post(post("p1", "2024-03-05T14:00:00Z", &["Instagram"], PostStatus::Scheduled));
    let service =
        CaptionService::new(Arc::new(store.clone()), Arc::new(generator), Arc::new(EditSessions::new()));
    (store, service)
}

#[tokio::test]
async fn test_regenerate_replaces_post_content() {
    let generator = MockGenerator::new().reply(Ok(vec![
        CaptionCandidate::new("   "),
        CaptionCandidate {
            caption: "Brand new caption".to_string(),
            hashtags: vec!["spring".to_string()],
        },
    ]));
    let (store, service) = setup(generator.clone());
    let session = service.sessions().open();
    let ticket = service.sessions().begin_request(session);

    let outcome = service
        .regenerate(&OwnerScope::new("u1"), &request("p1"), &ticket)
        .await
        .expect("regenerate");

    let RegenerateOutcome::Applied(updated) = outcome else {
        panic!("expected the caption to be applied");
    };
    assert_eq!(updated.content.as_deref(), Some("Brand new caption\n\n#spring"));
    assert_eq!(updated.status, PostStatus::Scheduled);
    assert_eq!(store.posts()[0], updated);

    let sent = generator.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].prompt_text.as_deref(), Some("Caption for p1"));
    assert_eq!(sent[0].platforms, vec!["Instagram"]);
}

#[tokio::test]
async fn test_zero_candidates_is_a_distinct_error_without_writes() {
    let (store, service) = setup(MockGenerator::new().captions(&[]));
    let session = service.sessions().open();
    let ticket = service.sessions().begin_request(session);

    let err = service
        .regenerate(&OwnerScope::new("u1"), &request("p1"), &ticket)
        .await
        .unwrap_err();

    assert!(matches!(err, PostdeckError::EmptyResult(_)));
    assert!(!err.is_retryable());
    assert!(store.writes().is_empty());
    assert_eq!(store.posts()[0].content.as_deref(), Some("Caption for p1"));
}

#[tokio::test]
async fn test_transport_failure_is_retryable_without_writes() {
    let generator =
        MockGenerator::new().reply(Err(PostdeckError::Network("connection refused".to_string())));
    let (store, service) = setup(generator);
    let session = service.sessions().open();
    let ticket = service.sessions().begin_request(session);

    let err = service
        .regenerate(&OwnerScope::new("u1"), &request("p1"), &ticket)
        .await
        .unwrap_err();

    assert!(matches!(err, PostdeckError::Network(_)));
    assert!(err.is_retryable());
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn test_closed_session_discards_late_result() {
    let (store, service) = setup(MockGenerator::new().captions(&["Too late"]));
    let session = service.sessions().open();
    let ticket = service.sessions().begin_request(session);
    service.sessions().close(session);

    let outcome = service
        .regenerate(&OwnerScope::new("u1"), &request("p1"), &ticket)
        .await
        .expect("superseded is not an error");

    assert_eq!(outcome, RegenerateOutcome::Superseded);
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn test_newer_request_supersedes_older_one() {
    let (store, service) =
        setup(MockGenerator::new().captions(&["First"]).captions(&["Second"]));
    let scope = OwnerScope::new("u1");
    let session = service.sessions().open();

    let stale = service.sessions().begin_request(session);
    let fresh = service.sessions().begin_request(session);

    let first = service.regenerate(&scope, &request("p1"), &stale).await.expect("stale");
    assert_eq!(first, RegenerateOutcome::Superseded);

    let second = service.regenerate(&scope, &request("p1"), &fresh).await.expect("fresh");
    assert!(matches!(second, RegenerateOutcome::Applied(ref p) if p.content.as_deref() == Some("Second")));
    assert_eq!(store.writes().len(), 1);
}

#[tokio::test]
async fn test_blank_tone_is_rejected_before_generation() {
    let generator = MockGenerator::new().captions(&["Unused"]);
    let (_store, service) = setup(generator.clone());
    let session = service.sessions().open();
    let ticket = service.sessions().begin_request(session);
    let mut blank_tone = request("p1");
    blank_tone.tone = " ".to_string();

    let err = service.regenerate(&OwnerScope::new("u1"), &blank_tone, &ticket).await.unwrap_err();

    assert!(matches!(err, PostdeckError::Validation { ref field, .. } if field == "tone"));
    assert!(generator.requests().is_empty());
}

#[tokio::test]
async fn test_missing_post_is_not_found() {
    let (_store, service) = setup(MockGenerator::new());
    let session = service.sessions().open();
    let ticket = service.sessions().begin_request(session);

    let err = service
        .regenerate(&OwnerScope::new("u1"), &request("missing"), &ticket)
        .await
        .unwrap_err();
    assert_eq!(err, PostdeckError::NotFound("post missing".to_string()));
}

#[tokio::test]
async fn test_optimize_and_repurpose_filter_blank_candidates() {
    let (_store, service) =
        setup(MockGenerator::new().captions(&["", "Sharper"]).captions(&[]));

    let optimized = service
        .optimize(&OptimizeCaptionRequest {
            caption: "Old".to_string(),
            platform: "Instagram".to_string(),
            goal: "reach".to_string(),
        })
        .await
        .expect("optimize");
    assert_eq!(optimized, vec![CaptionCandidate::new("Sharper")]);

    let err = service
        .repurpose(&RepurposeRequest {
            content: "Long form post".to_string(),
            source_platform: "LinkedIn".to_string(),
            target_platforms: vec!["X".to_string()],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PostdeckError::EmptyResult(_)));
}

#[tokio::test]
async fn test_media_suggestions_upload_before_generating() {
    let generator = MockGenerator::new().captions(&["Look at this"]);
    let blobs = MockBlobStore::default();
    let (_store, service) = setup(generator.clone());
    let service = service.with_blob_store(Arc::new(blobs.clone()));

    let (url, captions) = service
        .suggest_for_media(
            &OwnerScope::new("u1"),
            MediaCaptionRequest {
                file_name: "shot.jpg".to_string(),
                bytes: vec![1, 2, 3],
                goal: "engagement".to_string(),
                tone: "warm".to_string(),
                platforms: vec!["Instagram".to_string()],
            },
        )
        .await
        .expect("media captions");

    assert_eq!(url, "mem://u1/shot.jpg");
    assert_eq!(blobs.paths(), vec!["u1/shot.jpg"]);
    assert_eq!(captions.len(), 1);
    assert_eq!(generator.requests()[0].media_url.as_deref(), Some("mem://u1/shot.jpg"));
}
