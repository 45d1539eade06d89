//! Reconciler behaviour over realistic collections
//!
//! Covers the documented calendar scenarios plus the properties every
//! reconciled list must hold (idempotence, status fidelity, no orphans,
//! eligibility, uniqueness and ordering).

#[allow(dead_code)]
mod support;

use std::collections::HashSet;

use postdeck_core::{reconcile, ReconcileOptions};
use postdeck_domain::utils::dates::parse_instant;
use postdeck_domain::{CalendarEvent, EventType, Post, PostStatus, ReminderType};
use support::fixtures::{legacy_event, post, reminder};

fn ids(events: &[CalendarEvent]) -> Vec<&str> {
    events.iter().map(|event| event.id.as_str()).collect()
}

fn options() -> ReconcileOptions {
    ReconcileOptions::default()
}

// ============================================================================
// Documented scenarios
// ============================================================================

#[test]
fn test_two_platforms_fan_out_in_order() {
    let p1 = post("p1", "2024-03-05T14:00:00Z", &["Instagram", "TikTok"], PostStatus::Scheduled);

    let events = reconcile(&[p1], &[], &[], &options());

    assert_eq!(ids(&events), vec!["post-p1-Instagram-0", "post-p1-TikTok-1"]);
    assert!(events.iter().all(|e| e.status == PostStatus::Scheduled));
    assert!(events.iter().all(|e| e.date == "2024-03-05T14:00:00Z"));
    assert_eq!(events[0].post_id.as_deref(), Some("p1"));
}

#[test]
fn test_stale_legacy_status_is_overwritten_by_post() {
    let p1 = post("p1", "2024-03-05T14:00:00Z", &["Instagram", "TikTok"], PostStatus::Scheduled);
    let stale = legacy_event("cal-p1-old", "2024-03-01T09:00:00Z", PostStatus::Published);

    let events = reconcile(&[p1], &[stale], &[], &options());

    assert_eq!(ids(&events), vec!["post-p1-Instagram-0", "post-p1-TikTok-1", "cal-p1-old"]);
    let legacy = &events[2];
    assert_eq!(legacy.status, PostStatus::Scheduled);
    assert_eq!(legacy.date, "2024-03-05T14:00:00Z");
    assert_eq!(legacy.post_id.as_deref(), Some("p1"));
}

#[test]
fn test_legacy_event_dropped_when_post_stops_qualifying() {
    let mut p1 = post("p1", "2024-03-05T14:00:00Z", &["Instagram"], PostStatus::InReview);
    let stale = legacy_event("cal-p1-old", "2024-03-05T14:00:00Z", PostStatus::Published);

    assert!(reconcile(std::slice::from_ref(&p1), std::slice::from_ref(&stale), &[], &options())
        .is_empty());

    p1.status = PostStatus::Draft;
    p1.scheduled_date = None;
    assert!(reconcile(&[p1], &[stale.clone()], &[], &options()).is_empty());

    // Deleted post.
    assert!(reconcile(&[], &[stale], &[], &options()).is_empty());
}

#[test]
fn test_legacy_duplicate_of_derived_id_is_discarded() {
    let p1 = post("p1", "2024-03-05T14:00:00Z", &["Instagram"], PostStatus::Scheduled);
    let mut duplicate =
        legacy_event("post-p1-Instagram-0", "2024-02-01T09:00:00Z", PostStatus::Published);
    duplicate.title = "Stale title".to_string();

    let events = reconcile(&[p1], &[duplicate], &[], &options());

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Caption for p1");
    assert_eq!(events[0].status, PostStatus::Scheduled);
}

#[test]
fn test_unscheduled_post_produces_nothing() {
    let mut p2 = post("p2", "", &["Instagram"], PostStatus::Scheduled);
    p2.scheduled_date = None;

    assert!(reconcile(&[p2], &[], &[], &options()).is_empty());
}

#[test]
fn test_reminder_becomes_scheduled_reminder_event() {
    let r1 = reminder("r1", "2024-03-06T20:00:00Z", ReminderType::Shoot);

    let events = reconcile(&[], &[], &[r1], &options());

    assert_eq!(ids(&events), vec!["reminder-r1"]);
    assert_eq!(events[0].event_type, EventType::Reminder);
    assert_eq!(events[0].status, PostStatus::Scheduled);
    assert_eq!(events[0].reminder_type, Some(ReminderType::Shoot));
}

#[test]
fn test_identical_instants_keep_input_order() {
    let a = post("a", "2024-03-05T14:00:00Z", &["Instagram"], PostStatus::Scheduled);
    let b = post("b", "2024-03-05T14:00:00Z", &["Instagram"], PostStatus::Draft);
    let r = reminder("r", "2024-03-05T14:00:00Z", ReminderType::Post);

    let events = reconcile(&[a.clone(), b.clone()], &[], &[r.clone()], &options());
    assert_eq!(ids(&events), vec!["post-a-Instagram-0", "post-b-Instagram-0", "reminder-r"]);

    let swapped = reconcile(&[b, a], &[], &[r], &options());
    assert_eq!(ids(&swapped), vec!["post-b-Instagram-0", "post-a-Instagram-0", "reminder-r"]);
}

#[test]
fn test_hyphenated_post_id_survives_legacy_round_trip() {
    let post_id = "roadmap-abc123-0-1-1697000000000";
    let p = post(post_id, "2024-03-05T14:00:00Z", &["Instagram"], PostStatus::Published);
    let old = legacy_event(
        "post-roadmap-abc123-0-1-1697000000000-Instagram-7",
        "2024-03-05T14:00:00Z",
        PostStatus::Draft,
    );

    let events = reconcile(&[p], &[old], &[], &options());

    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.post_id.as_deref() == Some(post_id)));
    assert!(events.iter().all(|e| e.status == PostStatus::Published));
    assert_eq!(events[1].platform_index, Some(7));
}

#[test]
fn test_unresolvable_legacy_ids_are_dropped() {
    let p1 = post("p1", "2024-03-05T14:00:00Z", &["Instagram"], PostStatus::Scheduled);
    let orphans = vec![
        legacy_event("evt-p1", "2024-03-05T14:00:00Z", PostStatus::Scheduled),
        legacy_event("cal-", "2024-03-05T14:00:00Z", PostStatus::Scheduled),
        legacy_event("", "2024-03-05T14:00:00Z", PostStatus::Scheduled),
    ];

    let events = reconcile(&[p1], &orphans, &[], &options());
    assert_eq!(ids(&events), vec!["post-p1-Instagram-0"]);
}

#[test]
fn test_explicit_association_field_beats_id_parsing() {
    let p1 = post("p1", "2024-03-05T14:00:00Z", &["Instagram"], PostStatus::Scheduled);
    let mut linked = legacy_event("evt-42", "2024-03-01T09:00:00Z", PostStatus::Published);
    linked.post_id = Some("p1".to_string());

    let events = reconcile(&[p1], &[linked], &[], &options());
    assert_eq!(ids(&events), vec!["post-p1-Instagram-0", "evt-42"]);
    assert_eq!(events[1].status, PostStatus::Scheduled);
}

// ============================================================================
// Properties over a mixed corpus
// ============================================================================

fn corpus() -> (Vec<Post>, Vec<CalendarEvent>, Vec<postdeck_domain::Reminder>) {
    let mut video = post("v1", "2024-03-02T10:00:00Z", &["TikTok"], PostStatus::Published);
    video.media_type = Some(postdeck_domain::MediaType::Video);

    let posts = vec![
        post("p1", "2024-03-05T14:00:00Z", &["Instagram", "TikTok"], PostStatus::Scheduled),
        post("p2", "2024-03-05T14:00:00Z", &["LinkedIn"], PostStatus::Draft),
        post("p3", "2024-03-10T08:00:00+02:00", &["Instagram"], PostStatus::InReview),
        post("p4", "2024-03-12T08:00", &["OnlyFans"], PostStatus::Scheduled),
        post("p5", "not a date", &["X"], PostStatus::Scheduled),
        post("roadmap-abc123-0-1-1697000000000", "2024-03-01T00:00:00Z", &["X"], PostStatus::Draft),
        video,
    ];
    let legacy = vec![
        legacy_event("cal-p1-old", "2024-02-01T00:00:00Z", PostStatus::Published),
        legacy_event("cal-p3-old", "2024-02-01T00:00:00Z", PostStatus::Published),
        legacy_event("cal-gone-1", "2024-02-01T00:00:00Z", PostStatus::Published),
        legacy_event("post-p2-LinkedIn-0", "2024-02-01T00:00:00Z", PostStatus::Published),
        legacy_event("random", "2024-02-01T00:00:00Z", PostStatus::Published),
    ];
    let reminders = vec![
        reminder("r1", "2024-03-06T20:00:00Z", ReminderType::Shoot),
        reminder("r2", "2024-03-01T00:00:00Z", ReminderType::Post),
    ];
    (posts, legacy, reminders)
}

#[test]
fn test_reconcile_is_idempotent() {
    let (posts, legacy, reminders) = corpus();
    let first = reconcile(&posts, &legacy, &reminders, &options());
    let second = reconcile(&posts, &legacy, &reminders, &options());
    assert_eq!(first, second);
}

#[test]
fn test_post_events_mirror_post_status_and_have_a_source() {
    let (posts, legacy, reminders) = corpus();
    let events = reconcile(&posts, &legacy, &reminders, &options());

    for event in events.iter().filter(|e| e.event_type != EventType::Reminder) {
        let association = event.association().expect("post events are associated");
        let source = posts
            .iter()
            .find(|p| p.id == association.post_id)
            .unwrap_or_else(|| panic!("orphan event {}", event.id));
        assert_eq!(event.status, source.status, "status of {}", event.id);
        assert!(source.scheduled_date.is_some());
        assert!(!source.targets_any(&["OnlyFans"]));
        assert_ne!(source.status, PostStatus::InReview);
    }
}

#[test]
fn test_reconciled_ids_are_unique() {
    let (posts, legacy, reminders) = corpus();
    let events = reconcile(&posts, &legacy, &reminders, &options());

    let unique: HashSet<&str> = ids(&events).into_iter().collect();
    assert_eq!(unique.len(), events.len());
}

#[test]
fn test_reconciled_dates_are_non_decreasing_with_bad_dates_last() {
    let (posts, legacy, reminders) = corpus();
    let events = reconcile(&posts, &legacy, &reminders, &options());

    let instants: Vec<_> = events.iter().map(|e| parse_instant(&e.date)).collect();
    let parsed: Vec<_> = instants.iter().take_while(|i| i.is_some()).collect();
    assert!(parsed.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(instants[parsed.len()..].iter().all(Option::is_none));
    assert_eq!(events.last().map(|e| e.id.as_str()), Some("post-p5-X-0"));
}

#[test]
fn test_corpus_contents() {
    let (posts, legacy, reminders) = corpus();
    let events = reconcile(&posts, &legacy, &reminders, &options());

    assert_eq!(
        ids(&events),
        vec![
            "post-roadmap-abc123-0-1-1697000000000-X-0",
            "reminder-r2",
            "post-v1-TikTok-0",
            "post-p1-Instagram-0",
            "post-p1-TikTok-1",
            "post-p2-LinkedIn-0",
            "cal-p1-old",
            "reminder-r1",
            "post-p5-X-0",
        ]
    );
    let reel = events.iter().find(|e| e.id == "post-v1-TikTok-0").expect("video post");
    assert_eq!(reel.event_type, EventType::Reel);
}
