use postdeck_domain::{Config, OwnerScope};
use postdeck_infra::StoreSnapshot;
use postdeck_lib::AppContext;
use tempfile::TempDir;

pub const POST_ID: &str = "launch-abc123-0-1-1709000000000";

const SNAPSHOT: &str = r#"{
    "posts": [
        {
            "id": "launch-abc123-0-1-1709000000000",
            "content": "Launch day is finally here for the whole team",
            "scheduledDate": "2024-03-05T14:00:00.000Z",
            "platforms": ["Instagram", "LinkedIn"],
            "status": "Scheduled"
        }
    ],
    "reminders": [
        { "id": "r1", "title": "Studio shoot", "date": "2024-03-04T08:00:00.000Z",
          "reminderType": "shoot", "userId": "u1" }
    ]
}"#;

pub fn owner() -> OwnerScope {
    OwnerScope::new("u1")
}

/// Context seeded with one post and one reminder; generation points at `generation_url`.
pub fn seeded_context(generation_url: &str) -> (AppContext, TempDir) {
    let temp_dir = TempDir::new().expect("failed to create temporary test directory");

    let mut config = Config::default();
    config.storage.blob_root = temp_dir.path().join("media").to_string_lossy().into_owned();
    config.generation.base_url = generation_url.to_string();
    config.generation.max_attempts = 1;

    let snapshot: StoreSnapshot = serde_json::from_str(SNAPSHOT).expect("snapshot");
    let ctx = AppContext::with_snapshot(config, owner(), snapshot).expect("test context");
    (ctx, temp_dir)
}
