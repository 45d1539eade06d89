use postdeck_domain::{CalendarEvent, EventType, Post, PostStatus, Reminder, ReminderType};

/// Scheduled post on the given platforms.
pub fn post(id: &str, date: &str, platforms: &[&str], status: PostStatus) -> Post {
    let mut post = Post::new(id);
    post.content = Some(format!("Caption for {id}"));
    post.scheduled_date = Some(date.to_string());
    post.platforms = platforms.iter().map(|p| p.to_string()).collect();
    post.status = status;
    post.user_id = Some("u1".to_string());
    post
}

/// Legacy calendar document as older clients stored it.
pub fn legacy_event(id: &str, date: &str, status: PostStatus) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        title: "Legacy entry".to_string(),
        date: date.to_string(),
        event_type: EventType::Post,
        platform: "Instagram".to_string(),
        status,
        post_id: None,
        platform_index: None,
        reminder_type: None,
        reminder_description: None,
        media_url: None,
    }
}

pub fn reminder(id: &str, date: &str, reminder_type: ReminderType) -> Reminder {
    Reminder {
        id: id.to_string(),
        title: format!("Reminder {id}"),
        date: date.to_string(),
        reminder_type,
        description: None,
        reminder_time: None,
        created_at: None,
        user_id: "u1".to_string(),
    }
}
