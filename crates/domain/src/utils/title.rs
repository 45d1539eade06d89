//! Title helpers for calendar entries

use crate::constants::{TITLE_TRUNCATE_SUFFIX, UNTITLED_POST_TITLE};

/// Build the calendar title for a post body.
///
/// Keeps the first `max_chars` characters of the trimmed content and appends
/// `TITLE_TRUNCATE_SUFFIX` when anything was cut. Blank or missing content
/// becomes `UNTITLED_POST_TITLE`.
///
/// # Examples
///
/// ```
/// use postdeck_domain::utils::title::title_preview;
///
/// assert_eq!(title_preview(Some("Launch day!"), 30), "Launch day!");
/// assert_eq!(title_preview(Some("abcdefgh"), 3), "abc...");
/// assert_eq!(title_preview(None, 30), "Untitled post");
/// ```
#[must_use]
pub fn title_preview(content: Option<&str>, max_chars: usize) -> String {
    let trimmed = content.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return UNTITLED_POST_TITLE.to_string();
    }

    // Char boundaries, not bytes: captions are full of emoji.
    match trimmed.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &trimmed[..cut], TITLE_TRUNCATE_SUFFIX),
        None => trimmed.to_string(),
    }
}
