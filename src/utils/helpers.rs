//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use teloxide::types::User;

/// Substitute `{name}` placeholders in a message template
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{}}}", key), value)
    })
}

/// Calculate pagination offset for a zero-based page
pub fn calculate_offset(page: u32, page_size: u32) -> i64 {
    i64::from(page) * i64::from(page_size)
}

/// Whether another page exists after the given zero-based page
pub fn has_next_page(page: u32, page_size: u32, total_items: i64) -> bool {
    total_items > calculate_offset(page, page_size) + i64::from(page_size)
}

/// Split items into keyboard rows of at most `width` entries
pub fn chunk_rows<T: Clone>(items: &[T], width: usize) -> Vec<Vec<T>> {
    items.chunks(width.max(1)).map(|row| row.to_vec()).collect()
}

/// Render a name from Telegram profile fields
pub fn format_display_name(
    first_name: &str,
    last_name: Option<&str>,
    username: Option<&str>,
    with_at: bool,
) -> String {
    match (username, last_name) {
        (Some(username), _) if with_at => format!("@{}", username),
        (Some(username), _) => username.to_string(),
        (None, Some(last_name)) => format!("{} {}", first_name, last_name),
        (None, None) => first_name.to_string(),
    }
}

/// Display name of a Telegram user, as used in admin-facing messages
pub fn user_display_name(user: &User) -> String {
    format_display_name(
        &user.first_name,
        user.last_name.as_deref(),
        user.username.as_deref(),
        true,
    )
}

/// Parse the numeric argument at `index` of a `prefix:arg:arg` callback payload
pub fn callback_arg(parts: &[&str], index: usize) -> Option<i64> {
    parts.get(index).and_then(|value| value.parse::<i64>().ok())
}
