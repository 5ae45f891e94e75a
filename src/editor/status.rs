//! Transient status messages for the message bar.

use std::time::{Duration, Instant};

/// How long a message stays visible.
pub const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// A timestamped status message.
///
/// Replaced wholesale on every status-setting call, never merged.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    text: String,
    created: Instant,
}

impl StatusMessage {
    /// Create a message stamped with the current time.
    pub fn new(text: impl Into<String>) -> Self {
        Self::created_at(text, Instant::now())
    }

    /// Create a message with an explicit creation time.
    pub fn created_at(text: impl Into<String>, created: Instant) -> Self {
        Self {
            text: text.into(),
            created,
        }
    }

    /// The message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text, if the message is still within its display window at
    /// `now`.
    pub fn visible_text(&self, now: Instant) -> Option<&str> {
        (now.saturating_duration_since(self.created) < MESSAGE_TIMEOUT).then_some(self.text.as_str())
    }
}
