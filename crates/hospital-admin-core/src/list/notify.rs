//! User-facing notifications raised by list mutations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Error,
}

/// A toast-style message for the host UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Most notifications an outbox holds before dropping the oldest.
pub const OUTBOX_CAPACITY: usize = 100;

/// Pending notifications, oldest first.
///
/// Hosts are expected to drain after each mutation. An outbox that is never
/// drained keeps only the newest [`OUTBOX_CAPACITY`] entries.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    queue: Vec<Notification>,
}

impl Outbox {
    pub fn push(&mut self, notification: Notification) {
        match notification.level {
            Level::Error => tracing::warn!(title = %notification.title, "{}", notification.description),
            _ => tracing::info!(title = %notification.title, "{}", notification.description),
        }
        if self.queue.len() == OUTBOX_CAPACITY {
            let dropped = self.queue.remove(0);
            tracing::debug!(title = %dropped.title, "outbox full, dropping oldest notification");
        }
        self.queue.push(notification);
    }

    pub fn pending(&self) -> &[Notification] {
        &self.queue
    }

    /// Take everything queued so far.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.queue)
    }
}
