pub const NEWS_UPDATED: &str = "News updated successfully";
pub const FETCH_FAILED: &str = "Failed to fetch news";
pub const REFRESH_FAILED: &str = "Failed to refresh news";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// One-shot user-facing message emitted by the sync layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn news_updated() -> Self {
        Self::success(NEWS_UPDATED)
    }

    pub fn fetch_failed() -> Self {
        Self::error(FETCH_FAILED)
    }

    pub fn refresh_failed() -> Self {
        Self::error(REFRESH_FAILED)
    }

    pub fn success(message: &str) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.to_string(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }

    /// Format: "[ok] {message}" or "[error] {message}"
    pub fn format(&self) -> String {
        match self.kind {
            NotificationKind::Success => format!("[ok] {}", self.message),
            NotificationKind::Error => format!("[error] {}", self.message),
        }
    }
}
