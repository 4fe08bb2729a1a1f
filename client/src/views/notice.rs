//! Transient messages and navigation requests produced by views.

use std::time::Duration;

/// Notice when the user collection cannot be fetched.
pub const USERS_LOAD_FAILED: &str = "Failed to load users";
/// Notice when the category collection cannot be fetched.
pub const CATEGORIES_LOAD_FAILED: &str = "Failed to load categories";

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The action worked.
    Success,
    /// The action failed.
    Error,
}

/// A short-lived message for the user, such as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Text shown to the user.
    pub message: String,
}

impl Notice {
    /// A success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    /// An error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// Whether this reports a failure.
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// What the shell should do after a view action completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Remain on the current screen.
    Stay,
    /// Go back to the event list.
    EventList,
    /// Reload the current screen once the delay has elapsed.
    ReloadAfter(Duration),
}
