use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeKind::Success => f.write_str("success"),
            NoticeKind::Failure => f.write_str("failure"),
        }
    }
}

/// A blocking message the host must show before the user continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            message: message.into(),
        }
    }
}

/// Blocking prompts supplied by whatever hosts the panel.
pub trait UserInteraction: Send + Sync {
    fn notify(&self, notice: &Notice);

    /// Returns `true` when the user accepts.
    fn confirm(&self, question: &str) -> bool;
}
