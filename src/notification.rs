use std::time::{Duration, Instant};

pub const NOTIFICATION_TTL: Duration = Duration::from_millis(6_000);

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// Transient status message shown as a toast until it expires or is dismissed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub raised_at: Instant,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>, raised_at: Instant) -> Self {
        Self {
            severity,
            message: message.into(),
            raised_at,
        }
    }

    pub fn success(message: impl Into<String>, raised_at: Instant) -> Self {
        Self::new(Severity::Success, message, raised_at)
    }

    pub fn error(message: impl Into<String>, raised_at: Instant) -> Self {
        Self::new(Severity::Error, message, raised_at)
    }

    pub fn info(message: impl Into<String>, raised_at: Instant) -> Self {
        Self::new(Severity::Info, message, raised_at)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= NOTIFICATION_TTL
    }
}
