/// Transient notifications (toasts)
///
/// A notification is fire-and-forget: handlers build one and hand it to a
/// `Notify` implementation. The app keeps them in a `Toasts` queue that is
/// pruned on a timer.
use std::time::{Duration, Instant};

/// How long a toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub description: Option<String>,
    pub severity: Severity,
    pub duration: Duration,
    pub is_closable: bool,
}

impl Notification {
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(title, Severity::Success)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(title, Severity::Error)
    }

    fn new(title: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: None,
            severity,
            duration: TOAST_DURATION,
            is_closable: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Anything that can display a notification
pub trait Notify {
    fn notify(&mut self, notification: Notification);
}

/// A notification on screen
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
    pub expires_at: Instant,
}

/// Queue of visible toasts, oldest first
#[derive(Debug, Default)]
pub struct Toasts {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl Toasts {
    pub fn push(&mut self, notification: Notification, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            expires_at: now + notification.duration,
            notification,
        });
        id
    }

    /// Drop expired toasts. Returns true if anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.expires_at > now);
        self.toasts.len() != before
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts
            .retain(|toast| toast.id != id || !toast.notification.is_closable);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let ok = Notification::success("Seed Set");
        assert_eq!(ok.severity, Severity::Success);
        assert_eq!(ok.duration, Duration::from_millis(2500));
        assert!(ok.is_closable);
        assert!(ok.description.is_none());

        let err = Notification::error("Initial Image Not Set")
            .with_description("Could not load initial image.");
        assert_eq!(err.severity, Severity::Error);
        assert_eq!(err.description.as_deref(), Some("Could not load initial image."));
    }

    #[test]
    fn test_toasts_expire() {
        let start = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push(Notification::success("first"), start);
        toasts.push(Notification::success("second"), start + Duration::from_millis(1000));

        assert!(!toasts.prune(start + Duration::from_millis(2000)));
        assert_eq!(toasts.iter().count(), 2);

        assert!(toasts.prune(start + Duration::from_millis(2500)));
        let left: Vec<_> = toasts.iter().map(|t| t.notification.title.as_str()).collect();
        assert_eq!(left, vec!["second"]);

        toasts.prune(start + Duration::from_millis(3500));
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_dismiss() {
        let now = Instant::now();
        let mut toasts = Toasts::default();
        let a = toasts.push(Notification::success("a"), now);
        let b = toasts.push(Notification::error("b"), now);
        assert_ne!(a, b);

        toasts.dismiss(a);
        let left: Vec<_> = toasts.iter().map(|t| t.id).collect();
        assert_eq!(left, vec![b]);
    }
}
