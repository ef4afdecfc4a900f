//! User-facing notifications and the toast queue that displays them

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How a notification is styled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Destructive,
}

/// A discrete message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }

    #[allow(dead_code)]
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, Severity::Info)
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, Severity::Success)
    }

    pub fn destructive(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, Severity::Destructive)
    }
}

/// Fire-and-forget receiver of notifications
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// A notification on screen
#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub shown_at: Instant,
}

/// Notifications waiting to expire, oldest first
#[derive(Debug)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    ttl: Duration,
    capacity: usize,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Duration::from_secs(4), 5)
    }
}

impl ToastQueue {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            toasts: VecDeque::new(),
            ttl,
            capacity,
        }
    }

    /// Drop expired toasts
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.toasts
            .retain(|t| now.saturating_duration_since(t.shown_at) < ttl);
    }

    /// Dismiss the toast at `index`
    pub fn dismiss(&mut self, index: usize) {
        self.toasts.remove(index);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Time until the oldest toast expires
    pub fn next_expiry(&self, now: Instant) -> Option<Duration> {
        self.toasts
            .front()
            .map(|t| self.ttl.saturating_sub(now.saturating_duration_since(t.shown_at)))
    }

    fn push_at(&mut self, notification: Notification, shown_at: Instant) {
        if self.toasts.len() == self.capacity {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            notification,
            shown_at,
        });
    }
}

impl NotificationSink for ToastQueue {
    fn notify(&mut self, notification: Notification) {
        match notification.severity {
            Severity::Destructive => tracing::warn!("{}: {}", notification.title, notification.message),
            _ => tracing::info!("{}: {}", notification.title, notification.message),
        }

        self.push_at(notification, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_expire() {
        let mut queue = ToastQueue::new(Duration::from_secs(4), 5);
        let start = Instant::now();
        queue.push_at(Notification::success("Form Saved", "saved"), start);
        queue.push_at(Notification::info("Later", "later"), start + Duration::from_secs(2));

        queue.prune(start + Duration::from_secs(3));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.next_expiry(start + Duration::from_secs(3)), Some(Duration::from_secs(1)));

        queue.prune(start + Duration::from_secs(5));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.iter().next().unwrap().notification.title, "Later");

        queue.prune(start + Duration::from_secs(7));
        assert!(queue.is_empty());
        assert_eq!(queue.next_expiry(start), None);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut queue = ToastQueue::new(Duration::from_secs(4), 2);
        queue.notify(Notification::info("one", ""));
        queue.notify(Notification::info("two", ""));
        queue.notify(Notification::destructive("three", ""));

        let titles: Vec<_> = queue.iter().map(|t| t.notification.title.as_str()).collect();
        assert_eq!(titles, vec!["two", "three"]);

        queue.dismiss(0);
        assert_eq!(queue.len(), 1);
    }
}
