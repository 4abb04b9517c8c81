//! Short-lived messages shown after remote operations settle
use chrono::{DateTime, Duration, Local};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub created_at: DateTime<Local>,
}

/// Bounded queue of notices, newest last
#[derive(Debug, Clone)]
pub struct Notices {
    items: VecDeque<Notice>,
    ttl: Duration,
    capacity: usize,
}

impl Notices {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            ttl,
            capacity: capacity.max(1),
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Success, message.into(), Local::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Error, message.into(), Local::now());
    }

    fn push(&mut self, kind: NoticeKind, message: String, created_at: DateTime<Local>) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(Notice {
            kind,
            message,
            created_at,
        });
    }

    /// Drop notices older than the TTL
    pub fn prune(&mut self, now: DateTime<Local>) {
        let ttl = self.ttl;
        self.items.retain(|notice| now - notice.created_at < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&Notice> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
