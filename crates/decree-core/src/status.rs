//! Self-clearing message regions.
//!
//! The board has one region for success/informational notices and one for
//! errors. A notice disappears once its time-to-live has elapsed; posting a
//! new notice into a region replaces whatever was there.

use std::time::{Duration, Instant};

/// Default lifetime of a notice.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub posted_at: Instant,
}

impl Notice {
    pub fn is_visible(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.posted_at) < ttl
    }
}

#[derive(Debug, Clone)]
pub struct StatusBoard {
    ttl: Duration,
    status: Option<Notice>,
    error: Option<Notice>,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TTL)
    }
}

impl StatusBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            status: None,
            error: None,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn post(&mut self, level: NoticeLevel, text: impl Into<String>, now: Instant) {
        let notice = Notice {
            level,
            text: text.into(),
            posted_at: now,
        };
        match level {
            NoticeLevel::Success | NoticeLevel::Info => self.status = Some(notice),
            NoticeLevel::Error => self.error = Some(notice),
        }
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.post(NoticeLevel::Success, text, Instant::now());
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.post(NoticeLevel::Info, text, Instant::now());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.post(NoticeLevel::Error, text, Instant::now());
    }

    /// The status-region notice, if still visible at `now`.
    pub fn status_at(&self, now: Instant) -> Option<&Notice> {
        self.status
            .as_ref()
            .filter(|notice| notice.is_visible(now, self.ttl))
    }

    /// The error-region notice, if still visible at `now`.
    pub fn error_at(&self, now: Instant) -> Option<&Notice> {
        self.error
            .as_ref()
            .filter(|notice| notice.is_visible(now, self.ttl))
    }

    /// Drop notices whose time has passed.
    pub fn expire(&mut self, now: Instant) {
        let ttl = self.ttl;
        if self.status.as_ref().is_some_and(|n| !n.is_visible(now, ttl)) {
            self.status = None;
        }
        if self.error.as_ref().is_some_and(|n| !n.is_visible(now, ttl)) {
            self.error = None;
        }
    }

    /// Most recent notice in either region, regardless of age.
    pub fn latest(&self) -> Option<&Notice> {
        match (&self.status, &self.error) {
            (Some(s), Some(e)) => Some(if e.posted_at >= s.posted_at { e } else { s }),
            (Some(s), None) => Some(s),
            (None, Some(e)) => Some(e),
            (None, None) => None,
        }
    }

    pub fn clear(&mut self) {
        self.status = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_clears_after_ttl() {
        let start = Instant::now();
        let mut board = StatusBoard::default();
        board.post(NoticeLevel::Success, "Policy was successfully promoted.", start);

        assert!(board.status_at(start + Duration::from_millis(4_999)).is_some());
        assert!(board.status_at(start + Duration::from_secs(5)).is_none());
    }

    #[test]
    fn newer_notice_overwrites_older() {
        let start = Instant::now();
        let mut board = StatusBoard::default();
        board.post(NoticeLevel::Error, "first", start);
        board.post(NoticeLevel::Error, "second", start + Duration::from_secs(3));

        let later = start + Duration::from_secs(6);
        assert_eq!(board.error_at(later).map(|n| n.text.as_str()), Some("second"));
    }

    #[test]
    fn regions_are_independent() {
        let start = Instant::now();
        let mut board = StatusBoard::default();
        board.post(NoticeLevel::Info, "nothing here", start);
        board.post(NoticeLevel::Error, "boom", start);

        assert_eq!(board.status_at(start).map(|n| n.level), Some(NoticeLevel::Info));
        assert_eq!(board.error_at(start).map(|n| n.level), Some(NoticeLevel::Error));
    }

    #[test]
    fn expire_drops_old_notices() {
        let start = Instant::now();
        let mut board = StatusBoard::new(Duration::from_secs(1));
        board.post(NoticeLevel::Error, "boom", start);

        board.expire(start + Duration::from_secs(2));
        assert!(board.latest().is_none());
    }
}
