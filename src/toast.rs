//! Transient notifications and the activity log behind them.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

/// Maximum toasts on screen at once.
pub const MAX_TOASTS: usize = 5;
/// Activity log length.
pub const MAX_LOG_ENTRIES: usize = 100;

const DEFAULT_TTL: Duration = Duration::from_secs(4);
const ERROR_TTL: Duration = Duration::from_secs(8);

/// Log level for UI messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    fn ttl(self) -> Duration {
        match self {
            LogLevel::Error => ERROR_TTL,
            _ => DEFAULT_TTL,
        }
    }
}

/// A notification shown in the corner until it expires.
#[derive(Clone, Debug)]
pub struct Toast {
    pub level: LogLevel,
    pub message: String,
    created: Instant,
    ttl: Duration,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created) >= self.ttl
    }

    /// Fraction of lifetime left, for fading.
    pub fn remaining(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.created).as_secs_f32();
        (1.0 - elapsed / self.ttl.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Log entry for display in the UI.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// On-screen toasts plus the activity log.
#[derive(Default)]
pub struct Notifications {
    toasts: VecDeque<Toast>,
    log: VecDeque<LogEntry>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast and record it in the activity log.
    pub fn push(&mut self, level: LogLevel, message: impl Into<String>, now: Instant) {
        let message = message.into();

        self.toasts.push_back(Toast {
            level,
            message: message.clone(),
            created: now,
            ttl: level.ttl(),
        });
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }

        self.record(level, message);
    }

    /// Record in the activity log only.
    pub fn record(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log.push_back(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });
        while self.log.len() > MAX_LOG_ENTRIES {
            self.log.pop_front();
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Success, message, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Error, message, Instant::now());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Warning, message, Instant::now());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message, Instant::now());
    }

    /// Drop expired toasts.
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|t| !t.is_expired(now));
    }

    pub fn dismiss(&mut self, index: usize) {
        self.toasts.remove(index);
    }

    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn has_toasts(&self) -> bool {
        !self.toasts.is_empty()
    }

    /// Most recent first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &LogEntry> {
        self.log.iter().rev().take(count)
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expiry_by_level() {
        let mut n = Notifications::new();
        let t0 = Instant::now();
        n.push(LogLevel::Success, "saved", t0);
        n.push(LogLevel::Error, "failed", t0);

        n.prune(t0 + Duration::from_secs(5));
        let left: Vec<_> = n.toasts().map(|t| t.message.as_str()).collect();
        assert_eq!(left, vec!["failed"]);

        n.prune(t0 + Duration::from_secs(8));
        assert!(!n.has_toasts());
    }

    #[test]
    fn test_toast_cap_drops_oldest() {
        let mut n = Notifications::new();
        let now = Instant::now();
        for i in 0..(MAX_TOASTS + 2) {
            n.push(LogLevel::Info, format!("msg {i}"), now);
        }
        let messages: Vec<_> = n.toasts().map(|t| t.message.clone()).collect();
        assert_eq!(messages.len(), MAX_TOASTS);
        assert_eq!(messages[0], "msg 2");
    }

    #[test]
    fn test_log_keeps_history_after_toasts_expire() {
        let mut n = Notifications::new();
        let t0 = Instant::now();
        n.push(LogLevel::Warning, "first", t0);
        n.record(LogLevel::Info, "second");
        n.prune(t0 + Duration::from_secs(60));

        let recent: Vec<_> = n.recent(10).map(|e| e.message.as_str()).collect();
        assert_eq!(recent, vec!["second", "first"]);
    }

    #[test]
    fn test_log_is_capped() {
        let mut n = Notifications::new();
        for i in 0..(MAX_LOG_ENTRIES + 5) {
            n.record(LogLevel::Info, format!("entry {i}"));
        }
        assert_eq!(n.recent(usize::MAX).count(), MAX_LOG_ENTRIES);
        assert_eq!(n.recent(1).next().map(|e| e.message.as_str()), Some("entry 104"));
    }

    #[test]
    fn test_remaining_fraction() {
        let mut n = Notifications::new();
        let t0 = Instant::now();
        n.push(LogLevel::Info, "halfway", t0);
        let toast = n.toasts().next().unwrap();
        let r = toast.remaining(t0 + Duration::from_secs(2));
        assert!((r - 0.5).abs() < 0.01);
    }
}
