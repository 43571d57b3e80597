//! In-memory log capture for the `/api/logs` endpoints.
//!
//! The simulator UI has a log viewer page that polls the backend for recent
//! log lines. [`LogStore`] keeps a bounded ring buffer of records and
//! [`CaptureLayer`] feeds it from the `tracing` pipeline, so everything the
//! gateway logs through `tracing` is also queryable over HTTP.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use utoipa::ToSchema;

/// One captured log record.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LogEntry {
    /// Time the event was recorded.
    pub timestamp: DateTime<Utc>,
    /// Level name (`ERROR`, `WARN`, `INFO`, `DEBUG`, `TRACE`).
    pub level: String,
    /// Module path that emitted the event.
    pub target: String,
    /// Rendered message, including any structured fields.
    pub message: String,
}

/// Bounded ring buffer of recent log records.
///
/// Shared between the [`CaptureLayer`] (producer) and the `/api/logs`
/// handlers (consumers). Oldest records are evicted once `capacity` is
/// reached.
#[derive(Debug, Clone)]
pub struct LogStore {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl LogStore {
    /// Creates an empty store retaining at most `capacity` records.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity.min(1024)))),
            capacity,
        }
    }

    /// Appends a record, evicting the oldest one at capacity.
    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Returns the most recent records matching the filters, oldest first.
    ///
    /// - `level` filters on the level name, case-insensitive.
    /// - `from` drops records older than the given timestamp.
    /// - `limit` caps the result to the newest N matches.
    #[must_use]
    pub fn query(
        &self,
        level: Option<&str>,
        from: Option<DateTime<Utc>>,
        limit: usize,
    ) -> Vec<LogEntry> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let matches: Vec<LogEntry> = entries
            .iter()
            .filter(|e| level.is_none_or(|l| e.level.eq_ignore_ascii_case(l)))
            .filter(|e| from.is_none_or(|f| e.timestamp >= f))
            .cloned()
            .collect();
        let skip = matches.len().saturating_sub(limit);
        matches.into_iter().skip(skip).collect()
    }

    /// Removes all records.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Returns the number of retained records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no records are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a `tracing` layer that copies events into this store.
    #[must_use]
    pub fn layer(&self) -> CaptureLayer {
        CaptureLayer {
            store: self.clone(),
        }
    }
}

/// `tracing_subscriber` layer forwarding every event into a [`LogStore`].
#[derive(Debug, Clone)]
pub struct CaptureLayer {
    store: LogStore,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.store.push(LogEntry {
            timestamp: Utc::now(),
            level: event.metadata().level().to_string(),
            target: event.metadata().target().to_string(),
            message: visitor.rendered(),
        });
    }
}

/// Collects the `message` field and renders the rest as `key=value` pairs.
#[derive(Debug, Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<String>,
}

impl FieldVisitor {
    fn rendered(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.join(" ")
        } else {
            format!("{} {}", self.message, self.fields.join(" "))
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push(format!("{}={value:?}", field.name()));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={value}", field.name()));
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn entry(level: &str, message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level: level.to_string(),
            target: "test".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn push_and_query() {
        let store = LogStore::new(10);
        store.push(entry("INFO", "one"));
        store.push(entry("ERROR", "two"));

        let all = store.query(None, None, 100);
        assert_eq!(all.len(), 2);
        assert_eq!(all.first().map(|e| e.message.as_str()), Some("one"));
    }

    #[test]
    fn capacity_evicts_oldest() {
        let store = LogStore::new(3);
        for i in 0..5 {
            store.push(entry("INFO", &format!("msg-{i}")));
        }
        assert_eq!(store.len(), 3);

        let all = store.query(None, None, 100);
        assert_eq!(all.first().map(|e| e.message.as_str()), Some("msg-2"));
        assert_eq!(all.last().map(|e| e.message.as_str()), Some("msg-4"));
    }

    #[test]
    fn level_filter_is_case_insensitive() {
        let store = LogStore::new(10);
        store.push(entry("INFO", "keep out"));
        store.push(entry("ERROR", "wanted"));

        let errors = store.query(Some("error"), None, 100);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().map(|e| e.message.as_str()), Some("wanted"));
    }

    #[test]
    fn limit_keeps_newest() {
        let store = LogStore::new(10);
        for i in 0..5 {
            store.push(entry("INFO", &format!("msg-{i}")));
        }
        let last_two = store.query(None, None, 2);
        assert_eq!(last_two.len(), 2);
        assert_eq!(last_two.first().map(|e| e.message.as_str()), Some("msg-3"));
    }

    #[test]
    fn from_filter_drops_older() {
        let store = LogStore::new(10);
        store.push(entry("INFO", "old"));
        let cutoff = Utc::now();
        store.push(entry("INFO", "new"));

        let recent = store.query(None, Some(cutoff), 100);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent.first().map(|e| e.message.as_str()), Some("new"));
    }

    #[test]
    fn clear_empties_store() {
        let store = LogStore::new(10);
        store.push(entry("INFO", "one"));
        assert!(!store.is_empty());
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn visitor_renders_message_and_fields() {
        let mut visitor = FieldVisitor::default();
        visitor.message = "connected".to_string();
        visitor.fields.push("host=localhost".to_string());
        assert_eq!(visitor.rendered(), "connected host=localhost");
    }
}
