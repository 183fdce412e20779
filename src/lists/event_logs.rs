use crate::db::Database;
use crate::lists::{ListChange, Listeners};
use crate::models::EventLog;
use std::sync::Arc;

/// Read-only observable snapshot of the audit log, newest first. The
/// note/task names live inside the stored JSON payload and are parsed out
/// on demand rather than at fetch time.
#[derive(Debug)]
pub struct EventLogsList {
    db: Arc<Database>,
    rows: Vec<EventLog>,
    listeners: Listeners,
}

impl EventLogsList {
    pub fn new(db: Arc<Database>) -> Self {
        let mut list = Self {
            db,
            rows: Vec::new(),
            listeners: Listeners::default(),
        };
        list.refetch();
        list
    }

    pub fn subscribe(&mut self, listener: impl Fn(&ListChange) + Send + 'static) {
        self.listeners.subscribe(listener);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&EventLog> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[EventLog] {
        &self.rows
    }

    /// The `"NoteName"` of the row's payload; empty when absent.
    pub fn note_name(&self, index: usize) -> String {
        self.payload_field(index, "NoteName")
    }

    /// The `"TaskName"` of the row's payload. Note-level events never carry
    /// one, so absence is an empty value, not an error.
    pub fn task_name(&self, index: usize) -> String {
        self.payload_field(index, "TaskName")
    }

    /// Clears and repopulates the snapshot; the only mutation this list has.
    pub fn refetch(&mut self) {
        self.rows = self.db.get_event_logs().unwrap_or_else(|error| {
            tracing::warn!(error = %error, "failed to fetch event logs");
            Vec::new()
        });
        self.listeners.notify(&ListChange::Reset);
    }

    fn payload_field(&self, index: usize, key: &str) -> String {
        let Some(row) = self.rows.get(index) else {
            return String::new();
        };
        serde_json::from_str::<serde_json::Value>(&row.event_description)
            .ok()
            .and_then(|payload| payload.get(key).and_then(|value| value.as_str().map(String::from)))
            .unwrap_or_default()
    }
}
