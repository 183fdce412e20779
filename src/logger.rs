use crate::db::Database;
use crate::models::EventType;
use std::sync::Arc;

/// Records user actions as audit rows. Failures are diagnosed and dropped;
/// auditing never blocks or fails the action that triggered it.
#[derive(Debug, Clone)]
pub struct EventLogger {
    db: Arc<Database>,
}

impl EventLogger {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Writes one audit row. `task_name` is included in the payload only
    /// when non-empty; note-level events pass an empty string.
    pub fn log_event(&self, event_type: EventType, note_name: &str, task_name: &str) {
        let mut description = serde_json::json!({ "NoteName": note_name });
        if !task_name.is_empty() {
            description["TaskName"] = serde_json::Value::from(task_name);
        }
        let payload = description.to_string();

        match self.db.add_event_log(event_type.as_str(), &payload) {
            Ok(id) => {
                tracing::debug!(event_type = event_type.as_str(), id, "event logged");
            }
            Err(error) => {
                tracing::warn!(
                    event_type = event_type.as_str(),
                    payload = %payload,
                    error = %error,
                    "failed to log event"
                );
            }
        }
    }
}
