use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A note as stored in the `Notes` table. `note_id` and `created_at` are
/// assigned by the store on insert and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub note_id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// A single task/checklist line belonging to a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteContent {
    pub id: i64,
    pub note_id: i64,
    pub content: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// An append-only audit row. `event_description` is a compact JSON object
/// with a `"NoteName"` key and, for task events, a `"TaskName"` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLog {
    pub id: i64,
    pub event_type: String,
    pub event_description: String,
    pub created_at: DateTime<Utc>,
}

/// The closed set of auditable user actions. The `as_str` form is the
/// durable contract stored in `eventLogs.event_type`; readers of old rows
/// depend on these exact strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    NoteCreated,
    NoteDeleted,
    NoteUpdated,
    TaskAdded,
    TaskDeleted,
    TaskStatusToggled,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoteCreated => "NOTE_CREATED",
            Self::NoteDeleted => "NOTE_DELETED",
            Self::NoteUpdated => "NOTE_UPDATED",
            Self::TaskAdded => "TASK_ADDED",
            Self::TaskDeleted => "TASK_DELETED",
            Self::TaskStatusToggled => "TASK_STATUS_TOGGLED",
        }
    }
}
