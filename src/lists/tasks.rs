use crate::db::Database;
use crate::lists::{ListChange, Listeners};
use crate::logger::EventLogger;
use crate::models::{EventType, NoteContent};
use std::sync::Arc;

/// Observable snapshot of one note's task lines, oldest first. Scoped to an
/// active note id; changing the id swaps the snapshot out from under any
/// subscribers via a full refetch.
#[derive(Debug)]
pub struct TaskList {
    db: Arc<Database>,
    logger: EventLogger,
    note_id: i64,
    rows: Vec<NoteContent>,
    listeners: Listeners,
}

impl TaskList {
    pub fn new(db: Arc<Database>, logger: EventLogger) -> Self {
        Self {
            db,
            logger,
            note_id: 0,
            rows: Vec::new(),
            listeners: Listeners::default(),
        }
    }

    pub fn subscribe(&mut self, listener: impl Fn(&ListChange) + Send + 'static) {
        self.listeners.subscribe(listener);
    }

    pub fn note_id(&self) -> i64 {
        self.note_id
    }

    /// Switches the active note. A changed id refetches immediately so the
    /// snapshot always reflects the note the UI is looking at.
    pub fn set_note_id(&mut self, note_id: i64) {
        if self.note_id == note_id {
            return;
        }
        self.note_id = note_id;
        self.refetch();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NoteContent> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[NoteContent] {
        &self.rows
    }

    /// Adds a task under the active note, audits it against the note's
    /// current title, and refetches for the store-assigned id/timestamp.
    pub fn add_item(&mut self, text: &str) {
        if let Err(error) = self.db.add_note_content(self.note_id, text) {
            tracing::warn!(note_id = self.note_id, error = %error, "failed to add task");
        }
        let note_name = self.note_name();
        self.logger.log_event(EventType::TaskAdded, &note_name, text);
        self.refetch();
    }

    /// Deletes the task at `index` and patches the snapshot locally.
    pub fn remove_item(&mut self, index: usize) {
        let Some(item) = self.rows.get(index) else {
            return;
        };
        let content_id = item.id;
        let text = item.content.clone();
        let note_name = self.note_name();
        self.logger.log_event(EventType::TaskDeleted, &note_name, &text);
        if let Err(error) = self.db.delete_note_content(content_id) {
            tracing::warn!(content_id, error = %error, "failed to delete task");
        }
        self.rows.remove(index);
        self.listeners.notify(&ListChange::RowsRemoved { start: index, end: index });
    }

    /// Flips the completion flag of the task at `index`, patching the one
    /// row in place rather than refetching.
    pub fn toggle(&mut self, index: usize, completed: bool) {
        let Some(item) = self.rows.get(index) else {
            return;
        };
        let content_id = item.id;
        let detail = format!(
            "{} -> {}",
            item.content,
            if completed { "completed" } else { "pending" }
        );
        if let Err(error) = self.db.update_note_content(content_id, completed) {
            tracing::warn!(content_id, error = %error, "failed to toggle task");
        }
        let note_name = self.note_name();
        self.logger
            .log_event(EventType::TaskStatusToggled, &note_name, &detail);
        self.rows[index].completed = completed;
        self.listeners
            .notify(&ListChange::RowChanged { index, field: "completed" });
    }

    /// Clears and repopulates the snapshot for the active note.
    pub fn refetch(&mut self) {
        self.rows = self.db.get_note_contents(self.note_id).unwrap_or_else(|error| {
            tracing::warn!(note_id = self.note_id, error = %error, "failed to fetch tasks");
            Vec::new()
        });
        self.listeners.notify(&ListChange::Reset);
    }

    fn note_name(&self) -> String {
        self.db.get_note_name(self.note_id).unwrap_or_else(|error| {
            tracing::warn!(note_id = self.note_id, error = %error, "failed to look up note title");
            String::new()
        })
    }
}
