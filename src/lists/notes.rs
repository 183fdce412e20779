use crate::db::Database;
use crate::lists::{ListChange, Listeners};
use crate::logger::EventLogger;
use crate::models::{EventType, Note};
use std::sync::Arc;

/// Observable snapshot of all notes, newest first. The rows are a derived
/// cache; the database stays authoritative and every mutation writes through
/// before the snapshot is reconciled.
#[derive(Debug)]
pub struct NotesList {
    db: Arc<Database>,
    logger: EventLogger,
    rows: Vec<Note>,
    listeners: Listeners,
}

impl NotesList {
    pub fn new(db: Arc<Database>, logger: EventLogger) -> Self {
        Self {
            db,
            logger,
            rows: Vec::new(),
            listeners: Listeners::default(),
        }
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

    pub fn get(&self, index: usize) -> Option<&Note> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Note] {
        &self.rows
    }

    /// Inserts a note, audits the creation, and refetches the snapshot so
    /// the store-assigned id and timestamp come back authoritatively.
    pub fn add_note(&mut self, title: &str) {
        if let Err(error) = self.db.add_note(title) {
            tracing::warn!(title, error = %error, "failed to add note");
        }
        self.logger.log_event(EventType::NoteCreated, title, "");
        self.refetch();
    }

    /// Renames the note at `index`, audits the update, and refetches.
    pub fn rename_note(&mut self, index: usize, new_title: &str) {
        let Some(row) = self.rows.get(index) else {
            return;
        };
        if let Err(error) = self.db.update_note_title(row.note_id, new_title) {
            tracing::warn!(note_id = row.note_id, error = %error, "failed to rename note");
        }
        self.logger.log_event(EventType::NoteUpdated, new_title, "");
        self.refetch();
    }

    /// Deletes the note at `index` and patches the snapshot locally. The
    /// note's contents are not deleted; orphan cleanup is the caller's call.
    pub fn remove_note(&mut self, index: usize) {
        let Some(row) = self.rows.get(index) else {
            return;
        };
        let note_id = row.note_id;
        let title = row.title.clone();
        self.logger.log_event(EventType::NoteDeleted, &title, "");
        if let Err(error) = self.db.delete_note(note_id) {
            tracing::warn!(note_id, error = %error, "failed to delete note");
        }
        self.rows.remove(index);
        self.listeners.notify(&ListChange::RowsRemoved { start: index, end: index });
    }

    /// Clears and repopulates the snapshot from the store.
    pub fn refetch(&mut self) {
        self.rows = self.db.get_all_notes().unwrap_or_else(|error| {
            tracing::warn!(error = %error, "failed to fetch notes");
            Vec::new()
        });
        self.listeners.notify(&ListChange::Reset);
    }
}

#[cfg(test)]
mod tests {
    use super::NotesList;
    use crate::db::Database;
    use crate::lists::ListChange;
    use crate::logger::EventLogger;
    use std::sync::mpsc;
    use std::sync::Arc;

    fn setup(dir: &tempfile::TempDir) -> (Arc<Database>, NotesList) {
        let db = Arc::new(Database::open(&dir.path().join("test.db")).expect("db"));
        let list = NotesList::new(db.clone(), EventLogger::new(db.clone()));
        (db, list)
    }

    #[test]
    fn add_note_refetches_with_store_assigned_identity() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (_db, mut list) = setup(&dir);

        list.add_note("Groceries");
        list.add_note("Travel");

        assert_eq!(list.len(), 2);
        // Newest first after the refetch.
        assert_eq!(list.get(0).expect("row").title, "Travel");
        assert_eq!(list.get(1).expect("row").title, "Groceries");
        assert!(list.get(0).expect("row").note_id > 0);
    }

    #[test]
    fn add_note_audits_creation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (db, mut list) = setup(&dir);

        list.add_note("Groceries");

        let logs = db.get_event_logs().expect("logs");
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].event_type, "NOTE_CREATED");
        let payload: serde_json::Value =
            serde_json::from_str(&logs[0].event_description).expect("payload");
        assert_eq!(payload["NoteName"], "Groceries");
    }

    #[test]
    fn remove_note_patches_locally_and_audits() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (db, mut list) = setup(&dir);

        list.add_note("Groceries");
        list.add_note("Travel");
        let removed_id = list.get(0).expect("row").note_id;

        list.remove_note(0);

        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).expect("row").title, "Groceries");
        assert!(db
            .get_all_notes()
            .expect("notes")
            .iter()
            .all(|note| note.note_id != removed_id));
        let logs = db.get_event_logs().expect("logs");
        assert_eq!(logs[0].event_type, "NOTE_DELETED");
    }

    #[test]
    fn remove_note_out_of_range_is_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (db, mut list) = setup(&dir);

        list.add_note("Groceries");
        list.remove_note(5);

        assert_eq!(list.len(), 1);
        assert_eq!(db.get_all_notes().expect("notes").len(), 1);
    }

    #[test]
    fn rename_note_audits_update_and_refetches() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (db, mut list) = setup(&dir);

        list.add_note("draft");
        list.rename_note(0, "final");

        assert_eq!(list.get(0).expect("row").title, "final");
        let logs = db.get_event_logs().expect("logs");
        assert_eq!(logs[0].event_type, "NOTE_UPDATED");
    }

    #[test]
    fn mutations_notify_subscribers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (_db, mut list) = setup(&dir);

        let (sender, receiver) = mpsc::channel();
        list.subscribe(move |change| {
            sender.send(change.clone()).expect("send change");
        });

        list.add_note("Groceries");
        assert_eq!(receiver.try_recv().expect("change"), ListChange::Reset);

        list.remove_note(0);
        assert_eq!(
            receiver.try_recv().expect("change"),
            ListChange::RowsRemoved { start: 0, end: 0 }
        );
    }
}
