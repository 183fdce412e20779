use notedesk::{AppConfig, AppState};

fn state_in(dir: &tempfile::TempDir) -> AppState {
    let config = AppConfig {
        database_path: dir.path().join("notes.db"),
    };
    AppState::init(&config).expect("init state")
}

// Deleting a note through the notes list does not cascade: its tasks stay
// retrievable under the old note id until someone bulk-deletes them.
#[test]
fn deleting_a_note_leaves_its_tasks_behind() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut state = state_in(&dir);

    state.notes.add_note("Groceries");
    let note_id = state.notes.get(0).expect("note row").note_id;

    state.tasks.set_note_id(note_id);
    state.tasks.add_item("Milk");
    state.tasks.toggle(0, true);

    state.notes.remove_note(0);

    assert!(state.notes.is_empty());
    let orphans = state.db.get_note_contents(note_id).expect("contents");
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].content, "Milk");
    assert!(orphans[0].completed);
}

#[test]
fn explicit_bulk_delete_before_removal_leaves_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut state = state_in(&dir);

    state.notes.add_note("Groceries");
    let note_id = state.notes.get(0).expect("note row").note_id;

    state.tasks.set_note_id(note_id);
    state.tasks.add_item("Milk");
    state.tasks.add_item("Eggs");

    state.db.delete_all_note_contents(note_id).expect("bulk delete");
    state.notes.remove_note(0);

    assert!(state.notes.is_empty());
    assert!(state.db.get_note_contents(note_id).expect("contents").is_empty());
}

#[test]
fn audit_trail_records_the_whole_session_newest_first() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut state = state_in(&dir);

    state.notes.add_note("Groceries");
    let note_id = state.notes.get(0).expect("note row").note_id;
    state.tasks.set_note_id(note_id);
    state.tasks.add_item("Milk");
    state.tasks.toggle(0, true);
    state.notes.remove_note(0);

    state.event_logs.refetch();
    let kinds: Vec<&str> = state
        .event_logs
        .rows()
        .iter()
        .map(|row| row.event_type.as_str())
        .collect();
    assert_eq!(
        kinds,
        vec!["NOTE_DELETED", "TASK_STATUS_TOGGLED", "TASK_ADDED", "NOTE_CREATED"]
    );
    // Task events name the note they happened under.
    assert_eq!(state.event_logs.note_name(2), "Groceries");
    assert_eq!(state.event_logs.task_name(2), "Milk");
    // Note-level events carry no task name at all.
    assert_eq!(state.event_logs.task_name(3), "");
}

#[test]
fn state_reopens_with_previous_contents() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut state = state_in(&dir);
        state.notes.add_note("Groceries");
    }

    let state = state_in(&dir);
    assert_eq!(state.notes.len(), 1);
    assert_eq!(state.notes.get(0).expect("note row").title, "Groceries");
    assert_eq!(state.event_logs.len(), 1);
    assert_eq!(state.event_logs.get(0).expect("log row").event_type, "NOTE_CREATED");
}
