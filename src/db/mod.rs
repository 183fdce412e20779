use crate::errors::{AppError, AppResult};
use crate::models::{EventLog, Note, NoteContent};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Single point of truth for the on-disk store. Owns the one connection;
/// all list adapters hold a shared handle and write through it.
#[derive(Debug)]
pub struct Database {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl Database {
    /// Opens (or creates) the database file and ensures the schema exists.
    pub fn open(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| AppError::Io(err.to_string()))?;
        }
        let conn = Connection::open(path).map_err(AppError::from)?;
        create_tables_from_script(&conn, SCHEMA_SQL)?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppError::Internal("database mutex poisoned".to_string()))
    }

    // ── Notes ──────────────────────────────────────────────────────────

    /// Inserts a note and returns its store-assigned id.
    pub fn add_note(&self, title: &str) -> AppResult<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO Notes (title, created_at) VALUES (?1, ?2)",
            params![title, now_text()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn update_note_title(&self, note_id: i64, new_title: &str) -> AppResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE Notes SET title = ?1 WHERE note_id = ?2",
            params![new_title, note_id],
        )?;
        Ok(())
    }

    /// All notes, newest first.
    pub fn get_all_notes(&self) -> AppResult<Vec<Note>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT note_id, title, created_at FROM Notes
             ORDER BY created_at DESC, note_id DESC",
        )?;
        let rows = stmt
            .query_map([], parse_note_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Deletes the note row only. Contents under the note are left in place;
    /// callers wanting a cascade use `delete_note_with_contents`.
    pub fn delete_note(&self, note_id: i64) -> AppResult<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM Notes WHERE note_id = ?1", params![note_id])?;
        Ok(())
    }

    /// Deletes a note and all of its contents in one transaction, so a
    /// failure on either statement leaves both tables untouched.
    pub fn delete_note_with_contents(&self, note_id: i64) -> AppResult<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute(
            "DELETE FROM NotesContents WHERE note_id = ?1",
            params![note_id],
        )?;
        tx.execute("DELETE FROM Notes WHERE note_id = ?1", params![note_id])?;
        tx.commit()?;
        Ok(())
    }

    /// Title of the note, or the empty string when no such note exists.
    /// An empty-titled note is indistinguishable from a missing one here;
    /// call sites tolerate the ambiguity.
    pub fn get_note_name(&self, note_id: i64) -> AppResult<String> {
        let conn = self.lock()?;
        let title: Option<String> = conn
            .query_row(
                "SELECT title FROM Notes WHERE note_id = ?1",
                params![note_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(title.unwrap_or_default())
    }

    // ── Note contents ──────────────────────────────────────────────────

    /// Inserts a task line under the given note; `completed` starts false.
    pub fn add_note_content(&self, note_id: i64, content: &str) -> AppResult<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO NotesContents (note_id, content, created_at) VALUES (?1, ?2, ?3)",
            params![note_id, content, now_text()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn update_note_content(&self, content_id: i64, completed: bool) -> AppResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE NotesContents SET completed = ?1 WHERE id = ?2",
            params![completed, content_id],
        )?;
        Ok(())
    }

    /// Contents of one note in chronological (oldest first) order.
    pub fn get_note_contents(&self, note_id: i64) -> AppResult<Vec<NoteContent>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, note_id, content, completed, created_at FROM NotesContents
             WHERE note_id = ?1 ORDER BY created_at ASC, id ASC",
        )?;
        let rows = stmt
            .query_map(params![note_id], parse_note_content_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn delete_note_content(&self, content_id: i64) -> AppResult<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM NotesContents WHERE id = ?1", params![content_id])?;
        Ok(())
    }

    pub fn delete_all_note_contents(&self, note_id: i64) -> AppResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "DELETE FROM NotesContents WHERE note_id = ?1",
            params![note_id],
        )?;
        Ok(())
    }

    // ── Event logs ─────────────────────────────────────────────────────

    /// Appends an audit row and returns its id. Rows are never updated or
    /// deleted by the application.
    pub fn add_event_log(&self, event_type: &str, event_description: &str) -> AppResult<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO eventLogs (event_type, event_description, created_at) VALUES (?1, ?2, ?3)",
            params![event_type, event_description, now_text()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// All audit rows, newest first.
    pub fn get_event_logs(&self) -> AppResult<Vec<EventLog>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, event_type, event_description, created_at FROM eventLogs
             ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt
            .query_map([], parse_event_log_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

/// Executes a DDL script statement-by-statement, split on `;`, stopping at
/// the first failing statement.
fn create_tables_from_script(conn: &Connection, script: &str) -> AppResult<()> {
    for statement in script.split(';') {
        let trimmed = statement.trim();
        if trimmed.is_empty() {
            continue;
        }
        conn.execute(trimmed, []).map_err(|error| {
            tracing::debug!(statement = trimmed, error = %error, "schema statement failed");
            AppError::Schema(error.to_string())
        })?;
    }
    Ok(())
}

fn now_text() -> String {
    // Fixed-width UTC text so the stored order matches the chronological one.
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_note_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        note_id: row.get(0)?,
        title: row.get(1)?,
        created_at: parse_time(&row.get::<_, String>(2)?)?,
    })
}

fn parse_note_content_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<NoteContent> {
    Ok(NoteContent {
        id: row.get(0)?,
        note_id: row.get(1)?,
        content: row.get(2)?,
        completed: row.get::<_, i64>(3)? != 0,
        created_at: parse_time(&row.get::<_, String>(4)?)?,
    })
}

fn parse_event_log_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EventLog> {
    Ok(EventLog {
        id: row.get(0)?,
        event_type: row.get(1)?,
        event_description: row.get(2)?,
        created_at: parse_time(&row.get::<_, String>(3)?)?,
    })
}

fn parse_time(raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, error.to_string())),
            )
        })
}
