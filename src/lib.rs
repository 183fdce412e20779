mod config;
mod db;
mod errors;
mod lists;
mod logger;
mod models;

pub use config::AppConfig;
pub use db::Database;
pub use errors::{AppError, AppResult};
pub use lists::{EventLogsList, ListChange, NotesList, TaskList};
pub use logger::EventLogger;
pub use models::{EventLog, EventType, Note, NoteContent};

use std::sync::Arc;

/// Everything a host shell needs after startup: the shared store handle and
/// the three list adapters its views bind to. Built once; the adapters all
/// write through the same `Database`.
#[derive(Debug)]
pub struct AppState {
    pub db: Arc<Database>,
    pub notes: NotesList,
    pub tasks: TaskList,
    pub event_logs: EventLogsList,
}

impl AppState {
    /// Opens the store (creating the schema on first use) and wires up the
    /// adapters, fetching the initial notes snapshot.
    pub fn init(config: &AppConfig) -> AppResult<Self> {
        let db = Arc::new(Database::open(&config.database_path)?);
        let logger = EventLogger::new(db.clone());

        let mut notes = NotesList::new(db.clone(), logger.clone());
        notes.refetch();
        let tasks = TaskList::new(db.clone(), logger);
        let event_logs = EventLogsList::new(db.clone());

        Ok(Self {
            db,
            notes,
            tasks,
            event_logs,
        })
    }
}

/// Installs a fmt subscriber honoring `RUST_LOG`. Hosts call this once at
/// startup; tests and embedders that configure their own subscriber skip it.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
