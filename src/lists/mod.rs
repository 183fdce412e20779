mod event_logs;
mod notes;
mod tasks;

pub use event_logs::EventLogsList;
pub use notes::NotesList;
pub use tasks::TaskList;

/// A scoped description of how a list adapter's snapshot just changed.
/// UI bindings subscribe to these instead of inheriting a framework model
/// base class; ranges are inclusive row indices into the new snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChange {
    /// The whole snapshot was cleared and repopulated.
    Reset,
    RowsInserted { start: usize, end: usize },
    RowsRemoved { start: usize, end: usize },
    /// A single field of one row changed in place.
    RowChanged { index: usize, field: &'static str },
}

type Listener = Box<dyn Fn(&ListChange) + Send>;

/// Subscriber bookkeeping shared by the three adapters.
#[derive(Default)]
pub(crate) struct Listeners {
    inner: Vec<Listener>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, listener: impl Fn(&ListChange) + Send + 'static) {
        self.inner.push(Box::new(listener));
    }

    pub(crate) fn notify(&self, change: &ListChange) {
        for listener in &self.inner {
            listener(change);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners").field("count", &self.inner.len()).finish()
    }
}
