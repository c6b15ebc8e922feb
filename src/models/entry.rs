use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One block of billable work for a client.
///
/// Entries are immutable once recorded. `total` is computed as
/// `hours * rate` at creation and stored; invoices sum the stored value
/// rather than recomputing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkEntry {
    pub client_id: String,
    pub project: String,
    pub task: String,
    pub hours: f64,
    pub rate: f64,
    pub total: f64,
    /// Calendar date the entry was recorded, stored as `YYYY-MM-DD`.
    pub date: NaiveDate,
}

impl WorkEntry {
    /// Table description used on invoices: `"{project}: {task}"`.
    pub fn description(&self) -> String {
        format!("{}: {}", self.project, self.task)
    }
}

/// Input for logging work. Hours and rate arrive as raw text and are
/// parsed when the entry is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogWorkInput {
    pub client_id: String,
    pub project: String,
    pub task: String,
    pub hours: String,
    pub rate: String,
}

/// Append-only, chronologically ordered list of work entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkLedger {
    entries: Vec<WorkEntry>,
}

impl WorkLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: WorkEntry) {
        self.entries.push(entry);
    }

    /// Entries billed to `client_id`, in ledger order.
    pub fn for_client<'a>(&'a self, client_id: &'a str) -> impl Iterator<Item = &'a WorkEntry> {
        self.entries.iter().filter(move |e| e.client_id == client_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
