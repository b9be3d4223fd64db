//! Persisted record of recent analyses
//!
//! History is a newest-first list of completed analyses, bounded at
//! [`MAX_ENTRIES`]. It is stored as one JSON blob under the `history` key
//! and loaded leniently: a missing or corrupt blob yields an empty list
//! rather than an error. Failed writes keep the in-memory list intact so
//! the session flow is never blocked on persistence.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::AnalysisResult;
use crate::error::Result;
use crate::store::KeyValueStore;

/// Store key holding the serialized history list.
pub const HISTORY_KEY: &str = "history";

/// Maximum retained entries; recording an eleventh evicts the oldest.
pub const MAX_ENTRIES: usize = 10;

/// Summaries keep this many characters of the decision text.
pub const SUMMARY_MAX_CHARS: usize = 100;

const TRUNCATION_MARKER: &str = "...";

/// One completed analysis, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Millisecond timestamp, kept strictly increasing across entries.
    pub id: i64,
    pub decision_summary: String,
    /// RFC 3339 creation time.
    pub created_at: String,
    pub result: AnalysisResult,
}

/// Bounded, persisted history of completed analyses.
pub struct HistoryStore {
    store: Box<dyn KeyValueStore>,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Load history from the backing store.
    ///
    /// Missing or unparseable data starts an empty history; it will be
    /// overwritten on the next successful record.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let mut entries = Vec::new();
        if let Some(raw) = store.get(HISTORY_KEY) {
            if let Ok(parsed) = serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                entries = parsed;
            } else {
                warn!("history blob unreadable, starting empty");
            }
        }
        // Blobs written before the bound changed may carry more.
        entries.truncate(MAX_ENTRIES);
        Self { store, entries }
    }

    /// Record a completed analysis at the front of the list.
    ///
    /// The entry is kept in memory even when persistence fails, so an
    /// `Err` here is a warning for the user rather than a lost record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ClearThinkError::Storage`] when the backing
    /// store rejects the write.
    pub fn record(&mut self, decision: &str, result: &AnalysisResult) -> Result<()> {
        let entry = HistoryEntry {
            id: self.next_id(),
            decision_summary: summarize(decision),
            created_at: chrono::Utc::now().to_rfc3339(),
            result: result.clone(),
        };
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_ENTRIES);
        self.persist()
    }

    /// Entries, newest first.
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, id: i64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Drop all entries and persist the empty list.
    ///
    /// # Errors
    ///
    /// Same contract as [`HistoryStore::record`]: the in-memory list is
    /// already cleared when the write fails.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.persist()
    }

    /// Millisecond timestamp id, bumped past the newest entry so two
    /// analyses finishing within the same millisecond stay distinct.
    fn next_id(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        match self.entries.first() {
            Some(newest) => now.max(newest.id + 1),
            None => now,
        }
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.entries).unwrap_or_else(|_| "[]".to_string());
        if let Err(e) = self.store.set(HISTORY_KEY, &json) {
            warn!("failed to persist history: {e}");
            return Err(e);
        }
        Ok(())
    }
}

/// First [`SUMMARY_MAX_CHARS`] characters of the decision text, with a
/// marker when anything was cut.
fn summarize(decision: &str) -> String {
    let mut chars = decision.chars();
    let summary: String = chars.by_ref().take(SUMMARY_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{summary}{TRUNCATION_MARKER}")
    } else {
        summary
    }
}
