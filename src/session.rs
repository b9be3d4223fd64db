//! Session lifecycle state machine
//!
//! One analysis attempt is a [`Session`]: decision text plus a status that
//! walks Idle → Pending → Displaying or Failed. The [`SessionController`]
//! owns the active session, the progress simulator, and the history store,
//! and is the only place transitions happen.
//!
//! The controller performs no IO itself. The caller issues the network
//! request when [`SessionController::submit`] accepts, and reports the
//! outcome through [`on_success`]/[`on_failure`] tagged with the
//! generation the submit returned. Outcomes from a superseded generation
//! (a cancelled or replaced request) are discarded as stale, so a late
//! response can never clobber a newer session.
//!
//! [`on_success`]: SessionController::on_success
//! [`on_failure`]: SessionController::on_failure

use crate::api::AnalysisResult;
use crate::history::HistoryStore;
use crate::progress::ProgressSimulator;

/// Where the active session is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    Idle,
    Pending,
    Displaying(AnalysisResult),
    Failed(String),
}

/// The single active analysis attempt.
#[derive(Debug, Clone)]
pub struct Session {
    pub decision_text: String,
    pub status: SessionStatus,
}

impl Session {
    fn new() -> Self {
        Self {
            decision_text: String::new(),
            status: SessionStatus::Idle,
        }
    }
}

/// What [`SessionController::submit`] decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Transitioned to pending; the caller must now issue the network call
    /// and report back with this generation.
    Accepted { generation: u64 },
    /// Empty after trimming. No transition, no network call; the view
    /// should flash its invalid-input cue.
    EmptyInput,
    /// A request is already outstanding; submission stays disabled until
    /// it resolves.
    AlreadyPending,
}

/// What an outcome report did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Result accepted and displayed. `storage_warning` carries a
    /// user-facing message when the history write failed; the entry is
    /// still held in memory.
    Displayed { storage_warning: Option<String> },
    /// Failure accepted; `message` is ready for a toast, verbatim from
    /// the service where it provided one.
    Failed { message: String },
    /// The outcome belonged to a superseded request and was discarded.
    Stale,
}

/// Authoritative owner of the session lifecycle.
pub struct SessionController {
    session: Session,
    progress: ProgressSimulator,
    history: HistoryStore,
    generation: u64,
}

impl SessionController {
    pub fn new(history: HistoryStore) -> Self {
        Self {
            session: Session::new(),
            progress: ProgressSimulator::new(),
            history,
            generation: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> &SessionStatus {
        &self.session.status
    }

    pub fn decision_text(&self) -> &str {
        &self.session.decision_text
    }

    pub fn is_pending(&self) -> bool {
        self.session.status == SessionStatus::Pending
    }

    pub fn progress(&self) -> &ProgressSimulator {
        &self.progress
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Advance the progress simulation one tick. Call on the cadence of
    /// [`crate::progress::TICK_INTERVAL`]; a no-op outside pending.
    pub fn tick_progress(&mut self) {
        self.progress.tick();
    }

    /// Validate input and enter pending.
    ///
    /// On acceptance the previous report is discarded, the progress
    /// simulation restarts from zero, and the returned generation tags
    /// the network call the caller must now issue.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        if self.is_pending() {
            return SubmitOutcome::AlreadyPending;
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SubmitOutcome::EmptyInput;
        }

        self.generation += 1;
        self.session.decision_text = trimmed.to_string();
        self.session.status = SessionStatus::Pending;
        self.progress.start();
        SubmitOutcome::Accepted {
            generation: self.generation,
        }
    }

    /// Accept a successful result for `generation`.
    ///
    /// Snaps progress to done, records history, and moves to displaying.
    /// A failed history write is reported in the resolution rather than
    /// blocking the display.
    pub fn on_success(&mut self, generation: u64, result: AnalysisResult) -> Resolution {
        if !self.accepts(generation) {
            return Resolution::Stale;
        }

        self.progress.finish();
        let storage_warning = self
            .history
            .record(&self.session.decision_text, &result)
            .err()
            .map(|e| e.user_message());
        self.session.status = SessionStatus::Displaying(result);
        Resolution::Displayed { storage_warning }
    }

    /// Accept a failure for `generation`.
    ///
    /// Stops the simulation where it was, moves to failed, and hands the
    /// message back for notification. Nothing is persisted; submission is
    /// open again immediately.
    pub fn on_failure(&mut self, generation: u64, message: String) -> Resolution {
        if !self.accepts(generation) {
            return Resolution::Stale;
        }

        self.progress.stop();
        self.session.status = SessionStatus::Failed(message.clone());
        Resolution::Failed { message }
    }

    /// Abandon the outstanding request, if any.
    ///
    /// Bumps the generation so the in-flight outcome lands stale, stops
    /// the simulation, and returns to input-ready. The caller should also
    /// abort the request task; `true` says there was one to abort.
    pub fn cancel(&mut self) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.generation += 1;
        self.progress.stop();
        self.session.status = SessionStatus::Idle;
        true
    }

    /// Discard the displayed report or failure and return to input-ready.
    /// History keeps whatever was already persisted.
    pub fn reset(&mut self) {
        if self.is_pending() {
            self.cancel();
            return;
        }
        self.session.status = SessionStatus::Idle;
    }

    /// Re-display a past result without a network call.
    ///
    /// Returns `false` when the id is unknown. The entry's summary stands
    /// in as the session's decision text for display and export.
    pub fn display_history_entry(&mut self, id: i64) -> bool {
        if self.is_pending() {
            return false;
        }
        let Some(entry) = self.history.lookup(id) else {
            return false;
        };
        self.session.decision_text = entry.decision_summary.clone();
        self.session.status = SessionStatus::Displaying(entry.result.clone());
        true
    }

    /// Empty the persisted history.
    ///
    /// # Errors
    ///
    /// Propagates the store's write failure; the in-memory list is
    /// already empty either way.
    pub fn clear_history(&mut self) -> crate::error::Result<()> {
        self.history.clear()
    }

    fn accepts(&self, generation: u64) -> bool {
        self.is_pending() && generation == self.generation
    }
}
