//! TUI Application
//!
//! Main event loop: drain finished requests, advance the simulated
//! progress, render, then poll keyboard input. The active view follows
//! the session status, so there is no separate screen-switching state to
//! fall out of sync.

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::{AnalysisResult, AnalyzeClient};
use crate::error::{ClearThinkError, Result};
use crate::export;
use crate::history::HistoryStore;
use crate::prefs;
use crate::progress::TICK_INTERVAL;
use crate::session::{Resolution, SessionController, SessionStatus, SubmitOutcome};
use crate::store::KeyValueStore;

use super::clipboard::{ClipboardSink, SystemClipboard};
use super::state::AppState;
use super::theme::Theme;
use super::views::{ComposeView, ReportView, View, ViewAction, WorkingView};
use super::widgets::ToastOverlay;

/// Frame rate target (60 FPS)
const FRAME_RATE_MS: u64 = 16;

/// Result of a background analyze request, tagged with the submission
/// it belongs to.
#[derive(Debug)]
enum AnalysisOutcome {
    Success {
        generation: u64,
        result: AnalysisResult,
    },
    Failure {
        generation: u64,
        message: String,
    },
}

/// Main TUI application
pub struct App {
    /// Terminal backend (initialized on run)
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
    state: AppState,
    theme: Theme,
    compose: ComposeView,
    working: WorkingView,
    report: ReportView,
    client: AnalyzeClient,
    clipboard: Box<dyn ClipboardSink>,
    /// Store backing the persisted theme choice.
    prefs_store: Box<dyn KeyValueStore>,
    /// Directory report exports land in.
    export_dir: PathBuf,
    outcome_tx: mpsc::Sender<AnalysisOutcome>,
    outcome_rx: mpsc::Receiver<AnalysisOutcome>,
    /// In-flight analyze request, aborted on cancel.
    request: Option<JoinHandle<()>>,
    last_progress_tick: Instant,
    should_quit: bool,
}

impl App {
    /// Create the application with its collaborators.
    ///
    /// Note: Terminal initialization is deferred to `run()` to allow
    /// App creation in test contexts without a TTY.
    pub fn new(
        client: AnalyzeClient,
        history: HistoryStore,
        prefs_store: Box<dyn KeyValueStore>,
        export_dir: PathBuf,
    ) -> Self {
        let theme_mode = prefs::load_theme(prefs_store.as_ref());
        let (outcome_tx, outcome_rx) = mpsc::channel(4);

        Self {
            terminal: None,
            state: AppState::new(SessionController::new(history), theme_mode),
            theme: Theme::for_mode(theme_mode),
            compose: ComposeView::new(),
            working: WorkingView::new(),
            report: ReportView::new(),
            client,
            clipboard: Box::new(SystemClipboard::new()),
            prefs_store,
            export_dir,
            outcome_tx,
            outcome_rx,
            request: None,
            last_progress_tick: Instant::now(),
            should_quit: false,
        }
    }

    /// Replace the clipboard sink (headless runs and tests).
    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardSink>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Initialize terminal for TUI rendering
    fn init_terminal(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            return Ok(());
        }

        enable_raw_mode().map_err(|e| ClearThinkError::Terminal {
            reason: format!("Failed to enable raw mode: {}", e),
        })?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|e| ClearThinkError::Terminal {
            reason: format!("Failed to enter alternate screen: {}", e),
        })?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(|e| ClearThinkError::Terminal {
            reason: format!("Failed to create terminal: {}", e),
        })?;

        self.terminal = Some(terminal);
        Ok(())
    }

    /// Run the application until quit.
    pub async fn run(mut self) -> Result<()> {
        tracing::info!("TUI started");

        self.init_terminal()?;

        let tick_rate = Duration::from_millis(FRAME_RATE_MS);

        loop {
            // 1. Collect finished requests (non-blocking)
            self.drain_outcomes();

            // 2. Advance progress, toast expiry, and the spinner
            self.advance_time();

            // 3. Render frame
            let state = &self.state;
            let theme = &self.theme;
            let compose = &self.compose;
            let working = &self.working;
            let report = &self.report;
            if let Some(ref mut terminal) = self.terminal {
                terminal
                    .draw(|frame| render_frame(frame, state, theme, compose, working, report))
                    .map_err(|e| ClearThinkError::Terminal {
                        reason: format!("Failed to draw frame: {}", e),
                    })?;
            }

            // 4. Poll keyboard input (with timeout for frame rate)
            if event::poll(tick_rate).map_err(|e| ClearThinkError::Terminal {
                reason: format!("Failed to poll events: {}", e),
            })? {
                if let Event::Key(key) = event::read().map_err(|e| ClearThinkError::Terminal {
                    reason: format!("Failed to read event: {}", e),
                })? {
                    let action = self.route_key(key);
                    self.apply_action(action);
                }
            }

            // 5. Check quit flag
            if self.should_quit {
                break;
            }
        }

        self.cleanup()
    }

    /// Apply every outcome waiting on the channel.
    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            let resolution = match outcome {
                AnalysisOutcome::Success { generation, result } => {
                    self.state.controller.on_success(generation, result)
                }
                AnalysisOutcome::Failure {
                    generation,
                    message,
                } => self.state.controller.on_failure(generation, message),
            };

            match resolution {
                Resolution::Displayed { storage_warning } => {
                    self.request = None;
                    let count = self.section_count();
                    self.report.reset_for(count);
                    if let Some(warning) = storage_warning {
                        self.state.toasts.error(warning);
                    }
                }
                Resolution::Failed { message } => {
                    self.request = None;
                    // The toast expires; the compose banner keeps the
                    // message until the next submission.
                    self.state.toasts.error(message);
                }
                Resolution::Stale => {
                    tracing::debug!("discarded outcome from a cancelled request");
                }
            }
        }
    }

    fn advance_time(&mut self) {
        if self.last_progress_tick.elapsed() >= TICK_INTERVAL {
            self.state.controller.tick_progress();
            self.last_progress_tick = Instant::now();
        }
        self.state.toasts.prune(Instant::now());
        self.state.advance_frame();
    }

    /// Send a key to the view matching the session status.
    fn route_key(&mut self, key: KeyEvent) -> ViewAction {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return ViewAction::Quit;
        }

        match self.state.controller.status() {
            SessionStatus::Pending => self.working.handle_key(key, &self.state),
            SessionStatus::Displaying(_) => self.report.handle_key(key, &self.state),
            SessionStatus::Idle | SessionStatus::Failed(_) => {
                self.compose.handle_key(key, &self.state)
            }
        }
    }

    /// Carry out the side effects a view asked for.
    fn apply_action(&mut self, action: ViewAction) {
        match action {
            ViewAction::None => {}
            ViewAction::Quit => self.should_quit = true,
            ViewAction::Submit(text) => self.submit(text),
            ViewAction::CancelAnalysis => self.cancel(),
            ViewAction::NewAnalysis => self.state.controller.reset(),
            ViewAction::ToggleTheme => self.toggle_theme(),
            ViewAction::OpenHistoryEntry(id) => {
                if self.state.controller.display_history_entry(id) {
                    let count = self.section_count();
                    self.report.reset_for(count);
                }
            }
            ViewAction::ClearHistory => match self.state.controller.clear_history() {
                Ok(()) => self.state.toasts.success("History cleared"),
                Err(err) => self.state.toasts.error(err.user_message()),
            },
            ViewAction::CopySection(index) => self.copy_section(index),
            ViewAction::CopyReport => self.copy_report(),
            ViewAction::ExportReport => self.export_report(),
        }
    }

    fn submit(&mut self, text: String) {
        match self.state.controller.submit(&text) {
            SubmitOutcome::Accepted { generation } => {
                self.spawn_request(generation);
                self.last_progress_tick = Instant::now();
            }
            SubmitOutcome::EmptyInput => self.compose.flash_invalid(),
            SubmitOutcome::AlreadyPending => {
                self.state.toasts.error("An analysis is already running");
            }
        }
    }

    fn spawn_request(&mut self, generation: u64) {
        let client = self.client.clone();
        let decision = self.state.controller.decision_text().to_string();
        let tx = self.outcome_tx.clone();

        self.request = Some(tokio::spawn(async move {
            let outcome = match client.analyze(&decision).await {
                Ok(result) => AnalysisOutcome::Success { generation, result },
                Err(err) => AnalysisOutcome::Failure {
                    generation,
                    message: err.user_message(),
                },
            };
            // The app dropping the receiver means the outcome no longer
            // matters.
            let _ = tx.send(outcome).await;
        }));
    }

    fn cancel(&mut self) {
        if self.state.controller.cancel() {
            if let Some(request) = self.request.take() {
                request.abort();
            }
            self.state.toasts.success("Analysis cancelled");
        }
    }

    fn toggle_theme(&mut self) {
        let mode = self.state.theme_mode.toggled();
        self.state.theme_mode = mode;
        self.theme = Theme::for_mode(mode);
        if let Err(err) = prefs::save_theme(self.prefs_store.as_mut(), mode) {
            tracing::warn!("theme preference not persisted: {}", err);
        }
    }

    fn copy_section(&mut self, index: usize) {
        let Some(text) = self.section_text(index) else {
            return;
        };
        match self.clipboard.copy(&text) {
            Ok(()) => {
                self.report.mark_copied(index);
                self.state.toasts.success("Section copied");
            }
            Err(err) => self.state.toasts.error(err.user_message()),
        }
    }

    fn copy_report(&mut self) {
        let document = match self.state.controller.status() {
            SessionStatus::Displaying(result) => export::report_document(
                self.state.controller.decision_text(),
                result,
                chrono::Local::now(),
            ),
            _ => return,
        };
        match self.clipboard.copy(&document) {
            Ok(()) => self.state.toasts.success("Report copied to clipboard"),
            Err(err) => self.state.toasts.error(err.user_message()),
        }
    }

    fn export_report(&mut self) {
        let written = match self.state.controller.status() {
            SessionStatus::Displaying(result) => export::write_report(
                &self.export_dir,
                self.state.controller.decision_text(),
                result,
            ),
            _ => return,
        };
        match written {
            Ok(path) => self
                .state
                .toasts
                .success(format!("Saved {}", path.display())),
            Err(err) => self.state.toasts.error(err.user_message()),
        }
    }

    fn section_text(&self, index: usize) -> Option<String> {
        match self.state.controller.status() {
            SessionStatus::Displaying(result) => {
                result.agents.get(index).map(|s| s.result_text.clone())
            }
            _ => None,
        }
    }

    fn section_count(&self) -> usize {
        match self.state.controller.status() {
            SessionStatus::Displaying(result) => result.agents.len(),
            _ => 0,
        }
    }

    /// Cleanup terminal state
    fn cleanup(&mut self) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            disable_raw_mode().map_err(|e| ClearThinkError::Terminal {
                reason: format!("Failed to disable raw mode: {}", e),
            })?;

            execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(|e| {
                ClearThinkError::Terminal {
                    reason: format!("Failed to leave alternate screen: {}", e),
                }
            })?;

            terminal.show_cursor().map_err(|e| ClearThinkError::Terminal {
                reason: format!("Failed to show cursor: {}", e),
            })?;
        }

        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Best effort cleanup
        if let Some(ref mut terminal) = self.terminal {
            let _ = disable_raw_mode();
            let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
            let _ = terminal.show_cursor();
        }
    }
}

// ═════════════════════════════════════════════════════════════════
// RENDER FUNCTIONS (standalone to avoid borrow checker issues)
// ═════════════════════════════════════════════════════════════════

fn render_frame(
    frame: &mut Frame,
    state: &AppState,
    theme: &Theme,
    compose: &ComposeView,
    working: &WorkingView,
    report: &ReportView,
) {
    let size = frame.area();
    frame.render_widget(Block::default().style(theme.background_style()), size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(size);

    let header = Line::from(vec![
        Span::styled(" 🧠 ClearThink ", theme.heading_style(2)),
        Span::styled("Think clearly, decide wisely.", theme.text_muted_style()),
    ]);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let footer = match state.controller.status() {
        SessionStatus::Pending => working.status_line(state),
        SessionStatus::Displaying(_) => report.status_line(state),
        SessionStatus::Idle | SessionStatus::Failed(_) => compose.status_line(state),
    };
    match state.controller.status() {
        SessionStatus::Pending => working.render(frame, chunks[1], state, theme),
        SessionStatus::Displaying(_) => report.render(frame, chunks[1], state, theme),
        SessionStatus::Idle | SessionStatus::Failed(_) => {
            compose.render(frame, chunks[1], state, theme)
        }
    }

    frame.render_widget(
        Paragraph::new(format!(" {}", footer)).style(theme.text_muted_style()),
        chunks[2],
    );

    frame.render_widget(ToastOverlay::new(state.toasts.visible(), theme), size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AgentSection;
    use crate::notify::ToastKind;
    use crate::stage::AgentStage;
    use crate::store::{FileStore, MemoryStore};
    use crate::tui::clipboard::CapturingClipboard;

    fn six_sections() -> AnalysisResult {
        let agents = AgentStage::ALL
            .iter()
            .map(|stage| AgentSection {
                name: stage.name().to_string(),
                emoji: stage.emoji().to_string(),
                result_text: format!("Findings from {}.", stage.name()),
            })
            .collect();
        AnalysisResult { agents }
    }

    fn test_app() -> (App, CapturingClipboard) {
        let history = HistoryStore::load(Box::new(MemoryStore::new()));
        let client =
            AnalyzeClient::new("http://127.0.0.1:9", Duration::from_secs(1)).expect("client");
        let clipboard = CapturingClipboard::new();
        let app = App::new(
            client,
            history,
            Box::new(MemoryStore::new()),
            std::env::temp_dir(),
        )
        .with_clipboard(Box::new(clipboard.clone()));
        (app, clipboard)
    }

    /// Drive the controller into Displaying without any network.
    fn show_report(app: &mut App) {
        let SubmitOutcome::Accepted { generation } =
            app.state.controller.submit("Should I take a new job offer?")
        else {
            panic!("submit rejected");
        };
        app.state.controller.on_success(generation, six_sections());
        app.report.reset_for(app.section_count());
    }

    // ═══════════════════════════ Lifecycle ═══════════════════════════

    #[test]
    fn test_app_constructible_without_tty() {
        let (app, _) = test_app();
        assert!(app.terminal.is_none());
        assert!(!app.should_quit);
        assert!(matches!(app.state.controller.status(), SessionStatus::Idle));
    }

    #[test]
    fn test_quit_action_sets_flag() {
        let (mut app, _) = test_app();
        app.apply_action(ViewAction::Quit);
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_submit_spawns_request_and_enters_pending() {
        let (mut app, _) = test_app();
        app.apply_action(ViewAction::Submit("Should I move?".to_string()));
        assert!(app.state.controller.is_pending());
        assert!(app.request.is_some());
    }

    #[test]
    fn test_empty_submission_flashes_instead_of_pending() {
        let (mut app, _) = test_app();
        app.apply_action(ViewAction::Submit("   ".to_string()));
        assert!(!app.state.controller.is_pending());
        assert!(app.request.is_none());
    }

    // ═══════════════════════════ Outcomes ═══════════════════════════

    #[test]
    fn test_success_outcome_displays_report() {
        let (mut app, _) = test_app();
        let SubmitOutcome::Accepted { generation } = app.state.controller.submit("Decide.") else {
            panic!("submit rejected");
        };

        app.outcome_tx
            .try_send(AnalysisOutcome::Success {
                generation,
                result: six_sections(),
            })
            .expect("channel has room");
        app.drain_outcomes();

        assert!(matches!(
            app.state.controller.status(),
            SessionStatus::Displaying(_)
        ));
        assert_eq!(app.state.controller.history().list().len(), 1);
    }

    #[test]
    fn test_failure_outcome_keeps_message_verbatim() {
        let (mut app, _) = test_app();
        let SubmitOutcome::Accepted { generation } = app.state.controller.submit("Decide.") else {
            panic!("submit rejected");
        };

        app.outcome_tx
            .try_send(AnalysisOutcome::Failure {
                generation,
                message: "upstream timeout".to_string(),
            })
            .expect("channel has room");
        app.drain_outcomes();

        match app.state.controller.status() {
            SessionStatus::Failed(message) => assert_eq!(message, "upstream timeout"),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(app
            .state
            .toasts
            .visible()
            .iter()
            .any(|t| t.kind == ToastKind::Error && t.message == "upstream timeout"));
    }

    #[test]
    fn test_outcome_after_cancel_is_discarded() {
        let (mut app, _) = test_app();
        let SubmitOutcome::Accepted { generation } = app.state.controller.submit("Decide.") else {
            panic!("submit rejected");
        };
        app.apply_action(ViewAction::CancelAnalysis);

        app.outcome_tx
            .try_send(AnalysisOutcome::Success {
                generation,
                result: six_sections(),
            })
            .expect("channel has room");
        app.drain_outcomes();

        assert!(matches!(app.state.controller.status(), SessionStatus::Idle));
        assert!(app.state.controller.history().list().is_empty());
        assert!(app
            .state
            .toasts
            .visible()
            .iter()
            .any(|t| t.message == "Analysis cancelled"));
    }

    // ═══════════════════════════ Copy and Export ═══════════════════════════

    #[test]
    fn test_copy_section_records_text_and_toasts() {
        let (mut app, clipboard) = test_app();
        show_report(&mut app);

        app.apply_action(ViewAction::CopySection(1));

        assert_eq!(
            clipboard.copied(),
            vec!["Findings from Option Generator.".to_string()]
        );
        assert!(app
            .state
            .toasts
            .visible()
            .iter()
            .any(|t| t.kind == ToastKind::Success));
    }

    #[test]
    fn test_copy_failure_toasts_error() {
        let (app, _) = test_app();
        let mut app = app.with_clipboard(Box::new(CapturingClipboard::failing()));
        show_report(&mut app);

        app.apply_action(ViewAction::CopySection(0));

        assert!(app
            .state
            .toasts
            .visible()
            .iter()
            .any(|t| t.kind == ToastKind::Error));
    }

    #[test]
    fn test_copy_report_produces_full_document() {
        let (mut app, clipboard) = test_app();
        show_report(&mut app);

        app.apply_action(ViewAction::CopyReport);

        let copied = clipboard.copied();
        assert_eq!(copied.len(), 1);
        assert!(copied[0].contains("CLEARTHINK DECISION ANALYSIS"));
        assert!(copied[0].contains("Decision: Should I take a new job offer?"));
        assert!(copied[0].contains("✅ Decision Summary"));
    }

    #[test]
    fn test_export_writes_report_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let history = HistoryStore::load(Box::new(MemoryStore::new()));
        let client =
            AnalyzeClient::new("http://127.0.0.1:9", Duration::from_secs(1)).expect("client");
        let mut app = App::new(
            client,
            history,
            Box::new(MemoryStore::new()),
            dir.path().to_path_buf(),
        );
        show_report(&mut app);

        app.apply_action(ViewAction::ExportReport);

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .expect("read dir")
            .collect::<std::io::Result<_>>()
            .expect("read entries");
        assert_eq!(entries.len(), 1);
        let contents = std::fs::read_to_string(entries[0].path()).expect("read export");
        assert!(contents.contains("CLEARTHINK DECISION ANALYSIS"));
    }

    // ═══════════════════════════ Theme and History ═══════════════════════════

    #[test]
    fn test_theme_toggle_flips_and_persists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let history = HistoryStore::load(Box::new(MemoryStore::new()));
        let client =
            AnalyzeClient::new("http://127.0.0.1:9", Duration::from_secs(1)).expect("client");
        let mut app = App::new(
            client,
            history,
            Box::new(FileStore::new(dir.path().to_path_buf())),
            std::env::temp_dir(),
        );

        app.apply_action(ViewAction::ToggleTheme);
        assert_eq!(app.state.theme_mode, crate::prefs::ThemeMode::Dark);

        let reloaded = prefs::load_theme(&FileStore::new(dir.path().to_path_buf()));
        assert_eq!(reloaded, crate::prefs::ThemeMode::Dark);

        // Toggling back also hits the store, restoring the original value.
        app.apply_action(ViewAction::ToggleTheme);
        let reloaded = prefs::load_theme(&FileStore::new(dir.path().to_path_buf()));
        assert_eq!(reloaded, crate::prefs::ThemeMode::Light);
    }

    #[test]
    fn test_open_history_entry_shows_stored_result() {
        let (mut app, _) = test_app();
        show_report(&mut app);
        app.apply_action(ViewAction::NewAnalysis);
        assert!(matches!(app.state.controller.status(), SessionStatus::Idle));

        let id = app.state.controller.history().list()[0].id;
        app.apply_action(ViewAction::OpenHistoryEntry(id));

        assert!(matches!(
            app.state.controller.status(),
            SessionStatus::Displaying(_)
        ));
        assert_eq!(app.section_count(), 6);
    }

    #[test]
    fn test_clear_history_empties_list_and_toasts() {
        let (mut app, _) = test_app();
        show_report(&mut app);
        app.apply_action(ViewAction::NewAnalysis);

        app.apply_action(ViewAction::ClearHistory);

        assert!(app.state.controller.history().list().is_empty());
        assert!(app
            .state
            .toasts
            .visible()
            .iter()
            .any(|t| t.message == "History cleared"));
    }
}
