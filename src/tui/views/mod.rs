//! View dispatch
//!
//! One view per session phase: compose while idle or failed, working while
//! a request is pending, report once a result is displayed. The app picks
//! the active view from [`SessionStatus`] every frame, so views never
//! transition themselves.
//!
//! [`SessionStatus`]: crate::session::SessionStatus

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;

use crate::tui::state::AppState;
use crate::tui::theme::Theme;

mod compose;
mod report;
mod working;

pub use compose::ComposeView;
pub use report::ReportView;
pub use working::WorkingView;

/// What a key press asks the app to do.
///
/// Views return these instead of touching the controller or any IO
/// themselves; the app loop owns the side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    /// Key handled (or ignored) entirely inside the view.
    None,
    /// Exit the application.
    Quit,
    /// Submit the decision text for analysis.
    Submit(String),
    /// Abandon the in-flight analysis.
    CancelAnalysis,
    /// Leave the report and return to the compose screen.
    NewAnalysis,
    /// Flip between light and dark palettes.
    ToggleTheme,
    /// Re-display a stored analysis.
    OpenHistoryEntry(i64),
    /// Drop all stored analyses.
    ClearHistory,
    /// Copy one report section to the clipboard.
    CopySection(usize),
    /// Copy the full plain-text report to the clipboard.
    CopyReport,
    /// Write the plain-text report to a file.
    ExportReport,
}

/// Behavior shared by every screen.
pub trait View {
    /// Draw this view into `area`.
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme);

    /// React to a key press, returning the action the app should take.
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> ViewAction;

    /// One-line key hints for the footer.
    fn status_line(&self, state: &AppState) -> String;
}
