//! Terminal User Interface Module
//!
//! Feature-gated client for the analysis service. One screen per session
//! phase:
//!
//! ```text
//! COMPOSE (idle / failed)            WORKING (pending)          REPORT (displaying)
//! ┌─ Your decision ───────────┐      ┌─ Analyzing ─────────┐    "Should I ...?"
//! │ Should I ...              │      │ ██████▌      42%    │    ▸ 🎯 Problem Framing
//! ├─ Try one ──┬─ History ────┤      │ ⠹ 💡 Option Gen...  │    ▸ 💡 Option Generator
//! │ > career.. │ > 08-21 ...  │      │  ✓ 🎯  ▸ 💡  ○ 🔍   │    ▾ ✅ Decision Summary
//! └────────────┴──────────────┘      └─────────────────────┘        Take the offer...
//! ```
//!
//! The compose screen submits; the working screen animates a simulated
//! pipeline until the single HTTP response lands; the report screen
//! renders the six agent sections with copy and export.

#[cfg(feature = "tui")]
mod app;
#[cfg(feature = "tui")]
mod clipboard;
#[cfg(feature = "tui")]
mod state;
#[cfg(feature = "tui")]
mod theme;
#[cfg(feature = "tui")]
mod views;
#[cfg(feature = "tui")]
mod widgets;

#[cfg(feature = "tui")]
pub use app::App;
#[cfg(feature = "tui")]
pub use clipboard::{CapturingClipboard, ClipboardSink, SystemClipboard};
#[cfg(feature = "tui")]
pub use state::AppState;
#[cfg(feature = "tui")]
pub use theme::Theme;
#[cfg(feature = "tui")]
pub use views::{ComposeView, ReportView, View, ViewAction, WorkingView};
#[cfg(feature = "tui")]
pub use widgets::{Gauge, Spinner, ToastOverlay};

/// Run the interactive client.
///
/// This function:
/// 1. Builds the HTTP client from the resolved configuration
/// 2. Loads history and the theme preference from `state_root`, falling
///    back to in-memory stores when no state directory is available
/// 3. Runs the TUI until the user quits
#[cfg(feature = "tui")]
pub async fn run_tui(
    config: &crate::config::ClearThinkConfig,
    state_root: Option<std::path::PathBuf>,
) -> crate::error::Result<()> {
    use crate::api::AnalyzeClient;
    use crate::history::HistoryStore;
    use crate::store::{FileStore, KeyValueStore, MemoryStore};

    let client = AnalyzeClient::new(&config.api_url, config.request_timeout())?;

    let (history_store, prefs_store): (Box<dyn KeyValueStore>, Box<dyn KeyValueStore>) =
        match state_root {
            Some(root) => (
                Box::new(FileStore::new(root.clone())),
                Box::new(FileStore::new(root)),
            ),
            None => {
                tracing::warn!("no state directory; history and theme will not persist");
                (Box::new(MemoryStore::new()), Box::new(MemoryStore::new()))
            }
        };
    let history = HistoryStore::load(history_store);

    // Exports land where the user launched from.
    let export_dir = std::env::current_dir().unwrap_or_default();

    let app = App::new(client, history, prefs_store, export_dir);
    app.run().await
}

#[cfg(not(feature = "tui"))]
pub async fn run_tui(
    _config: &crate::config::ClearThinkConfig,
    _state_root: Option<std::path::PathBuf>,
) -> crate::error::Result<()> {
    Err(crate::error::ClearThinkError::Terminal {
        reason: "TUI feature not enabled. Rebuild with --features tui".to_string(),
    })
}
