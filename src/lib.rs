//! ClearThink - terminal client for multi-agent decision analysis
//!
//! Submits a free-text decision to the CLEARTHINK service, fakes progress
//! while the single opaque request is in flight, and presents the six
//! staged agent results as an interactive, exportable report with a
//! bounded local history.
//!
//! ## Module Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        DOMAIN MODEL                          │
//! │  api        Wire contract (AnalysisResult, AgentSection)     │
//! │  stage      The six fixed agent stages and their copy        │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      APPLICATION LAYER                       │
//! │  session    Lifecycle state machine (SessionController)      │
//! │  progress   Simulated progress during the pending state      │
//! │  history    Bounded persisted cache of past analyses         │
//! │  markdown   Constrained markup → display blocks              │
//! │  export     Report document for files and copy-all           │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    INFRASTRUCTURE LAYER                      │
//! │  store      Narrow key-value persistence (FileStore)         │
//! │  prefs      Theme preference on top of the store             │
//! │  notify     Ephemeral toast queue                            │
//! │  config     Service URL and timeout resolution               │
//! │  tui        ratatui front end (feature "tui")                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Responsibilities
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`api`] | `POST /api/analyze` client and result payload types |
//! | [`stage`] | Fixed stage order, emoji, hints, descriptions |
//! | [`session`] | Idle → Pending → Displaying/Failed transitions |
//! | [`progress`] | Tick-driven percent and stage pointer |
//! | [`history`] | Newest-first, ten-entry persisted history |
//! | [`markdown`] | Lenient header/bold/italic/bullet rendering |
//! | [`export`] | Fixed-structure report serialization |
//! | [`store`] | Key-value persistence behind a swappable trait |
//! | [`prefs`] | Light/Dark preference |
//! | [`notify`] | Auto-dismissing notifications |
//! | [`config`] | File + env + flag configuration |
//! | [`error`] | Error types with fix suggestions |

// ═══════════════════════════════════════════════════════════════
// DOMAIN MODEL - Wire contract and fixed stages
// ═══════════════════════════════════════════════════════════════
pub mod api;
pub mod stage;

// ═══════════════════════════════════════════════════════════════
// APPLICATION LAYER - Session lifecycle and projections
// ═══════════════════════════════════════════════════════════════
pub mod export;
pub mod history;
pub mod markdown;
pub mod progress;
pub mod session;

// ═══════════════════════════════════════════════════════════════
// INFRASTRUCTURE LAYER - Persistence, notifications, front end
// ═══════════════════════════════════════════════════════════════
pub mod notify;
pub mod prefs;
pub mod store;
pub mod tui;

// ═══════════════════════════════════════════════════════════════
// CROSS-CUTTING - Error handling, configuration
// ═══════════════════════════════════════════════════════════════
pub mod config;
pub mod error;

// ═══════════════════════════════════════════════════════════════
// PUBLIC API RE-EXPORTS
// ═══════════════════════════════════════════════════════════════

// Error types
pub use error::{ClearThinkError, FixSuggestion, Result};

// Config types
pub use config::ClearThinkConfig;

// Wire contract (Domain Model)
pub use api::{AgentSection, AnalysisResult, AnalyzeClient};
pub use stage::{AgentStage, STAGE_COUNT};

// Session types (Application Layer)
pub use session::{Resolution, Session, SessionController, SessionStatus, SubmitOutcome};

// Progress types
pub use progress::{ProgressSimulator, StageState};

// History types
pub use history::{HistoryEntry, HistoryStore};

// Persistence and preferences
pub use prefs::ThemeMode;
pub use store::{FileStore, KeyValueStore, MemoryStore};

// Notifications
pub use notify::{Toast, ToastKind, ToastStack};
