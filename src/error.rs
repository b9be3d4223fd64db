//! ClearThink Error Types with Error Codes
//!
//! Error code ranges:
//! - CT-001-009: Input errors
//! - CT-010-019: Analysis service errors
//! - CT-020-029: Storage errors
//! - CT-030-039: Clipboard/export errors
//! - CT-040-049: Config errors
//! - CT-050-059: Terminal/IO errors
//!
//! Every variant except config and terminal setup is non-fatal: the UI
//! surfaces it as a toast and stays interactive.

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClearThinkError>;

/// Fallback shown when the service fails without a usable `detail` message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Analysis failed";

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All error variants are part of the public API.
///
/// Implements both `thiserror::Error` for std error compatibility
/// and `miette::Diagnostic` for fancy terminal error display.
#[derive(Error, Debug, Diagnostic)]
#[diagnostic(url(docsrs))]
pub enum ClearThinkError {
    // ═══════════════════════════════════════════
    // INPUT ERRORS (001-009)
    // ═══════════════════════════════════════════
    #[error("[CT-001] Decision text cannot be empty")]
    #[diagnostic(
        code(clearthink::empty_decision),
        help("Type the decision you want analyzed before submitting")
    )]
    EmptyDecision,

    // ═══════════════════════════════════════════
    // SERVICE ERRORS (010-019)
    // ═══════════════════════════════════════════
    #[error("[CT-010] Analysis service returned {status}: {detail}")]
    #[diagnostic(
        code(clearthink::service_error),
        help("Check the service is healthy and the decision text is valid")
    )]
    Service { status: u16, detail: String },

    #[error("[CT-011] Malformed analysis response: {details}")]
    #[diagnostic(
        code(clearthink::malformed_response),
        help("The service answered 2xx but the body did not match the agents contract")
    )]
    MalformedResponse { details: String },

    #[error("[CT-012] Request failed: {0}")]
    #[diagnostic(
        code(clearthink::request_failed),
        help("Check the service URL and network connectivity")
    )]
    Request(#[from] reqwest::Error),

    // ═══════════════════════════════════════════
    // STORAGE ERRORS (020-029)
    // ═══════════════════════════════════════════
    #[error("[CT-020] Storage error for key '{key}': {reason}")]
    #[diagnostic(
        code(clearthink::storage_error),
        help("Check permissions on the state directory; the session continues in memory")
    )]
    Storage { key: String, reason: String },

    // ═══════════════════════════════════════════
    // CLIPBOARD / EXPORT ERRORS (030-039)
    // ═══════════════════════════════════════════
    #[error("[CT-030] Clipboard unavailable: {reason}")]
    #[diagnostic(
        code(clearthink::clipboard_error),
        help("Some terminals and headless sessions expose no clipboard")
    )]
    Clipboard { reason: String },

    #[error("[CT-031] Could not write export file '{path}': {reason}")]
    #[diagnostic(
        code(clearthink::export_error),
        help("Check the working directory is writable")
    )]
    Export { path: String, reason: String },

    // ═══════════════════════════════════════════
    // CONFIG ERRORS (040-049)
    // ═══════════════════════════════════════════
    #[error("[CT-040] Config error: {reason}")]
    #[diagnostic(
        code(clearthink::config_error),
        help("Check ~/.config/clearthink/config.toml for syntax errors")
    )]
    Config { reason: String },

    // ═══════════════════════════════════════════
    // TERMINAL / IO ERRORS (050-059)
    // ═══════════════════════════════════════════
    #[error("[CT-050] Terminal error: {reason}")]
    #[diagnostic(
        code(clearthink::terminal_error),
        help("Check terminal compatibility and size")
    )]
    Terminal { reason: String },

    #[error("[CT-051] IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ClearThinkError {
    /// Get the error code (e.g., "CT-010")
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyDecision => "CT-001",
            Self::Service { .. } => "CT-010",
            Self::MalformedResponse { .. } => "CT-011",
            Self::Request(_) => "CT-012",
            Self::Storage { .. } => "CT-020",
            Self::Clipboard { .. } => "CT-030",
            Self::Export { .. } => "CT-031",
            Self::Config { .. } => "CT-040",
            Self::Terminal { .. } => "CT-050",
            Self::IoError(_) => "CT-051",
        }
    }

    /// The text shown to the user in a toast.
    ///
    /// Service failures surface their `detail` verbatim (it already carries
    /// the generic fallback when the body had none); everything else keeps
    /// the full coded message for context.
    pub fn user_message(&self) -> String {
        match self {
            Self::Service { detail, .. } => detail.clone(),
            Self::MalformedResponse { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
            Self::Request(err) => err.to_string(),
            other => other.to_string(),
        }
    }
}

impl FixSuggestion for ClearThinkError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            ClearThinkError::EmptyDecision => Some("Type a decision before submitting"),
            ClearThinkError::Service { .. } => {
                Some("Check the analysis service logs and try again")
            }
            ClearThinkError::MalformedResponse { .. } => {
                Some("Verify the service version matches this client")
            }
            ClearThinkError::Request(_) => Some(
                "Check the service URL (--api-url or CLEARTHINK_API_URL) and that it is running",
            ),
            ClearThinkError::Storage { .. } => {
                Some("Check the state directory exists and is writable")
            }
            ClearThinkError::Clipboard { .. } => {
                Some("Use export-to-file instead when no clipboard is available")
            }
            ClearThinkError::Export { .. } => {
                Some("Run from a writable directory or free up disk space")
            }
            ClearThinkError::Config { .. } => {
                Some("Fix or delete ~/.config/clearthink/config.toml")
            }
            ClearThinkError::Terminal { .. } => Some("Resize the terminal and retry"),
            ClearThinkError::IoError(_) => Some("Check file path and permissions"),
        }
    }
}
