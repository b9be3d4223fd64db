//! TUI Widgets
//!
//! Reusable UI components shared by the views.
//!
//! - Gauge: simulated-progress bar with centered percentage
//! - Spinner: frame-counter animation for the working screen
//! - ToastOverlay: stacked transient notifications

mod gauge;
mod spinner;
mod toast;

pub use gauge::Gauge;
pub use spinner::Spinner;
pub use toast::ToastOverlay;
