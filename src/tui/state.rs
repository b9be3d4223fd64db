//! Shared TUI state
//!
//! Everything the views read lives here; everything they change goes
//! through a [`ViewAction`] applied by the app loop. Views own only their
//! presentation state (focus, selection, expansion).
//!
//! [`ViewAction`]: crate::tui::views::ViewAction

use crate::notify::ToastStack;
use crate::prefs::ThemeMode;
use crate::session::SessionController;

pub struct AppState {
    pub controller: SessionController,
    pub toasts: ToastStack,
    pub theme_mode: ThemeMode,
    /// Wrapping frame counter driving spinner animation.
    pub frame_count: u8,
}

impl AppState {
    pub fn new(controller: SessionController, theme_mode: ThemeMode) -> Self {
        Self {
            controller,
            toasts: ToastStack::new(),
            theme_mode,
            frame_count: 0,
        }
    }

    pub fn advance_frame(&mut self) {
        self.frame_count = self.frame_count.wrapping_add(1);
    }
}
