//! Spinner Widget
//!
//! Animated braille spinner for the working screen. Driven by the app's
//! frame counter, so it animates even while simulated progress is pinned
//! at the ceiling.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Spinner animation frames
const FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Frames of the app loop spent on each spinner character
const FRAME_DIVISOR: u8 = 6;

/// Animated spinner widget
pub struct Spinner {
    /// Current animation frame (0-255, wraps)
    frame: u8,
    /// Color
    color: Color,
}

impl Spinner {
    pub fn new(frame: u8) -> Self {
        Self {
            frame,
            color: Color::Cyan,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Get current spinner character
    pub fn current_char(&self) -> char {
        let idx = (self.frame / FRAME_DIVISOR) as usize % FRAMES.len();
        FRAMES[idx]
    }
}

impl Widget for Spinner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        buf.set_string(
            area.x,
            area.y,
            self.current_char().to_string(),
            Style::default().fg(self.color),
        );
    }
}
