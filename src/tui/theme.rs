//! TUI Theme - Light and Dark Palettes
//!
//! One palette struct, two constructors. The active palette follows the
//! persisted [`ThemeMode`] and swaps wholesale on toggle; no widget holds
//! colors of its own.

use ratatui::style::{Color, Modifier, Style};

use crate::notify::ToastKind;
use crate::prefs::ThemeMode;
use crate::progress::StageState;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    // ═══════════════════════════════════════════
    // SURFACES
    // ═══════════════════════════════════════════
    pub background: Color,
    pub surface: Color,

    // ═══════════════════════════════════════════
    // TEXT
    // ═══════════════════════════════════════════
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // ═══════════════════════════════════════════
    // ACCENT AND OUTCOME
    // ═══════════════════════════════════════════
    pub accent: Color,
    pub success: Color,
    pub error: Color,

    // ═══════════════════════════════════════════
    // STAGE INDICATORS
    // ═══════════════════════════════════════════
    pub stage_pending: Color,
    pub stage_active: Color,
    pub stage_complete: Color,

    // ═══════════════════════════════════════════
    // UI ELEMENTS
    // ═══════════════════════════════════════════
    pub border_normal: Color,
    pub border_focused: Color,
    pub gauge_track: Color,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn dark() -> Self {
        Self {
            // Surfaces
            background: Color::Rgb(17, 24, 39), // #111827 gray-900
            surface: Color::Rgb(31, 41, 55),    // #1F2937 gray-800

            // Text
            text_primary: Color::Rgb(243, 244, 246),   // #F3F4F6 gray-100
            text_secondary: Color::Rgb(156, 163, 175), // #9CA3AF gray-400
            text_muted: Color::Rgb(107, 114, 128),     // #6B7280 gray-500

            // Accent and outcome
            accent: Color::Rgb(99, 102, 241), // #6366F1 indigo
            success: Color::Rgb(34, 197, 94), // #22C55E green
            error: Color::Rgb(239, 68, 68),   // #EF4444 red

            // Stages
            stage_pending: Color::Rgb(107, 114, 128),  // #6B7280 gray-500
            stage_active: Color::Rgb(245, 158, 11),    // #F59E0B amber
            stage_complete: Color::Rgb(34, 197, 94),   // #22C55E green

            // UI elements
            border_normal: Color::Rgb(75, 85, 99),     // #4B5563 gray-600
            border_focused: Color::Rgb(99, 102, 241),  // #6366F1 indigo
            gauge_track: Color::Rgb(55, 65, 81),       // #374151 gray-700
        }
    }

    pub fn light() -> Self {
        Self {
            // Surfaces
            background: Color::Rgb(249, 250, 251), // #F9FAFB gray-50
            surface: Color::Rgb(255, 255, 255),    // #FFFFFF white

            // Text
            text_primary: Color::Rgb(17, 24, 39),    // #111827 gray-900
            text_secondary: Color::Rgb(75, 85, 99),  // #4B5563 gray-600
            text_muted: Color::Rgb(156, 163, 175),   // #9CA3AF gray-400

            // Accent and outcome
            accent: Color::Rgb(79, 70, 229),  // #4F46E5 indigo-600
            success: Color::Rgb(22, 163, 74), // #16A34A green-600
            error: Color::Rgb(220, 38, 38),   // #DC2626 red-600

            // Stages
            stage_pending: Color::Rgb(156, 163, 175), // #9CA3AF gray-400
            stage_active: Color::Rgb(217, 119, 6),    // #D97706 amber-600
            stage_complete: Color::Rgb(22, 163, 74),  // #16A34A green-600

            // UI elements
            border_normal: Color::Rgb(209, 213, 219),  // #D1D5DB gray-300
            border_focused: Color::Rgb(79, 70, 229),   // #4F46E5 indigo-600
            gauge_track: Color::Rgb(229, 231, 235),    // #E5E7EB gray-200
        }
    }

    /// Whole-frame fill behind every view
    pub fn background_style(&self) -> Style {
        Style::default().bg(self.background).fg(self.text_primary)
    }

    /// Get style for panel border (focused or not)
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border_normal)
        }
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn text_muted_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for a stage row in the working checklist
    pub fn stage_style(&self, state: StageState) -> Style {
        let color = match state {
            StageState::Pending => self.stage_pending,
            StageState::Active => self.stage_active,
            StageState::Complete => self.stage_complete,
        };
        match state {
            StageState::Active => Style::default().fg(color).add_modifier(Modifier::BOLD),
            _ => Style::default().fg(color),
        }
    }

    pub fn toast_style(&self, kind: ToastKind) -> Style {
        let color = match kind {
            ToastKind::Success => self.success,
            ToastKind::Error => self.error,
        };
        Style::default().fg(color)
    }

    /// Heading style for rendered markdown, stronger at shallower levels
    pub fn heading_style(&self, level: u8) -> Style {
        let base = Style::default().fg(self.accent).add_modifier(Modifier::BOLD);
        if level == 1 {
            base.add_modifier(Modifier::UNDERLINED)
        } else {
            base
        }
    }
}
