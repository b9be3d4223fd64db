//! Report View - the six agent sections of a finished analysis
//!
//! Layout:
//! ```text
//! "Should I take the new job offer or stay where I am?"
//!
//! ▸ 🎯 Problem Framing
//! ▸ 💡 Option Generator
//! ▾ ✅ Decision Summary                      copied ✓
//!     Final recommendation with confidence level and next steps
//!     ## Recommendation
//!     Take the offer if the numbers hold up...
//! ```
//!
//! Sections collapse and expand independently; the last one arrives
//! expanded so the recommendation is visible without any keys. Copying
//! never changes the expansion state.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{View, ViewAction};
use crate::api::AnalysisResult;
use crate::markdown::{self, Block, Inline};
use crate::session::SessionStatus;
use crate::stage::AgentStage;
use crate::tui::state::AppState;
use crate::tui::theme::Theme;

/// How long the "copied" marker stays next to a section header.
const COPIED_MARKER: Duration = Duration::from_secs(2);

/// Report view state
pub struct ReportView {
    /// Expansion flag per section, same order as the result.
    expanded: Vec<bool>,
    selected: usize,
    /// Which section was last copied, and when.
    copied: Option<(usize, Instant)>,
}

impl ReportView {
    pub fn new() -> Self {
        Self {
            expanded: Vec::new(),
            selected: 0,
            copied: None,
        }
    }

    /// Prepare for a freshly displayed result.
    ///
    /// Every section starts collapsed except the final one, so the
    /// summary reads first without hiding the rest.
    pub fn reset_for(&mut self, section_count: usize) {
        self.expanded = vec![false; section_count];
        if let Some(last) = self.expanded.last_mut() {
            *last = true;
        }
        self.selected = 0;
        self.copied = None;
    }

    pub fn mark_copied(&mut self, index: usize) {
        self.mark_copied_at(index, Instant::now());
    }

    fn mark_copied_at(&mut self, index: usize, at: Instant) {
        self.copied = Some((index, at));
    }

    fn copied_marker_visible(&self, index: usize) -> bool {
        match self.copied {
            Some((i, at)) => i == index && Instant::now() < at + COPIED_MARKER,
            None => false,
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.get(index).copied().unwrap_or(false)
    }

    fn toggle_selected(&mut self) {
        if let Some(flag) = self.expanded.get_mut(self.selected) {
            *flag = !*flag;
        }
    }

    /// All display lines plus the line offset of each section header.
    fn section_lines<'a>(
        &self,
        result: &'a AnalysisResult,
        theme: &Theme,
    ) -> (Vec<Line<'a>>, Vec<usize>) {
        let mut lines = Vec::new();
        let mut header_offsets = Vec::with_capacity(result.agents.len());

        for (i, section) in result.agents.iter().enumerate() {
            header_offsets.push(lines.len());

            let expanded = self.is_expanded(i);
            let marker = if expanded { "▾" } else { "▸" };
            let header_style = if i == self.selected {
                theme.accent_style().add_modifier(Modifier::BOLD)
            } else {
                theme.text_style()
            };
            let mut spans = vec![Span::styled(
                format!("{} {} {}", marker, section.emoji, section.name),
                header_style,
            )];
            if self.copied_marker_visible(i) {
                spans.push(Span::styled(
                    "  copied ✓",
                    Style::default().fg(theme.success),
                ));
            }
            lines.push(Line::from(spans));

            if expanded {
                let description = AgentStage::description_for(&section.name);
                if !description.is_empty() {
                    lines.push(Line::from(Span::styled(
                        format!("    {}", description),
                        theme.text_muted_style(),
                    )));
                }
                lines.extend(markdown_lines(&section.result_text, theme));
                lines.push(Line::from(""));
            }
        }

        (lines, header_offsets)
    }
}

impl Default for ReportView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for ReportView {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let SessionStatus::Displaying(result) = state.controller.status() else {
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(
                format!("\"{}\"", state.controller.decision_text()),
                theme.text_secondary_style().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        let (section_lines, header_offsets) = self.section_lines(result, theme);
        lines.extend(section_lines);

        // Scroll so the selected header sits two rows from the top, with
        // whatever precedes it as context.
        let scroll = header_offsets
            .get(self.selected)
            .copied()
            .unwrap_or(0)
            .saturating_sub(2);

        frame.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), area);
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> ViewAction {
        let section_count = match state.controller.status() {
            SessionStatus::Displaying(result) => result.agents.len(),
            _ => 0,
        };
        self.selected = self.selected.min(section_count.saturating_sub(1));

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                ViewAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < section_count {
                    self.selected += 1;
                }
                ViewAction::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle_selected();
                ViewAction::None
            }
            KeyCode::Char('c') => ViewAction::CopySection(self.selected),
            KeyCode::Char('y') => ViewAction::CopyReport,
            KeyCode::Char('e') => ViewAction::ExportReport,
            KeyCode::Char('n') | KeyCode::Esc => ViewAction::NewAnalysis,
            KeyCode::Char('t') => ViewAction::ToggleTheme,
            _ => ViewAction::None,
        }
    }

    fn status_line(&self, _state: &AppState) -> String {
        "j/k select | Enter toggle | c copy section | y copy all | e export | n new".to_string()
    }
}

/// Convert one section's markup into styled display lines, indented
/// under its header.
fn markdown_lines<'a>(text: &str, theme: &Theme) -> Vec<Line<'a>> {
    markdown::parse(text)
        .into_iter()
        .map(|block| match block {
            Block::Heading { level, spans } => {
                let style = theme.heading_style(level);
                let mut line = vec![Span::raw("    ")];
                line.extend(spans.into_iter().map(|inline| inline_span(inline, style)));
                Line::from(line)
            }
            Block::Bullet(spans) => {
                let mut line = vec![Span::raw("    "), Span::styled("• ", theme.accent_style())];
                line.extend(
                    spans
                        .into_iter()
                        .map(|inline| inline_span(inline, theme.text_style())),
                );
                Line::from(line)
            }
            Block::Paragraph(spans) => {
                let mut line = vec![Span::raw("    ")];
                line.extend(
                    spans
                        .into_iter()
                        .map(|inline| inline_span(inline, theme.text_style())),
                );
                Line::from(line)
            }
            Block::Blank => Line::from(""),
        })
        .collect()
}

fn inline_span<'a>(inline: Inline, base: Style) -> Span<'a> {
    match inline {
        Inline::Text(text) => Span::styled(text, base),
        Inline::Bold(text) => Span::styled(text, base.add_modifier(Modifier::BOLD)),
        Inline::Italic(text) => Span::styled(text, base.add_modifier(Modifier::ITALIC)),
        Inline::BoldItalic(text) => Span::styled(
            text,
            base.add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ),
    }
}
