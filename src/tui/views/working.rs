//! Working View - live progress while the analysis request is in flight
//!
//! Layout (panel centered in the view area):
//! ```text
//! +- Analyzing ---------------------------------------+
//! | "Should I take the new job offer or stay where.." |
//! |                                                   |
//! | ████████████▌                 42%                 |
//! |                                                   |
//! | ⠹ 💡 Option Generator                             |
//! |   Generating realistic options with honest tr...  |
//! |                                                   |
//! |  ✓ 🎯 Problem Framing                             |
//! |  ▸ 💡 Option Generator                            |
//! |  ○ 🔍 Assumption Detector                         |
//! +---------------------------------------------------+
//! ```
//!
//! Everything shown here is driven by the simulator; the only real signal
//! is the request completing, which swaps this view out entirely.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{View, ViewAction};
use crate::progress::StageState;
use crate::stage::AgentStage;
use crate::tui::state::AppState;
use crate::tui::theme::Theme;
use crate::tui::widgets::{Gauge, Spinner};

/// Working view state
pub struct WorkingView;

impl WorkingView {
    pub fn new() -> Self {
        Self
    }

    fn render_stage_list(&self, frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let progress = state.controller.progress();
        let lines: Vec<Line> = AgentStage::ALL
            .iter()
            .enumerate()
            .map(|(i, stage)| {
                let stage_state = progress.stage_state(i);
                let marker = match stage_state {
                    StageState::Complete => "✓",
                    StageState::Active => "▸",
                    StageState::Pending => "○",
                };
                Line::from(vec![
                    Span::styled(format!(" {} ", marker), theme.stage_style(stage_state)),
                    Span::styled(
                        format!("{} {}", stage.emoji(), stage.name()),
                        theme.stage_style(stage_state),
                    ),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl Default for WorkingView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for WorkingView {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let panel = centered_rect(70, 80, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Analyzing ")
            .border_style(theme.border_style(true));
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        if inner.height < 4 {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // decision quote
                Constraint::Length(1),
                Constraint::Length(1), // gauge
                Constraint::Length(1),
                Constraint::Length(1), // spinner + active stage
                Constraint::Length(1), // active stage hint
                Constraint::Length(1),
                Constraint::Min(6), // stage checklist
            ])
            .split(inner);

        let quote = format!("\"{}\"", state.controller.decision_text());
        frame.render_widget(
            Paragraph::new(quote).style(theme.text_secondary_style()),
            chunks[0],
        );

        let progress = state.controller.progress();
        let gauge = Gauge::new(progress.percent())
            .fill_color(theme.accent)
            .track_color(theme.gauge_track)
            .text_color(theme.text_primary);
        frame.render_widget(gauge, chunks[2]);

        let stage = progress.current_stage();
        let spinner_area = Rect { width: 1.min(chunks[4].width), ..chunks[4] };
        frame.render_widget(
            Spinner::new(state.frame_count).color(theme.accent),
            spinner_area,
        );
        let label = Rect {
            x: chunks[4].x + 2,
            width: chunks[4].width.saturating_sub(2),
            ..chunks[4]
        };
        frame.render_widget(
            Paragraph::new(format!("{} {}", stage.emoji(), stage.name()))
                .style(theme.accent_style()),
            label,
        );
        frame.render_widget(
            Paragraph::new(format!("  {}", stage.hint())).style(theme.text_muted_style()),
            chunks[5],
        );

        self.render_stage_list(frame, chunks[7], state, theme);
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> ViewAction {
        match key.code {
            KeyCode::Esc => ViewAction::CancelAnalysis,
            KeyCode::Char('t') => ViewAction::ToggleTheme,
            _ => ViewAction::None,
        }
    }

    fn status_line(&self, state: &AppState) -> String {
        format!(
            "Esc cancel | {}% complete",
            state.controller.progress().percent()
        )
    }
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
