//! Compose View - decision input with use cases and saved history
//!
//! Layout:
//! ```text
//! +- Your decision (42 chars) ----------------------------------+
//! | Should I take the new job offer or stay where I am?         |
//! +--------------------------------------------------------------+
//! +- Try one of these ---------------+  +- History ---------------+
//! | > Should I change careers and... |  | > 08-21 14:02 Should... |
//! |   Should I take the new job o... |  |   08-20 09:15 Should... |
//! +----------------------------------+  +-------------------------+
//! ```
//!
//! Also shown here: the failure banner when the last analysis errored,
//! and a brief red flash on the input border when an empty submission
//! is rejected.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use super::{View, ViewAction};
use crate::session::SessionStatus;
use crate::tui::state::AppState;
use crate::tui::theme::Theme;

/// How long the input border stays red after an empty submission.
const INVALID_FLASH: Duration = Duration::from_millis(500);

/// Prompts offered when the user has nothing typed yet.
const USE_CASES: &[&str] = &[
    "Should I change careers and move into data science?",
    "Should I take the new job offer or stay where I am?",
    "Should we relocate the family to another city next year?",
    "Should we pivot the product to the enterprise market?",
];

const INPUT_PLACEHOLDER: &str = "Describe the decision you need to make...";

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeFocus {
    Input,
    UseCases,
    History,
}

/// Single-line text editor indexed by character, not byte.
///
/// Cursor positions stay valid for any input the terminal can deliver,
/// including multibyte and wide characters.
#[derive(Debug, Default)]
struct EditBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl EditBuffer {
    fn text(&self) -> String {
        self.chars.iter().collect()
    }

    fn char_count(&self) -> usize {
        self.chars.len()
    }

    fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    fn insert(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_right(&mut self) {
        if self.cursor < self.chars.len() {
            self.cursor += 1;
        }
    }

    fn move_home(&mut self) {
        self.cursor = 0;
    }

    fn move_end(&mut self) {
        self.cursor = self.chars.len();
    }

    fn set_text(&mut self, text: &str) {
        self.chars = text.chars().collect();
        self.cursor = self.chars.len();
    }

    fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    /// Display columns occupied by the text left of the cursor.
    fn width_before_cursor(&self) -> usize {
        self.chars[..self.cursor]
            .iter()
            .map(|c| UnicodeWidthChar::width(*c).unwrap_or(0))
            .sum()
    }
}

/// Compose view state
pub struct ComposeView {
    input: EditBuffer,
    focus: ComposeFocus,
    use_case_index: usize,
    history_index: usize,
    /// Set when an empty submission was rejected; cleared by time.
    invalid_until: Option<Instant>,
}

impl ComposeView {
    pub fn new() -> Self {
        Self {
            input: EditBuffer::default(),
            focus: ComposeFocus::Input,
            use_case_index: 0,
            history_index: 0,
            invalid_until: None,
        }
    }

    /// Start the red border flash shown for rejected empty submissions.
    pub fn flash_invalid(&mut self) {
        self.flash_invalid_at(Instant::now());
    }

    fn flash_invalid_at(&mut self, at: Instant) {
        self.invalid_until = Some(at + INVALID_FLASH);
    }

    fn flash_active(&self) -> bool {
        self.invalid_until
            .map(|until| Instant::now() < until)
            .unwrap_or(false)
    }

    pub fn input_text(&self) -> String {
        self.input.text()
    }

    pub fn focus(&self) -> ComposeFocus {
        self.focus
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            ComposeFocus::Input => ComposeFocus::UseCases,
            ComposeFocus::UseCases => ComposeFocus::History,
            ComposeFocus::History => ComposeFocus::Input,
        };
    }

    fn focus_prev(&mut self) {
        self.focus = match self.focus {
            ComposeFocus::Input => ComposeFocus::History,
            ComposeFocus::UseCases => ComposeFocus::Input,
            ComposeFocus::History => ComposeFocus::UseCases,
        };
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> ViewAction {
        match key.code {
            KeyCode::Enter => ViewAction::Submit(self.input.text()),
            KeyCode::Tab => {
                self.focus_next();
                ViewAction::None
            }
            KeyCode::BackTab => {
                self.focus_prev();
                ViewAction::None
            }
            KeyCode::Backspace => {
                self.input.backspace();
                ViewAction::None
            }
            KeyCode::Delete => {
                self.input.delete();
                ViewAction::None
            }
            KeyCode::Left => {
                self.input.move_left();
                ViewAction::None
            }
            KeyCode::Right => {
                self.input.move_right();
                ViewAction::None
            }
            KeyCode::Home => {
                self.input.move_home();
                ViewAction::None
            }
            KeyCode::End => {
                self.input.move_end();
                ViewAction::None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.insert(c);
                ViewAction::None
            }
            _ => ViewAction::None,
        }
    }

    fn handle_use_case_key(&mut self, key: KeyEvent) -> ViewAction {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.use_case_index = self.use_case_index.saturating_sub(1);
                ViewAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.use_case_index + 1 < USE_CASES.len() {
                    self.use_case_index += 1;
                }
                ViewAction::None
            }
            KeyCode::Enter => {
                self.input.set_text(USE_CASES[self.use_case_index]);
                self.focus = ComposeFocus::Input;
                ViewAction::None
            }
            KeyCode::Tab => {
                self.focus_next();
                ViewAction::None
            }
            KeyCode::BackTab => {
                self.focus_prev();
                ViewAction::None
            }
            KeyCode::Char('t') => ViewAction::ToggleTheme,
            KeyCode::Char('q') => ViewAction::Quit,
            _ => ViewAction::None,
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent, state: &AppState) -> ViewAction {
        let entries = state.controller.history().list();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.history_index = self.history_index.saturating_sub(1);
                ViewAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.history_index + 1 < entries.len() {
                    self.history_index += 1;
                }
                ViewAction::None
            }
            KeyCode::Enter => match entries.get(self.history_index) {
                Some(entry) => ViewAction::OpenHistoryEntry(entry.id),
                None => ViewAction::None,
            },
            KeyCode::Char('x') => {
                self.history_index = 0;
                ViewAction::ClearHistory
            }
            KeyCode::Tab => {
                self.focus_next();
                ViewAction::None
            }
            KeyCode::BackTab => {
                self.focus_prev();
                ViewAction::None
            }
            KeyCode::Char('t') => ViewAction::ToggleTheme,
            KeyCode::Char('q') => ViewAction::Quit,
            _ => ViewAction::None,
        }
    }

    fn render_failure_banner(&self, frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        if let SessionStatus::Failed(message) = state.controller.status() {
            let line = Line::from(vec![
                Span::styled("✗ ", Style::default().fg(theme.error)),
                Span::styled(message.clone(), Style::default().fg(theme.error)),
            ]);
            frame.render_widget(Paragraph::new(line), area);
        }
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let focused = self.focus == ComposeFocus::Input;
        let border = if self.flash_active() {
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD)
        } else {
            theme.border_style(focused)
        };
        let title = format!(" Your decision ({} chars) ", self.input.char_count());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border);
        let inner = block.inner(area);

        let inner_width = inner.width.max(1) as usize;
        let scroll = self.input.width_before_cursor().saturating_sub(inner_width - 1);

        let paragraph = if self.input.is_empty() {
            Paragraph::new(INPUT_PLACEHOLDER).style(theme.text_muted_style())
        } else {
            Paragraph::new(self.input.text())
                .style(theme.text_style())
                .scroll((0, scroll as u16))
        };
        frame.render_widget(paragraph.block(block), area);

        if focused && inner.width > 0 && inner.height > 0 {
            let cursor_x = inner.x + (self.input.width_before_cursor() - scroll) as u16;
            frame.set_cursor_position((cursor_x.min(inner.right() - 1), inner.y));
        }
    }

    fn render_use_cases(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let focused = self.focus == ComposeFocus::UseCases;
        let lines: Vec<Line> = USE_CASES
            .iter()
            .enumerate()
            .map(|(i, prompt)| {
                if focused && i == self.use_case_index {
                    Line::from(vec![
                        Span::styled("> ", theme.accent_style()),
                        Span::styled(*prompt, theme.accent_style()),
                    ])
                } else {
                    Line::from(vec![Span::raw("  "), Span::styled(*prompt, theme.text_style())])
                }
            })
            .collect();

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Try one of these ")
                .border_style(theme.border_style(focused)),
        );
        frame.render_widget(paragraph, area);
    }

    fn render_history(&self, frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let focused = self.focus == ComposeFocus::History;
        let entries = state.controller.history().list();

        let lines: Vec<Line> = if entries.is_empty() {
            vec![Line::from(Span::styled(
                " No saved analyses yet ",
                theme.text_muted_style(),
            ))]
        } else {
            entries
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    let stamp = chrono::DateTime::parse_from_rfc3339(&entry.created_at)
                        .map(|dt| dt.format("%m-%d %H:%M ").to_string())
                        .unwrap_or_default();
                    if focused && i == self.history_index {
                        Line::from(vec![
                            Span::styled("> ", theme.accent_style()),
                            Span::styled(stamp, theme.text_muted_style()),
                            Span::styled(entry.decision_summary.clone(), theme.accent_style()),
                        ])
                    } else {
                        Line::from(vec![
                            Span::raw("  "),
                            Span::styled(stamp, theme.text_muted_style()),
                            Span::styled(entry.decision_summary.clone(), theme.text_style()),
                        ])
                    }
                })
                .collect()
        };

        let title = format!(" History ({}) ", entries.len());
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(theme.border_style(focused)),
        );
        frame.render_widget(paragraph, area);
    }
}

impl Default for ComposeView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for ComposeView {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let failed = matches!(state.controller.status(), SessionStatus::Failed(_));
        let banner_height = if failed { 1 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(banner_height),
                Constraint::Length(3),
                Constraint::Min(4),
            ])
            .split(area);

        if failed {
            self.render_failure_banner(frame, chunks[0], state, theme);
        }
        self.render_input(frame, chunks[1], theme);

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);

        self.render_use_cases(frame, panels[0], theme);
        self.render_history(frame, panels[1], state, theme);
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> ViewAction {
        // Keep the selection inside the list even after entries were cleared.
        let history_len = state.controller.history().list().len();
        self.history_index = self.history_index.min(history_len.saturating_sub(1));

        match self.focus {
            ComposeFocus::Input => self.handle_input_key(key),
            ComposeFocus::UseCases => self.handle_use_case_key(key),
            ComposeFocus::History => self.handle_history_key(key, state),
        }
    }

    fn status_line(&self, state: &AppState) -> String {
        match self.focus {
            ComposeFocus::Input => {
                format!(
                    "Enter submit | Tab switch panel | {} chars",
                    self.input.char_count()
                )
            }
            ComposeFocus::UseCases => {
                "Enter fill input | j/k move | Tab switch panel | t theme | q quit".to_string()
            }
            ComposeFocus::History => {
                format!(
                    "Enter open | j/k move | x clear | Tab switch panel | q quit ({} saved)",
                    state.controller.history().list().len()
                )
            }
        }
    }
}
