//! Gauge Widget
//!
//! Progress bar for the working screen, fed straight from the simulator's
//! percent. Uses partial block characters so each tick moves the bar even
//! at narrow widths.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// Progress gauge widget
pub struct Gauge {
    /// Progress percent (0 to 100)
    percent: u8,
    /// Fill color
    fill_color: Color,
    /// Track color
    track_color: Color,
    /// Color of the centered percent text
    text_color: Color,
}

impl Gauge {
    pub fn new(percent: u8) -> Self {
        Self {
            percent: percent.min(100),
            fill_color: Color::Rgb(99, 102, 241), // indigo
            track_color: Color::Rgb(55, 65, 81),  // gray-700
            text_color: Color::White,
        }
    }

    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    pub fn track_color(mut self, color: Color) -> Self {
        self.track_color = color;
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    fn ratio(&self) -> f64 {
        f64::from(self.percent) / 100.0
    }
}

impl Widget for Gauge {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 5 {
            return;
        }

        // Full blocks for whole cells, one partial block for the remainder:
        // ████▌
        let gauge_width = f64::from(area.width);
        let filled = gauge_width * self.ratio();
        let full_cells = filled.floor() as u16;
        let partial = (filled.fract() * 8.0).floor() as usize;

        let track_style = Style::default().bg(self.track_color);
        for x in area.x..(area.x + area.width) {
            buf.set_string(x, area.y, " ", track_style);
        }

        let fill_style = Style::default().fg(self.fill_color).bg(self.fill_color);
        for x in area.x..(area.x + full_cells) {
            buf.set_string(x, area.y, "█", fill_style);
        }

        if partial > 0 && full_cells < area.width {
            let partial_chars = ["", "▏", "▎", "▍", "▌", "▋", "▊", "▉"];
            buf.set_string(
                area.x + full_cells,
                area.y,
                partial_chars[partial.min(7)],
                Style::default().fg(self.fill_color).bg(self.track_color),
            );
        }

        let text = format!("{}%", self.percent);
        if area.width > text.len() as u16 + 2 {
            let text_x = area.x + (area.width.saturating_sub(text.len() as u16)) / 2;
            buf.set_string(
                text_x,
                area.y,
                &text,
                Style::default()
                    .fg(self.text_color)
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}
