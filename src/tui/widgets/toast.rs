//! Toast Overlay Widget
//!
//! Draws the live notification stack in the bottom-right corner of the
//! screen, newest at the bottom. Expiry is the [`ToastStack`]'s business;
//! this widget just paints whatever is still alive.
//!
//! [`ToastStack`]: crate::notify::ToastStack

use ratatui::{buffer::Buffer, layout::Rect, style::Modifier, widgets::Widget};
use unicode_width::UnicodeWidthStr;

use crate::notify::{Toast, ToastKind};
use crate::tui::theme::Theme;

pub struct ToastOverlay<'a> {
    toasts: &'a [Toast],
    theme: &'a Theme,
}

impl<'a> ToastOverlay<'a> {
    pub fn new(toasts: &'a [Toast], theme: &'a Theme) -> Self {
        Self { toasts, theme }
    }
}

impl Widget for ToastOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 8 || area.height == 0 {
            return;
        }

        let max_rows = area.height as usize;
        for (row, toast) in self.toasts.iter().rev().take(max_rows).enumerate() {
            let marker = match toast.kind {
                ToastKind::Success => "✓",
                ToastKind::Error => "✗",
            };
            let line = format!(" {marker} {} ", toast.message);

            let width = (line.as_str().width() as u16).min(area.width);
            let x = area.x + area.width - width;
            let y = area.y + area.height - 1 - row as u16;
            let style = self
                .theme
                .toast_style(toast.kind)
                .bg(self.theme.surface)
                .add_modifier(Modifier::BOLD);
            buf.set_stringn(x, y, &line, width as usize, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ToastStack;

    fn buffer_row(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn test_toast_appears_bottom_right_with_marker() {
        let mut stack = ToastStack::new();
        stack.success("Copied to clipboard");
        let theme = Theme::dark();

        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        ToastOverlay::new(stack.visible(), &theme).render(area, &mut buf);

        let bottom = buffer_row(&buf, 4, 40);
        assert!(bottom.contains("✓ Copied to clipboard"));
        assert!(bottom.trim_start().starts_with('✓') || bottom.ends_with(' '));
    }

    #[test]
    fn test_newest_toast_sits_below_older() {
        let mut stack = ToastStack::new();
        stack.success("first");
        stack.error("second");
        let theme = Theme::dark();

        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);
        ToastOverlay::new(stack.visible(), &theme).render(area, &mut buf);

        assert!(buffer_row(&buf, 3, 30).contains("✗ second"));
        assert!(buffer_row(&buf, 2, 30).contains("✓ first"));
    }

    #[test]
    fn test_narrow_area_truncates_without_panic() {
        let mut stack = ToastStack::new();
        stack.error("a very long failure message that cannot possibly fit");
        let theme = Theme::light();

        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        ToastOverlay::new(stack.visible(), &theme).render(area, &mut buf);

        let bottom = buffer_row(&buf, 1, 10);
        assert!(bottom.contains('✗'));
    }

    #[test]
    fn test_empty_stack_paints_nothing() {
        let stack = ToastStack::new();
        let theme = Theme::dark();

        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        ToastOverlay::new(stack.visible(), &theme).render(area, &mut buf);

        for y in 0..3 {
            assert_eq!(buffer_row(&buf, y, 20).trim(), "");
        }
    }
}
