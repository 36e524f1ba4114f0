use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

use crate::ui::theme::Theme;

/// Single-row bar: `label  [█████     ]  detail`. The label column has a fixed
/// width so stacked bars line up.
pub struct ProgressBar<'a> {
    pub label: &'a str,
    pub percent: u32,
    pub detail: String,
    pub label_width: u16,
    pub fill: Option<Color>,
    pub theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(label: &'a str, percent: u32, theme: &'a Theme) -> Self {
        Self {
            label,
            percent: percent.min(100),
            detail: format!("{}%", percent.min(100)),
            label_width: 26,
            fill: None,
            theme,
        }
    }

    pub fn detail(mut self, detail: String) -> Self {
        self.detail = detail;
        self
    }

    pub fn label_width(mut self, width: u16) -> Self {
        self.label_width = width;
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        if area.width == 0 || area.height == 0 {
            return;
        }

        let label_width = self.label_width.min(area.width);
        let detail_width = (self.detail.chars().count() as u16 + 2).min(area.width - label_width);
        let bar_width = area.width - label_width - detail_width;

        buf.set_stringn(
            area.x,
            area.y,
            self.label,
            label_width.saturating_sub(1) as usize,
            Style::default().fg(colors.fg()),
        );

        let bar_x = area.x + label_width;
        let filled = (u32::from(bar_width) * self.percent / 100) as u16;
        let fill = self.fill.unwrap_or_else(|| colors.bar_filled());
        for x in bar_x..bar_x + bar_width {
            let style = if x < bar_x + filled {
                Style::default().bg(fill)
            } else {
                Style::default().bg(colors.bar_empty())
            };
            buf[(x, area.y)].set_style(style);
        }

        buf.set_stringn(
            bar_x + bar_width + 1,
            area.y,
            &self.detail,
            detail_width.saturating_sub(1) as usize,
            Style::default().fg(colors.muted()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(bar: ProgressBar, width: u16) -> Buffer {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        buf
    }

    #[test]
    fn test_bar_fills_proportionally() {
        let theme = Theme::default();
        let bar = ProgressBar::new("Pharma", 50, &theme)
            .label_width(10)
            .detail("50%".to_string());
        // 10 label + 20 bar + 5 detail
        let buf = rendered(bar, 35);
        let filled = theme.colors.bar_filled();
        assert_eq!(buf[(10, 0)].bg, filled);
        assert_eq!(buf[(19, 0)].bg, filled);
        assert_eq!(buf[(20, 0)].bg, theme.colors.bar_empty());
        assert_eq!(buf[(0, 0)].symbol(), "P");
        assert_eq!(buf[(31, 0)].symbol(), "5");
    }

    #[test]
    fn test_percent_is_capped() {
        let theme = Theme::default();
        let bar = ProgressBar::new("x", 250, &theme);
        assert_eq!(bar.percent, 100);
        assert_eq!(bar.detail, "100%");
    }
}
