use std::path::Path;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::tui::{SETTINGS_ITEMS, SettingsItem};
use crate::ui::theme::Theme;

pub struct SettingsView<'a> {
    pub selected: usize,
    pub dark_mode: bool,
    pub export_dir: &'a Path,
    pub data_dir: &'a Path,
    pub theme: &'a Theme,
}

impl SettingsView<'_> {
    fn describe(&self, item: SettingsItem) -> (&'static str, String) {
        match item {
            SettingsItem::Theme => (
                "Appearance",
                if self.dark_mode { "Dark" } else { "Light" }.to_string(),
            ),
            SettingsItem::Export => (
                "Export progress",
                format!("writes to {}", self.export_dir.display()),
            ),
            SettingsItem::Import => (
                "Import progress",
                "replaces the bank and stats from an export file".to_string(),
            ),
            SettingsItem::Reset => (
                "Factory reset",
                "purges every question and statistic".to_string(),
            ),
        }
    }
}

impl Widget for SettingsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let mut lines = vec![
            Line::from(Span::styled(
                format!("  Data: {}", self.data_dir.display()),
                Style::default().fg(colors.muted()),
            )),
            Line::from(""),
        ];
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let is_selected = i == self.selected;
            let (label, value) = self.describe(*item);
            let label_style = if is_selected {
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD)
            } else if *item == SettingsItem::Reset {
                Style::default().fg(colors.error())
            } else {
                Style::default().fg(colors.fg())
            };
            let indicator = if is_selected { " > " } else { "   " };
            lines.push(Line::from(Span::styled(format!("{indicator}{label}"), label_style)));
            lines.push(Line::from(Span::styled(
                format!("     {value}"),
                Style::default().fg(colors.muted()),
            )));
            lines.push(Line::from(""));
        }

        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title(" Settings ")
                    .border_style(Style::default().fg(colors.accent())),
            )
            .render(area, buf);
    }
}
