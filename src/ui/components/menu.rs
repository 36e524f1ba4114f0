use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Drill,
    Mock,
    Bank,
    Forge,
    Analytics,
    Settings,
}

pub struct MenuItem {
    pub key: char,
    pub label: &'static str,
    pub description: &'static str,
    pub action: MenuAction,
}

pub const MENU_ITEMS: &[MenuItem] = &[
    MenuItem {
        key: '1',
        label: "Practice Drill",
        description: "Ten questions across the bank, rationale after each answer",
        action: MenuAction::Drill,
    },
    MenuItem {
        key: '2',
        label: "Mock Exam",
        description: "Timed run over the whole bank, rationale held back",
        action: MenuAction::Mock,
    },
    MenuItem {
        key: '3',
        label: "Subject Bank",
        description: "Browse, search and prune questions by subject",
        action: MenuAction::Bank,
    },
    MenuItem {
        key: '4',
        label: "AI Forge",
        description: "Generate new questions for a subject",
        action: MenuAction::Forge,
    },
    MenuItem {
        key: 'a',
        label: "Analytics",
        description: "Accuracy by subject and nursing-process phase",
        action: MenuAction::Analytics,
    },
    MenuItem {
        key: 'c',
        label: "Settings",
        description: "Theme, export, import and factory reset",
        action: MenuAction::Settings,
    },
];

pub fn action_for_key(key: char) -> Option<MenuAction> {
    MENU_ITEMS.iter().find(|i| i.key == key).map(|i| i.action)
}

pub struct Menu<'a> {
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(selected: usize, theme: &'a Theme) -> Self {
        Self { selected, theme }
    }
}

impl Widget for Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Menu ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::vertical(
            MENU_ITEMS
                .iter()
                .map(|_| Constraint::Length(3))
                .collect::<Vec<_>>(),
        )
        .split(inner);

        for (i, item) in MENU_ITEMS.iter().enumerate() {
            let Some(row) = rows.get(i) else { break };
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };
            let label_style = if is_selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };

            let lines = vec![
                Line::from(Span::styled(
                    format!(" {indicator} [{}] {}", item.key, item.label),
                    label_style,
                )),
                Line::from(Span::styled(
                    format!("       {}", item.description),
                    Style::default().fg(colors.muted()),
                )),
            ];
            Paragraph::new(lines).render(*row, buf);
        }
    }
}
