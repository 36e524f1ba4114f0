use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use nursepro::bank::filter::BankFilter;
use nursepro::bank::{LastResult, Question};

use crate::ui::theme::Theme;

pub fn filter_label(filter: BankFilter) -> &'static str {
    match filter {
        BankFilter::All => "All",
        BankFilter::Unpracticed => "Unpracticed",
        BankFilter::Reviewed => "Reviewed",
    }
}

/// One subject's questions after filtering, with the selected item expanded.
pub struct BankList<'a> {
    pub subject: &'a str,
    pub filter: BankFilter,
    pub search: &'a str,
    pub searching: bool,
    pub questions: &'a [&'a Question],
    pub selected: usize,
    pub theme: &'a Theme,
}

impl BankList<'_> {
    /// First row index to draw so that `selected` stays visible.
    fn scroll_offset(&self, visible: usize) -> usize {
        if visible == 0 || self.selected < visible {
            0
        } else {
            self.selected + 1 - visible
        }
    }
}

impl Widget for BankList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let [controls, list, detail] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(4),
            Constraint::Length(9),
        ])
        .areas(area);

        let search_style = if self.searching {
            Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.fg())
        };
        let cursor = if self.searching { "_" } else { "" };
        Paragraph::new(vec![
            Line::from(vec![
                Span::styled(" Subject: ", Style::default().fg(colors.muted())),
                Span::styled(
                    format!("< {} >", self.subject),
                    Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
                ),
                Span::styled("   Filter: ", Style::default().fg(colors.muted())),
                Span::styled(filter_label(self.filter), Style::default().fg(colors.fg())),
                Span::styled(
                    format!("   {} shown", self.questions.len()),
                    Style::default().fg(colors.muted()),
                ),
            ]),
            Line::from(vec![
                Span::styled(" Search: ", Style::default().fg(colors.muted())),
                Span::styled(format!("{}{cursor}", self.search), search_style),
            ]),
        ])
        .render(controls, buf);

        let block = Block::bordered()
            .title(" Questions ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(list);
        block.render(list, buf);

        if self.questions.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "  No questions match. Generate some in the AI Forge.",
                Style::default().fg(colors.muted()),
            )))
            .render(inner, buf);
            return;
        }

        let visible = inner.height as usize;
        let offset = self.scroll_offset(visible);
        for (row, (i, question)) in self
            .questions
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .enumerate()
        {
            let is_selected = i == self.selected;
            let (status, status_style) = match question.last_result {
                Some(LastResult::Correct) => ("+", Style::default().fg(colors.success())),
                Some(LastResult::Incorrect) => ("x", Style::default().fg(colors.error())),
                None => (" ", Style::default()),
            };
            let mut text_style = Style::default().fg(colors.fg());
            if is_selected {
                text_style = text_style.bg(colors.selected_bg()).add_modifier(Modifier::BOLD);
            }
            let line = Line::from(vec![
                Span::styled(format!(" {status} "), status_style),
                Span::styled(format!("{:<8} ", question.difficulty.as_str()), Style::default().fg(colors.muted())),
                Span::styled(question.text.clone(), text_style),
            ]);
            let y = inner.y + row as u16;
            buf.set_line(inner.x, y, &line, inner.width);
        }

        if let Some(question) = self.questions.get(self.selected) {
            let mut lines = vec![Line::from(Span::styled(
                format!(
                    "{} | {} | practiced {}x",
                    question.phase_key(),
                    question.difficulty,
                    question.practiced_count
                ),
                Style::default().fg(colors.muted()),
            ))];
            for (i, option) in question.options.iter().enumerate() {
                let style = if i == question.correct_index {
                    Style::default().fg(colors.success())
                } else {
                    Style::default().fg(colors.fg())
                };
                lines.push(Line::from(Span::styled(format!("  {option}"), style)));
            }
            lines.push(Line::from(Span::styled(
                question.explanation.clone(),
                Style::default().fg(colors.muted()),
            )));
            Paragraph::new(lines)
                .block(
                    Block::bordered()
                        .title(format!(" {} ", question.id))
                        .border_style(Style::default().fg(colors.border())),
                )
                .wrap(Wrap { trim: true })
                .render(detail, buf);
        }
    }
}
