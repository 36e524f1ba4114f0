use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::tui::{ForgeField, ForgeForm, Preview};
use crate::ui::components::question_card::OPTION_LETTERS;
use crate::ui::theme::Theme;

/// Generation form, or the review list once a batch has arrived.
pub struct ForgeView<'a> {
    pub form: &'a ForgeForm,
    pub preview: Option<&'a Preview>,
    /// Spinner glyph and elapsed label while a request is in flight.
    pub busy: Option<(char, f64)>,
    pub theme: &'a Theme,
}

impl ForgeView<'_> {
    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let form = self.form;

        let fields: [(ForgeField, &str, String); 4] = [
            (ForgeField::Subject, "Subject", form.subject_name().to_string()),
            (ForgeField::Count, "Questions", form.count.to_string()),
            (ForgeField::Difficulty, "Difficulty", form.difficulty.to_string()),
            (
                ForgeField::Topic,
                "Focus topic",
                if form.topic.is_empty() && form.field != ForgeField::Topic {
                    "(any)".to_string()
                } else {
                    form.topic.clone()
                },
            ),
        ];

        let mut lines = vec![Line::from("")];
        for (field, label, value) in fields {
            let focused = form.field == field;
            let indicator = if focused { ">" } else { " " };
            let value_text = match field {
                ForgeField::Topic if focused => format!("{value}_"),
                ForgeField::Topic => value,
                _ => format!("< {value} >"),
            };
            let label_style = if focused {
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            lines.push(Line::from(vec![
                Span::styled(format!(" {indicator} {label:<12}"), label_style),
                Span::styled(value_text, Style::default().fg(colors.fg())),
            ]));
            lines.push(Line::from(""));
        }

        let button = match self.busy {
            Some((glyph, elapsed)) => Span::styled(
                format!("   {glyph} Generating... {elapsed:.0}s"),
                Style::default().fg(colors.warning()),
            ),
            None => {
                let focused = form.field == ForgeField::Generate;
                let style = if focused {
                    Style::default()
                        .fg(colors.bg())
                        .bg(colors.accent())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.accent())
                };
                Span::styled("   [ Generate ]   ", style)
            }
        };
        lines.push(Line::from(button));

        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title(" AI Forge ")
                    .border_style(Style::default().fg(colors.accent())),
            )
            .render(area, buf);
    }

    fn render_preview(&self, preview: &Preview, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let [list, detail] =
            Layout::vertical([Constraint::Min(4), Constraint::Length(10)]).areas(area);

        let mut title = format!(" Review {} generated ", preview.questions.len());
        if preview.rejected > 0 {
            title.push_str(&format!("({} discarded) ", preview.rejected));
        }
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.accent()));
        let inner = block.inner(list);
        block.render(list, buf);

        for (i, question) in preview.questions.iter().enumerate().take(inner.height as usize) {
            let mut style = Style::default().fg(colors.fg());
            if i == preview.selected {
                style = style.bg(colors.selected_bg()).add_modifier(Modifier::BOLD);
            }
            let line = Line::from(vec![
                Span::styled(format!(" {:>2}. ", i + 1), Style::default().fg(colors.muted())),
                Span::styled(question.text.clone(), style),
            ]);
            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }

        let Some(question) = preview.questions.get(preview.selected) else {
            return;
        };
        let mut lines = vec![Line::from(Span::styled(
            format!("{} | {}", question.phase_key(), question.difficulty),
            Style::default().fg(colors.muted()),
        ))];
        for (i, option) in question.options.iter().enumerate() {
            let letter = OPTION_LETTERS.get(i).copied().unwrap_or('?');
            let style = if i == question.correct_index {
                Style::default().fg(colors.success())
            } else {
                Style::default().fg(colors.fg())
            };
            lines.push(Line::from(Span::styled(format!("  {letter}. {option}"), style)));
        }
        lines.push(Line::from(Span::styled(
            question.explanation.clone(),
            Style::default().fg(colors.muted()),
        )));
        Paragraph::new(lines)
            .block(Block::bordered().border_style(Style::default().fg(colors.border())))
            .wrap(Wrap { trim: true })
            .render(detail, buf);
    }
}

impl Widget for ForgeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.preview {
            Some(preview) => self.render_preview(preview, area, buf),
            None => self.render_form(area, buf),
        }
    }
}
