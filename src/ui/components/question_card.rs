use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use nursepro::session::SessionState;

use crate::ui::theme::Theme;

pub const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// The current question of a running session. Drills reveal the key and the
/// rationale once answered; mocks only mark the chosen option.
pub struct QuestionCard<'a> {
    pub session: &'a SessionState,
    pub theme: &'a Theme,
}

impl<'a> QuestionCard<'a> {
    pub fn new(session: &'a SessionState, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

impl Widget for QuestionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let session = self.session;
        let Some(question) = session.current() else {
            return;
        };
        let answer = session.current_answer();
        let reveal = answer.is_some() && session.kind.shows_rationale();

        let title = format!(
            " {} of {} | {} ",
            session.cursor + 1,
            session.questions.len(),
            question.subject
        );
        let block = Block::bordered()
            .title(title)
            .title_bottom(format!(
                " {} | {} ",
                question.difficulty,
                question.phase_key()
            ))
            .border_style(Style::default().fg(colors.accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        let [prompt_area, options_area, rationale_area] = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(question.options.len() as u16 * 2 + 1),
            Constraint::Percentage(35),
        ])
        .areas(inner);

        let mut prompt = Vec::new();
        if !question.chapter.is_empty() {
            prompt.push(Line::from(Span::styled(
                question.chapter.clone(),
                Style::default().fg(colors.muted()),
            )));
        }
        prompt.push(Line::from(Span::styled(
            question.text.clone(),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )));
        Paragraph::new(prompt)
            .wrap(Wrap { trim: true })
            .render(prompt_area, buf);

        let mut option_lines = vec![Line::from("")];
        for (i, option) in question.options.iter().enumerate() {
            let letter = OPTION_LETTERS.get(i).copied().unwrap_or('?');
            let chosen = answer == Some(i);
            let style = if reveal && i == question.correct_index {
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD)
            } else if reveal && chosen {
                Style::default().fg(colors.error())
            } else if chosen {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else if answer.is_some() {
                Style::default().fg(colors.muted())
            } else {
                Style::default().fg(colors.fg())
            };
            let marker = if chosen { ">" } else { " " };
            option_lines.push(Line::from(Span::styled(
                format!(" {marker} {letter}. {option}"),
                style,
            )));
            option_lines.push(Line::from(""));
        }
        Paragraph::new(option_lines)
            .wrap(Wrap { trim: false })
            .render(options_area, buf);

        if reveal {
            let verdict = if answer == Some(question.correct_index) {
                Span::styled(
                    "Correct",
                    Style::default()
                        .fg(colors.success())
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(
                    format!(
                        "Incorrect: the answer is {}",
                        OPTION_LETTERS
                            .get(question.correct_index)
                            .copied()
                            .unwrap_or('?')
                    ),
                    Style::default()
                        .fg(colors.error())
                        .add_modifier(Modifier::BOLD),
                )
            };
            let lines = vec![
                Line::from(verdict),
                Line::from(Span::styled(
                    question.explanation.clone(),
                    Style::default().fg(colors.fg()),
                )),
            ];
            let block = Block::bordered()
                .title(" Rationale ")
                .border_style(Style::default().fg(colors.border()));
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: true })
                .render(rationale_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use nursepro::bank::Question;
    use nursepro::bank::seed::seed_questions;
    use nursepro::session::SessionKind;

    use super::*;

    fn render_text(session: &SessionState) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        QuestionCard::new(session, &theme).render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn first_seed() -> Question {
        seed_questions().remove(0)
    }

    #[test]
    fn test_drill_reveals_rationale_after_answer() {
        let question = first_seed();
        let explanation_start: String = question.explanation.chars().take(12).collect();
        let mut session = SessionState::new(SessionKind::Drill, vec![question], None);
        assert!(!render_text(&session).contains("Rationale"));

        session.answer(0);
        let text = render_text(&session);
        assert!(text.contains("Rationale"));
        assert!(text.contains(&explanation_start));
    }

    #[test]
    fn test_mock_withholds_rationale() {
        let mut session = SessionState::new(SessionKind::Mock, vec![first_seed()], None);
        session.answer(0);
        let text = render_text(&session);
        assert!(!text.contains("Rationale"));
        assert!(text.contains("1 of 1"));
    }
}
