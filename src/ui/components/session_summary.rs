use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use nursepro::session::SessionState;
use nursepro::session::result::{SessionResult, format_clock};

use crate::ui::components::question_card::OPTION_LETTERS;
use crate::ui::theme::Theme;

/// End-of-session results followed by a per-question review. The review is
/// where a mock finally shows its answer key.
pub struct SessionSummary<'a> {
    pub result: &'a SessionResult,
    pub session: Option<&'a SessionState>,
    pub theme: &'a Theme,
}

impl<'a> SessionSummary<'a> {
    pub fn new(result: &'a SessionResult, session: Option<&'a SessionState>, theme: &'a Theme) -> Self {
        Self {
            result,
            session,
            theme,
        }
    }
}

impl Widget for SessionSummary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let result = self.result;

        let title = if result.mode == "mock" {
            " Mock Exam Complete "
        } else {
            " Drill Complete "
        };
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        let [numbers, review] =
            Layout::vertical([Constraint::Length(6), Constraint::Min(0)]).areas(inner);

        let label = Style::default().fg(colors.fg());
        let mut lines = vec![
            Line::from(vec![
                Span::styled("  Accuracy: ", label),
                Span::styled(
                    format!("{}%", result.accuracy),
                    Style::default()
                        .fg(colors.grade(result.accuracy))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ({}/{} correct)", result.correct, result.answered),
                    Style::default().fg(colors.muted()),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Answered: ", label),
                Span::styled(format!("{} of {}", result.answered, result.total), label),
            ]),
            Line::from(vec![
                Span::styled("  Time:     ", label),
                Span::styled(format_clock(result.elapsed_secs as u64), label),
            ]),
        ];
        if result.timed_out {
            lines.push(Line::from(Span::styled(
                "  Time ran out before the exam was finished",
                Style::default().fg(colors.warning()),
            )));
        }
        Paragraph::new(lines).render(numbers, buf);

        let Some(session) = self.session else {
            return;
        };
        let mut review_lines = Vec::new();
        for (i, (question, answer)) in session.questions.iter().zip(&session.answers).enumerate() {
            let key = OPTION_LETTERS.get(question.correct_index).copied().unwrap_or('?');
            let (mark, style) = match answer {
                Some(a) if *a == question.correct_index => ("+", Style::default().fg(colors.success())),
                Some(_) => ("x", Style::default().fg(colors.error())),
                None => ("-", Style::default().fg(colors.muted())),
            };
            review_lines.push(Line::from(vec![
                Span::styled(format!("  {mark} {:>2}. ", i + 1), style),
                Span::styled(question.text.clone(), Style::default().fg(colors.fg())),
            ]));
            review_lines.push(Line::from(Span::styled(
                format!(
                    "       Answer {key}: {}",
                    question
                        .options
                        .get(question.correct_index)
                        .map(String::as_str)
                        .unwrap_or_default()
                ),
                Style::default().fg(colors.muted()),
            )));
        }
        Paragraph::new(review_lines)
            .block(
                Block::bordered()
                    .title(" Review ")
                    .border_style(Style::default().fg(colors.border())),
            )
            .wrap(Wrap { trim: false })
            .render(review, buf);
    }
}
