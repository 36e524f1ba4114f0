use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use nursepro::engine::analytics::{AccuracyLine, AnalyticsReport};

use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

pub struct AnalyticsView<'a> {
    pub report: &'a AnalyticsReport,
    pub theme: &'a Theme,
}

impl<'a> AnalyticsView<'a> {
    pub fn new(report: &'a AnalyticsReport, theme: &'a Theme) -> Self {
        Self { report, theme }
    }

    fn render_lines(&self, title: &str, lines: &[AccuracyLine], area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(format!(" {title} "))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        for (i, line) in lines.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let row = Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), 1);
            let detail = if line.bucket.total == 0 {
                "no attempts".to_string()
            } else {
                format!(
                    "{}%  ({}/{})",
                    line.accuracy_percent, line.bucket.correct, line.bucket.total
                )
            };
            ProgressBar::new(&line.label, line.accuracy_percent, self.theme)
                .detail(detail)
                .fill(colors.grade(line.accuracy_percent))
                .render(row, buf);
        }
    }
}

impl Widget for AnalyticsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let report = self.report;

        let [headline, subjects, phases] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(report.subjects.len() as u16 + 2),
            Constraint::Min(0),
        ])
        .areas(area);

        let recommendation = match &report.weakest_subject {
            Some(subject) => Span::styled(
                format!("  Focus next on {subject}"),
                Style::default().fg(colors.warning()),
            ),
            None => Span::styled(
                "  Answer a few questions to get a recommendation",
                Style::default().fg(colors.muted()),
            ),
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(" Overall accuracy: ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{}%", report.overall_percent),
                    Style::default()
                        .fg(colors.grade(report.overall_percent))
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(recommendation),
        ];
        Paragraph::new(lines).render(headline, buf);

        self.render_lines("By subject", &report.subjects, subjects, buf);
        self.render_lines("By nursing-process phase", &report.phases, phases, buf);
    }
}
