use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use nursepro::engine::analytics::DashboardSummary;
use nursepro::engine::scoring::READINESS_TARGET_PERCENT;

use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

/// Home screen summary: headline numbers and per-subject coverage.
pub struct Dashboard<'a> {
    pub summary: &'a DashboardSummary,
    pub theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(summary: &'a DashboardSummary, theme: &'a Theme) -> Self {
        Self { summary, theme }
    }

    fn tile(&self, title: &str, value: String, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(format!(" {title} "))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(Line::from(Span::styled(
            value,
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .centered()
        .render(inner, buf);
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let summary = self.summary;

        let [tiles, readiness, coverage] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .areas(area);

        let [t1, t2, t3, t4] = Layout::horizontal([Constraint::Ratio(1, 4); 4]).areas(tiles);
        self.tile("Accuracy", format!("{}%", summary.accuracy_percent), t1, buf);
        self.tile("Bank", summary.bank_size.to_string(), t2, buf);
        self.tile("Mastery", summary.mastery_points.to_string(), t3, buf);
        self.tile("Unpracticed", summary.unpracticed_count.to_string(), t4, buf);

        let readiness_line = if summary.exam_ready {
            Line::from(Span::styled(
                format!(" Exam ready: accuracy at or above {READINESS_TARGET_PERCENT}%"),
                Style::default().fg(colors.success()),
            ))
        } else {
            Line::from(Span::styled(
                format!(" Keep drilling: exam readiness needs {READINESS_TARGET_PERCENT}% accuracy"),
                Style::default().fg(colors.muted()),
            ))
        };
        Paragraph::new(readiness_line).render(readiness, buf);

        let block = Block::bordered()
            .title(" Subject coverage ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(coverage);
        block.render(coverage, buf);

        for (i, subject) in summary.coverage.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let row = Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), 1);
            ProgressBar::new(&subject.subject, subject.coverage_percent, self.theme)
                .detail(format!(
                    "{}/{} practiced",
                    subject.practiced_count, subject.question_count
                ))
                .render(row, buf);
        }
    }
}
