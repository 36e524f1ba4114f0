use ratatui::layout::{Constraint, Layout, Rect};

/// Header, body and footer rows shared by every screen.
pub struct ScreenLayout {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);
        Self {
            header,
            body,
            footer,
        }
    }
}

/// A rect of the given percentage size centred in `area`, never smaller than
/// what a question card needs to stay readable.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_WIDTH: u16 = 64;
    const MIN_HEIGHT: u16 = 16;

    let width = (area.width.saturating_mul(percent_x.min(100)) / 100)
        .max(MIN_WIDTH)
        .min(area.width);
    let height = (area.height.saturating_mul(percent_y.min(100)) / 100)
        .max(MIN_HEIGHT)
        .min(area.height);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Join key hints into one footer line, dropping trailing hints that do not fit.
pub fn hint_line(hints: &[&str], width: usize) -> String {
    let mut line = String::from(" ");
    for hint in hints {
        let extra = if line.len() > 1 { 2 } else { 0 };
        if line.chars().count() + extra + hint.chars().count() > width {
            break;
        }
        if extra > 0 {
            line.push_str("  ");
        }
        line.push_str(hint);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_stays_inside() {
        let area = Rect::new(0, 0, 120, 40);
        let rect = centered_rect(50, 50, area);
        assert_eq!(rect.width, 64);
        assert_eq!(rect.height, 20);
        assert_eq!(rect.x, 28);
        assert_eq!(rect.y, 10);

        let tiny = Rect::new(0, 0, 30, 10);
        assert_eq!(centered_rect(50, 50, tiny), tiny);
    }

    #[test]
    fn test_hint_line_truncates() {
        let hints = ["[a] one", "[b] two", "[c] three"];
        assert_eq!(hint_line(&hints, 80), " [a] one  [b] two  [c] three");
        assert_eq!(hint_line(&hints, 18), " [a] one  [b] two");
    }
}
