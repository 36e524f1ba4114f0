use ratatui::style::Color;

/// Hex palette for one appearance. Light is the first-run default; the
/// AppState `dark_mode` flag picks the other one.
#[derive(Clone, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug)]
pub struct ThemeColors {
    pub bg: &'static str,
    pub fg: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
    pub accent_dim: &'static str,
    pub border: &'static str,
    pub header_bg: &'static str,
    pub header_fg: &'static str,
    pub bar_filled: &'static str,
    pub bar_empty: &'static str,
    pub selected_bg: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    pub success: &'static str,
}

const LIGHT: ThemeColors = ThemeColors {
    bg: "#eff1f5",
    fg: "#4c4f69",
    muted: "#8c8fa1",
    accent: "#1e66f5",
    accent_dim: "#bcc0cc",
    border: "#9ca0b0",
    header_bg: "#dce0e8",
    header_fg: "#4c4f69",
    bar_filled: "#1e66f5",
    bar_empty: "#ccd0da",
    selected_bg: "#ccd0da",
    error: "#d20f39",
    warning: "#df8e1d",
    success: "#40a02b",
};

const DARK: ThemeColors = ThemeColors {
    bg: "#1e1e2e",
    fg: "#cdd6f4",
    muted: "#6c7086",
    accent: "#89b4fa",
    accent_dim: "#45475a",
    border: "#45475a",
    header_bg: "#313244",
    header_fg: "#cdd6f4",
    bar_filled: "#89b4fa",
    bar_empty: "#313244",
    selected_bg: "#45475a",
    error: "#f38ba8",
    warning: "#f9e2af",
    success: "#a6e3a1",
};

impl Theme {
    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self {
                name: "dark",
                colors: DARK,
            }
        } else {
            Self {
                name: "light",
                colors: LIGHT,
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_mode(false)
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6
            && let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            )
        {
            return Color::Rgb(r, g, b);
        }
        Color::Reset
    }

    pub fn bg(&self) -> Color { Self::parse_color(self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(self.fg) }
    pub fn muted(&self) -> Color { Self::parse_color(self.muted) }
    pub fn accent(&self) -> Color { Self::parse_color(self.accent) }
    pub fn accent_dim(&self) -> Color { Self::parse_color(self.accent_dim) }
    pub fn border(&self) -> Color { Self::parse_color(self.border) }
    pub fn header_bg(&self) -> Color { Self::parse_color(self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(self.header_fg) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(self.bar_empty) }
    pub fn selected_bg(&self) -> Color { Self::parse_color(self.selected_bg) }
    pub fn error(&self) -> Color { Self::parse_color(self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(self.success) }

    /// Colour for an accuracy percentage, graded against the readiness target.
    pub fn grade(&self, percent: u32) -> Color {
        if percent >= nursepro::engine::scoring::READINESS_TARGET_PERCENT {
            self.success()
        } else if percent >= 60 {
            self.warning()
        } else {
            self.error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(ThemeColors::parse_color("#1e66f5"), Color::Rgb(0x1e, 0x66, 0xf5));
        assert_eq!(ThemeColors::parse_color("nope"), Color::Reset);
    }

    #[test]
    fn test_mode_selects_palette() {
        assert_eq!(Theme::for_mode(true).name, "dark");
        assert_eq!(Theme::for_mode(false).name, "light");
        assert_eq!(Theme::default().colors.bg, LIGHT.bg);
    }

    #[test]
    fn test_grade_thresholds() {
        let colors = &Theme::default().colors;
        assert_eq!(colors.grade(90), colors.success());
        assert_eq!(colors.grade(70), colors.warning());
        assert_eq!(colors.grade(10), colors.error());
    }
}
