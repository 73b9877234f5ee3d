use ratatui::style::{Color, Modifier, Style};

use crate::config::{Rgb, ThemeColors};

fn fg(rgb: Rgb) -> Style {
    Style::default().fg(Color::Rgb(rgb.r, rgb.g, rgb.b))
}

/// TUI theme with ratatui styles
#[derive(Debug, Clone)]
pub struct TuiTheme {
    pub muted: Style,
    pub open: Style,
    pub booked: Style,
    pub pending: Style,
    pub error: Style,
    pub info: Style,
    pub selected: Style,
    pub border: Style,
    pub title: Style,
    /// Day headers
    pub header: Style,
    pub text: Style,
}

impl From<&ThemeColors> for TuiTheme {
    fn from(colors: &ThemeColors) -> Self {
        Self {
            muted: fg(colors.muted),
            open: fg(colors.open),
            booked: fg(colors.booked),
            pending: fg(colors.pending),
            error: fg(colors.error),
            info: fg(colors.accent),
            selected: Style::default()
                .bg(Color::Rgb(50, 50, 70))
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::Rgb(80, 80, 100)),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            header: fg(colors.accent).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            text: Style::default().fg(Color::Rgb(200, 200, 220)),
        }
    }
}
