use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::ui::centered_rect;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/↓", "Select next shift"),
            ("k/↑", "Select previous shift"),
            ("g", "Select first shift"),
            ("G", "Select last loaded shift"),
            ("Home", "Scroll to top"),
            ("End", "Scroll to end, load more"),
            ("PgUp/PgDn", "Scroll a page"),
            ("wheel", "Scroll"),
        ],
    ),
    (
        "Shifts",
        &[
            ("Enter", "Toggle details"),
            ("Esc", "Clear selection"),
            ("y", "Copy shift to clipboard"),
        ],
    ),
    (
        "Feed",
        &[
            ("f", "Cycle role filter"),
            ("b", "Hide/show fully booked"),
            ("o", "Toggle sort order"),
            ("r", "Reload"),
            ("x", "Dismiss banner"),
            ("q", "Quit"),
        ],
    ),
];

pub fn render_help_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(46, 28, frame.area());

    let block = Block::default()
        .title(" Keybindings ")
        .borders(Borders::ALL)
        .border_style(app.theme.border)
        .style(Style::default().bg(Color::Black));

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let desc_style = app.theme.muted;
    let section_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let mut text = Vec::new();
    for (section, keys) in SECTIONS {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(format!("  {section}"), section_style)));
        for (key, desc) in keys.iter() {
            text.push(Line::from(vec![
                Span::styled(format!("    {key:<11} "), key_style),
                Span::styled(*desc, desc_style),
            ]));
        }
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "        Press any key to close",
        desc_style,
    )));

    frame.render_widget(Clear, area);
    frame.render_widget(block.clone(), area);
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(text), inner);
}
