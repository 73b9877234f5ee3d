use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, StatusKind};

pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    // Counters or status message
    if let Some(ref msg) = app.status_message {
        let style = match msg.kind {
            StatusKind::Success => app.theme.open,
            StatusKind::Error => app.theme.error,
            StatusKind::Info => app.theme.info,
        };
        let line = Line::from(vec![Span::raw("  "), Span::styled(&msg.text, style)]);
        frame.render_widget(Paragraph::new(line), chunks[0]);
    } else {
        let load_state = app.surface.load_state();
        let total = app
            .total_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".to_string());
        let mut spans = vec![
            Span::raw("  "),
            Span::styled(app.loaded_count().to_string(), app.theme.open),
            Span::styled(" of ", app.theme.muted),
            Span::styled(total, app.theme.open),
            Span::styled(" shifts loaded", app.theme.muted),
        ];
        if load_state.is_fetching_more {
            spans.push(Span::styled(" · ", app.theme.muted));
            spans.push(Span::styled("loading…", app.theme.pending));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);
    }

    // Keybindings line
    let keybindings = [
        ("?", "Help"),
        ("j/k", "Select"),
        ("Enter", "Details"),
        ("f", "Role"),
        ("b", "Booked"),
        ("o", "Order"),
        ("q", "Quit"),
    ];

    let mut spans: Vec<Span> = vec![Span::raw("  ")];
    for (i, (key, desc)) in keybindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", app.theme.muted));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            app.theme.muted.add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", desc), app.theme.muted));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
}
