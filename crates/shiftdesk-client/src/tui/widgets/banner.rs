use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::App;

/// Welcome banner drawn into the list's bottom margin
pub fn render_banner(frame: &mut Frame, app: &App, area: Rect) {
    if !app.banner_visible || area.height == 0 {
        return;
    }
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(app.theme.border);
    let line = Line::from(vec![
        Span::styled("  Welcome to shiftdesk! ", app.theme.info.add_modifier(Modifier::BOLD)),
        Span::styled(
            "Pick a shift with j/k, review it with Enter, press ? for all keys. ",
            app.theme.muted,
        ),
        Span::styled("[x] dismiss", app.theme.muted.add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);
}
