use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{App, PopupState};
use super::widgets::{
    banner::render_banner, detail_panel::render_detail_panel, help_popup::render_help_popup,
    shift_list::render_shift_list, status_bar::render_status_bar,
};

/// Width of the detail panel beside the list
const DETAIL_WIDTH: u16 = 40;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    if let Some(popup) = app.popup {
        render_popup(frame, app, popup);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled("  shiftdesk", app.theme.title),
        Span::raw("  "),
        Span::styled(app.source.describe(), app.theme.muted),
        Span::raw("  "),
        Span::styled(app.query.order.display_name(), app.theme.muted),
    ];

    if let Some(ref role) = app.query.role {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!("[Role: {}]", role), app.theme.info));
    }

    if app.query.hide_fully_booked {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("[Hiding fully booked]", app.theme.booked));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_content(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(app.theme.border);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (list_area, detail_area) = if app.show_detail && app.selected_shift().is_some() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(DETAIL_WIDTH)])
            .split(inner);
        (columns[0], Some(columns[1]))
    } else {
        (inner, None)
    };

    // The surface reserves its bottom margin out of the height it is given
    app.surface.resize(list_area.width, list_area.height);
    let container_height = app.surface.viewport().container_height;
    let container = Rect {
        height: container_height,
        ..list_area
    };
    let margin = Rect {
        y: list_area.y + container_height,
        height: list_area.height - container_height,
        ..list_area
    };

    render_shift_list(frame, app, container);
    render_banner(frame, app, margin);

    if let Some(area) = detail_area {
        render_detail_panel(frame, app, area);
    }
}

fn render_popup(frame: &mut Frame, app: &App, popup: PopupState) {
    match popup {
        PopupState::Help => render_help_popup(frame, app),
    }
}

/// Helper function to create a centered rect
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
