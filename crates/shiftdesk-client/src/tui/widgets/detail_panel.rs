use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::App;

pub fn render_detail_panel(frame: &mut Frame, app: &App, area: Rect) {
    let Some(shift) = app.selected_shift() else {
        return;
    };

    let block = Block::default()
        .title(format!(" Shift #{} ", shift.id))
        .borders(Borders::LEFT)
        .border_style(app.theme.border);

    let field = |name: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {name:<10}"), app.theme.muted),
            Span::styled(value, app.theme.text),
        ])
    };

    let status = if shift.is_fully_booked() {
        Span::styled("Fully booked", app.theme.booked)
    } else {
        Span::styled(format!("{} slot(s) open", shift.open_slots()), app.theme.open)
    };

    let text = vec![
        Line::from(""),
        field("Facility", shift.facility.clone()),
        field("Role", shift.role.clone()),
        field("Date", shift.day_label()),
        field("Time", shift.time_range()),
        field(
            "Length",
            format!("{}h", (shift.ends_at - shift.starts_at).num_hours()),
        ),
        Line::from(""),
        field("Slots", shift.slots.to_string()),
        field("Accepted", shift.accepted.to_string()),
        field("Pending", shift.pending_claims.to_string()),
        Line::from(vec![Span::styled("  Status    ", app.theme.muted), status]),
        Line::from(""),
        Line::from(Span::styled("  [y] copy  [Enter] close", app.theme.muted)),
    ];

    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}
