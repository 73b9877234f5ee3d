use ratatui::{
    style::Modifier,
    text::{Line, Span},
};

use crate::tui::theme::TuiTheme;
use shiftdesk_common::models::DAY_LABEL_FORMAT;
use shiftdesk_common::virtual_list::{RowContent, RowSlot};
use shiftdesk_common::{RecordId, Shift};

/// Indent of the lines below a shift's headline
const INDENT: &str = "      ";

/// Lines for one list row, exactly `slot.height` of them.
///
/// The list surface decides the height; this only fills it. Taller rows
/// reveal more of the shift, shorter ones cut from the bottom.
pub fn row_lines(
    theme: &TuiTheme,
    slot: &RowSlot<'_, Shift>,
    selected: Option<RecordId>,
    wide: bool,
) -> Vec<Line<'static>> {
    let lines = match slot.content {
        RowContent::Title(label) => title_lines(theme, label, slot.height),
        RowContent::Placeholder => vec![Line::from(Span::styled(
            "  Loading more shifts…",
            theme.muted.add_modifier(Modifier::ITALIC),
        ))],
        RowContent::Record(shift) => shift_lines(theme, shift, selected == Some(shift.id), wide),
    };
    fit(lines, slot.height)
}

fn fit(mut lines: Vec<Line<'static>>, height: u16) -> Vec<Line<'static>> {
    let height = usize::from(height);
    lines.truncate(height);
    lines.resize(height, Line::default());
    lines
}

fn title_lines(theme: &TuiTheme, label: &str, height: u16) -> Vec<Line<'static>> {
    let today = chrono::Utc::now().format(DAY_LABEL_FORMAT).to_string();
    let mut spans = vec![
        Span::raw(" "),
        Span::styled(label.to_string(), theme.header),
    ];
    if label == today {
        spans.push(Span::styled(" [Today]", theme.muted));
    }
    let title = Line::from(spans);
    // Spacing goes above the label
    if height >= 2 {
        vec![Line::default(), title]
    } else {
        vec![title]
    }
}

fn headline(theme: &TuiTheme, shift: &Shift, is_selected: bool) -> Vec<Span<'static>> {
    let (marker, time_style) = if is_selected {
        (" > ", theme.info.add_modifier(Modifier::BOLD))
    } else {
        ("   ", theme.text)
    };
    vec![
        Span::styled(marker, theme.info),
        Span::styled(format!("{:>4}. ", shift.id), theme.muted),
        Span::styled(shift.time_range(), time_style),
        Span::raw("  "),
        Span::styled(shift.role.clone(), theme.title),
        Span::styled(format!("  @ {}", shift.facility), theme.muted),
    ]
}

fn availability(theme: &TuiTheme, shift: &Shift) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if shift.is_fully_booked() {
        spans.push(Span::styled(
            format!("{}/{} booked", shift.accepted, shift.slots),
            theme.booked,
        ));
    } else {
        spans.push(Span::styled(
            format!("{}/{} booked", shift.accepted, shift.slots),
            theme.open,
        ));
        spans.push(Span::styled(" · ", theme.muted));
        spans.push(Span::styled(format!("{} open", shift.open_slots()), theme.open));
    }
    if shift.pending_claims > 0 {
        spans.push(Span::styled(" · ", theme.muted));
        spans.push(Span::styled(
            format!("{} pending", shift.pending_claims),
            theme.pending,
        ));
    }
    spans
}

fn shift_lines(theme: &TuiTheme, shift: &Shift, is_selected: bool, wide: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(4);

    if wide {
        let mut spans = headline(theme, shift, is_selected);
        spans.push(Span::raw("   "));
        spans.extend(availability(theme, shift));
        lines.push(Line::from(spans));
    } else {
        lines.push(Line::from(headline(theme, shift, is_selected)));
        let mut spans = vec![Span::raw(INDENT)];
        spans.extend(availability(theme, shift));
        lines.push(Line::from(spans));
    }

    let detail = if is_selected {
        Span::styled("Enter details · y copy · Esc clear", theme.muted)
    } else {
        let hours = (shift.ends_at - shift.starts_at).num_hours();
        Span::styled(
            format!("{hours}h shift, ends {}", shift.ends_at.format("%a %H:%M")),
            theme.muted,
        )
    };
    lines.push(Line::from(vec![Span::raw(INDENT), detail]));

    if shift.is_fully_booked() {
        lines.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled("Fully booked, new claims join the waitlist", theme.booked),
        ]));
    }

    if is_selected {
        lines = lines
            .into_iter()
            .map(|line| line.style(theme.selected))
            .collect();
    }
    lines
}
