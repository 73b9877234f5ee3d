use ratatui::{
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use crate::tui::app::App;
use shiftdesk_common::virtual_list::SelectionContext;

use super::shift_row::row_lines;

/// Render the windowed shift timeline into `area`.
///
/// `area` is the list container as laid out by the surface, i.e. without
/// the bottom margin.
pub fn render_shift_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let viewport = app.surface.viewport();
    let load_state = app.surface.load_state();

    if app.surface.items().is_empty() && !load_state.has_more_data {
        let paragraph = Paragraph::new("No shifts match the current filters. Press 'f' or 'b' to change them.")
            .style(app.theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let wide = viewport.width > app.surface.config().row_heights.wide_breakpoint;
    let selected = app.selection.selected_id();
    let scroll_height = app.surface.scroll_height();

    let rows = app.surface.visible_rows();
    let first_top = rows.first().map(|row| row.top).unwrap_or(0);
    let lines: Vec<Line<'static>> = rows
        .iter()
        .flat_map(|row| row_lines(&app.theme, row, selected, wide))
        .collect();

    // Overscan rows above the viewport are drawn and scrolled out of view
    let skip = viewport.scroll_offset.saturating_sub(first_top);
    let skip = u16::try_from(skip).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((skip, 0)), area);

    if scroll_height > u32::from(area.height) {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None);
        let max_offset = scroll_height - u32::from(area.height);
        let mut scrollbar_state = ScrollbarState::new(max_offset as usize + 1)
            .position(viewport.scroll_offset as usize);
        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}
