use std::sync::Arc;
use std::time::{Duration, Instant};

use arboard::Clipboard;

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::source::ShiftSource;
use shiftdesk_common::api::ShiftPage;
use shiftdesk_common::feed::{append_page, ShiftQuery, ROLES};
use shiftdesk_common::virtual_list::{
    FetchTicket, Fingerprint, ListSurface, SelectionContext, SelectionView, SurfaceCommand,
};
use shiftdesk_common::{Bucket, RecordId, Shift};

use super::theme::TuiTheme;

/// Pause before retrying a failed page fetch
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// How long a status toast stays visible
const STATUS_TTL: Duration = Duration::from_secs(3);

/// Main application state
pub struct App {
    pub config: Config,
    pub theme: TuiTheme,
    /// Where pages come from; shared with fetch workers
    pub source: Arc<dyn ShiftSource>,
    /// Loaded day buckets, in feed order
    pub buckets: Vec<Bucket<Shift>>,
    /// Bumped whenever the feed restarts (filter, order, reload)
    pub revision: u64,
    pub query: ShiftQuery,
    /// Cursor for the next page of the current feed
    pub next_cursor: Option<String>,
    /// Matching shifts on the source, once the first page arrived
    pub total_count: Option<usize>,
    pub selection: Selection,
    pub surface: ListSurface<Shift>,
    pub popup: Option<PopupState>,
    pub show_detail: bool,
    /// Informational banner; its bottom margin is fixed at startup
    pub banner_visible: bool,
    pub status_message: Option<StatusMessage>,
    pub running: bool,
    retry_after: Option<Instant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    Help,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

/// Currently selected shift, owned by the app and cleared by the list
/// surface when the shift disappears.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    id: Option<RecordId>,
}

impl SelectionContext for Selection {
    fn selected_id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_selected_id(&mut self, id: Option<RecordId>) {
        self.id = id;
    }
}

/// A page fetch the event loop must run
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub query: ShiftQuery,
    pub cursor: Option<String>,
    pub limit: usize,
}

impl App {
    pub fn new(config: Config, source: Arc<dyn ShiftSource>) -> Self {
        let theme = TuiTheme::from(&config.theme.resolve());
        let banner_visible = !config.banner_dismissed;
        let surface = ListSurface::new(config.list.clone(), banner_visible);

        let mut app = Self {
            config,
            theme,
            source,
            buckets: Vec::new(),
            revision: 0,
            query: ShiftQuery::default(),
            next_cursor: None,
            total_count: None,
            selection: Selection::default(),
            surface,
            popup: None,
            show_detail: false,
            banner_visible,
            status_message: None,
            running: true,
            retry_after: None,
        };
        app.restart_feed();
        app
    }

    /// Start with `query` instead of the unfiltered feed
    pub fn with_query(mut self, query: ShiftQuery) -> Self {
        if query != self.query {
            self.query = query;
            self.restart_feed();
        }
        self
    }

    fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(self.revision, &self.buckets)
    }

    /// Drop everything loaded and start the feed over with the current query.
    pub fn restart_feed(&mut self) {
        self.revision += 1;
        self.buckets.clear();
        self.next_cursor = None;
        self.total_count = None;
        self.retry_after = None;

        let fingerprint = self.fingerprint();
        self.surface
            .set_buckets(&self.buckets, fingerprint, true, &mut self.selection);
        self.refresh_selection(Instant::now());
        tracing::info!(revision = self.revision, query = ?self.query, "feed restarted");
    }

    /// Ask the list whether it wants the next page.
    pub fn next_fetch(&mut self, now: Instant) -> Option<FetchRequest> {
        if self.retry_after.is_some_and(|at| now < at) {
            return None;
        }
        let ticket = self.surface.poll_load_more()?;
        Some(FetchRequest {
            ticket,
            query: self.query.clone(),
            cursor: self.next_cursor.clone(),
            limit: self.config.page_size,
        })
    }

    /// Fold a finished fetch into the list. Results for an earlier feed
    /// revision are dropped.
    pub fn apply_page(&mut self, ticket: FetchTicket, result: Result<ShiftPage>, now: Instant) {
        match result {
            Ok(page) => {
                if !self.surface.accepts(ticket) {
                    return;
                }
                append_page(&mut self.buckets, page.buckets);
                self.next_cursor = page.next_cursor;
                self.total_count = Some(page.total_count);
                self.retry_after = None;

                let fingerprint = self.fingerprint();
                self.surface.complete_load(
                    ticket,
                    &self.buckets,
                    fingerprint,
                    page.has_next_page,
                    &mut self.selection,
                );
                self.refresh_selection(now);
            }
            Err(err) => {
                if !self.surface.fail_load(ticket) {
                    return;
                }
                tracing::warn!(error = %err, "failed to load shifts");
                self.retry_after = Some(now + RETRY_DELAY);
                self.set_status(format!("Could not load shifts: {err}"), StatusKind::Error);
            }
        }
    }

    /// Number of shifts loaded so far
    pub fn loaded_count(&self) -> usize {
        self.buckets.iter().map(|b| b.records.len()).sum()
    }

    pub fn selected_shift(&self) -> Option<&Shift> {
        let id = self.selection.selected_id()?;
        self.buckets
            .iter()
            .flat_map(|b| b.records.iter())
            .find(|s| s.id == id)
    }

    /// Hand the current selection to the list, which re-centers on change.
    ///
    /// The list only sees the selection while the detail panel is open;
    /// that is what switches the other rows to their compact height.
    fn refresh_selection(&mut self, now: Instant) {
        let view = match self.selected_shift() {
            Some(shift) if self.show_detail => {
                SelectionView::selected(shift.id, shift.is_fully_booked())
            }
            Some(_) => SelectionView::none(),
            None => {
                self.selection.set_selected_id(None);
                self.show_detail = false;
                SelectionView::none()
            }
        };
        self.surface.sync_selection(view, now);
    }

    fn select(&mut self, id: Option<RecordId>, now: Instant) {
        self.selection.set_selected_id(id);
        self.refresh_selection(now);
        if !self.show_detail {
            // Row sizes stay put, only the scroll follows the selection
            if let Some(index) = self.selected_index(&self.record_positions()) {
                self.surface.scroll_to_index(index, now);
            }
        }
    }

    /// Flattened indices and ids of all loaded shifts
    fn record_positions(&self) -> Vec<(usize, RecordId)> {
        self.surface
            .items()
            .iter()
            .enumerate()
            .filter_map(|(index, item)| item.as_record().map(|shift| (index, shift.id)))
            .collect()
    }

    fn selected_index(&self, positions: &[(usize, RecordId)]) -> Option<usize> {
        let id = self.selection.selected_id()?;
        positions.iter().find(|(_, rid)| *rid == id).map(|(i, _)| *i)
    }

    pub fn select_next(&mut self, now: Instant) {
        let positions = self.record_positions();
        let next = match self.selected_index(&positions) {
            Some(current) => positions.iter().find(|(i, _)| *i > current),
            None => positions.first(),
        };
        if let Some(&(_, id)) = next {
            self.select(Some(id), now);
        }
    }

    pub fn select_previous(&mut self, now: Instant) {
        let positions = self.record_positions();
        let previous = match self.selected_index(&positions) {
            Some(current) => positions.iter().rev().find(|(i, _)| *i < current),
            None => positions.first(),
        };
        if let Some(&(_, id)) = previous {
            self.select(Some(id), now);
        }
    }

    pub fn select_first(&mut self, now: Instant) {
        let first = self.record_positions().first().map(|&(_, id)| id);
        if first.is_some() {
            self.select(first, now);
        }
    }

    pub fn select_last(&mut self, now: Instant) {
        let last = self.record_positions().last().map(|&(_, id)| id);
        if last.is_some() {
            self.select(last, now);
        }
    }

    pub fn clear_selection(&mut self, now: Instant) {
        self.show_detail = false;
        self.select(None, now);
    }

    pub fn toggle_detail(&mut self, now: Instant) {
        if self.selection.selected_id().is_some() {
            self.show_detail = !self.show_detail;
            self.refresh_selection(now);
        } else {
            self.set_status("Select a shift first".to_string(), StatusKind::Info);
        }
    }

    /// Step the role filter through all roles and back to "any".
    pub fn cycle_role_filter(&mut self) {
        let next = match self.query.role.as_deref() {
            None => Some(0),
            Some(current) => ROLES
                .iter()
                .position(|r| r.eq_ignore_ascii_case(current))
                .map(|i| i + 1),
        };
        self.query.role = next.and_then(|i| ROLES.get(i)).map(|r| r.to_string());
        self.restart_feed();
        let label = self.query.role.as_deref().unwrap_or("any role");
        self.set_status(format!("Role: {label}"), StatusKind::Info);
    }

    pub fn toggle_hide_fully_booked(&mut self) {
        self.query.hide_fully_booked = !self.query.hide_fully_booked;
        self.restart_feed();
        let text = if self.query.hide_fully_booked {
            "Hiding fully booked shifts"
        } else {
            "Showing fully booked shifts"
        };
        self.set_status(text.to_string(), StatusKind::Info);
    }

    pub fn toggle_order(&mut self) {
        self.query.order = self.query.order.toggle();
        self.restart_feed();
        self.set_status(
            format!("Sort: {}", self.query.order.display_name()),
            StatusKind::Info,
        );
    }

    pub fn reload(&mut self) {
        self.restart_feed();
        self.set_status("Reloading shifts".to_string(), StatusKind::Info);
    }

    /// Jump to the top without touching the selection
    pub fn scroll_to_top(&mut self) {
        self.surface.push_command(SurfaceCommand::ScrollToTop);
    }

    /// Jump to the end of what is loaded, which pulls in the next page
    pub fn scroll_to_end(&mut self) {
        let total = self.surface.total_renderable_count();
        if total > 0 {
            self.surface
                .push_command(SurfaceCommand::ScrollToIndex(total - 1));
        }
    }

    /// Copy a one-line summary of the selected shift to the clipboard.
    pub fn copy_selected(&mut self) -> Result<()> {
        let summary = self
            .selected_shift()
            .map(shift_summary)
            .ok_or(ClientError::NothingSelected)?;
        let mut clipboard = Clipboard::new().map_err(|e| ClientError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(summary)
            .map_err(|e| ClientError::Clipboard(e.to_string()))?;
        Ok(())
    }

    /// Hide the banner and remember it. The list keeps its startup margin.
    pub fn dismiss_banner(&mut self) {
        if !self.banner_visible {
            return;
        }
        self.banner_visible = false;
        if let Err(err) = self.config.dismiss_banner() {
            tracing::warn!(error = %err, "could not persist banner dismissal");
        }
    }

    pub fn toggle_help(&mut self) {
        self.popup = match self.popup {
            Some(PopupState::Help) => None,
            None => Some(PopupState::Help),
        };
    }

    /// Mouse wheel scrolling is off while a modal is open
    pub fn scroll_disabled(&self) -> bool {
        self.popup.is_some()
    }

    pub fn set_status(&mut self, text: String, kind: StatusKind) {
        self.status_message = Some(StatusMessage {
            text,
            kind,
            expires_at: Instant::now() + STATUS_TTL,
        });
    }

    /// Frame tick: queued list commands, animation step, toast expiry.
    pub fn tick(&mut self, now: Instant) {
        if let Some(ref msg) = self.status_message {
            if now >= msg.expires_at {
                self.status_message = None;
            }
        }
        self.surface.apply_commands(now);
        self.surface.on_frame(now);
    }
}

/// Clipboard text for a shift
pub fn shift_summary(shift: &Shift) -> String {
    format!(
        "{} {} {} at {} ({}/{} booked)",
        shift.day_label(),
        shift.time_range(),
        shift.role,
        shift.facility,
        shift.accepted,
        shift.slots
    )
}
