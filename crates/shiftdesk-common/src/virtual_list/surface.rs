use std::collections::VecDeque;
use std::ops::Range;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::flatten::{position_of, DisplayItem, FlattenCache, Fingerprint};
use super::loader::{FetchTicket, LoadState, LoadTrigger, LoaderGate};
use super::scroll::{target_offset, wheel_target, AnimationHandle, FrameOutcome, ScrollController};
use super::size::{RowHeights, SelectionView, SizeOracle};
use crate::models::{Bucket, Record, RecordId};

/// Bottom margins reserved below the list, in lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerMargins {
    /// Margin while the informational banner is shown
    pub with_banner: u16,
    pub without_banner: u16,
}

impl Default for ContainerMargins {
    fn default() -> Self {
        Self {
            with_banner: 2,
            without_banner: 0,
        }
    }
}

impl ContainerMargins {
    pub fn bottom(&self, banner_visible: bool) -> u16 {
        if banner_visible {
            self.with_banner
        } else {
            self.without_banner
        }
    }
}

fn default_overscan() -> usize {
    3
}

fn default_load_threshold() -> usize {
    5
}

fn default_substantial_change() -> usize {
    10
}

fn default_scroll_duration_ms() -> u64 {
    300
}

/// Tuning for the list surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceConfig {
    /// Rows rendered above and below the visible window
    #[serde(default = "default_overscan")]
    pub overscan: usize,

    /// Start loading when the rendered range is this many rows from the tail
    #[serde(default = "default_load_threshold")]
    pub load_threshold: usize,

    /// Item count delta above which a replaced sequence resets the view
    #[serde(default = "default_substantial_change")]
    pub substantial_change: usize,

    #[serde(default = "default_scroll_duration_ms")]
    pub scroll_duration_ms: u64,

    #[serde(default)]
    pub row_heights: RowHeights,

    #[serde(default)]
    pub margins: ContainerMargins,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            overscan: default_overscan(),
            load_threshold: default_load_threshold(),
            substantial_change: default_substantial_change(),
            scroll_duration_ms: default_scroll_duration_ms(),
            row_heights: RowHeights::default(),
            margins: ContainerMargins::default(),
        }
    }
}

/// Scroll position and size of the list container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportState {
    pub scroll_offset: u32,
    pub container_height: u16,
    pub width: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfacePhase {
    Idle,
    UserScrolling,
    ProgrammaticScrolling,
}

/// How a new bucket sequence relates to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceChange {
    Unchanged,
    /// Same query, more records at the tail (pagination)
    Append,
    /// Anything else. Substantial replacements reset scroll and caches.
    Replace { substantial: bool },
}

/// Requests an owner can queue for the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceCommand {
    ResetAfterIndex(usize),
    ScrollToIndex(usize),
    ScrollToTop,
}

/// What a visible row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowContent<'a, R> {
    Title(&'a str),
    Record(&'a R),
    /// Trailing "loading more" row
    Placeholder,
}

/// A row to draw. Rows are keyed by their flattened index, not by record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSlot<'a, R> {
    pub index: usize,
    /// Offset of the row's top edge from the start of the list
    pub top: u32,
    pub height: u16,
    pub content: RowContent<'a, R>,
}

/// Size cache counters, mostly useful to verify invalidation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub cached_rows: usize,
    /// Total size lookups performed since creation
    pub measurements: usize,
}

/// Caller-owned selection the surface reads and, when the selected record
/// disappears, clears.
pub trait SelectionContext {
    fn selected_id(&self) -> Option<RecordId>;
    fn set_selected_id(&mut self, id: Option<RecordId>);
}

/// Windowed rendering surface for a flattened, paginated record list.
#[derive(Debug)]
pub struct ListSurface<R> {
    config: SurfaceConfig,
    bottom_margin: u16,
    items: FlattenCache<R>,
    oracle: SizeOracle,
    gate: LoaderGate,
    scroll: ScrollController,
    animation: Option<AnimationHandle>,
    viewport: ViewportState,
    selection: SelectionView,
    phase: SurfacePhase,
    /// `offsets[i]` is the top of row `i`; always holds at least `[0]`
    offsets: Vec<u32>,
    measurements: usize,
    commands: VecDeque<SurfaceCommand>,
}

impl<R: Record + Clone> ListSurface<R> {
    /// `banner_visible` is read once here; later banner changes do not move
    /// the container margin.
    pub fn new(config: SurfaceConfig, banner_visible: bool) -> Self {
        let bottom_margin = config.margins.bottom(banner_visible);
        Self {
            oracle: SizeOracle::new(config.row_heights),
            gate: LoaderGate::new(config.load_threshold),
            scroll: ScrollController::new(Duration::from_millis(config.scroll_duration_ms)),
            config,
            bottom_margin,
            items: FlattenCache::new(),
            animation: None,
            viewport: ViewportState::default(),
            selection: SelectionView::none(),
            phase: SurfacePhase::Idle,
            offsets: vec![0],
            measurements: 0,
            commands: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn items(&self) -> &[DisplayItem<R>] {
        self.items.items()
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn phase(&self) -> SurfacePhase {
        self.phase
    }

    pub fn load_state(&self) -> LoadState {
        self.gate.state()
    }

    pub fn gate(&self) -> &LoaderGate {
        &self.gate
    }

    pub fn bottom_margin(&self) -> u16 {
        self.bottom_margin
    }

    pub fn total_renderable_count(&self) -> usize {
        self.gate.total_renderable_count()
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            cached_rows: self.offsets.len() - 1,
            measurements: self.measurements,
        }
    }

    /// Feed a new bucket sequence.
    ///
    /// Pagination appends keep the scroll position. Substantial
    /// replacements (new query revision, changed bucket count, or an item
    /// delta above the threshold) jump back to the top and drop every cached
    /// size. Afterwards a selection pointing at a vanished record is cleared
    /// through `selection`.
    pub fn set_buckets(
        &mut self,
        buckets: &[Bucket<R>],
        fingerprint: Fingerprint,
        has_more: bool,
        selection: &mut impl SelectionContext,
    ) -> SequenceChange {
        let change = classify(
            self.items.fingerprint(),
            &fingerprint,
            self.config.substantial_change,
        );
        let old_len = self.items.items().len();
        let new_len = self.items.get(&fingerprint, buckets).len();

        match change {
            SequenceChange::Unchanged => self.gate.sync(new_len, has_more),
            SequenceChange::Append => {
                self.gate.sync(new_len, has_more);
                self.reset_after_index(old_len);
            }
            SequenceChange::Replace { substantial: true } => {
                tracing::debug!(old_len, new_len, "substantial list change, resetting view");
                self.cancel_animation();
                self.phase = SurfacePhase::Idle;
                self.viewport.scroll_offset = 0;
                self.reset_after_index(0);
                self.gate.reset(new_len, has_more);
            }
            SequenceChange::Replace { substantial: false } => {
                self.gate.sync(new_len, has_more);
                self.reset_after_index(0);
                self.clamp_scroll();
            }
        }

        self.enforce_selection(selection);
        change
    }

    /// Report a finished page fetch. The caller must already have folded the
    /// page into `buckets`. Returns `false` and changes nothing when the
    /// ticket is stale.
    pub fn complete_load(
        &mut self,
        ticket: FetchTicket,
        buckets: &[Bucket<R>],
        fingerprint: Fingerprint,
        has_more: bool,
        selection: &mut impl SelectionContext,
    ) -> bool {
        if !self.gate.accepts(ticket) {
            return false;
        }
        self.set_buckets(buckets, fingerprint, has_more, selection);
        let known = self.items.items().len();
        self.gate.complete(ticket, known, has_more);
        true
    }

    /// Report a failed page fetch. The list stays as it was.
    pub fn fail_load(&mut self, ticket: FetchTicket) -> bool {
        self.gate.fail(ticket)
    }

    /// Whether a page result for `ticket` should still be applied
    pub fn accepts(&self, ticket: FetchTicket) -> bool {
        self.gate.accepts(ticket)
    }

    /// Update the container to the available area; the bottom margin chosen
    /// at mount time is subtracted from `height`.
    pub fn resize(&mut self, width: u16, height: u16) {
        let container_height = height.saturating_sub(self.bottom_margin);
        if width != self.viewport.width {
            self.reset_after_index(0);
        }
        self.viewport.width = width;
        self.viewport.container_height = container_height;
        self.clamp_scroll();
    }

    /// Drop cached sizes from `index` on. Call whenever an input of the
    /// size rule changes.
    pub fn reset_after_index(&mut self, index: usize) {
        self.offsets.truncate(index + 1);
    }

    /// Re-center the selected record when the selection or its fully-booked
    /// flag changed.
    pub fn sync_selection(&mut self, view: SelectionView, now: Instant) {
        if view == self.selection {
            return;
        }
        self.selection = view;
        self.reset_after_index(0);

        let index = view
            .selected_id
            .and_then(|id| position_of(self.items.items(), id));
        if let Some(index) = index {
            self.scroll_to_index(index, now);
        } else {
            self.clamp_scroll();
        }
    }

    pub fn selection(&self) -> SelectionView {
        self.selection
    }

    /// Animate so that row `index` sits a little below the top edge. A
    /// running animation is replaced.
    pub fn scroll_to_index(&mut self, index: usize, now: Instant) {
        let total = self.gate.total_renderable_count();
        if total == 0 {
            return;
        }
        let index = index.min(total - 1);
        self.ensure_measured(total);

        let top = self.offsets[index];
        let height = (self.offsets[index + 1] - top) as u16;
        let target = target_offset(
            top,
            height,
            self.viewport.container_height,
            self.max_scroll_offset(),
        );

        self.animation = Some(self.scroll.start(self.viewport.scroll_offset, target, now));
        self.phase = SurfacePhase::ProgrammaticScrolling;
    }

    /// Advance one frame. Returns `true` when the scroll offset moved.
    pub fn on_frame(&mut self, now: Instant) -> bool {
        if self.phase == SurfacePhase::UserScrolling {
            self.phase = SurfacePhase::Idle;
        }
        let Some(handle) = self.animation else {
            return false;
        };

        let before = self.viewport.scroll_offset;
        // The content may have shrunk since the animation started
        let max = self.max_scroll_offset();
        match self.scroll.frame(handle, now) {
            FrameOutcome::Write(offset) => self.viewport.scroll_offset = offset.min(max),
            FrameOutcome::Done(offset) => {
                self.viewport.scroll_offset = offset.min(max);
                self.animation = None;
                self.phase = SurfacePhase::Idle;
            }
            FrameOutcome::Superseded => {
                self.animation = None;
                self.phase = SurfacePhase::Idle;
            }
        }
        before != self.viewport.scroll_offset
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Manual scroll by `delta` lines. Ignored while `scroll_disabled`;
    /// otherwise cancels any programmatic scroll.
    pub fn wheel(&mut self, delta: i32, scroll_disabled: bool) -> bool {
        let scroll_height = self.scroll_height();
        let Some(next) = wheel_target(
            self.viewport.scroll_offset,
            delta,
            scroll_height,
            self.viewport.container_height,
            scroll_disabled,
        ) else {
            return false;
        };
        self.cancel_animation();
        self.phase = SurfacePhase::UserScrolling;
        let moved = next != self.viewport.scroll_offset;
        self.viewport.scroll_offset = next;
        moved
    }

    pub fn push_command(&mut self, command: SurfaceCommand) {
        self.commands.push_back(command);
    }

    /// Apply queued commands in order
    pub fn apply_commands(&mut self, now: Instant) {
        while let Some(command) = self.commands.pop_front() {
            match command {
                SurfaceCommand::ResetAfterIndex(index) => self.reset_after_index(index),
                SurfaceCommand::ScrollToIndex(index) => self.scroll_to_index(index, now),
                SurfaceCommand::ScrollToTop => {
                    self.cancel_animation();
                    self.phase = SurfacePhase::Idle;
                    self.viewport.scroll_offset = 0;
                }
            }
        }
    }

    /// Ask the loader gate whether the rendered range is close enough to the
    /// tail. `Some` means the caller must fetch the next page.
    pub fn poll_load_more(&mut self) -> Option<FetchTicket> {
        let range = self.render_range();
        if range.is_empty() || !self.gate.should_load(range.end - 1) {
            return None;
        }
        match self.gate.begin() {
            LoadTrigger::Started(ticket) => Some(ticket),
            LoadTrigger::InFlight | LoadTrigger::Exhausted => None,
        }
    }

    /// Total scrollable extent including the placeholder row
    pub fn scroll_height(&mut self) -> u32 {
        let total = self.gate.total_renderable_count();
        self.ensure_measured(total);
        self.offsets[total]
    }

    pub fn max_scroll_offset(&mut self) -> u32 {
        self.scroll_height()
            .saturating_sub(u32::from(self.viewport.container_height))
    }

    /// Top offset of row `index`, clamped to the renderable range
    pub fn offset_of(&mut self, index: usize) -> u32 {
        let index = index.min(self.gate.total_renderable_count());
        self.ensure_measured(index);
        self.offsets[index]
    }

    /// Height of row `index` as currently cached
    pub fn height_of(&mut self, index: usize) -> u16 {
        self.ensure_measured(index + 1);
        (self.offsets[index + 1] - self.offsets[index]) as u16
    }

    /// Rows intersecting the viewport plus the overscan margin.
    pub fn visible_rows(&mut self) -> Vec<RowSlot<'_, R>> {
        let range = self.render_range();
        let items = self.items.items();
        let offsets = &self.offsets;
        range
            .map(|index| {
                let top = offsets[index];
                let content = match items.get(index) {
                    Some(DisplayItem::Title { label }) => RowContent::Title(label.as_str()),
                    Some(DisplayItem::Record(record)) => RowContent::Record(record),
                    None => RowContent::Placeholder,
                };
                RowSlot {
                    index,
                    top,
                    height: (offsets[index + 1] - top) as u16,
                    content,
                }
            })
            .collect()
    }

    fn render_range(&mut self) -> Range<usize> {
        let total = self.gate.total_renderable_count();
        if total == 0 {
            return 0..0;
        }
        self.ensure_measured(total);

        let tops = &self.offsets[..total];
        let top = self.viewport.scroll_offset;
        let bottom = top + u32::from(self.viewport.container_height);

        let first = tops.partition_point(|&o| o <= top).saturating_sub(1);
        let end = tops.partition_point(|&o| o < bottom).max(first + 1);

        first.saturating_sub(self.config.overscan)..(end + self.config.overscan).min(total)
    }

    fn ensure_measured(&mut self, count: usize) {
        let items = self.items.items();
        while self.offsets.len() <= count {
            let index = self.offsets.len() - 1;
            let height =
                self.oracle
                    .size_of(index, items, self.viewport.width, &self.selection);
            self.measurements += 1;
            let top = self.offsets[index];
            self.offsets.push(top + u32::from(height));
        }
    }

    fn clamp_scroll(&mut self) {
        let max = self.max_scroll_offset();
        if self.viewport.scroll_offset > max {
            self.viewport.scroll_offset = max;
        }
    }

    fn cancel_animation(&mut self) {
        self.scroll.cancel();
        self.animation = None;
    }

    fn enforce_selection(&mut self, selection: &mut impl SelectionContext) {
        let Some(id) = selection.selected_id() else {
            return;
        };
        if position_of(self.items.items(), id).is_none() {
            tracing::debug!(id, "selected record left the list, clearing selection");
            selection.set_selected_id(None);
            if self.selection.selected_id.is_some() {
                self.selection = SelectionView::none();
                self.reset_after_index(0);
            }
        }
    }
}

fn classify(previous: Option<&Fingerprint>, next: &Fingerprint, threshold: usize) -> SequenceChange {
    let Some(previous) = previous else {
        return SequenceChange::Replace { substantial: true };
    };
    if previous == next {
        return SequenceChange::Unchanged;
    }

    let same_head = previous.first_label.is_none() || previous.first_label == next.first_label;
    if previous.revision == next.revision
        && same_head
        && next.record_count >= previous.record_count
        && next.bucket_count >= previous.bucket_count
    {
        return SequenceChange::Append;
    }

    let delta = previous.item_count().abs_diff(next.item_count());
    SequenceChange::Replace {
        substantial: previous.revision != next.revision
            || previous.bucket_count != next.bucket_count
            || delta > threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Selection {
        id: Option<RecordId>,
        cleared: usize,
    }

    impl SelectionContext for Selection {
        fn selected_id(&self) -> Option<RecordId> {
            self.id
        }

        fn set_selected_id(&mut self, id: Option<RecordId>) {
            if id.is_none() {
                self.cleared += 1;
            }
            self.id = id;
        }
    }

    /// `count` buckets of `per` records, ids numbered from `first_id`.
    fn buckets(count: usize, per: usize, first_id: u64) -> Vec<Bucket<u64>> {
        (0..count)
            .map(|b| {
                let start = first_id + (b * per) as u64;
                Bucket::new(format!("Day {}", start), (start..start + per as u64).collect())
            })
            .collect()
    }

    fn config() -> SurfaceConfig {
        SurfaceConfig {
            overscan: 2,
            load_threshold: 3,
            substantial_change: 10,
            scroll_duration_ms: 100,
            row_heights: RowHeights::default(),
            margins: ContainerMargins::default(),
        }
    }

    fn surface(width: u16, height: u16) -> ListSurface<u64> {
        let mut surface = ListSurface::new(config(), false);
        surface.resize(width, height);
        surface
    }

    fn feed(
        surface: &mut ListSurface<u64>,
        data: &[Bucket<u64>],
        revision: u64,
        has_more: bool,
        selection: &mut Selection,
    ) -> SequenceChange {
        surface.set_buckets(data, Fingerprint::of(revision, data), has_more, selection)
    }

    #[test]
    fn test_margin_is_fixed_at_mount() {
        let mut with_banner: ListSurface<u64> = ListSurface::new(config(), true);
        with_banner.resize(80, 30);
        assert_eq!(with_banner.bottom_margin(), 2);
        assert_eq!(with_banner.viewport().container_height, 28);

        let mut without: ListSurface<u64> = ListSurface::new(config(), false);
        without.resize(80, 30);
        assert_eq!(without.viewport().container_height, 30);
    }

    #[test]
    fn test_end_to_end_load_more() {
        let mut surface = surface(80, 60);
        let mut selection = Selection::default();
        let mut data = buckets(3, 2, 1);
        feed(&mut surface, &data, 0, true, &mut selection);

        assert_eq!(surface.items().len(), 9);
        assert_eq!(surface.total_renderable_count(), 10);

        let ticket = surface.poll_load_more().expect("tail is within threshold");
        assert_eq!(surface.poll_load_more(), None);
        assert_eq!(surface.poll_load_more(), None);
        assert_eq!(surface.gate().fetches_started(), 1);

        crate::feed::append_page(&mut data, buckets(2, 1, 100));
        let fp = Fingerprint::of(0, &data);
        assert!(surface.complete_load(ticket, &data, fp, true, &mut selection));
        assert_eq!(surface.items().len(), 13);
        assert_eq!(surface.total_renderable_count(), 14);
        assert!(!surface.load_state().is_fetching_more);
    }

    #[test]
    fn test_last_page_drops_placeholder() {
        let mut surface = surface(80, 60);
        let mut selection = Selection::default();
        let mut data = buckets(3, 2, 1);
        feed(&mut surface, &data, 0, true, &mut selection);
        let ticket = surface.poll_load_more().unwrap();

        crate::feed::append_page(&mut data, buckets(2, 1, 100));
        let fp = Fingerprint::of(0, &data);
        surface.complete_load(ticket, &data, fp, false, &mut selection);

        assert_eq!(surface.total_renderable_count(), 13);
        assert_eq!(surface.poll_load_more(), None);
        assert!(surface
            .visible_rows()
            .iter()
            .all(|row| row.content != RowContent::Placeholder));
    }

    #[test]
    fn test_failed_load_keeps_rows_and_retries() {
        let mut surface = surface(80, 60);
        let mut selection = Selection::default();
        let data = buckets(3, 2, 1);
        feed(&mut surface, &data, 0, true, &mut selection);

        let ticket = surface.poll_load_more().unwrap();
        assert!(surface.fail_load(ticket));
        assert_eq!(surface.items().len(), 9);
        assert_eq!(surface.total_renderable_count(), 10);

        assert!(surface.poll_load_more().is_some());
        assert_eq!(surface.gate().fetches_started(), 2);
    }

    #[test]
    fn test_far_from_tail_does_not_load() {
        // 20 buckets x 3 records, viewport 10 lines at the top
        let mut surface = surface(80, 10);
        let mut selection = Selection::default();
        let data = buckets(20, 3, 1);
        feed(&mut surface, &data, 0, true, &mut selection);
        assert_eq!(surface.poll_load_more(), None);

        let max = surface.max_scroll_offset();
        surface.wheel(max as i32, false);
        assert!(surface.poll_load_more().is_some());
    }

    #[test]
    fn test_visible_rows_window_with_overscan() {
        // Nothing selected, narrow: titles 2 lines, records 3 lines
        let mut surface = surface(80, 10);
        let mut selection = Selection::default();
        let data = buckets(10, 3, 1);
        feed(&mut surface, &data, 0, false, &mut selection);

        let rows = surface.visible_rows();
        let indices: Vec<usize> = rows.iter().map(|r| r.index).collect();
        // tops 0, 2, 5, 8, 11: rows 0..4 intersect [0, 10), plus 2 overscan
        assert_eq!(indices, (0..6).collect::<Vec<_>>());
        assert_eq!(rows[0].content, RowContent::Title("Day 1"));
        assert_eq!(rows[1].content, RowContent::Record(&1));
        assert_eq!(rows[1].top, 2);
        assert_eq!(rows[1].height, 3);

        surface.wheel(12, false);
        let indices: Vec<usize> = surface.visible_rows().iter().map(|r| r.index).collect();
        // offset 12 lies in the title at row 4 (11..13); rows up to 7 start
        // before line 22
        assert_eq!(indices, (2..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_placeholder_row_has_no_record_content() {
        let mut surface = surface(80, 60);
        let mut selection = Selection::default();
        let data = buckets(1, 2, 1);
        feed(&mut surface, &data, 0, true, &mut selection);

        let rows = surface.visible_rows();
        let last = rows.last().unwrap();
        assert_eq!(last.index, 3);
        assert_eq!(last.content, RowContent::Placeholder);
        assert_eq!(last.height, 1);
    }

    #[test]
    fn test_every_renderable_row_has_positive_height() {
        let mut surface = surface(200, 20);
        let mut selection = Selection::default();
        let data = buckets(6, 4, 1);
        feed(&mut surface, &data, 0, true, &mut selection);
        surface.sync_selection(SelectionView::selected(7, true), Instant::now());

        for index in 0..surface.total_renderable_count() {
            assert!(surface.height_of(index) > 0, "row {index}");
        }
    }

    #[test]
    fn test_substantial_change_resets_scroll_and_cache() {
        let mut surface = surface(80, 10);
        let mut selection = Selection::default();
        let data = buckets(10, 4, 1);
        feed(&mut surface, &data, 0, false, &mut selection);
        assert_eq!(surface.items().len(), 50);

        surface.wheel(40, false);
        assert_eq!(surface.viewport().scroll_offset, 40);
        surface.visible_rows();
        let before = surface.cache_stats();
        assert_eq!(before.cached_rows, 50);

        let small = buckets(2, 3, 500);
        let change = feed(&mut surface, &small, 0, false, &mut selection);
        assert_eq!(change, SequenceChange::Replace { substantial: true });
        assert_eq!(surface.viewport().scroll_offset, 0);
        assert_eq!(surface.cache_stats().cached_rows, 0);

        surface.visible_rows();
        let after = surface.cache_stats();
        assert_eq!(after.cached_rows, 8);
        assert_eq!(after.measurements, before.measurements + 8);
    }

    #[test]
    fn test_new_revision_is_substantial_even_with_same_shape() {
        let mut surface = surface(80, 10);
        let mut selection = Selection::default();
        let data = buckets(10, 4, 1);
        feed(&mut surface, &data, 0, true, &mut selection);
        surface.wheel(20, false);

        let change = feed(&mut surface, &data, 1, true, &mut selection);
        assert_eq!(change, SequenceChange::Replace { substantial: true });
        assert_eq!(surface.viewport().scroll_offset, 0);
    }

    #[test]
    fn test_append_keeps_scroll_position() {
        let mut surface = surface(80, 10);
        let mut selection = Selection::default();
        let mut data = buckets(10, 4, 1);
        feed(&mut surface, &data, 0, true, &mut selection);
        surface.wheel(30, false);

        crate::feed::append_page(&mut data, buckets(8, 4, 1_000));
        let change = feed(&mut surface, &data, 0, true, &mut selection);
        assert_eq!(change, SequenceChange::Append);
        assert_eq!(surface.viewport().scroll_offset, 30);
        assert_eq!(surface.items().len(), 90);
    }

    #[test]
    fn test_refeeding_same_sequence_is_unchanged() {
        let mut surface = surface(80, 10);
        let mut selection = Selection::default();
        let data = buckets(3, 2, 1);
        feed(&mut surface, &data, 0, true, &mut selection);
        let change = feed(&mut surface, &data.clone(), 0, true, &mut selection);
        assert_eq!(change, SequenceChange::Unchanged);
    }

    #[test]
    fn test_stale_fetch_after_filter_change_is_dropped() {
        let mut surface = surface(80, 60);
        let mut selection = Selection::default();
        let data = buckets(3, 2, 1);
        feed(&mut surface, &data, 0, true, &mut selection);
        let ticket = surface.poll_load_more().unwrap();

        let filtered = buckets(1, 1, 40);
        feed(&mut surface, &filtered, 1, true, &mut selection);
        assert!(!surface.accepts(ticket));

        let mut late = filtered.clone();
        crate::feed::append_page(&mut late, buckets(2, 2, 900));
        let fp = Fingerprint::of(1, &late);
        assert!(!surface.complete_load(ticket, &late, fp, true, &mut selection));
        assert_eq!(surface.items().len(), 2);
    }

    #[test]
    fn test_vanished_selection_is_cleared_via_setter() {
        let mut surface = surface(80, 20);
        let mut selection = Selection {
            id: Some(4),
            cleared: 0,
        };
        let data = buckets(3, 2, 1);
        feed(&mut surface, &data, 0, false, &mut selection);
        assert_eq!(selection.id, Some(4));
        assert_eq!(selection.cleared, 0);

        // ids 1..=2 only
        let smaller = buckets(1, 2, 1);
        feed(&mut surface, &smaller, 0, false, &mut selection);
        assert_eq!(selection.id, None);
        assert_eq!(selection.cleared, 1);
    }

    #[test]
    fn test_selection_invariant_over_many_mutations() {
        let mut surface = surface(80, 20);
        let mut selection = Selection::default();
        let sequences = [
            buckets(4, 3, 1),
            buckets(2, 3, 1),
            buckets(6, 2, 1),
            buckets(1, 1, 50),
            buckets(3, 3, 1),
        ];
        for (round, data) in sequences.iter().enumerate() {
            selection.id = Some(5 + round as u64);
            feed(&mut surface, data, round as u64, true, &mut selection);
            if let Some(id) = selection.id {
                assert!(position_of(surface.items(), id).is_some());
            }
        }
    }

    #[test]
    fn test_selecting_record_animates_into_view() {
        let mut surface = surface(80, 20);
        let mut selection = Selection::default();
        let data = buckets(10, 4, 1);
        feed(&mut surface, &data, 0, false, &mut selection);

        let t0 = Instant::now();
        // record 21 is the first record of the sixth bucket, flattened index 26
        surface.sync_selection(SelectionView::selected(21, false), t0);
        assert_eq!(surface.phase(), SurfacePhase::ProgrammaticScrolling);

        // with a selection every other record is compact (2 lines)
        let top = surface.offset_of(26);
        assert_eq!(top, 5 * 2 + 20 * 2 + 2);
        let height = surface.height_of(26);
        assert_eq!(height, 3);
        let target = top - (20 - 3) / 5;

        assert!(surface.on_frame(t0 + Duration::from_millis(50)));
        assert!(surface.viewport().scroll_offset > 0);
        assert!(surface.viewport().scroll_offset < target);

        surface.on_frame(t0 + Duration::from_millis(100));
        assert_eq!(surface.viewport().scroll_offset, target);
        assert_eq!(surface.phase(), SurfacePhase::Idle);
    }

    #[test]
    fn test_fully_booked_flip_recenters() {
        let mut surface = surface(80, 20);
        let mut selection = Selection::default();
        let data = buckets(10, 4, 1);
        feed(&mut surface, &data, 0, false, &mut selection);

        let t0 = Instant::now();
        surface.sync_selection(SelectionView::selected(21, false), t0);
        surface.on_frame(t0 + Duration::from_millis(200));
        assert!(!surface.is_animating());

        surface.sync_selection(SelectionView::selected(21, false), t0);
        assert!(!surface.is_animating());

        surface.sync_selection(SelectionView::selected(21, true), t0);
        assert!(surface.is_animating());
        assert_eq!(surface.height_of(26), 4);
    }

    #[test]
    fn test_latest_scroll_request_wins() {
        let mut surface = surface(80, 20);
        let mut selection = Selection::default();
        let data = buckets(10, 4, 1);
        feed(&mut surface, &data, 0, false, &mut selection);

        let t0 = Instant::now();
        surface.scroll_to_index(40, t0);
        surface.on_frame(t0 + Duration::from_millis(30));
        surface.scroll_to_index(0, t0 + Duration::from_millis(40));
        surface.on_frame(t0 + Duration::from_millis(500));
        assert_eq!(surface.viewport().scroll_offset, 0);
        assert!(!surface.is_animating());
    }

    #[test]
    fn test_animation_stays_within_bounds_after_resize() {
        let mut surface = surface(80, 10);
        let mut selection = Selection::default();
        let data = buckets(10, 4, 1);
        feed(&mut surface, &data, 0, false, &mut selection);
        assert_eq!(surface.max_scroll_offset(), 130);

        let t0 = Instant::now();
        surface.scroll_to_index(49, t0);
        surface.on_frame(t0 + Duration::from_millis(50));

        surface.resize(80, 40);
        let max = surface.max_scroll_offset();
        assert_eq!(max, 100);

        surface.on_frame(t0 + Duration::from_millis(200));
        assert!(!surface.is_animating());
        assert_eq!(surface.viewport().scroll_offset, max);
    }

    #[test]
    fn test_page_load_mid_animation_keeps_animating() {
        let mut surface = surface(80, 10);
        let mut selection = Selection::default();
        let mut data = buckets(3, 2, 1);
        feed(&mut surface, &data, 0, true, &mut selection);

        // at the bottom the placeholder is in range
        surface.wheel(100, false);
        let ticket = surface.poll_load_more().expect("tail is within threshold");

        let t0 = Instant::now();
        surface.scroll_to_index(4, t0);
        let target = surface.offset_of(4) - (10 - u32::from(surface.height_of(4))) / 5;
        surface.on_frame(t0 + Duration::from_millis(30));
        assert!(surface.is_animating());

        crate::feed::append_page(&mut data, buckets(2, 1, 100));
        let fp = Fingerprint::of(0, &data);
        assert!(surface.complete_load(ticket, &data, fp, true, &mut selection));
        assert!(surface.is_animating());
        assert_eq!(surface.load_state().known_item_count, 13);

        surface.on_frame(t0 + Duration::from_millis(200));
        assert!(!surface.is_animating());
        assert_eq!(surface.viewport().scroll_offset, target);
    }

    #[test]
    fn test_wheel_disabled_and_cancels_animation() {
        let mut surface = surface(80, 20);
        let mut selection = Selection::default();
        let data = buckets(10, 4, 1);
        feed(&mut surface, &data, 0, false, &mut selection);

        assert!(!surface.wheel(5, true));
        assert_eq!(surface.viewport().scroll_offset, 0);

        let t0 = Instant::now();
        surface.scroll_to_index(30, t0);
        assert!(surface.wheel(3, false));
        assert_eq!(surface.phase(), SurfacePhase::UserScrolling);
        assert!(!surface.is_animating());

        assert!(!surface.on_frame(t0 + Duration::from_millis(50)));
        assert_eq!(surface.viewport().scroll_offset, 3);
        assert_eq!(surface.phase(), SurfacePhase::Idle);

        let max = surface.max_scroll_offset();
        surface.wheel(10_000, false);
        assert_eq!(surface.viewport().scroll_offset, max);
    }

    #[test]
    fn test_resize_width_invalidates_sizes() {
        let mut surface = surface(80, 20);
        let mut selection = Selection::default();
        let data = buckets(3, 2, 1);
        feed(&mut surface, &data, 0, false, &mut selection);
        assert_eq!(surface.height_of(1), 3);
        let before = surface.cache_stats().measurements;

        surface.resize(200, 20);
        assert!(surface.cache_stats().measurements > before);
        assert_eq!(surface.height_of(1), 2);

        // height changes alone keep the cache
        let before = surface.cache_stats().measurements;
        surface.resize(200, 12);
        assert_eq!(surface.cache_stats().measurements, before);
    }

    #[test]
    fn test_queued_commands() {
        let mut surface = surface(80, 10);
        let mut selection = Selection::default();
        let data = buckets(10, 4, 1);
        feed(&mut surface, &data, 0, false, &mut selection);
        surface.visible_rows();

        surface.push_command(SurfaceCommand::ResetAfterIndex(0));
        surface.push_command(SurfaceCommand::ScrollToIndex(20));
        let t0 = Instant::now();
        surface.apply_commands(t0);
        assert!(surface.is_animating());

        surface.push_command(SurfaceCommand::ScrollToTop);
        surface.apply_commands(t0);
        assert!(!surface.is_animating());
        assert_eq!(surface.viewport().scroll_offset, 0);
    }
}
