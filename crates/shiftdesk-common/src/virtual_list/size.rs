use serde::{Deserialize, Serialize};

use super::flatten::DisplayItem;
use crate::models::{Record, RecordId};

/// Row heights in terminal lines.
///
/// These are layout tuning, not contract. What matters is the shape of the
/// rule in [`SizeOracle::size_of`]: four explicit open-row cases, two
/// compact cases, no interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowHeights {
    pub title: u16,
    pub placeholder: u16,
    /// Rows beside an open detail panel, narrow terminal
    pub compact_narrow: u16,
    /// Rows beside an open detail panel, wide terminal
    pub compact_wide: u16,
    pub open_narrow: u16,
    pub open_wide: u16,
    /// Selected shift is fully booked, narrow terminal
    pub booked_narrow: u16,
    /// Selected shift is fully booked, wide terminal
    pub booked_wide: u16,
    /// Terminals wider than this many columns use the wide heights
    pub wide_breakpoint: u16,
}

impl Default for RowHeights {
    fn default() -> Self {
        Self {
            title: 2,
            placeholder: 1,
            compact_narrow: 2,
            compact_wide: 1,
            open_narrow: 3,
            open_wide: 2,
            booked_narrow: 4,
            booked_wide: 3,
            wide_breakpoint: 120,
        }
    }
}

/// Selection snapshot the caller hands to the list core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionView {
    pub selected_id: Option<RecordId>,
    /// Whether the shift behind `selected_id` is fully booked
    pub selected_fully_booked: bool,
}

impl SelectionView {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn selected(id: RecordId, fully_booked: bool) -> Self {
        Self {
            selected_id: Some(id),
            selected_fully_booked: fully_booked,
        }
    }
}

/// O(1) row height lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeOracle {
    heights: RowHeights,
}

impl SizeOracle {
    pub fn new(heights: RowHeights) -> Self {
        Self { heights }
    }

    pub fn heights(&self) -> &RowHeights {
        &self.heights
    }

    /// Height of the row at `index`. Never zero, also for indices past the
    /// end of `items` (the loading placeholder).
    pub fn size_of<R: Record>(
        &self,
        index: usize,
        items: &[DisplayItem<R>],
        viewport_width: u16,
        selection: &SelectionView,
    ) -> u16 {
        let h = &self.heights;
        let wide = viewport_width > h.wide_breakpoint;

        let height = match items.get(index) {
            None => h.placeholder,
            Some(DisplayItem::Title { .. }) => h.title,
            Some(DisplayItem::Record(record)) => match selection.selected_id {
                Some(id) if id != record.record_id() => {
                    if wide {
                        h.compact_wide
                    } else {
                        h.compact_narrow
                    }
                }
                _ => match (selection.selected_fully_booked, wide) {
                    (false, false) => h.open_narrow,
                    (false, true) => h.open_wide,
                    (true, false) => h.booked_narrow,
                    (true, true) => h.booked_wide,
                },
            },
        };
        height.max(1)
    }
}
