//! Shift feed paging shared by the local source and the feed server.
//!
//! A feed query filters and orders the full shift set, slices one page at an
//! offset cursor and groups the page into day buckets. Clients stitch pages
//! back together with [`append_page`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::api::ShiftPage;
use crate::error::{CommonError, CommonResult};
use crate::models::{Bucket, Shift};

pub const DEFAULT_PAGE_SIZE: usize = 25;
pub const MAX_PAGE_SIZE: usize = 200;

/// Roles used by the demo fixtures and offered by the role filter.
pub const ROLES: [&str; 4] = ["Nurse", "Caregiver", "Physician", "Orderly"];

const FACILITIES: [&str; 5] = [
    "North Wing",
    "East Clinic",
    "Riverside Care Home",
    "St. Anne Hospital",
    "Hillcrest Rehab",
];

/// Chronological order of the feed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Earliest shift first
    #[default]
    Ascending,
    /// Latest shift first
    Descending,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SortOrder::Ascending => "Soonest first",
            SortOrder::Descending => "Latest first",
        }
    }
}

/// Filter and order applied before paging
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default)]
    pub hide_fully_booked: bool,

    #[serde(default)]
    pub order: SortOrder,
}

impl ShiftQuery {
    pub fn matches(&self, shift: &Shift) -> bool {
        if self.hide_fully_booked && shift.is_fully_booked() {
            return false;
        }
        match self.role {
            Some(ref role) => shift.role.eq_ignore_ascii_case(role),
            None => true,
        }
    }
}

/// Parse an offset cursor. A missing cursor means the first page.
pub fn parse_cursor(cursor: Option<&str>) -> CommonResult<usize> {
    match cursor {
        None => Ok(0),
        Some(raw) if raw.trim().is_empty() => Ok(0),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CommonError::InvalidCursor(raw.to_string())),
    }
}

/// Filter, order and slice `shifts` into one page of day buckets.
pub fn paginate(
    shifts: &[Shift],
    query: &ShiftQuery,
    cursor: Option<&str>,
    limit: usize,
) -> CommonResult<ShiftPage> {
    let offset = parse_cursor(cursor)?;
    let limit = limit.clamp(1, MAX_PAGE_SIZE);

    let mut matching: Vec<&Shift> = shifts.iter().filter(|s| query.matches(s)).collect();
    matching.sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then_with(|| a.id.cmp(&b.id)));
    if query.order == SortOrder::Descending {
        matching.reverse();
    }

    let total_count = matching.len();
    let end = offset.saturating_add(limit).min(total_count);
    let page: Vec<Shift> = matching
        .get(offset.min(total_count)..end)
        .unwrap_or_default()
        .iter()
        .map(|s| (*s).clone())
        .collect();

    let has_next_page = end < total_count;
    Ok(ShiftPage {
        buckets: group_by_day(page),
        has_next_page,
        next_cursor: has_next_page.then(|| end.to_string()),
        total_count,
    })
}

/// Group consecutive shifts starting on the same day into one bucket.
pub fn group_by_day(shifts: impl IntoIterator<Item = Shift>) -> Vec<Bucket<Shift>> {
    let mut buckets: Vec<Bucket<Shift>> = Vec::new();
    for shift in shifts {
        let label = shift.day_label();
        match buckets.last_mut() {
            Some(last) if last.label == label => last.records.push(shift),
            _ => buckets.push(Bucket::new(label, vec![shift])),
        }
    }
    buckets
}

/// Append a freshly fetched page to already loaded buckets.
///
/// A day that straddles the page boundary arrives twice; its records are
/// merged into the existing last bucket.
pub fn append_page<R>(buckets: &mut Vec<Bucket<R>>, incoming: Vec<Bucket<R>>) {
    let mut incoming = incoming.into_iter();
    if let Some(first) = incoming.next() {
        match buckets.last_mut() {
            Some(last) if last.label == first.label => last.records.extend(first.records),
            _ => buckets.push(first),
        }
    }
    buckets.extend(incoming);
}

/// Deterministic fixture shifts, roughly five per day starting at `start`.
pub fn demo_shifts(count: usize, start: DateTime<Utc>) -> Vec<Shift> {
    (0..count)
        .map(|i| {
            let starts_at = start + Duration::hours(5 * i as i64);
            let slots = 1 + (i % 3) as u32;
            let mut shift = Shift::new(
                i as u64 + 1,
                FACILITIES[(i * 3) % FACILITIES.len()].to_string(),
                ROLES[i % ROLES.len()].to_string(),
                starts_at,
                if i % 2 == 0 { 8 } else { 12 },
                slots,
            );
            shift.accepted = if i % 4 == 0 { slots } else { i as u32 % slots };
            shift.pending_claims = (i % 4) as u32;
            shift
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 6, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_cursor() {
        assert_eq!(parse_cursor(None).unwrap(), 0);
        assert_eq!(parse_cursor(Some("")).unwrap(), 0);
        assert_eq!(parse_cursor(Some("25")).unwrap(), 25);
        assert!(matches!(
            parse_cursor(Some("abc")),
            Err(CommonError::InvalidCursor(_))
        ));
    }

    #[test]
    fn test_group_by_day_keeps_order() {
        let buckets = group_by_day(demo_shifts(10, start()));
        // 06:00 + 5h steps: 06, 11, 16, 21 on day one, then the next day
        assert_eq!(buckets[0].label, "Mon Oct 19 2026");
        assert_eq!(buckets[0].records.len(), 4);
        assert_eq!(buckets[1].label, "Tue Oct 20 2026");

        let ids: Vec<u64> = buckets
            .iter()
            .flat_map(|b| b.records.iter().map(|s| s.id))
            .collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_paginate_walks_all_pages() {
        let shifts = demo_shifts(23, start());
        let query = ShiftQuery::default();

        let mut cursor: Option<String> = None;
        let mut seen = 0;
        let mut pages = 0;
        loop {
            let page = paginate(&shifts, &query, cursor.as_deref(), 10).unwrap();
            assert_eq!(page.total_count, 23);
            seen += page.record_count();
            pages += 1;
            if !page.has_next_page {
                assert!(page.next_cursor.is_none());
                break;
            }
            cursor = page.next_cursor;
        }
        assert_eq!(seen, 23);
        assert_eq!(pages, 3);
    }

    #[test]
    fn test_paginate_past_end_is_empty() {
        let shifts = demo_shifts(5, start());
        let page = paginate(&shifts, &ShiftQuery::default(), Some("40"), 10).unwrap();
        assert!(page.buckets.is_empty());
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_paginate_filters_role_and_fully_booked() {
        let shifts = demo_shifts(40, start());
        let query = ShiftQuery {
            role: Some("caregiver".to_string()),
            hide_fully_booked: true,
            order: SortOrder::Ascending,
        };
        let page = paginate(&shifts, &query, None, MAX_PAGE_SIZE).unwrap();
        assert!(page.record_count() > 0);
        for shift in page.buckets.iter().flat_map(|b| b.records.iter()) {
            assert_eq!(shift.role, "Caregiver");
            assert!(!shift.is_fully_booked());
        }
    }

    #[test]
    fn test_paginate_descending() {
        let shifts = demo_shifts(6, start());
        let query = ShiftQuery {
            order: SortOrder::Descending,
            ..ShiftQuery::default()
        };
        let page = paginate(&shifts, &query, None, 3).unwrap();
        let ids: Vec<u64> = page
            .buckets
            .iter()
            .flat_map(|b| b.records.iter().map(|s| s.id))
            .collect();
        assert_eq!(ids, vec![6, 5, 4]);
    }

    #[test]
    fn test_append_page_merges_split_day() {
        let shifts = demo_shifts(8, start());
        let first = paginate(&shifts, &ShiftQuery::default(), None, 2).unwrap();
        let second = paginate(&shifts, &ShiftQuery::default(), Some("2"), 6).unwrap();

        let mut buckets = first.buckets;
        append_page(&mut buckets, second.buckets);

        assert_eq!(buckets, group_by_day(shifts));
    }

    #[test]
    fn test_append_page_into_empty() {
        let mut buckets: Vec<Bucket<u32>> = Vec::new();
        append_page(&mut buckets, vec![Bucket::new("Mon", vec![1, 2])]);
        assert_eq!(buckets.len(), 1);
        append_page(&mut buckets, Vec::new());
        assert_eq!(buckets.len(), 1);
    }
}
