use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, DurationRound, Utc};

use crate::error::{ClientError, Result};
use shiftdesk_common::api::ShiftPage;
use shiftdesk_common::feed::{demo_shifts, paginate, ShiftQuery};
use shiftdesk_common::Shift;

use super::ShiftSource;

/// Number of fixture shifts served when no file is configured
const DEMO_SHIFT_COUNT: usize = 180;

/// Shifts held in memory, read from a JSON array on disk or generated.
pub struct LocalSource {
    shifts: Vec<Shift>,
    origin: Option<PathBuf>,
}

impl LocalSource {
    pub fn new(shifts: Vec<Shift>) -> Self {
        Self {
            shifts,
            origin: None,
        }
    }

    /// Load a JSON array of shifts.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ClientError::General(format!("cannot read shifts from {}: {e}", path.display()))
        })?;
        let shifts: Vec<Shift> = serde_json::from_str(&content)?;
        Ok(Self {
            shifts,
            origin: Some(path.to_path_buf()),
        })
    }

    /// Fixture shifts starting at today's midnight (UTC).
    pub fn demo() -> Self {
        let now = Utc::now();
        let start = now.duration_trunc(Duration::days(1)).unwrap_or(now);
        Self::new(demo_shifts(DEMO_SHIFT_COUNT, start))
    }

    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }
}

impl ShiftSource for LocalSource {
    fn fetch_page(
        &self,
        query: &ShiftQuery,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<ShiftPage> {
        Ok(paginate(&self.shifts, query, cursor, limit)?)
    }

    fn describe(&self) -> String {
        match self.origin {
            Some(ref path) => format!("file {} ({} shifts)", path.display(), self.len()),
            None => "demo shifts".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    fn start() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 6, 0, 0).unwrap()
    }

    #[test]
    fn test_fetches_pages_in_order() {
        let source = LocalSource::new(demo_shifts(12, start()));
        let first = source.fetch_page(&ShiftQuery::default(), None, 5).unwrap();
        assert_eq!(first.record_count(), 5);
        assert_eq!(first.next_cursor.as_deref(), Some("5"));

        let last = source
            .fetch_page(&ShiftQuery::default(), Some("10"), 5)
            .unwrap();
        assert_eq!(last.record_count(), 2);
        assert!(!last.has_next_page);
    }

    #[test]
    fn test_bad_cursor_is_an_error() {
        let source = LocalSource::new(demo_shifts(3, start()));
        let err = source
            .fetch_page(&ShiftQuery::default(), Some("next"), 5)
            .unwrap_err();
        assert!(matches!(err, ClientError::Feed(_)));
    }

    #[test]
    fn test_reads_shift_file() {
        let dir = std::env::temp_dir().join(format!("shiftdesk-local-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("shifts.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(serde_json::to_string(&demo_shifts(4, start())).unwrap().as_bytes())
            .unwrap();

        let source = LocalSource::from_file(&path).unwrap();
        assert_eq!(source.len(), 4);
        assert!(source.describe().starts_with("file "));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = LocalSource::from_file(Path::new("/nonexistent/shifts.json")).err();
        assert!(matches!(err, Some(ClientError::General(_))));
    }

    #[test]
    fn test_demo_source_is_not_empty() {
        let source = LocalSource::demo();
        assert_eq!(source.len(), DEMO_SHIFT_COUNT);
        assert_eq!(source.describe(), "demo shifts");
    }
}
