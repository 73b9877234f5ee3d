use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::record::{Record, RecordId};

/// Date format used for day labels, e.g. `Mon Oct 19 2026`.
pub const DAY_LABEL_FORMAT: &str = "%a %b %d %Y";

/// A published shift at a facility, open for professional claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: RecordId,

    pub facility: String,

    pub role: String,

    pub starts_at: DateTime<Utc>,

    pub ends_at: DateTime<Utc>,

    /// Number of professionals the facility needs
    pub slots: u32,

    /// Claims already accepted by the facility
    #[serde(default)]
    pub accepted: u32,

    /// Claims waiting for review
    #[serde(default)]
    pub pending_claims: u32,
}

impl Shift {
    /// Creates a new shift. `slots` is raised silently to at least 1.
    pub fn new(
        id: RecordId,
        facility: String,
        role: String,
        starts_at: DateTime<Utc>,
        hours: i64,
        slots: u32,
    ) -> Self {
        Self {
            id,
            facility,
            role,
            starts_at,
            ends_at: starts_at + Duration::hours(hours.max(1)),
            slots: slots.max(1),
            accepted: 0,
            pending_claims: 0,
        }
    }

    pub fn is_fully_booked(&self) -> bool {
        self.accepted >= self.slots
    }

    pub fn open_slots(&self) -> u32 {
        self.slots.saturating_sub(self.accepted)
    }

    /// Label of the day this shift starts on
    pub fn day_label(&self) -> String {
        self.starts_at.format(DAY_LABEL_FORMAT).to_string()
    }

    /// Compact `HH:MM-HH:MM` time range
    pub fn time_range(&self) -> String {
        format!(
            "{}-{}",
            self.starts_at.format("%H:%M"),
            self.ends_at.format("%H:%M")
        )
    }
}

impl Record for Shift {
    fn record_id(&self) -> RecordId {
        self.id
    }
}
