use serde::{Deserialize, Serialize};

use crate::models::{Bucket, Shift};

/// Response from GET /api/v1/shifts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftPage {
    pub buckets: Vec<Bucket<Shift>>,
    pub has_next_page: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    /// Number of shifts matching the query across all pages
    #[serde(default)]
    pub total_count: usize,
}

impl ShiftPage {
    pub fn record_count(&self) -> usize {
        self.buckets.iter().map(|b| b.records.len()).sum()
    }
}

/// Response from GET /api/v1/health
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
