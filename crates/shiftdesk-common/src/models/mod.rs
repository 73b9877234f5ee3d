mod record;
mod shift;

pub use record::{Record, RecordId};
pub use shift::{Shift, DAY_LABEL_FORMAT};

use serde::{Deserialize, Serialize};

/// A date-grouped run of records, as delivered by the data layer.
///
/// Bucket order is chronological and owned by the caller; the list core
/// only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket<R> {
    pub label: String,
    pub records: Vec<R>,
}

impl<R> Bucket<R> {
    pub fn new(label: impl Into<String>, records: Vec<R>) -> Self {
        Self {
            label: label.into(),
            records,
        }
    }
}
