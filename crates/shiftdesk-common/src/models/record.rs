/// Stable identity of a record shown in the shift list.
pub type RecordId = u64;

/// Anything the virtual list can display as a row.
///
/// The list core only ever reads the identity; business fields stay opaque.
pub trait Record {
    fn record_id(&self) -> RecordId;
}
