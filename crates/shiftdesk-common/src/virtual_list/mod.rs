//! Virtualized, incrementally loaded list of date-grouped records.
//!
//! The pieces are UI-agnostic and measured in terminal cells:
//!
//! - [`flatten`] turns buckets into a flat run of title and record rows
//! - [`SizeOracle`] answers the height of any row in O(1)
//! - [`LoaderGate`] decides when to ask the caller for the next page
//! - [`ScrollController`] centers a row with an eased, cancellable animation
//! - [`ListSurface`] ties them together and yields the rows to draw

mod flatten;
mod loader;
mod scroll;
mod size;
mod surface;

pub use flatten::{flatten, position_of, DisplayItem, FlattenCache, Fingerprint};
pub use loader::{FetchTicket, LoadState, LoadTrigger, LoaderGate};
pub use scroll::{
    ease_in_out_quad, target_offset, wheel_target, AnimationHandle, FrameOutcome,
    ScrollController,
};
pub use size::{RowHeights, SelectionView, SizeOracle};
pub use surface::{
    CacheStats, ContainerMargins, ListSurface, RowContent, RowSlot, SelectionContext,
    SequenceChange, SurfaceCommand, SurfaceConfig, SurfacePhase, ViewportState,
};
