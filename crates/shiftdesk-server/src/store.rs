//! The in-memory shift set served by the feed.

use std::fs;
use std::path::Path;

use chrono::{Duration, DurationRound, Utc};
use shiftdesk_common::feed::demo_shifts;
use shiftdesk_common::Shift;

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};

/// Load the shifts named by the config: the seed file when set, generated
/// fixtures otherwise.
pub fn load(config: &ServerConfig) -> Result<Vec<Shift>> {
    match config.seed_file {
        Some(ref path) => from_file(path),
        None => {
            let now = Utc::now();
            let start = now.duration_trunc(Duration::days(1)).unwrap_or(now);
            Ok(demo_shifts(config.demo_shifts, start))
        }
    }
}

fn from_file(path: &Path) -> Result<Vec<Shift>> {
    let content = fs::read_to_string(path)
        .map_err(|e| ServerError::Seed(format!("cannot read {}: {e}", path.display())))?;
    let shifts: Vec<Shift> = serde_json::from_str(&content)
        .map_err(|e| ServerError::Seed(format!("cannot parse {}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), count = shifts.len(), "loaded seed file");
    Ok(shifts)
}
