mod local;
mod remote;

pub use local::LocalSource;
pub use remote::RemoteSource;

use std::path::Path;
use std::sync::Arc;

use crate::config::SourceConfig;
use crate::error::Result;
use shiftdesk_common::api::ShiftPage;
use shiftdesk_common::feed::ShiftQuery;

/// Trait abstracting where shift pages come from (local file, feed server).
///
/// Fetches run on worker threads, so sources must be shareable.
pub trait ShiftSource: Send + Sync {
    fn fetch_page(&self, query: &ShiftQuery, cursor: Option<&str>, limit: usize)
        -> Result<ShiftPage>;

    /// Short human readable name for the status bar
    fn describe(&self) -> String;
}

/// Build the configured source.
pub fn from_config(config: &SourceConfig) -> Result<Arc<dyn ShiftSource>> {
    let source: Arc<dyn ShiftSource> = match config {
        SourceConfig::Local { path: Some(path) } => {
            let local = LocalSource::from_file(Path::new(path))?;
            if local.is_empty() {
                tracing::warn!(path = %path, "shift file contains no shifts");
            }
            Arc::new(local)
        }
        SourceConfig::Local { path: None } => Arc::new(LocalSource::demo()),
        SourceConfig::Remote { server_url } => {
            let remote = RemoteSource::new(server_url);
            // Reachability only; the list reports fetch failures itself
            if let Err(err) = remote.check() {
                tracing::warn!(server = %server_url, error = %err, "feed server health check failed");
            }
            Arc::new(remote)
        }
    };
    tracing::info!(source = %source.describe(), "shift source ready");
    Ok(source)
}
