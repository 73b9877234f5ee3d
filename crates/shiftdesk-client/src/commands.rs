use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::render::Render;
use crate::source::ShiftSource;
use shiftdesk_common::feed::ShiftQuery;

/// `sd --list`: print the first page of the feed and exit.
pub fn list(config: &Config, source: Arc<dyn ShiftSource>, query: &ShiftQuery) -> Result<()> {
    let render = Render;
    match source.fetch_page(query, None, config.page_size) {
        Ok(page) => {
            render.display_page(&page);
            Ok(())
        }
        Err(err) => {
            tracing::warn!(error = %err, "list fetch failed");
            Err(err)
        }
    }
}
