use crate::api_client::ApiClient;
use crate::error::Result;
use shiftdesk_common::api::ShiftPage;
use shiftdesk_common::feed::ShiftQuery;

use super::ShiftSource;

/// Shift source backed by a shiftdesk feed server.
pub struct RemoteSource {
    client: ApiClient,
}

impl RemoteSource {
    pub fn new(server_url: &str) -> Self {
        Self {
            client: ApiClient::new(server_url),
        }
    }

    /// Ask the server's health endpoint whether it is up
    pub fn check(&self) -> Result<()> {
        let health = self.client.health()?;
        tracing::debug!(status = %health.status, "feed server health");
        Ok(())
    }
}

impl ShiftSource for RemoteSource {
    fn fetch_page(
        &self,
        query: &ShiftQuery,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<ShiftPage> {
        tracing::debug!(?cursor, limit, "fetching shift page");
        self.client.get_shifts(query, cursor, limit)
    }

    fn describe(&self) -> String {
        self.client.base_url().to_string()
    }
}
