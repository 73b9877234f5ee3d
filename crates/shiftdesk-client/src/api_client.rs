use serde::Deserialize;

use crate::error::{ClientError, Result};
use shiftdesk_common::api::{HealthResponse, ShiftPage};
use shiftdesk_common::feed::{ShiftQuery, SortOrder};

/// HTTP client for the shiftdesk feed server.
pub struct ApiClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn health(&self) -> Result<HealthResponse> {
        let resp = self
            .client
            .get(self.url("/api/v1/health"))
            .send()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Self::decode(resp)
    }

    /// Fetch one page of the shift feed.
    pub fn get_shifts(
        &self,
        query: &ShiftQuery,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<ShiftPage> {
        let params = shift_params(query, cursor, limit);
        let resp = self
            .client
            .get(self.url("/api/v1/shifts"))
            .query(&params)
            .send()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Self::decode(resp)
    }

    fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::blocking::Response) -> Result<T> {
        let status = resp.status();
        if status.is_success() {
            resp.json::<T>()
                .map_err(|e| ClientError::Network(e.to_string()))
        } else {
            let message = resp
                .json::<ErrorResponse>()
                .map(|e| e.error)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("request failed").to_string());
            Err(ClientError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Query string pairs for `GET /api/v1/shifts`
fn shift_params(query: &ShiftQuery, cursor: Option<&str>, limit: usize) -> Vec<(&'static str, String)> {
    let mut params = vec![("limit", limit.to_string())];
    if let Some(cursor) = cursor {
        params.push(("cursor", cursor.to_string()));
    }
    if let Some(ref role) = query.role {
        params.push(("role", role.clone()));
    }
    if query.hide_fully_booked {
        params.push(("hideFullyBooked", "true".to_string()));
    }
    if query.order == SortOrder::Descending {
        params.push(("order", "descending".to_string()));
    }
    params
}
