use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use shiftdesk_common::api::ShiftPage;
use shiftdesk_common::feed::{paginate, ShiftQuery, SortOrder, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use crate::error::{Result, ServerError};
use crate::router::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftParams {
    cursor: Option<String>,
    limit: Option<usize>,
    role: Option<String>,
    #[serde(default)]
    hide_fully_booked: bool,
    #[serde(default)]
    order: SortOrder,
}

impl ShiftParams {
    fn query(&self) -> ShiftQuery {
        ShiftQuery {
            role: self
                .role
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
            hide_fully_booked: self.hide_fully_booked,
            order: self.order,
        }
    }

    fn limit(&self) -> Result<usize> {
        match self.limit {
            None => Ok(DEFAULT_PAGE_SIZE),
            Some(limit) if (1..=MAX_PAGE_SIZE).contains(&limit) => Ok(limit),
            Some(_) => Err(ServerError::Validation(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            ))),
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn get_shifts(
    State(state): State<AppState>,
    Query(params): Query<ShiftParams>,
) -> Result<Json<ShiftPage>> {
    let limit = params.limit()?;
    let page = paginate(&state.shifts, &params.query(), params.cursor.as_deref(), limit)?;
    tracing::debug!(
        records = page.record_count(),
        has_next_page = page.has_next_page,
        "served shift page"
    );
    Ok(Json(page))
}
