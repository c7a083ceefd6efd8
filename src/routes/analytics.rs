//! Analytics routes

use axum::extract::State;
use std::sync::Arc;

use crate::api::response::DataResponse;
use crate::app::AppState;
use crate::domain::AnalyticsSummary;
use crate::error::ApiError;
use crate::services::analytics;

/// GET /api/v1/analytics/summary
///
/// Aggregate statistics over all stored jobs.
pub async fn summary(
    State(state): State<Arc<AppState>>,
) -> Result<DataResponse<AnalyticsSummary>, ApiError> {
    let summary = analytics::compute_summary(&state.db).await?;
    Ok(DataResponse::new(summary))
}
