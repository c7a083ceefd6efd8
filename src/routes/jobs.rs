//! Job routes
//!
//! Bid creation and retrieval. Creation runs the full pipeline and persists
//! the exported record; listings read the scalar columns only.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::pagination::{Paginated, PaginationParams};
use crate::api::response::DataResponse;
use crate::app::AppState;
use crate::domain::{BidResult, CreateJobRequest, JobSummary};
use crate::error::ApiError;
use crate::pipeline;

/// Database row for job summaries
#[derive(Debug, sqlx::FromRow)]
struct JobRow {
    job_id: Uuid,
    trade: String,
    location: String,
    total_bid: f64,
    profit_margin: f64,
    material_total: f64,
    labor_total: f64,
    created_at: DateTime<Utc>,
}

impl From<JobRow> for JobSummary {
    fn from(row: JobRow) -> Self {
        Self {
            job_id: row.job_id,
            trade: row.trade,
            location: row.location,
            total_bid: row.total_bid,
            profit_margin: row.profit_margin,
            material_total: row.material_total,
            labor_total: row.labor_total,
            timestamp: row.created_at,
        }
    }
}

/// POST /api/v1/jobs
///
/// Run the bid pipeline for the request and persist the result. The only
/// client error is an unsupported trade; nothing is written in that case.
pub async fn create_job(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateJobRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!(
        trade = %request.trade,
        location = %request.location,
        "Creating job bid"
    );

    let bid = pipeline::run_pipeline(state.providers.as_ref(), request).await?;

    let payload = serde_json::to_string(&bid)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to serialize bid: {e}")))?;

    sqlx::query(
        r#"
        INSERT INTO jobs (job_id, trade, location, total_bid, profit_margin,
                          material_total, labor_total, created_at, payload)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
    )
    .bind(bid.job_id)
    .bind(&bid.trade)
    .bind(&bid.location)
    .bind(bid.total_bid)
    .bind(bid.profit_margin)
    .bind(bid.material_total)
    .bind(bid.labor_total)
    .bind(bid.timestamp)
    .bind(payload)
    .execute(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(bid))))
}

/// GET /api/v1/jobs
///
/// List stored jobs, newest first.
pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Paginated<JobSummary>, ApiError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(&state.db)
        .await?;

    let rows: Vec<JobRow> = sqlx::query_as(
        r#"
        SELECT job_id, trade, location, total_bid, profit_margin,
               material_total, labor_total, created_at
        FROM jobs
        ORDER BY created_at DESC
        LIMIT ?1 OFFSET ?2
        "#,
    )
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(&state.db)
    .await?;

    let summaries = rows.into_iter().map(JobSummary::from).collect();
    Ok(Paginated::new(summaries, &pagination, total as u64))
}

/// GET /api/v1/jobs/:job_id
///
/// Fetch the full stored bid record.
pub async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<DataResponse<BidResult>, ApiError> {
    let payload: Option<String> = sqlx::query_scalar("SELECT payload FROM jobs WHERE job_id = ?1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?;

    let payload = payload.ok_or_else(|| ApiError::NotFound(format!("Job {job_id} not found")))?;

    let bid: BidResult = serde_json::from_str(&payload)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Corrupt stored bid record: {e}")))?;

    Ok(DataResponse::new(bid))
}
