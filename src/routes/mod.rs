pub mod analytics;
pub mod health;
pub mod jobs;
pub mod trades;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    let v1 = Router::new()
        .route("/jobs", post(jobs::create_job).get(jobs::list_jobs))
        .route("/jobs/:job_id", get(jobs::get_job))
        .route("/trades", get(trades::list_trades))
        .route("/analytics/summary", get(analytics::summary));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", v1)
}
