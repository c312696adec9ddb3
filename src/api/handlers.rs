use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Dataset;
use crate::services;

use super::state::RunReport;
use super::AppState;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub action_count: usize,
}

impl From<&RunReport> for RunSummary {
    fn from(report: &RunReport) -> Self {
        Self {
            id: report.id,
            created_at: report.created_at,
            action_count: report.results.len(),
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Load a dataset, run all of its actions and keep the report
pub async fn create_run(
    State(state): State<AppState>,
    Json(dataset): Json<Dataset>,
) -> AppResult<(StatusCode, Json<RunReport>)> {
    // Each run gets a fresh catalog; nothing is shared between runs
    let results = services::run_dataset(dataset)?;
    let report = RunReport::new(results);

    tracing::info!(run_id = %report.id, actions = report.results.len(), "Run stored");

    let mut inner = state.inner.write().await;
    inner.store(report.clone());

    Ok((StatusCode::CREATED, Json(report)))
}

/// List stored runs, oldest first
pub async fn list_runs(State(state): State<AppState>) -> Json<Vec<RunSummary>> {
    let inner = state.inner.read().await;
    Json(inner.reports().map(RunSummary::from).collect())
}

/// Fetch a stored run
pub async fn get_run(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RunReport>> {
    let inner = state.inner.read().await;
    inner
        .runs
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("run {}", id)))
}
