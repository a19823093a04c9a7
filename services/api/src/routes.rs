use crate::infra::{AppState, ReportFormat};
use crate::planning::{evaluate_plan, generate_plan, PlanIssueReportResponse};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use summerjob::error::AppError;
use summerjob::workflows::plan::domain::{ActiveJobId, Plan, PlanId, WorkerId};
use summerjob::workflows::plan::{
    evaluate_worker_history, PlanProposal, RideGenerationSummary, WorkerHistory,
};
use summerjob::workflows::snapshot::EventSnapshot;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlanIssuesRequest {
    pub(crate) snapshot: EventSnapshot,
    pub(crate) plan_id: PlanId,
    #[serde(default)]
    pub(crate) format: Option<ReportFormat>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WorkerHistoryRequest {
    pub(crate) snapshot: EventSnapshot,
    pub(crate) plan_id: PlanId,
    pub(crate) job_id: ActiveJobId,
    pub(crate) worker_id: WorkerId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeneratePlanRequest {
    pub(crate) snapshot: EventSnapshot,
    pub(crate) plan_id: PlanId,
    #[serde(default)]
    pub(crate) with_rides: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeneratePlanResponse {
    pub(crate) proposal: PlanProposal,
    pub(crate) plan: Plan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) rides: Option<RideGenerationSummary>,
    pub(crate) report: PlanIssueReportResponse,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/plans/issues", post(plan_issues_endpoint))
        .route("/api/v1/plans/workers/history", post(worker_history_endpoint))
        .route("/api/v1/plans/generate", post(generate_plan_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// JSON by default; `csv` returns one row per job, `text` the console rendering.
pub(crate) async fn plan_issues_endpoint(
    Json(payload): Json<PlanIssuesRequest>,
) -> Result<Response, AppError> {
    let report = evaluate_plan(&payload.snapshot, &payload.plan_id)?;
    info!(plan = %payload.plan_id, jobs = report.jobs.len(), "plan issues evaluated");

    match payload.format.unwrap_or(ReportFormat::Json) {
        ReportFormat::Json => Ok(Json(PlanIssueReportResponse::from(&report)).into_response()),
        ReportFormat::Csv => {
            let mut body = Vec::new();
            report.write_csv(&mut body)?;
            Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body).into_response())
        }
        ReportFormat::Text => Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            crate::planning::render_report(&report),
        )
            .into_response()),
    }
}

pub(crate) async fn worker_history_endpoint(
    Json(payload): Json<WorkerHistoryRequest>,
) -> Result<Json<WorkerHistory>, AppError> {
    let plan = payload.snapshot.plan(&payload.plan_id)?;
    let job = payload.snapshot.job(&payload.plan_id, &payload.job_id)?;

    Ok(Json(evaluate_worker_history(
        &payload.worker_id,
        job,
        plan.day,
        &payload.snapshot.plans,
    )))
}

pub(crate) async fn generate_plan_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<GeneratePlanRequest>,
) -> Result<Json<GeneratePlanResponse>, AppError> {
    let generated = generate_plan(
        &payload.snapshot,
        &payload.plan_id,
        state.planner,
        payload.with_rides,
    )?;
    info!(
        plan = %payload.plan_id,
        staffed = generated.proposal.assignments.len(),
        unplanned = generated.proposal.unplanned.len(),
        "plan generated"
    );

    Ok(Json(GeneratePlanResponse {
        report: PlanIssueReportResponse::from(&generated.report),
        proposal: generated.proposal,
        plan: generated.plan,
        rides: generated.rides,
    }))
}
