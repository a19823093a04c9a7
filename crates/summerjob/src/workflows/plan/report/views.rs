use super::super::domain::{ActiveJobId, PlanId, WorkerId};
use super::super::issues::IssueKind;
use chrono::NaiveDate;
use serde::Serialize;

/// Banner and icon rendering of one job's issues.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobIssueView {
    pub job_id: ActiveJobId,
    pub job_name: String,
    pub show_icon: bool,
    pub issues: Vec<IssueKind>,
    pub messages: Vec<&'static str>,
}

/// Warning title attached to a worker row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerIssueView {
    pub worker_id: WorkerId,
    pub worker_name: String,
    pub job_id: ActiveJobId,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCountEntry {
    pub issue: IssueKind,
    pub message: &'static str,
    pub jobs: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanIssueSummary {
    pub plan_id: PlanId,
    pub day: NaiveDate,
    pub total_jobs: usize,
    pub jobs_with_issues: usize,
    pub workers_with_history_issues: usize,
    pub issue_counts: Vec<IssueCountEntry>,
}
