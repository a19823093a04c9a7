use super::super::domain::{ActiveJobId, PlanId, WorkerId};
use super::super::issues::{IssueKind, JobIssues, WorkerHistory};
use super::views::{IssueCountEntry, JobIssueView, PlanIssueSummary, WorkerIssueView};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobIssueEntry {
    pub job_id: ActiveJobId,
    pub job_name: String,
    pub issues: JobIssues,
}

impl JobIssueEntry {
    pub fn to_view(&self) -> JobIssueView {
        let kinds = self.issues.kinds();
        JobIssueView {
            job_id: self.job_id.clone(),
            job_name: self.job_name.clone(),
            show_icon: !kinds.is_empty(),
            messages: kinds.iter().map(|kind| kind.message()).collect(),
            issues: kinds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerIssueEntry {
    pub worker_id: WorkerId,
    pub worker_name: String,
    pub job_id: ActiveJobId,
    pub history: WorkerHistory,
}

impl WorkerIssueEntry {
    pub fn to_view(&self) -> WorkerIssueView {
        WorkerIssueView {
            worker_id: self.worker_id.clone(),
            worker_name: self.worker_name.clone(),
            job_id: self.job_id.clone(),
            title: history_title(&self.history),
        }
    }
}

/// Issue findings for every job and worker of one plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanIssueReport {
    pub plan_id: PlanId,
    pub day: NaiveDate,
    pub jobs: Vec<JobIssueEntry>,
    pub workers: Vec<WorkerIssueEntry>,
}

impl PlanIssueReport {
    pub fn has_issues(&self) -> bool {
        self.jobs.iter().any(|entry| entry.issues.has_issues())
    }

    pub fn job(&self, job_id: &ActiveJobId) -> Option<&JobIssueEntry> {
        self.jobs.iter().find(|entry| &entry.job_id == job_id)
    }

    pub fn summary(&self) -> PlanIssueSummary {
        let issue_counts = IssueKind::ordered()
            .into_iter()
            .map(|kind| IssueCountEntry {
                issue: kind,
                message: kind.message(),
                jobs: self
                    .jobs
                    .iter()
                    .filter(|entry| entry.issues.is_raised(kind))
                    .count(),
            })
            .filter(|entry| entry.jobs > 0)
            .collect();

        PlanIssueSummary {
            plan_id: self.plan_id.clone(),
            day: self.day,
            total_jobs: self.jobs.len(),
            jobs_with_issues: self
                .jobs
                .iter()
                .filter(|entry| entry.issues.has_issues())
                .count(),
            workers_with_history_issues: self.workers.len(),
            issue_counts,
        }
    }

    pub fn job_views(&self) -> Vec<JobIssueView> {
        self.jobs.iter().map(JobIssueEntry::to_view).collect()
    }

    pub fn worker_views(&self) -> Vec<WorkerIssueView> {
        self.workers.iter().map(WorkerIssueEntry::to_view).collect()
    }
}

pub(crate) fn format_day(day: NaiveDate) -> String {
    day.format("%a %-d.%-m.").to_string()
}

fn history_title(history: &WorkerHistory) -> String {
    let mut title = String::new();

    if !history.same_work.is_empty() {
        let days: Vec<String> = history.same_work.iter().copied().map(format_day).collect();
        title.push_str(&format!(
            "Worker already worked on this job {} day(s) ({})",
            days.len(),
            days.join(", ")
        ));
    }

    if !history.same_coworker.is_empty() {
        if !title.is_empty() {
            title.push('\n');
        }
        let pairings: Vec<String> = history
            .same_coworker
            .iter()
            .map(|issue| {
                format!(
                    "{} on {} in job {}",
                    issue.name,
                    format_day(issue.plan_day),
                    issue.job_name
                )
            })
            .collect();
        title.push_str(&format!(
            "Worker already worked with some coworkers on this job ({})",
            pairings.join(", ")
        ));
    }

    title
}
