use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::super::domain::{ActiveJob, Plan, WorkerId};

/// Earlier co-assignment of the evaluated worker with someone on the current job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SameCoworkerIssue {
    pub name: String,
    pub job_name: String,
    pub plan_day: NaiveDate,
}

/// Repetition findings for one worker on one job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerHistory {
    pub same_work: Vec<NaiveDate>,
    pub same_coworker: Vec<SameCoworkerIssue>,
}

impl WorkerHistory {
    pub fn is_empty(&self) -> bool {
        self.same_work.is_empty() && self.same_coworker.is_empty()
    }
}

/// Job-level history flags, OR-ed over every worker on the job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryFlags {
    pub same_work: bool,
    pub same_coworker: bool,
}

impl HistoryFlags {
    pub fn for_job(job: &ActiveJob, day: NaiveDate, history: &[Plan]) -> Self {
        let mut flags = Self::default();
        for worker in &job.workers {
            flags.record(&evaluate_worker_history(&worker.id, job, day, history));
        }
        flags
    }

    /// Raise the flags for whatever one worker's history found.
    pub fn record(&mut self, found: &WorkerHistory) {
        self.same_work |= !found.same_work.is_empty();
        self.same_coworker |= !found.same_coworker.is_empty();
    }
}

/// Compare a worker's current assignment against every earlier plan day.
///
/// `history` may contain the current plan as well; only plans strictly
/// before `day` are considered. Co-worker findings are reported once per
/// earlier shared job, so repeated pairings surface repeatedly.
pub fn evaluate_worker_history(
    worker_id: &WorkerId,
    job: &ActiveJob,
    day: NaiveDate,
    history: &[Plan],
) -> WorkerHistory {
    let mut result = WorkerHistory::default();

    let earlier_jobs = history
        .iter()
        .filter(|plan| plan.day < day)
        .flat_map(|plan| plan.jobs.iter().map(move |past| (plan.day, past)))
        .filter(|(_, past)| past.has_worker(worker_id));

    for (past_day, past) in earlier_jobs {
        if past.plan_id != job.plan_id
            && past.proposed_job.id == job.proposed_job.id
            && !result.same_work.contains(&past_day)
        {
            result.same_work.push(past_day);
        }

        for coworker in &job.workers {
            if &coworker.id == worker_id || !past.has_worker(&coworker.id) {
                continue;
            }
            result.same_coworker.push(SameCoworkerIssue {
                name: coworker.full_name(),
                job_name: past.proposed_job.name.clone(),
                plan_day: past_day,
            });
        }
    }

    result
}
