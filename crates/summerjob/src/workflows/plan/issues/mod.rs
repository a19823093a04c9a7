//! Assignment issue detection for a single day's plan.
//!
//! Every rule is a pure function over a read-only snapshot. The aggregator
//! only delegates and OR-reduces, so the detailed banner and the compact icon
//! can both be rendered from one [`JobIssues`] value.

mod capacity;
mod compatibility;
mod coverage;
mod history;

#[cfg(test)]
mod tests;

pub use history::{evaluate_worker_history, HistoryFlags, SameCoworkerIssue, WorkerHistory};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{ActiveJob, Plan, RidesForJob};
use super::report::{JobIssueEntry, PlanIssueReport, WorkerIssueEntry};

/// One flag per rule evaluated against an active job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobIssues {
    pub too_many_workers: bool,
    pub too_few_workers: bool,
    pub not_enough_strong_workers: bool,
    pub overloaded_cars: bool,
    pub missing_responsible: bool,
    pub missing_rides: bool,
    pub allergies: bool,
    pub adorations: bool,
    pub low_skilled_workers: bool,
    pub same_work: bool,
    pub same_coworker: bool,
}

impl JobIssues {
    pub fn with_history(self, flags: HistoryFlags) -> Self {
        Self {
            same_work: flags.same_work,
            same_coworker: flags.same_coworker,
            ..self
        }
    }

    pub fn is_raised(&self, kind: IssueKind) -> bool {
        match kind {
            IssueKind::TooManyWorkers => self.too_many_workers,
            IssueKind::TooFewWorkers => self.too_few_workers,
            IssueKind::NotEnoughStrongWorkers => self.not_enough_strong_workers,
            IssueKind::OverloadedCars => self.overloaded_cars,
            IssueKind::MissingResponsible => self.missing_responsible,
            IssueKind::MissingRides => self.missing_rides,
            IssueKind::Allergies => self.allergies,
            IssueKind::Adorations => self.adorations,
            IssueKind::LowSkilledWorkers => self.low_skilled_workers,
            IssueKind::SameWork => self.same_work,
            IssueKind::SameCoworker => self.same_coworker,
        }
    }

    pub fn kinds(&self) -> Vec<IssueKind> {
        IssueKind::ordered()
            .into_iter()
            .filter(|kind| self.is_raised(*kind))
            .collect()
    }

    pub fn has_issues(&self) -> bool {
        IssueKind::ordered()
            .into_iter()
            .any(|kind| self.is_raised(kind))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    TooManyWorkers,
    TooFewWorkers,
    NotEnoughStrongWorkers,
    OverloadedCars,
    MissingResponsible,
    MissingRides,
    Allergies,
    Adorations,
    LowSkilledWorkers,
    SameWork,
    SameCoworker,
}

impl IssueKind {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::TooManyWorkers,
            Self::TooFewWorkers,
            Self::NotEnoughStrongWorkers,
            Self::OverloadedCars,
            Self::MissingResponsible,
            Self::MissingRides,
            Self::Allergies,
            Self::Adorations,
            Self::LowSkilledWorkers,
            Self::SameWork,
            Self::SameCoworker,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::TooManyWorkers => "too_many_workers",
            Self::TooFewWorkers => "too_few_workers",
            Self::NotEnoughStrongWorkers => "not_enough_strong_workers",
            Self::OverloadedCars => "overloaded_cars",
            Self::MissingResponsible => "missing_responsible",
            Self::MissingRides => "missing_rides",
            Self::Allergies => "allergies",
            Self::Adorations => "adorations",
            Self::LowSkilledWorkers => "low_skilled_workers",
            Self::SameWork => "same_work",
            Self::SameCoworker => "same_coworker",
        }
    }

    /// Banner sentence shown when the issue is raised.
    pub const fn message(self) -> &'static str {
        match self {
            Self::TooManyWorkers => "There are too many workers on this job.",
            Self::TooFewWorkers => "There are not enough workers on this job.",
            Self::NotEnoughStrongWorkers => "There are not enough strong workers on this job.",
            Self::OverloadedCars => "Some planned rides are overloaded.",
            Self::MissingResponsible => "No responsible person is assigned.",
            Self::MissingRides => "Some workers have no ride assigned.",
            Self::Allergies => "Some workers have conflicting allergies.",
            Self::Adorations => "Adoration is not possible in this area.",
            Self::LowSkilledWorkers => "Nobody on this job has the skills the tools on site need.",
            Self::SameWork => "Some workers already worked on this job on an earlier day.",
            Self::SameCoworker => "Some workers already worked together on an earlier day.",
        }
    }
}

/// Evaluate the capacity, coverage and compatibility rules for `job`.
///
/// History flags are left unset; attach them with [`JobIssues::with_history`].
pub fn evaluate_job_issues(
    job: &ActiveJob,
    day: NaiveDate,
    rides_for_other_jobs: &[RidesForJob],
) -> JobIssues {
    let capacity = capacity::evaluate(job);
    let coverage = coverage::evaluate(job, rides_for_other_jobs);
    let compatibility = compatibility::evaluate(job, day);

    JobIssues {
        too_many_workers: capacity.too_many_workers,
        too_few_workers: capacity.too_few_workers,
        not_enough_strong_workers: capacity.not_enough_strong_workers,
        overloaded_cars: capacity.overloaded_cars,
        missing_responsible: coverage.missing_responsible,
        missing_rides: coverage.missing_rides,
        allergies: compatibility.allergies,
        adorations: compatibility.adorations,
        low_skilled_workers: compatibility.low_skilled_workers,
        same_work: false,
        same_coworker: false,
    }
}

/// Evaluates every job and worker of a plan against the event history.
pub struct IssueDetector<'a> {
    history: &'a [Plan],
}

impl<'a> IssueDetector<'a> {
    pub fn new(history: &'a [Plan]) -> Self {
        Self { history }
    }

    pub fn evaluate_plan(&self, plan: &Plan) -> PlanIssueReport {
        let mut jobs = Vec::with_capacity(plan.jobs.len());
        let mut workers = Vec::new();

        for job in &plan.jobs {
            let rides_for_other_jobs = plan.rides_for_other_jobs(&job.id);
            let mut flags = HistoryFlags::default();

            for worker in &job.workers {
                let history = evaluate_worker_history(&worker.id, job, plan.day, self.history);
                flags.record(&history);
                if history.is_empty() {
                    continue;
                }
                workers.push(WorkerIssueEntry {
                    worker_id: worker.id.clone(),
                    worker_name: worker.full_name(),
                    job_id: job.id.clone(),
                    history,
                });
            }

            let issues =
                evaluate_job_issues(job, plan.day, &rides_for_other_jobs).with_history(flags);
            debug!(job = %job.id, issues = issues.kinds().len(), "evaluated active job");

            jobs.push(JobIssueEntry {
                job_id: job.id.clone(),
                job_name: job.proposed_job.name.clone(),
                issues,
            });
        }

        PlanIssueReport {
            plan_id: plan.id.clone(),
            day: plan.day,
            jobs,
            workers,
        }
    }
}
