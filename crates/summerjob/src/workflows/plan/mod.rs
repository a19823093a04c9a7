pub mod domain;
pub mod issues;
mod planner;
pub mod report;
mod rides;
pub mod tools;

pub use issues::{
    evaluate_job_issues, evaluate_worker_history, HistoryFlags, IssueDetector, IssueKind,
    JobIssues, SameCoworkerIssue, WorkerHistory,
};
pub use planner::{JobAssignment, PlanGenerator, PlanProposal, UnplannedJob, UnplannedReason};
pub use report::{JobIssueEntry, PlanIssueReport, WorkerIssueEntry};
pub use rides::{generate_rides, RideGenerationSummary};
