use std::collections::HashSet;

use super::super::domain::{ActiveJob, RidesForJob, WorkerId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CoverageIssues {
    pub missing_responsible: bool,
    pub missing_rides: bool,
}

pub(crate) fn evaluate(job: &ActiveJob, rides_for_other_jobs: &[RidesForJob]) -> CoverageIssues {
    CoverageIssues {
        missing_responsible: job.responsible_worker_id.is_none(),
        missing_rides: missing_rides(job, rides_for_other_jobs),
    }
}

// A ride may pick up workers of several jobs, so passengers are collected
// across the whole plan while only this job's drivers count.
fn missing_rides(job: &ActiveJob, rides_for_other_jobs: &[RidesForJob]) -> bool {
    if !job.proposed_job.requires_car() {
        return false;
    }

    let mut seated: HashSet<&WorkerId> = rides_for_other_jobs
        .iter()
        .flat_map(|record| record.rides.iter())
        .chain(job.rides.iter())
        .flat_map(|ride| ride.passenger_ids.iter())
        .collect();
    seated.extend(job.rides.iter().map(|ride| &ride.driver_id));

    job.workers.iter().any(|worker| !seated.contains(&worker.id))
}
