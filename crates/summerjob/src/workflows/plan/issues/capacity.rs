use super::super::domain::ActiveJob;

/// Staffing and vehicle load findings for a single job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CapacityIssues {
    pub too_many_workers: bool,
    pub too_few_workers: bool,
    pub not_enough_strong_workers: bool,
    pub overloaded_cars: bool,
}

pub(crate) fn evaluate(job: &ActiveJob) -> CapacityIssues {
    let requirements = &job.proposed_job;
    let assigned = job.workers.len();
    let strong = job.workers.iter().filter(|worker| worker.is_strong).count();

    CapacityIssues {
        too_many_workers: assigned > requirements.max_workers as usize,
        too_few_workers: assigned < requirements.min_workers as usize,
        not_enough_strong_workers: strong < requirements.strong_workers as usize,
        overloaded_cars: job.rides.iter().any(|ride| ride.is_overloaded()),
    }
}
