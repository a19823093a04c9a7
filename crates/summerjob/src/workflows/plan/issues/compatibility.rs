use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::super::domain::{ActiveJob, Skill};
use super::super::tools::required_skills;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CompatibilityIssues {
    pub allergies: bool,
    pub adorations: bool,
    pub low_skilled_workers: bool,
}

pub(crate) fn evaluate(job: &ActiveJob, day: NaiveDate) -> CompatibilityIssues {
    CompatibilityIssues {
        allergies: allergies(job),
        adorations: adorations(job, day),
        low_skilled_workers: low_skilled_workers(job),
    }
}

fn allergies(job: &ActiveJob) -> bool {
    let allergens = &job.proposed_job.allergens;
    if allergens.is_empty() {
        return false;
    }
    job.workers
        .iter()
        .any(|worker| worker.is_allergic_to(allergens))
}

fn adorations(job: &ActiveJob, day: NaiveDate) -> bool {
    if job.proposed_job.supports_adoration() {
        return false;
    }
    job.workers.iter().any(|worker| worker.adores_on(day))
}

fn low_skilled_workers(job: &ActiveJob) -> bool {
    let required = required_skills(&job.proposed_job.tools_on_site);
    if required.is_empty() {
        return false;
    }

    let available: BTreeSet<Skill> = job
        .workers
        .iter()
        .flat_map(|worker| worker.skills.iter().copied())
        .collect();

    !required.is_subset(&available)
}
