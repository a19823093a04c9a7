use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use super::domain::{ActiveJob, ActiveJobId, Plan, PlanId, Worker, WorkerId};
use super::issues::evaluate_worker_history;
use crate::config::PlannerConfig;

/// Reason a job could not be staffed from the remaining workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnplannedReason {
    NotEnoughWorkers,
    NoDriver,
    NoStrongWorker,
    NoViableWorker,
}

impl UnplannedReason {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotEnoughWorkers => "not enough free workers",
            Self::NoDriver => "no driver available",
            Self::NoStrongWorker => "no strong worker available",
            Self::NoViableWorker => "no worker without allergy or adoration conflict",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAssignment {
    pub job_id: ActiveJobId,
    pub worker_ids: Vec<WorkerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnplannedJob {
    pub job_id: ActiveJobId,
    pub reason: UnplannedReason,
}

/// Assignments proposed for one plan; nothing is applied until [`PlanProposal::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanProposal {
    pub plan_id: PlanId,
    pub assignments: Vec<JobAssignment>,
    pub unplanned: Vec<UnplannedJob>,
    pub idle_workers: Vec<WorkerId>,
}

impl PlanProposal {
    /// Return a copy of `plan` with the proposed workers added to their jobs.
    pub fn apply(&self, plan: &Plan, workers: &[Worker]) -> Plan {
        let mut planned = plan.clone();

        for assignment in &self.assignments {
            let Some(job) = planned
                .jobs
                .iter_mut()
                .find(|job| job.id == assignment.job_id)
            else {
                continue;
            };

            job.workers.extend(
                assignment
                    .worker_ids
                    .iter()
                    .filter_map(|id| workers.iter().find(|worker| &worker.id == id))
                    .cloned(),
            );
        }

        planned
    }
}

/// Greedy job-by-job planner: drivers first, then strong workers, then anyone viable.
///
/// Among viable workers the planner prefers one who neither repeats a job they
/// already did nor meets a coworker from an earlier day, and only falls back to
/// a repeating worker when no such worker is left.
pub struct PlanGenerator {
    config: PlannerConfig,
}

impl PlanGenerator {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// `history` may contain `plan` itself; only earlier days are consulted.
    pub fn generate(&self, plan: &Plan, workers: &[Worker], history: &[Plan]) -> PlanProposal {
        let mut pool = WorkerPool::new(
            workers
                .iter()
                .filter(|worker| worker.works_on(plan.day) && !plan.is_assigned(&worker.id)),
        );
        info!(plan = %plan.id, free_workers = pool.len(), "generating plan");

        let mut assignments = Vec::new();
        let mut unplanned = Vec::new();

        for job in &plan.jobs {
            // Workers are only taken from the pool once the job is fully staffed.
            let mut trial = pool.clone();
            match self.staff_job(job, plan.day, history, &mut trial) {
                Ok(picked) if picked.is_empty() => {
                    debug!(job = %job.id, "job already staffed");
                }
                Ok(picked) => {
                    debug!(job = %job.id, workers = picked.len(), "job staffed");
                    pool = trial;
                    assignments.push(JobAssignment {
                        job_id: job.id.clone(),
                        worker_ids: picked,
                    });
                }
                Err(reason) => {
                    debug!(job = %job.id, reason = reason.label(), "job left unplanned");
                    unplanned.push(UnplannedJob {
                        job_id: job.id.clone(),
                        reason,
                    });
                }
            }
        }

        let idle_workers = pool.ids();
        info!(
            plan = %plan.id,
            staffed = assignments.len(),
            unplanned = unplanned.len(),
            idle = idle_workers.len(),
            "plan generated"
        );

        PlanProposal {
            plan_id: plan.id.clone(),
            assignments,
            unplanned,
            idle_workers,
        }
    }

    /// Driver and strong quotas only fail the job while it is below its
    /// minimum; topping up to the maximum is best effort.
    fn staff_job(
        &self,
        job: &ActiveJob,
        day: NaiveDate,
        history: &[Plan],
        pool: &mut WorkerPool<'_>,
    ) -> Result<Vec<WorkerId>, UnplannedReason> {
        let requirements = &job.proposed_job;
        let assigned = job.workers.len();
        let min = requirements.min_workers as usize;
        let limit = if self.config.fill_to_max {
            requirements.max_workers as usize
        } else {
            min
        };

        if assigned >= limit {
            return Ok(Vec::new());
        }
        let required = assigned < min;
        if pool.len() < min.saturating_sub(assigned) {
            return Err(UnplannedReason::NotEnoughWorkers);
        }

        let viable = |worker: &Worker| {
            !worker.is_allergic_to(&requirements.allergens)
                && (requirements.supports_adoration() || !worker.adores_on(day))
        };
        let mut crew = Crew {
            job: job.clone(),
            day,
            history,
        };

        if requirements.requires_car() && !job.workers.iter().any(Worker::is_driver) {
            match crew.take(pool, Slot::Driver, &viable) {
                Some(driver) => crew.job.workers.push(driver.clone()),
                None if required => return Err(UnplannedReason::NoDriver),
                None => {}
            }
        }

        let strong_present = crew.job.workers.iter().filter(|worker| worker.is_strong).count();
        for _ in strong_present..requirements.strong_workers as usize {
            match crew.take(pool, Slot::Strong, &viable) {
                Some(strong) => crew.job.workers.push(strong.clone()),
                None if required => return Err(UnplannedReason::NoStrongWorker),
                None => break,
            }
        }

        while crew.job.workers.len() < min {
            let worker = crew
                .take(pool, Slot::Any, &viable)
                .ok_or(UnplannedReason::NoViableWorker)?;
            crew.job.workers.push(worker.clone());
        }

        while crew.job.workers.len() < limit {
            match crew.take(pool, Slot::Any, &viable) {
                Some(worker) => crew.job.workers.push(worker.clone()),
                None => break,
            }
        }

        Ok(crew.job.workers[assigned..]
            .iter()
            .map(|worker| worker.id.clone())
            .collect())
    }
}

/// The job as staffed so far, used to check candidates against earlier days.
struct Crew<'h> {
    job: ActiveJob,
    day: NaiveDate,
    history: &'h [Plan],
}

impl Crew<'_> {
    fn repeats_history(&self, worker: &Worker) -> bool {
        !evaluate_worker_history(&worker.id, &self.job, self.day, self.history).is_empty()
    }

    fn take<'a>(
        &self,
        pool: &mut WorkerPool<'a>,
        slot: Slot,
        viable: &dyn Fn(&Worker) -> bool,
    ) -> Option<&'a Worker> {
        let fresh = |worker: &Worker| viable(worker) && !self.repeats_history(worker);
        pool.take(slot, &fresh).or_else(|| pool.take(slot, viable))
    }
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Driver,
    Strong,
    Any,
}

/// Free workers split the way the planner consumes them.
#[derive(Debug, Clone, Default)]
struct WorkerPool<'a> {
    drivers: Vec<&'a Worker>,
    strong: Vec<&'a Worker>,
    others: Vec<&'a Worker>,
}

impl<'a> WorkerPool<'a> {
    fn new(workers: impl Iterator<Item = &'a Worker>) -> Self {
        let mut pool = Self::default();
        for worker in workers {
            if worker.is_driver() {
                pool.drivers.push(worker);
            } else if worker.is_strong {
                pool.strong.push(worker);
            } else {
                pool.others.push(worker);
            }
        }
        pool
    }

    fn len(&self) -> usize {
        self.drivers.len() + self.strong.len() + self.others.len()
    }

    fn ids(&self) -> Vec<WorkerId> {
        self.drivers
            .iter()
            .chain(&self.strong)
            .chain(&self.others)
            .map(|worker| worker.id.clone())
            .collect()
    }

    // Strong slots fall back to strong drivers; any slot drains drivers last.
    fn take(&mut self, slot: Slot, accept: &dyn Fn(&Worker) -> bool) -> Option<&'a Worker> {
        match slot {
            Slot::Driver => take_first(&mut self.drivers, accept),
            Slot::Strong => take_first(&mut self.strong, accept).or_else(|| {
                take_first(&mut self.drivers, &|worker: &Worker| {
                    worker.is_strong && accept(worker)
                })
            }),
            Slot::Any => take_first(&mut self.others, accept)
                .or_else(|| take_first(&mut self.strong, accept))
                .or_else(|| take_first(&mut self.drivers, accept)),
        }
    }
}

fn take_first<'a>(
    workers: &mut Vec<&'a Worker>,
    accept: &dyn Fn(&Worker) -> bool,
) -> Option<&'a Worker> {
    let index = workers.iter().position(|worker| accept(*worker))?;
    Some(workers.remove(index))
}
