use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::plan::domain::{ActiveJob, ActiveJobId, Plan, PlanId, Worker};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read event snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid event snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("plan {0} is not part of the snapshot")]
    UnknownPlan(PlanId),
    #[error("job {0} is not part of the plan")]
    UnknownJob(ActiveJobId),
}

/// Everything the detector and planner read for one event: the registered
/// workers and every plan day, current one included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSnapshot {
    #[serde(default)]
    pub workers: Vec<Worker>,
    #[serde(default)]
    pub plans: Vec<Plan>,
}

impl EventSnapshot {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn plan(&self, plan_id: &PlanId) -> Result<&Plan, SnapshotError> {
        self.plans
            .iter()
            .find(|plan| &plan.id == plan_id)
            .ok_or_else(|| SnapshotError::UnknownPlan(plan_id.clone()))
    }

    pub fn job(&self, plan_id: &PlanId, job_id: &ActiveJobId) -> Result<&ActiveJob, SnapshotError> {
        self.plan(plan_id)?
            .job(job_id)
            .ok_or_else(|| SnapshotError::UnknownJob(job_id.clone()))
    }
}
