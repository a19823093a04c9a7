use chrono::NaiveDate;

use crate::workflows::plan::domain::{
    ActiveJob, ActiveJobId, Allergy, Area, AreaId, Car, CarId, Plan, PlanId, ProposedJob,
    ProposedJobId, Ride, RideId, Skill, ToolName, ToolOnSite, Worker, WorkerAvailability,
    WorkerId,
};

pub(super) fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, d).expect("valid event day")
}

pub(super) fn worker(id: &str) -> Worker {
    Worker {
        id: WorkerId::new(id),
        first_name: id.to_string(),
        last_name: "Tester".to_string(),
        phone: "+420000000000".to_string(),
        email: format!("{id}@example.com"),
        is_strong: false,
        skills: Vec::new(),
        allergies: Vec::new(),
        cars: Vec::new(),
        availability: WorkerAvailability::default(),
    }
}

pub(super) fn strong_worker(id: &str) -> Worker {
    Worker {
        is_strong: true,
        ..worker(id)
    }
}

pub(super) fn skilled_worker(id: &str, skills: &[Skill]) -> Worker {
    Worker {
        skills: skills.to_vec(),
        ..worker(id)
    }
}

pub(super) fn allergic_worker(id: &str, allergies: &[Allergy]) -> Worker {
    Worker {
        allergies: allergies.to_vec(),
        ..worker(id)
    }
}

pub(super) fn adoring_worker(id: &str, days: &[NaiveDate]) -> Worker {
    Worker {
        availability: WorkerAvailability {
            work_days: days.to_vec(),
            adoration_days: days.to_vec(),
        },
        ..worker(id)
    }
}

pub(super) fn area(requires_car: bool, supports_adoration: bool) -> Area {
    Area {
        id: AreaId::new("area-1"),
        name: "Krkonose".to_string(),
        requires_car,
        supports_adoration,
    }
}

pub(super) fn proposed_job(id: &str, min_workers: u32, max_workers: u32) -> ProposedJob {
    ProposedJob {
        id: ProposedJobId::new(id),
        name: format!("Job {id}"),
        area: Some(area(false, true)),
        min_workers,
        max_workers,
        strong_workers: 0,
        allergens: Vec::new(),
        tools_on_site: Vec::new(),
    }
}

pub(super) fn tools(names: &[ToolName]) -> Vec<ToolOnSite> {
    names
        .iter()
        .map(|tool| ToolOnSite {
            tool: *tool,
            amount: 1,
        })
        .collect()
}

/// Active job that violates nothing: workers within bounds, responsible set.
pub(super) fn active_job(
    id: &str,
    plan_id: &str,
    proposed: ProposedJob,
    workers: Vec<Worker>,
) -> ActiveJob {
    let responsible_worker_id = workers.first().map(|worker| worker.id.clone());
    ActiveJob {
        id: ActiveJobId::new(id),
        plan_id: PlanId::new(plan_id),
        proposed_job: proposed,
        workers,
        rides: Vec::new(),
        responsible_worker_id,
    }
}

pub(super) fn ride(id: &str, seats: u32, driver: &str, passengers: &[&str]) -> Ride {
    Ride {
        id: RideId::new(id),
        car: Car {
            id: CarId::new(format!("car-{id}")),
            name: "Ford Transit".to_string(),
            seats,
            owner_id: WorkerId::new(driver),
        },
        driver_id: WorkerId::new(driver),
        passenger_ids: passengers.iter().map(|id| WorkerId::new(*id)).collect(),
    }
}

pub(super) fn plan(id: &str, day: NaiveDate, jobs: Vec<ActiveJob>) -> Plan {
    Plan {
        id: PlanId::new(id),
        day,
        jobs,
    }
}
