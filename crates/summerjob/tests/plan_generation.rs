use chrono::NaiveDate;
use summerjob::config::PlannerConfig;
use summerjob::workflows::plan::domain::{
    ActiveJob, ActiveJobId, Allergy, Area, AreaId, Car, CarId, Plan, PlanId, ProposedJob,
    ProposedJobId, Worker, WorkerAvailability, WorkerId,
};
use summerjob::workflows::plan::{generate_rides, PlanGenerator, UnplannedReason};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 4).expect("valid day")
}

fn worker(id: &str) -> Worker {
    Worker {
        id: WorkerId::new(id),
        first_name: id.to_string(),
        last_name: "Volunteer".to_string(),
        phone: String::new(),
        email: String::new(),
        is_strong: false,
        skills: Vec::new(),
        allergies: Vec::new(),
        cars: Vec::new(),
        availability: WorkerAvailability {
            work_days: vec![day()],
            adoration_days: Vec::new(),
        },
    }
}

fn strong_driver(id: &str, seats: u32) -> Worker {
    let mut worker = worker(id);
    worker.is_strong = true;
    worker.cars.push(Car {
        id: CarId::new(format!("{id}-car")),
        name: "Van".to_string(),
        seats,
        owner_id: worker.id.clone(),
    });
    worker
}

fn job(id: &str, min: u32, strong: u32, requires_car: bool, allergens: Vec<Allergy>) -> ActiveJob {
    ActiveJob {
        id: ActiveJobId::new(id),
        plan_id: PlanId::new("thu"),
        proposed_job: ProposedJob {
            id: ProposedJobId::new(id),
            name: id.to_string(),
            area: Some(Area {
                id: AreaId::new("area"),
                name: "Area".to_string(),
                requires_car,
                supports_adoration: true,
            }),
            min_workers: min,
            max_workers: min + 2,
            strong_workers: strong,
            allergens,
            tools_on_site: Vec::new(),
        },
        workers: Vec::new(),
        rides: Vec::new(),
        responsible_worker_id: None,
    }
}

#[test]
fn strong_drivers_cover_the_strong_quota_when_needed() {
    let plan = Plan {
        id: PlanId::new("thu"),
        day: day(),
        jobs: vec![job("haul", 2, 1, false, Vec::new())],
    };
    let workers = vec![worker("a"), strong_driver("d", 5)];

    let proposal = PlanGenerator::new(PlannerConfig::default()).generate(&plan, &workers, &[]);

    assert_eq!(
        proposal.assignments[0].worker_ids,
        vec![WorkerId::new("d"), WorkerId::new("a")]
    );
}

#[test]
fn every_unplanned_reason_is_reported_and_later_jobs_continue() {
    let mut dusty = worker("dusty");
    dusty.allergies.push(Allergy::Dust);
    let plan = Plan {
        id: PlanId::new("thu"),
        day: day(),
        jobs: vec![
            job("far", 1, 0, true, Vec::new()),
            job("heavy", 1, 1, false, Vec::new()),
            job("attic", 1, 0, false, vec![Allergy::Dust]),
            job("huge", 9, 0, false, Vec::new()),
            job("garden", 1, 0, false, Vec::new()),
        ],
    };
    let workers = vec![dusty, worker("plain")];

    let proposal = PlanGenerator::new(PlannerConfig::default()).generate(&plan, &workers, &[]);

    assert_eq!(
        proposal
            .unplanned
            .iter()
            .map(|entry| (entry.job_id.as_str(), entry.reason))
            .collect::<Vec<_>>(),
        vec![
            ("far", UnplannedReason::NoDriver),
            ("heavy", UnplannedReason::NoStrongWorker),
            ("huge", UnplannedReason::NotEnoughWorkers),
        ]
    );
    assert_eq!(proposal.assignments.len(), 2);
    assert_eq!(proposal.assignments[0].job_id, ActiveJobId::new("attic"));
    assert_eq!(proposal.assignments[0].worker_ids, vec![WorkerId::new("plain")]);
    assert_eq!(proposal.assignments[1].job_id, ActiveJobId::new("garden"));
    assert_eq!(proposal.assignments[1].worker_ids, vec![WorkerId::new("dusty")]);
    assert!(proposal.idle_workers.is_empty());
}

#[test]
fn allergic_only_pool_leaves_job_without_viable_worker() {
    let mut dusty = worker("dusty");
    dusty.allergies.push(Allergy::Dust);
    let plan = Plan {
        id: PlanId::new("thu"),
        day: day(),
        jobs: vec![job("attic", 1, 0, false, vec![Allergy::Dust])],
    };

    let proposal = PlanGenerator::new(PlannerConfig::default()).generate(&plan, &[dusty], &[]);

    assert_eq!(proposal.unplanned[0].reason, UnplannedReason::NoViableWorker);
    assert_eq!(proposal.idle_workers, vec![WorkerId::new("dusty")]);
}

#[test]
fn generated_car_job_gets_a_ride_for_everyone() {
    let plan = Plan {
        id: PlanId::new("thu"),
        day: day(),
        jobs: vec![job("far", 3, 0, true, Vec::new())],
    };
    let workers = vec![worker("a"), worker("b"), strong_driver("d", 3)];

    let proposal = PlanGenerator::new(PlannerConfig::default()).generate(&plan, &workers, &[]);
    let (seated, summary) = generate_rides(&proposal.apply(&plan, &workers));

    let rides = &seated.jobs[0].rides;
    assert_eq!(summary.rides_created, 1);
    assert_eq!(rides[0].driver_id, WorkerId::new("d"));
    assert_eq!(rides[0].passenger_ids.len(), 2);
    assert!(summary.unseated.is_empty());
}
