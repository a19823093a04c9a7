use crate::planning::{evaluate_plan, generate_plan, render_report};
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;
use summerjob::config::PlannerConfig;
use summerjob::error::AppError;
use summerjob::workflows::plan::domain::{
    ActiveJob, ActiveJobId, Allergy, Area, AreaId, Car, CarId, Plan, PlanId, ProposedJob,
    ProposedJobId, Ride, RideId, Skill, ToolName, ToolOnSite, Worker, WorkerAvailability,
    WorkerId,
};
use summerjob::workflows::snapshot::EventSnapshot;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Also staff the second day with the plan generator and show the result.
    #[arg(long)]
    pub(crate) generate: bool,
    /// Create rides for the generated plan.
    #[arg(long)]
    pub(crate) with_rides: bool,
    /// Write the demo event as a snapshot JSON file for the `issues` and `generate` commands.
    #[arg(long)]
    pub(crate) write_snapshot: Option<PathBuf>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let snapshot = demo_snapshot();

    if let Some(path) = &args.write_snapshot {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, &snapshot).map_err(std::io::Error::from)?;
        println!("Snapshot written to {}", path.display());
    }

    println!("SummerJob planning demo");
    for plan in &snapshot.plans {
        println!();
        print!("{}", render_report(&evaluate_plan(&snapshot, &plan.id)?));
    }

    if args.generate {
        let generated = generate_plan(
            &snapshot,
            &PlanId::new("day-2"),
            PlannerConfig::default(),
            args.with_rides,
        )?;

        println!("\nAfter plan generation");
        for assignment in &generated.proposal.assignments {
            println!("+ {} <- {} worker(s)", assignment.job_id, assignment.worker_ids.len());
        }
        for unplanned in &generated.proposal.unplanned {
            println!("x {}: {}", unplanned.job_id, unplanned.reason.label());
        }
        print!("{}", render_report(&generated.report));
    }

    Ok(())
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, d).unwrap_or_default()
}

fn worker(id: &str, first: &str, last: &str, days: &[u32]) -> Worker {
    Worker {
        id: WorkerId::new(id),
        first_name: first.to_string(),
        last_name: last.to_string(),
        phone: String::new(),
        email: format!("{id}@summerjob.example"),
        is_strong: false,
        skills: Vec::new(),
        allergies: Vec::new(),
        cars: Vec::new(),
        availability: WorkerAvailability {
            work_days: days.iter().copied().map(day).collect(),
            adoration_days: Vec::new(),
        },
    }
}

fn car(owner: &str, name: &str, seats: u32) -> Car {
    Car {
        id: CarId::new(format!("car-{owner}")),
        name: name.to_string(),
        seats,
        owner_id: WorkerId::new(owner),
    }
}

fn demo_workers() -> Vec<Worker> {
    let mut jan = worker("jan", "Jan", "Novak", &[1, 2]);
    jan.is_strong = true;
    jan.skills.push(Skill::Lumberjack);
    jan.cars.push(car("jan", "Skoda Octavia", 4));

    let mut eva = worker("eva", "Eva", "Mala", &[1, 2]);
    eva.skills.push(Skill::Artist);
    eva.availability.adoration_days.push(day(2));

    let petr = worker("petr", "Petr", "Svoboda", &[1, 2]);

    let mut ana = worker("ana", "Ana", "Kralova", &[2]);
    ana.is_strong = true;

    let mut tomas = worker("tomas", "Tomas", "Cerny", &[2]);
    tomas.cars.push(car("tomas", "Fiat Panda", 2));

    let mut lucie = worker("lucie", "Lucie", "Dvorakova", &[2]);
    lucie.allergies.push(Allergy::Hay);

    vec![jan, eva, petr, ana, tomas, lucie]
}

fn demo_jobs() -> [ProposedJob; 3] {
    let village = Area {
        id: AreaId::new("village"),
        name: "Village".to_string(),
        requires_car: false,
        supports_adoration: true,
    };
    let hills = Area {
        id: AreaId::new("hills"),
        name: "Hills".to_string(),
        requires_car: true,
        supports_adoration: false,
    };
    let tools = |names: &[ToolName]| {
        names
            .iter()
            .map(|tool| ToolOnSite {
                tool: *tool,
                amount: 1,
            })
            .collect::<Vec<_>>()
    };

    [
        ProposedJob {
            id: ProposedJobId::new("wood"),
            name: "Wood chopping".to_string(),
            area: Some(hills),
            min_workers: 2,
            max_workers: 4,
            strong_workers: 1,
            allergens: Vec::new(),
            tools_on_site: tools(&[ToolName::Axe, ToolName::Gloves]),
        },
        ProposedJob {
            id: ProposedJobId::new("garden"),
            name: "Garden".to_string(),
            area: Some(village.clone()),
            min_workers: 2,
            max_workers: 3,
            strong_workers: 0,
            allergens: vec![Allergy::Hay],
            tools_on_site: tools(&[ToolName::Rake]),
        },
        ProposedJob {
            id: ProposedJobId::new("paint"),
            name: "Fence painting".to_string(),
            area: Some(village),
            min_workers: 3,
            max_workers: 4,
            strong_workers: 0,
            allergens: Vec::new(),
            tools_on_site: tools(&[ToolName::Paint, ToolName::PaintBrush]),
        },
    ]
}

/// Two-day event: a settled first day and a second day with gaps to fill.
pub(crate) fn demo_snapshot() -> EventSnapshot {
    let workers = demo_workers();
    let [wood, garden, paint] = demo_jobs();
    let pick = |ids: &[&str]| -> Vec<Worker> {
        workers
            .iter()
            .filter(|worker| ids.contains(&worker.id.as_str()))
            .cloned()
            .collect()
    };
    let job = |id: &str, plan: &str, proposed: &ProposedJob, members: &[&str]| ActiveJob {
        id: ActiveJobId::new(id),
        plan_id: PlanId::new(plan),
        proposed_job: proposed.clone(),
        workers: pick(members),
        rides: Vec::new(),
        responsible_worker_id: members.first().map(|id| WorkerId::new(*id)),
    };

    let mut first_wood = job("day-1-wood", "day-1", &wood, &["jan", "petr"]);
    first_wood.rides.push(Ride {
        id: RideId::new("day-1-wood-ride-1"),
        car: car("jan", "Skoda Octavia", 4),
        driver_id: WorkerId::new("jan"),
        passenger_ids: vec![WorkerId::new("petr")],
    });
    let first_day = Plan {
        id: PlanId::new("day-1"),
        day: day(1),
        jobs: vec![first_wood, job("day-1-garden", "day-1", &garden, &["eva"])],
    };

    let mut second_paint = job("day-2-paint", "day-2", &paint, &["eva"]);
    second_paint.responsible_worker_id = None;
    let mut second_garden = job("day-2-garden", "day-2", &garden, &[]);
    second_garden.responsible_worker_id = None;
    let second_day = Plan {
        id: PlanId::new("day-2"),
        day: day(2),
        jobs: vec![
            job("day-2-wood", "day-2", &wood, &["jan", "petr"]),
            second_paint,
            second_garden,
        ],
    };

    EventSnapshot {
        workers,
        plans: vec![first_day, second_day],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_second_day_repeats_the_first() {
        let snapshot = demo_snapshot();
        let report = evaluate_plan(&snapshot, &PlanId::new("day-2")).expect("plan exists");

        let wood = report
            .job(&ActiveJobId::new("day-2-wood"))
            .expect("wood job evaluated");
        assert!(wood.issues.same_work);
        assert!(wood.issues.same_coworker);
        assert!(wood.issues.missing_rides);
        assert!(!wood.issues.low_skilled_workers);

        let paint = report
            .job(&ActiveJobId::new("day-2-paint"))
            .expect("paint job evaluated");
        assert!(paint.issues.too_few_workers);
        assert!(paint.issues.missing_responsible);
        assert!(!paint.issues.adorations);
    }

    #[test]
    fn demo_first_day_has_no_history_issues() {
        let snapshot = demo_snapshot();
        let report = evaluate_plan(&snapshot, &PlanId::new("day-1")).expect("plan exists");

        assert!(report.workers.is_empty());
        let wood = report
            .job(&ActiveJobId::new("day-1-wood"))
            .expect("wood job evaluated");
        assert!(!wood.issues.has_issues());
    }
}
