use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info};

use super::domain::{ActiveJob, Plan, Ride, RideId, RidesForJob, WorkerId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideGenerationSummary {
    pub rides_created: usize,
    pub unseated: Vec<WorkerId>,
}

/// Create rides for every job whose area can only be reached by car.
///
/// Each driver without a seat gets a ride in their first car, then the
/// remaining workers fill free seats in worker order. Rides already on a job
/// are kept and may receive passengers. A worker riding as a passenger for
/// another job of the plan already has a seat.
pub fn generate_rides(plan: &Plan) -> (Plan, RideGenerationSummary) {
    let mut planned = plan.clone();
    let mut summary = RideGenerationSummary::default();

    for index in 0..planned.jobs.len() {
        if !planned.jobs[index].proposed_job.requires_car() {
            continue;
        }
        let shared = planned.rides_for_other_jobs(&planned.jobs[index].id);
        let job = &mut planned.jobs[index];

        let created = seat_job(job, &shared, &mut summary.unseated);
        debug!(job = %job.id, rides = created, "rides generated");
        summary.rides_created += created;
    }

    info!(
        plan = %plan.id,
        rides = summary.rides_created,
        unseated = summary.unseated.len(),
        "ride generation finished"
    );
    (planned, summary)
}

fn seat_job(job: &mut ActiveJob, shared: &[RidesForJob], unseated: &mut Vec<WorkerId>) -> usize {
    let mut seated: HashSet<WorkerId> = job
        .rides
        .iter()
        .flat_map(|ride| std::iter::once(&ride.driver_id).chain(&ride.passenger_ids))
        .chain(
            shared
                .iter()
                .flat_map(|record| &record.rides)
                .flat_map(|ride| &ride.passenger_ids),
        )
        .cloned()
        .collect();

    let mut created = 0;
    let mut next_number = job.rides.len() + 1;
    for worker in &job.workers {
        let Some(car) = worker.cars.first() else {
            continue;
        };
        if seated.contains(&worker.id) {
            continue;
        }

        let mut id = ride_id(job, next_number);
        while job.rides.iter().any(|ride| ride.id == id) {
            next_number += 1;
            id = ride_id(job, next_number);
        }
        next_number += 1;

        job.rides.push(Ride {
            id,
            car: car.clone(),
            driver_id: worker.id.clone(),
            passenger_ids: Vec::new(),
        });
        seated.insert(worker.id.clone());
        created += 1;
    }

    let waiting = job
        .workers
        .iter()
        .filter(|worker| !seated.contains(&worker.id))
        .map(|worker| worker.id.clone());
    let mut rides = job.rides.iter_mut();
    let mut current = rides.next();

    for worker_id in waiting {
        while current.as_ref().is_some_and(|ride| ride.occupancy() >= ride.car.seats as usize) {
            current = rides.next();
        }
        match current.as_mut() {
            Some(ride) => ride.passenger_ids.push(worker_id),
            None => unseated.push(worker_id),
        }
    }

    created
}

fn ride_id(job: &ActiveJob, number: usize) -> RideId {
    RideId::new(format!("{}-ride-{number}", job.id))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::workflows::plan::domain::{
        ActiveJobId, Area, AreaId, Car, CarId, PlanId, ProposedJob, ProposedJobId, Worker,
        WorkerAvailability,
    };
    use crate::workflows::plan::evaluate_job_issues;

    fn worker(id: &str, seats: Option<u32>) -> Worker {
        Worker {
            id: WorkerId::new(id),
            first_name: id.to_string(),
            last_name: "Rider".to_string(),
            phone: String::new(),
            email: String::new(),
            is_strong: false,
            skills: Vec::new(),
            allergies: Vec::new(),
            cars: seats
                .map(|seats| Car {
                    id: CarId::new(format!("car-{id}")),
                    name: "Car".to_string(),
                    seats,
                    owner_id: WorkerId::new(id),
                })
                .into_iter()
                .collect(),
            availability: WorkerAvailability::default(),
        }
    }

    fn job(id: &str, requires_car: bool, workers: Vec<Worker>) -> ActiveJob {
        ActiveJob {
            id: ActiveJobId::new(id),
            plan_id: PlanId::new("plan"),
            proposed_job: ProposedJob {
                id: ProposedJobId::new(format!("pj-{id}")),
                name: id.to_string(),
                area: Some(Area {
                    id: AreaId::new("area"),
                    name: "Area".to_string(),
                    requires_car,
                    supports_adoration: true,
                }),
                min_workers: 1,
                max_workers: 10,
                strong_workers: 0,
                allergens: Vec::new(),
                tools_on_site: Vec::new(),
            },
            workers,
            rides: Vec::new(),
            responsible_worker_id: None,
        }
    }

    fn plan(jobs: Vec<ActiveJob>) -> Plan {
        Plan {
            id: PlanId::new("plan"),
            day: NaiveDate::from_ymd_opt(2024, 7, 1).expect("valid day"),
            jobs,
        }
    }

    fn ids(values: &[&str]) -> Vec<WorkerId> {
        values.iter().map(|id| WorkerId::new(*id)).collect()
    }

    #[test]
    fn drivers_take_passengers_in_worker_order() {
        let input = plan(vec![job(
            "far",
            true,
            vec![
                worker("a", None),
                worker("d1", Some(2)),
                worker("b", None),
                worker("d2", Some(3)),
                worker("c", None),
            ],
        )]);

        let (planned, summary) = generate_rides(&input);

        let rides = &planned.jobs[0].rides;
        assert_eq!(summary.rides_created, 2);
        assert!(summary.unseated.is_empty());
        assert_eq!(rides[0].id, RideId::new("far-ride-1"));
        assert_eq!(rides[0].passenger_ids, ids(&["a"]));
        assert_eq!(rides[1].driver_id, WorkerId::new("d2"));
        assert_eq!(rides[1].passenger_ids, ids(&["b", "c"]));
        assert!(input.jobs[0].rides.is_empty());
    }

    #[test]
    fn jobs_reachable_on_foot_get_no_rides() {
        let input = plan(vec![job("near", false, vec![worker("d", Some(4)), worker("a", None)])]);

        let (planned, summary) = generate_rides(&input);

        assert_eq!(planned, input);
        assert_eq!(summary, RideGenerationSummary::default());
    }

    #[test]
    fn workers_without_seats_are_reported() {
        let input = plan(vec![job(
            "far",
            true,
            vec![worker("d", Some(2)), worker("a", None), worker("b", None)],
        )]);

        let (_, summary) = generate_rides(&input);

        assert_eq!(summary.unseated, ids(&["b"]));
    }

    #[test]
    fn passengers_of_other_jobs_keep_their_seat() {
        let driver = worker("d", Some(4));
        let mut near = job("near", false, vec![driver.clone()]);
        near.rides.push(Ride {
            id: RideId::new("near-ride-1"),
            car: driver.cars[0].clone(),
            driver_id: driver.id.clone(),
            passenger_ids: ids(&["p"]),
        });
        let far = job("far", true, vec![worker("own", Some(3)), worker("p", None)]);

        let (planned, summary) = generate_rides(&plan(vec![near, far]));

        assert!(summary.unseated.is_empty());
        assert!(planned.jobs[1].rides[0].passenger_ids.is_empty());
        let far = &planned.jobs[1];
        let issues = evaluate_job_issues(far, planned.day, &planned.rides_for_other_jobs(&far.id));
        assert!(!issues.missing_rides);
    }

    #[test]
    fn unseated_workers_match_missing_rides() {
        let driver = worker("d", Some(4));
        let mut near = job("near", false, vec![driver.clone()]);
        near.rides.push(Ride {
            id: RideId::new("near-ride-1"),
            car: driver.cars[0].clone(),
            driver_id: driver.id.clone(),
            passenger_ids: ids(&["p"]),
        });
        let far = job("far", true, vec![worker("p", None), worker("q", None)]);

        let (planned, summary) = generate_rides(&plan(vec![near, far]));

        assert_eq!(summary.unseated, ids(&["q"]));
        let far = &planned.jobs[1];
        let issues = evaluate_job_issues(far, planned.day, &planned.rides_for_other_jobs(&far.id));
        assert!(issues.missing_rides);
    }

    #[test]
    fn existing_rides_are_kept_and_topped_up() {
        let driver = worker("d", Some(3));
        let mut far = job("far", true, vec![driver.clone(), worker("a", None), worker("b", None)]);
        far.rides.push(Ride {
            id: RideId::new("far-ride-1"),
            car: driver.cars[0].clone(),
            driver_id: driver.id.clone(),
            passenger_ids: ids(&["a"]),
        });

        let (planned, summary) = generate_rides(&plan(vec![far]));

        assert_eq!(summary.rides_created, 0);
        assert_eq!(planned.jobs[0].rides.len(), 1);
        assert_eq!(planned.jobs[0].rides[0].passenger_ids, ids(&["a", "b"]));
    }
}
