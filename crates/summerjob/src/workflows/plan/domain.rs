use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a registered worker.
    WorkerId
);
string_id!(
    /// Identifier of a single day's plan.
    PlanId
);
string_id!(
    /// Identifier of a proposed job materialized into a plan.
    ActiveJobId
);
string_id!(
    /// Identifier of a reusable job template.
    ProposedJobId
);
string_id!(RideId);
string_id!(CarId);
string_id!(AreaId);

/// Skills a worker declares when registering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Skill {
    Lumberjack,
    Artist,
    Gardener,
    Danger,
    Electrician,
    Heights,
    Mason,
}

impl Skill {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lumberjack => "Lumberjack",
            Self::Artist => "Artist",
            Self::Gardener => "Gardener",
            Self::Danger => "Dangerous work",
            Self::Electrician => "Electrician",
            Self::Heights => "Heights",
            Self::Mason => "Mason",
        }
    }
}

/// Work-related allergies shared by workers and job sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Allergy {
    Dust,
    Animals,
    Hay,
    Pollen,
    Mites,
    Chemicals,
}

impl Allergy {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Dust,
            Self::Animals,
            Self::Hay,
            Self::Pollen,
            Self::Mites,
            Self::Chemicals,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Dust => "DUST",
            Self::Animals => "ANIMALS",
            Self::Hay => "HAY",
            Self::Pollen => "POLLEN",
            Self::Mites => "MITES",
            Self::Chemicals => "CHEMICALS",
        }
    }

    pub fn from_code(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|allergy| allergy.code().eq_ignore_ascii_case(raw))
    }
}

/// Tools a job site may provide or require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolName {
    Axe,
    BowSaw,
    Ladder,
    Paint,
    PaintRoller,
    CoverSheet,
    MaskingTape,
    PaintBrush,
    ScraperGrid,
    PainterSpatula,
    JapaneseSpatula,
    Gypsum,
    Bucket,
    Rag,
    Broom,
    Saw,
    Brushcutter,
    Gloves,
    Respirator,
    Headphones,
    Chainsaw,
    CircularSaw,
    Rake,
    Shovel,
    Pitchfork,
    HedgeTrimmer,
    StringTrimmer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: CarId,
    pub name: String,
    pub seats: u32,
    pub owner_id: WorkerId,
}

/// Days of the event on which a worker is present or wants to attend adoration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerAvailability {
    #[serde(default)]
    pub work_days: Vec<NaiveDate>,
    #[serde(default)]
    pub adoration_days: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: WorkerId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_strong: bool,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub allergies: Vec<Allergy>,
    #[serde(default)]
    pub cars: Vec<Car>,
    #[serde(default)]
    pub availability: WorkerAvailability,
}

impl Worker {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_driver(&self) -> bool {
        !self.cars.is_empty()
    }

    pub fn works_on(&self, day: NaiveDate) -> bool {
        self.availability.work_days.contains(&day)
    }

    pub fn adores_on(&self, day: NaiveDate) -> bool {
        self.availability.adoration_days.contains(&day)
    }

    pub fn is_allergic_to(&self, allergens: &[Allergy]) -> bool {
        self.allergies
            .iter()
            .any(|allergy| allergens.contains(allergy))
    }
}

/// Geographic grouping of jobs with a shared transport and adoration policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: AreaId,
    pub name: String,
    #[serde(default)]
    pub requires_car: bool,
    #[serde(default)]
    pub supports_adoration: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOnSite {
    pub tool: ToolName,
    #[serde(default = "default_tool_amount")]
    pub amount: u32,
}

fn default_tool_amount() -> u32 {
    1
}

/// Reusable job template with its staffing requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedJob {
    pub id: ProposedJobId,
    pub name: String,
    #[serde(default)]
    pub area: Option<Area>,
    pub min_workers: u32,
    pub max_workers: u32,
    #[serde(default)]
    pub strong_workers: u32,
    #[serde(default)]
    pub allergens: Vec<Allergy>,
    #[serde(default)]
    pub tools_on_site: Vec<ToolOnSite>,
}

impl ProposedJob {
    pub fn requires_car(&self) -> bool {
        self.area.as_ref().is_some_and(|area| area.requires_car)
    }

    pub fn supports_adoration(&self) -> bool {
        self.area.as_ref().is_some_and(|area| area.supports_adoration)
    }
}

/// A car trip with one driver and the passengers it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    pub id: RideId,
    pub car: Car,
    pub driver_id: WorkerId,
    #[serde(default)]
    pub passenger_ids: Vec<WorkerId>,
}

impl Ride {
    pub fn occupancy(&self) -> usize {
        self.passenger_ids.len() + 1
    }

    pub fn is_overloaded(&self) -> bool {
        (self.car.seats as usize) < self.occupancy()
    }

    pub fn carries(&self, worker_id: &WorkerId) -> bool {
        &self.driver_id == worker_id || self.passenger_ids.contains(worker_id)
    }
}

/// A proposed job scheduled into one day's plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveJob {
    pub id: ActiveJobId,
    pub plan_id: PlanId,
    pub proposed_job: ProposedJob,
    #[serde(default)]
    pub workers: Vec<Worker>,
    #[serde(default)]
    pub rides: Vec<Ride>,
    #[serde(default)]
    pub responsible_worker_id: Option<WorkerId>,
}

impl ActiveJob {
    pub fn has_worker(&self, worker_id: &WorkerId) -> bool {
        self.workers.iter().any(|worker| &worker.id == worker_id)
    }

    pub fn worker(&self, worker_id: &WorkerId) -> Option<&Worker> {
        self.workers.iter().find(|worker| &worker.id == worker_id)
    }
}

/// Rides belonging to one active job, as passed to the coverage rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RidesForJob {
    pub job_id: ActiveJobId,
    pub rides: Vec<Ride>,
}

/// One calendar day of the event with its scheduled jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: PlanId,
    pub day: NaiveDate,
    #[serde(default)]
    pub jobs: Vec<ActiveJob>,
}

impl Plan {
    pub fn job(&self, job_id: &ActiveJobId) -> Option<&ActiveJob> {
        self.jobs.iter().find(|job| &job.id == job_id)
    }

    pub fn rides_for_other_jobs(&self, job_id: &ActiveJobId) -> Vec<RidesForJob> {
        self.jobs
            .iter()
            .filter(|job| &job.id != job_id)
            .map(|job| RidesForJob {
                job_id: job.id.clone(),
                rides: job.rides.clone(),
            })
            .collect()
    }

    pub fn is_assigned(&self, worker_id: &WorkerId) -> bool {
        self.jobs.iter().any(|job| job.has_worker(worker_id))
    }
}
