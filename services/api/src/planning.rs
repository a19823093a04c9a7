use crate::infra::ReportFormat;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use summerjob::config::{AppConfig, PlannerConfig};
use summerjob::error::AppError;
use summerjob::workflows::plan::domain::{Plan, PlanId, Worker, WorkerId};
use summerjob::workflows::plan::report::views::{JobIssueView, PlanIssueSummary, WorkerIssueView};
use summerjob::workflows::plan::{
    generate_rides, IssueDetector, PlanGenerator, PlanIssueReport, PlanProposal,
    RideGenerationSummary,
};
use summerjob::workflows::roster::RosterImporter;
use summerjob::workflows::snapshot::{EventSnapshot, SnapshotError};

#[derive(Args, Debug)]
pub(crate) struct IssuesArgs {
    /// Event snapshot JSON with workers and every plan day
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Identifier of the plan to evaluate
    #[arg(long)]
    pub(crate) plan: String,
    /// Output encoding
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub(crate) format: ReportFormat,
}

#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    /// Event snapshot JSON with workers and every plan day
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Identifier of the plan to staff
    #[arg(long)]
    pub(crate) plan: String,
    /// Also create rides for jobs in areas that need a car
    #[arg(long)]
    pub(crate) with_rides: bool,
    /// Keep adding workers up to each job's maximum
    #[arg(long)]
    pub(crate) fill_to_max: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RosterImportArgs {
    /// Semicolon-separated roster, one worker per line
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// First day of the event (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) event_start: NaiveDate,
    /// Last day of the event (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) event_end: NaiveDate,
}

/// JSON shape of an issue report: summary plus the rendered job and worker views.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlanIssueReportResponse {
    pub(crate) has_issues: bool,
    pub(crate) summary: PlanIssueSummary,
    pub(crate) jobs: Vec<JobIssueView>,
    pub(crate) workers: Vec<WorkerIssueView>,
}

impl From<&PlanIssueReport> for PlanIssueReportResponse {
    fn from(report: &PlanIssueReport) -> Self {
        Self {
            has_issues: report.has_issues(),
            summary: report.summary(),
            jobs: report.job_views(),
            workers: report.worker_views(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct GeneratedPlan {
    pub(crate) proposal: PlanProposal,
    pub(crate) plan: Plan,
    pub(crate) rides: Option<RideGenerationSummary>,
    pub(crate) report: PlanIssueReport,
}

pub(crate) fn evaluate_plan(
    snapshot: &EventSnapshot,
    plan_id: &PlanId,
) -> Result<PlanIssueReport, SnapshotError> {
    let plan = snapshot.plan(plan_id)?;
    Ok(IssueDetector::new(&snapshot.plans).evaluate_plan(plan))
}

/// Staff the plan, optionally seat it, and evaluate the result against the
/// rest of the event.
pub(crate) fn generate_plan(
    snapshot: &EventSnapshot,
    plan_id: &PlanId,
    config: PlannerConfig,
    with_rides: bool,
) -> Result<GeneratedPlan, SnapshotError> {
    let current = snapshot.plan(plan_id)?;
    let proposal =
        PlanGenerator::new(config).generate(current, &snapshot.workers, &snapshot.plans);
    let staffed = proposal.apply(current, &snapshot.workers);

    let (plan, rides) = if with_rides {
        let (seated, summary) = generate_rides(&staffed);
        (seated, Some(summary))
    } else {
        (staffed, None)
    };

    let report = IssueDetector::new(&snapshot.plans).evaluate_plan(&plan);
    Ok(GeneratedPlan {
        proposal,
        plan,
        rides,
        report,
    })
}

pub(crate) fn run_issues(args: IssuesArgs) -> Result<(), AppError> {
    let snapshot = EventSnapshot::from_path(&args.snapshot)?;
    let report = evaluate_plan(&snapshot, &PlanId::new(args.plan))?;

    match args.format {
        ReportFormat::Text => print!("{}", render_report(&report)),
        ReportFormat::Json => println!("{}", to_json(&PlanIssueReportResponse::from(&report))?),
        ReportFormat::Csv => report.write_csv(std::io::stdout().lock())?,
    }

    Ok(())
}

pub(crate) fn run_generate(args: GenerateArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?.planner;
    config.fill_to_max |= args.fill_to_max;

    let snapshot = EventSnapshot::from_path(&args.snapshot)?;
    let generated = generate_plan(&snapshot, &PlanId::new(args.plan), config, args.with_rides)?;

    print!("{}", render_generated(&generated, &snapshot.workers));
    print!("{}", render_report(&generated.report));
    Ok(())
}

pub(crate) fn run_roster_import(args: RosterImportArgs) -> Result<(), AppError> {
    let import = RosterImporter::new(args.event_start, args.event_end).from_path(&args.csv)?;

    println!(
        "Imported {} worker(s), rejected {} line(s)",
        import.workers.len(),
        import.rejected.len()
    );
    for worker in &import.workers {
        println!(
            "- {} <{}> works {} day(s), adoration on {} day(s)",
            worker.full_name(),
            worker.email,
            worker.availability.work_days.len(),
            worker.availability.adoration_days.len()
        );
    }
    for row in &import.rejected {
        println!("! line {}: {}", row.line, row.reason);
    }

    Ok(())
}

pub(crate) fn render_report(report: &PlanIssueReport) -> String {
    let summary = report.summary();
    let mut out = format!(
        "Plan {} ({})\n{} job(s), {} with issues, {} worker warning(s)\n",
        report.plan_id,
        report.day.format("%a %-d.%-m.%Y"),
        summary.total_jobs,
        summary.jobs_with_issues,
        summary.workers_with_history_issues
    );

    for view in report.job_views() {
        if !view.show_icon {
            out.push_str(&format!("- {} [{}]: ok\n", view.job_name, view.job_id));
            continue;
        }
        out.push_str(&format!("- {} [{}]\n", view.job_name, view.job_id));
        for message in &view.messages {
            out.push_str(&format!("    ! {message}\n"));
        }
    }

    let workers = report.worker_views();
    if !workers.is_empty() {
        out.push_str("Workers:\n");
        for view in workers {
            out.push_str(&format!("- {} on {}\n", view.worker_name, view.job_id));
            for line in view.title.lines() {
                out.push_str(&format!("    {line}\n"));
            }
        }
    }

    out
}

fn render_generated(generated: &GeneratedPlan, workers: &[Worker]) -> String {
    let name_of = |id: &WorkerId| {
        workers
            .iter()
            .find(|worker| &worker.id == id)
            .map(Worker::full_name)
            .unwrap_or_else(|| id.to_string())
    };
    let proposal = &generated.proposal;
    let mut out = format!("Proposal for plan {}\n", proposal.plan_id);

    for assignment in &proposal.assignments {
        let names: Vec<String> = assignment.worker_ids.iter().map(name_of).collect();
        out.push_str(&format!("+ {}: {}\n", assignment.job_id, names.join(", ")));
    }
    for unplanned in &proposal.unplanned {
        out.push_str(&format!("x {}: {}\n", unplanned.job_id, unplanned.reason.label()));
    }
    out.push_str(&format!("{} worker(s) left idle\n", proposal.idle_workers.len()));
    if let Some(rides) = &generated.rides {
        out.push_str(&format!(
            "{} ride(s) created, {} worker(s) without a seat\n",
            rides.rides_created,
            rides.unseated.len()
        ));
    }

    out
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value).map_err(std::io::Error::from)?)
}
