use std::io::Write;

use super::summary::PlanIssueReport;
use crate::workflows::plan::issues::IssueKind;

impl PlanIssueReport {
    /// Write one row per job with a `0`/`1` column per issue kind.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["job_id", "job_name"];
        header.extend(IssueKind::ordered().iter().map(|kind| kind.key()));
        csv_writer.write_record(&header)?;

        for entry in &self.jobs {
            let mut row = vec![entry.job_id.to_string(), entry.job_name.clone()];
            row.extend(IssueKind::ordered().into_iter().map(|kind| {
                if entry.issues.is_raised(kind) {
                    "1".to_string()
                } else {
                    "0".to_string()
                }
            }));
            csv_writer.write_record(&row)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::plan::domain::{ActiveJobId, PlanId};
    use crate::workflows::plan::issues::JobIssues;
    use crate::workflows::plan::report::JobIssueEntry;
    use chrono::NaiveDate;

    #[test]
    fn csv_export_marks_raised_issues() {
        let report = PlanIssueReport {
            plan_id: PlanId::new("plan-1"),
            day: NaiveDate::from_ymd_opt(2024, 7, 2).expect("valid day"),
            jobs: vec![JobIssueEntry {
                job_id: ActiveJobId::new("job-1"),
                job_name: "Painting, fence".to_string(),
                issues: JobIssues {
                    overloaded_cars: true,
                    ..JobIssues::default()
                },
            }],
            workers: Vec::new(),
        };

        let mut buffer = Vec::new();
        report.write_csv(&mut buffer).expect("csv written");
        let output = String::from_utf8(buffer).expect("utf8 output");
        let mut lines = output.lines();

        let header = lines.next().expect("header row");
        assert!(header.starts_with("job_id,job_name,too_many_workers"));
        assert!(header.ends_with("same_coworker"));
        assert_eq!(
            lines.next(),
            Some("job-1,\"Painting, fence\",0,0,0,1,0,0,0,0,0,0,0")
        );
        assert!(lines.next().is_none());
    }
}
