//! Bulk worker registration from a `;`-separated roster.
//!
//! One worker per line:
//! `first;last;age;email;phone;allergies;work days;adoration days`, where
//! the last three fields are comma-separated lists. Lines that do not
//! describe a valid worker are collected as [`RejectedRow`]s so the rest of
//! the roster can still be imported.

mod parser;

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::workflows::plan::domain::{Worker, WorkerAvailability, WorkerId};
use parser::{ParsedLine, RosterRow};

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read worker roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid worker roster data: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRow {
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterImport {
    pub workers: Vec<Worker>,
    pub rejected: Vec<RejectedRow>,
}

pub struct RosterImporter {
    event_start: NaiveDate,
    event_end: NaiveDate,
}

impl RosterImporter {
    pub fn new(event_start: NaiveDate, event_end: NaiveDate) -> Self {
        Self {
            event_start,
            event_end,
        }
    }

    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<RosterImport, RosterImportError> {
        let file = std::fs::File::open(path)?;
        self.from_reader(file)
    }

    pub fn from_reader<R: Read>(&self, reader: R) -> Result<RosterImport, RosterImportError> {
        let mut import = RosterImport::default();

        for parsed in parser::parse_lines(reader)? {
            let (line, outcome) = match parsed {
                ParsedLine::Row { line, row } => (line, self.build_worker(line, row)),
                ParsedLine::Malformed { line, reason } => (line, Err(reason)),
            };

            match outcome {
                Ok(worker) => import.workers.push(worker),
                Err(reason) => {
                    warn!(line, %reason, "roster line rejected");
                    import.rejected.push(RejectedRow { line, reason });
                }
            }
        }

        info!(
            imported = import.workers.len(),
            rejected = import.rejected.len(),
            "worker roster parsed"
        );
        Ok(import)
    }

    fn build_worker(&self, line: u64, row: RosterRow) -> Result<Worker, String> {
        if row.first_name.is_empty() || row.last_name.is_empty() {
            return Err("first and last name are required".to_string());
        }
        row.age
            .parse::<u8>()
            .map_err(|_| format!("invalid age '{}'", row.age))?;
        if !is_plausible_email(&row.email) {
            return Err(format!("invalid email '{}'", row.email));
        }

        let allergies = parser::parse_allergies(&row.allergies)?;
        let work_days = parser::parse_days(&row.work_days)?;
        let adoration_days = parser::parse_days(&row.adoration_days)?;

        if let Some(day) = work_days
            .iter()
            .chain(&adoration_days)
            .find(|day| !self.within_event(**day))
        {
            return Err(format!(
                "date {} is outside of the event",
                day.format("%Y/%m/%d")
            ));
        }

        Ok(Worker {
            id: WorkerId::new(format!("roster-{line}")),
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            email: row.email,
            is_strong: false,
            skills: Vec::new(),
            allergies,
            cars: Vec::new(),
            availability: WorkerAvailability {
                work_days,
                adoration_days,
            },
        })
    }

    fn within_event(&self, day: NaiveDate) -> bool {
        self.event_start <= day && day <= self.event_end
    }
}

fn is_plausible_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::plan::domain::Allergy;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, day).expect("valid date")
    }

    fn importer() -> RosterImporter {
        RosterImporter::new(date(1), date(5))
    }

    #[test]
    fn imports_valid_lines_with_line_based_ids() {
        let roster = "Jan;Novak;19;jan@example.com;+420123456789;DUST,ANIMALS;2024/07/01,2024/07/02;2024/07/02\n\
                      Eva;Dvorakova;22;eva@example.com;;;2024-07-03;\n";

        let import = importer().from_reader(roster.as_bytes()).expect("roster parses");

        assert!(import.rejected.is_empty());
        assert_eq!(import.workers.len(), 2);
        let jan = &import.workers[0];
        assert_eq!(jan.id, WorkerId::new("roster-1"));
        assert_eq!(jan.allergies, vec![Allergy::Dust, Allergy::Animals]);
        assert_eq!(jan.availability.work_days, vec![date(1), date(2)]);
        assert!(jan.adores_on(date(2)));
        assert_eq!(import.workers[1].id, WorkerId::new("roster-2"));
    }

    #[test]
    fn rejects_days_outside_the_event() {
        let roster = "Jan;Novak;19;jan@example.com;;;2024/07/06;\n";

        let import = importer().from_reader(roster.as_bytes()).expect("roster parses");

        assert!(import.workers.is_empty());
        assert_eq!(
            import.rejected,
            vec![RejectedRow {
                line: 1,
                reason: "date 2024/07/06 is outside of the event".to_string(),
            }]
        );
    }

    #[test]
    fn bad_lines_do_not_stop_the_import() {
        let roster = "Jan;Novak;old;jan@example.com;;;2024/07/01;\n\
                      Petr;Svoboda;30;petr-at-example;;;2024/07/01;\n\
                      Ana;Kral;25;ana@example.com;;GLUTEN;2024/07/01;\n\
                      Missing;Fields\n\
                      Eva;Dvorakova;22;eva@example.com;;;2024/07/01;\n";

        let import = importer().from_reader(roster.as_bytes()).expect("roster parses");

        assert_eq!(import.workers.len(), 1);
        assert_eq!(import.workers[0].id, WorkerId::new("roster-5"));
        let reasons: Vec<&str> = import.rejected.iter().map(|row| row.reason.as_str()).collect();
        assert_eq!(
            reasons,
            vec![
                "invalid age 'old'",
                "invalid email 'petr-at-example'",
                "unknown allergy 'GLUTEN'",
                "missing data",
            ]
        );
    }
}
