use std::io::Read;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::workflows::plan::domain::Allergy;

/// Raw `;`-separated roster line, fields in file order.
#[derive(Debug, Deserialize)]
pub(crate) struct RosterRow {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) age: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) allergies: String,
    pub(crate) work_days: String,
    pub(crate) adoration_days: String,
}

impl RosterRow {
    fn is_header(&self) -> bool {
        self.age.eq_ignore_ascii_case("age")
    }
}

#[derive(Debug)]
pub(crate) enum ParsedLine {
    Row { line: u64, row: RosterRow },
    Malformed { line: u64, reason: String },
}

pub(crate) fn parse_lines<R: Read>(reader: R) -> Result<Vec<ParsedLine>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut lines = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|position| position.line())
            .unwrap_or(index as u64 + 1);

        match record.deserialize::<RosterRow>(None) {
            Ok(row) if line == 1 && row.is_header() => continue,
            Ok(row) => lines.push(ParsedLine::Row { line, row }),
            Err(_) => lines.push(ParsedLine::Malformed {
                line,
                reason: "missing data".to_string(),
            }),
        }
    }

    Ok(lines)
}

pub(crate) fn parse_allergies(raw: &str) -> Result<Vec<Allergy>, String> {
    split_list(raw)
        .map(|code| Allergy::from_code(code).ok_or_else(|| format!("unknown allergy '{code}'")))
        .collect()
}

pub(crate) fn parse_days(raw: &str) -> Result<Vec<NaiveDate>, String> {
    let mut days = split_list(raw)
        .map(|value| parse_day(value).ok_or_else(|| format!("invalid date '{value}'")))
        .collect::<Result<Vec<_>, _>>()?;
    days.sort_unstable();
    days.dedup();
    Ok(days)
}

fn parse_day(value: &str) -> Option<NaiveDate> {
    ["%Y/%m/%d", "%Y-%m-%d"]
        .into_iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|value| !value.is_empty())
}
