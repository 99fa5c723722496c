//! Record-cleaning rules applied where alumni rows enter the matcher.

use chrono::{Datelike, Local};

use super::domain::HistoricalRecord;

/// Earliest admission year treated as real data.
pub const EARLIEST_ADMITTED_YEAR: i32 = 1990;
/// How far past the current year an admission may be recorded.
pub const ADMITTED_YEAR_LOOKAHEAD: i32 = 5;

/// Plausible admission years. Values outside it are sheet sentinels (e.g. the
/// Excel date serial `44558`) and are treated as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmittedYearWindow {
    pub earliest: i32,
    pub latest: i32,
}

impl AdmittedYearWindow {
    pub fn for_year(current_year: i32) -> Self {
        Self {
            earliest: EARLIEST_ADMITTED_YEAR,
            latest: current_year + ADMITTED_YEAR_LOOKAHEAD,
        }
    }

    pub fn current() -> Self {
        Self::for_year(Local::now().year())
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.earliest..=self.latest).contains(&year)
    }

    pub fn validate(&self, year: Option<i32>) -> Option<i32> {
        year.filter(|value| self.contains(*value))
    }
}

const EXCLUDED_INSTITUTION_MARKERS: [&str; 3] = ["iiit h", "iiith", "iiit-h"];

/// Policy exclusion for IIIT Hyderabad, whatever the spelling or punctuation.
pub fn is_excluded_institution(university: &str) -> bool {
    let lowered = university.to_lowercase();
    if EXCLUDED_INSTITUTION_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        return true;
    }

    let compact: String = lowered.chars().filter(|c| c.is_alphanumeric()).collect();
    compact.contains("iiith")
}

/// Drops excluded institutions and clears untrusted admission years.
pub fn screen_records(
    records: Vec<HistoricalRecord>,
    window: AdmittedYearWindow,
) -> Vec<HistoricalRecord> {
    records
        .into_iter()
        .filter(|record| !is_excluded_institution(&record.university))
        .map(|mut record| {
            record.admitted_year = window.validate(record.admitted_year);
            record
        })
        .collect()
}
