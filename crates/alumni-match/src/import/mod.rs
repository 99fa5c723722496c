//! Hydrates alumni records from the master sheet's CSV export.

mod location;
mod parser;
mod sector;

pub use sector::{detect_company_sector, sector_options, OTHER_SECTOR};

use crate::matching::domain::{AlumniId, HistoricalRecord, WorkExperienceEntry};
use parser::{parse_number, parse_whole, AlumniRow};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug)]
pub enum AlumniImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for AlumniImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlumniImportError::Io(err) => write!(f, "failed to read alumni export: {}", err),
            AlumniImportError::Csv(err) => write!(f, "invalid alumni CSV data: {}", err),
        }
    }
}

impl std::error::Error for AlumniImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AlumniImportError::Io(err) => Some(err),
            AlumniImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for AlumniImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for AlumniImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Row counts reported after an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Rows applied, including those that replaced an earlier row.
    pub imported: usize,
    /// Rows that replaced an earlier row for the same student and university.
    pub updated: usize,
    /// Rows missing a student name, university or bachelor's branch.
    pub skipped: usize,
}

#[derive(Debug, Clone)]
pub struct AlumniImport {
    pub records: Vec<HistoricalRecord>,
    pub summary: ImportSummary,
}

pub struct AlumniImporter {
    default_college: String,
}

impl AlumniImporter {
    pub fn new(default_college: impl Into<String>) -> Self {
        Self {
            default_college: default_college.into(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<AlumniImport, AlumniImportError> {
        let file = std::fs::File::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "reading alumni export");
        self.from_reader(file)
    }

    pub fn from_reader<R: Read>(&self, reader: R) -> Result<AlumniImport, AlumniImportError> {
        let mut records: Vec<HistoricalRecord> = Vec::new();
        let mut positions: HashMap<(String, String), usize> = HashMap::new();
        let mut summary = ImportSummary::default();

        for row in parser::parse_rows(reader)? {
            let Some(mut record) = self.record_from_row(row) else {
                summary.skipped += 1;
                continue;
            };

            let key = (record.name.clone(), record.university.clone());
            match positions.get(&key) {
                Some(&position) => {
                    record.id = records[position].id.clone();
                    records[position] = record;
                    summary.updated += 1;
                }
                None => {
                    record.id = AlumniId(format!("alum-{:06}", records.len() + 1));
                    positions.insert(key, records.len());
                    records.push(record);
                }
            }
            summary.imported += 1;
        }

        info!(
            imported = summary.imported,
            updated = summary.updated,
            skipped = summary.skipped,
            "alumni import complete"
        );

        Ok(AlumniImport { records, summary })
    }

    fn record_from_row(&self, row: AlumniRow) -> Option<HistoricalRecord> {
        let name = row.student_name.clone()?;
        let university = row.university.as_deref()?.replace('\n', " ");
        let branch = row.bachelors_branch.clone()?;

        let slots = row.experience_slots();
        let total_months: f64 = slots.iter().map(|slot| slot.months).sum();
        let work_experience = (total_months / 12.0 * 10.0).round() / 10.0;

        let work_experiences = slots
            .iter()
            .filter(|slot| slot.months > 0.0 || slot.company.is_some() || slot.designation.is_some())
            .map(|slot| WorkExperienceEntry {
                months: slot.months,
                company: slot.company.unwrap_or_default().to_string(),
                designation: slot.designation.unwrap_or_default().to_string(),
                label: slot.label.to_string(),
            })
            .collect();

        // The first listed role is the one admissions committees saw.
        let company_sector = slots
            .iter()
            .find_map(|slot| slot.company)
            .and_then(detect_company_sector)
            .map(str::to_string);
        let designation = slots
            .iter()
            .find_map(|slot| slot.designation)
            .map(str::to_string);

        let location = location::derive_location(&university, row.country.as_deref());
        let positive = |value: Option<f64>| value.filter(|number| *number > 0.0);

        Some(HistoricalRecord {
            id: AlumniId(String::new()),
            name,
            college: row
                .college
                .clone()
                .unwrap_or_else(|| self.default_college.clone()),
            university,
            course: row.masters_branch.clone(),
            location: Some(location),
            branch,
            admitted_year: parse_whole(row.masters_start.as_deref()),
            cgpa: parse_number(row.cgpa.as_deref()).unwrap_or(0.0),
            work_experience,
            tenth_percentage: positive(parse_number(row.tenth.as_deref())),
            twelfth_percentage: positive(parse_number(row.twelfth.as_deref())),
            company_sector,
            designation,
            linkedin_profile: row.linkedin_profile.clone(),
            work_experiences,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "Sr No.,Student Name,University Name,University Country,Master's Branch,Master's start,Bachelor's Branch,Cgpa,10th Percentage/cgpa,12th percentage/cgpa,Exp 1 (in months),Exp 1 Company,Designation,Exp 2 (In months),Exp 2 Company,Designation.1,Exp 3 (In years),Exp 3 Company,Designation.2,Exp 4 (In years),Exp 4 Company,Designation.3,LinkedIn Profile";

    fn import(rows: &[&str]) -> AlumniImport {
        let csv = format!("{HEADER}\n{}\n", rows.join("\n"));
        AlumniImporter::new("VJTI, Mumbai")
            .from_reader(Cursor::new(csv))
            .expect("import succeeds")
    }

    #[test]
    fn builds_records_from_sheet_rows() {
        let imported = import(&[
            "1,Asha Kulkarni,University of California San Diego,USA,MS CS,2019,Computer Science,\"8,6\",92,0,18,Google,Software Engineer,6,Amazon,SDE Intern,1,Deloitte,Analyst,,,,https://linkedin.com/in/asha",
        ]);

        assert_eq!(imported.summary, ImportSummary { imported: 1, updated: 0, skipped: 0 });
        let record = &imported.records[0];
        assert_eq!(record.id, AlumniId("alum-000001".to_string()));
        assert_eq!(record.college, "VJTI, Mumbai");
        assert_eq!(record.location.as_deref(), Some("California, USA"));
        assert_eq!(record.course.as_deref(), Some("MS CS"));
        assert_eq!(record.admitted_year, Some(2019));
        assert_eq!(record.cgpa, 8.6);
        // 18 + 6 + 12 months
        assert_eq!(record.work_experience, 3.0);
        assert_eq!(record.tenth_percentage, Some(92.0));
        assert_eq!(record.twelfth_percentage, None);
        assert_eq!(record.company_sector.as_deref(), Some("Technology"));
        assert_eq!(record.designation.as_deref(), Some("Software Engineer"));
        assert_eq!(record.work_experiences.len(), 3);
        assert_eq!(record.work_experiences[2].label, "Exp 3");
        assert_eq!(record.work_experiences[2].months, 12.0);
    }

    #[test]
    fn skips_rows_missing_identity_fields() {
        let imported = import(&[
            "1,,NYU,USA,MS CS,2019,Computer Science,8.5,,,,,,,,,,,,,,,",
            "2,Rohan,,USA,MS CS,2019,Computer Science,8.5,,,,,,,,,,,,,,,",
            "3,Meera,NYU,USA,MS CS,2019,,8.5,,,,,,,,,,,,,,,",
            "4,Kabir,NYU,USA,,44558,IT,8.1,,,,,,,,,,,,,,,",
        ]);

        assert_eq!(imported.summary.skipped, 3);
        assert_eq!(imported.records.len(), 1);
        let record = &imported.records[0];
        assert_eq!(record.course, None);
        assert_eq!(record.admitted_year, Some(44558));
        assert_eq!(record.company_sector, None);
        assert!(record.work_experiences.is_empty());
    }

    #[test]
    fn later_rows_replace_earlier_ones_for_the_same_student() {
        let imported = import(&[
            "1,Asha,NYU,USA,MS CS,2018,Computer Science,8.1,,,,,,,,,,,,,,,",
            "2,Dev,NYU,USA,MS CS,2019,Computer Science,8.3,,,,,,,,,,,,,,,",
            "3,Asha,NYU,USA,MS CS,2019,Computer Science,8.4,,,,,,,,,,,,,,,",
        ]);

        assert_eq!(
            imported.summary,
            ImportSummary { imported: 3, updated: 1, skipped: 0 }
        );
        assert_eq!(imported.records.len(), 2);
        assert_eq!(imported.records[0].id, AlumniId("alum-000001".to_string()));
        assert_eq!(imported.records[0].cgpa, 8.4);
        assert_eq!(imported.records[0].admitted_year, Some(2019));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = AlumniImporter::new("VJTI, Mumbai")
            .from_path("./does-not-exist.csv")
            .expect_err("expected io error");

        match error {
            AlumniImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
