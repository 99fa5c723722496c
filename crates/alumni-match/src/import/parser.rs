use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One row of the alumni master sheet, exported as CSV.
#[derive(Debug, Deserialize)]
pub(crate) struct AlumniRow {
    #[serde(rename = "Student Name", default, deserialize_with = "empty_string_as_none")]
    pub(crate) student_name: Option<String>,
    #[serde(rename = "College", default, deserialize_with = "empty_string_as_none")]
    pub(crate) college: Option<String>,
    #[serde(rename = "University Name", default, deserialize_with = "empty_string_as_none")]
    pub(crate) university: Option<String>,
    #[serde(rename = "University Country", default, deserialize_with = "empty_string_as_none")]
    pub(crate) country: Option<String>,
    #[serde(rename = "Master's Branch", default, deserialize_with = "empty_string_as_none")]
    pub(crate) masters_branch: Option<String>,
    #[serde(rename = "Master's start", default, deserialize_with = "empty_string_as_none")]
    pub(crate) masters_start: Option<String>,
    #[serde(rename = "Bachelor's Branch", default, deserialize_with = "empty_string_as_none")]
    pub(crate) bachelors_branch: Option<String>,
    #[serde(rename = "Cgpa", default, deserialize_with = "empty_string_as_none")]
    pub(crate) cgpa: Option<String>,
    #[serde(rename = "10th Percentage/cgpa", default, deserialize_with = "empty_string_as_none")]
    pub(crate) tenth: Option<String>,
    #[serde(rename = "12th percentage/cgpa", default, deserialize_with = "empty_string_as_none")]
    pub(crate) twelfth: Option<String>,
    #[serde(rename = "Exp 1 (in months)", default, deserialize_with = "empty_string_as_none")]
    pub(crate) exp1_months: Option<String>,
    #[serde(rename = "Exp 1 Company", default, deserialize_with = "empty_string_as_none")]
    pub(crate) exp1_company: Option<String>,
    #[serde(rename = "Designation", default, deserialize_with = "empty_string_as_none")]
    pub(crate) exp1_designation: Option<String>,
    #[serde(rename = "Exp 2 (In months)", default, deserialize_with = "empty_string_as_none")]
    pub(crate) exp2_months: Option<String>,
    #[serde(rename = "Exp 2 Company", default, deserialize_with = "empty_string_as_none")]
    pub(crate) exp2_company: Option<String>,
    #[serde(rename = "Designation.1", default, deserialize_with = "empty_string_as_none")]
    pub(crate) exp2_designation: Option<String>,
    #[serde(rename = "Exp 3 (In years)", default, deserialize_with = "empty_string_as_none")]
    pub(crate) exp3_years: Option<String>,
    #[serde(rename = "Exp 3 Company", default, deserialize_with = "empty_string_as_none")]
    pub(crate) exp3_company: Option<String>,
    #[serde(rename = "Designation.2", default, deserialize_with = "empty_string_as_none")]
    pub(crate) exp3_designation: Option<String>,
    #[serde(rename = "Exp 4 (In years)", default, deserialize_with = "empty_string_as_none")]
    pub(crate) exp4_years: Option<String>,
    #[serde(rename = "Exp 4 Company", default, deserialize_with = "empty_string_as_none")]
    pub(crate) exp4_company: Option<String>,
    #[serde(rename = "Designation.3", default, deserialize_with = "empty_string_as_none")]
    pub(crate) exp4_designation: Option<String>,
    #[serde(rename = "LinkedIn Profile", default, deserialize_with = "empty_string_as_none")]
    pub(crate) linkedin_profile: Option<String>,
}

/// A work-experience slot as laid out in the sheet.
pub(crate) struct ExperienceSlot<'a> {
    pub(crate) label: &'static str,
    pub(crate) months: f64,
    pub(crate) company: Option<&'a str>,
    pub(crate) designation: Option<&'a str>,
}

impl AlumniRow {
    /// The four slots in sheet order; slots 3 and 4 are recorded in years.
    pub(crate) fn experience_slots(&self) -> [ExperienceSlot<'_>; 4] {
        [
            ExperienceSlot {
                label: "Exp 1",
                months: parse_number(self.exp1_months.as_deref()).unwrap_or(0.0),
                company: self.exp1_company.as_deref(),
                designation: self.exp1_designation.as_deref(),
            },
            ExperienceSlot {
                label: "Exp 2",
                months: parse_number(self.exp2_months.as_deref()).unwrap_or(0.0),
                company: self.exp2_company.as_deref(),
                designation: self.exp2_designation.as_deref(),
            },
            ExperienceSlot {
                label: "Exp 3",
                months: parse_number(self.exp3_years.as_deref()).unwrap_or(0.0) * 12.0,
                company: self.exp3_company.as_deref(),
                designation: self.exp3_designation.as_deref(),
            },
            ExperienceSlot {
                label: "Exp 4",
                months: parse_number(self.exp4_years.as_deref()).unwrap_or(0.0) * 12.0,
                company: self.exp4_company.as_deref(),
                designation: self.exp4_designation.as_deref(),
            },
        ]
    }
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<AlumniRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    csv_reader.deserialize::<AlumniRow>().collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

/// Sheet numbers, tolerating decimal commas ("3,71") and trailing percent signs.
pub(crate) fn parse_number(value: Option<&str>) -> Option<f64> {
    let cleaned = value?.trim().trim_end_matches('%').trim().replace(',', ".");
    cleaned.parse::<f64>().ok().filter(|number| number.is_finite())
}

/// Whole-number cell such as a year; fractional sheet values are floored.
pub(crate) fn parse_whole(value: Option<&str>) -> Option<i32> {
    let number = parse_number(value)?.floor();
    if number >= f64::from(i32::MIN) && number <= f64::from(i32::MAX) {
        Some(number as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_number_handles_sheet_formats() {
        assert_eq!(parse_number(Some("8.25")), Some(8.25));
        assert_eq!(parse_number(Some("3,71")), Some(3.71));
        assert_eq!(parse_number(Some(" 92.4% ")), Some(92.4));
        assert_eq!(parse_number(Some("n/a")), None);
        assert_eq!(parse_number(None), None);
    }

    #[test]
    fn parse_whole_floors_and_keeps_sentinels() {
        assert_eq!(parse_whole(Some("2019.0")), Some(2019));
        assert_eq!(parse_whole(Some("44558")), Some(44558));
        assert_eq!(parse_whole(Some("")), None);
    }

    #[test]
    fn rows_tolerate_missing_columns_and_blank_cells() {
        let rows = parse_rows(Cursor::new(
            "Student Name,University Name,Bachelor's Branch,Cgpa\nAsha, NYU ,Computer Science,\n",
        ))
        .expect("rows parse");

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.university.as_deref(), Some("NYU"));
        assert_eq!(row.cgpa, None);
        assert_eq!(row.linkedin_profile, None);
        assert!(row.experience_slots().iter().all(|slot| slot.months == 0.0));
    }

    #[test]
    fn experience_slots_convert_years_to_months() {
        let rows = parse_rows(Cursor::new(
            "Student Name,Exp 1 (in months),Exp 1 Company,Exp 3 (In years),Designation.2\nAsha,18,Google,1.5,Analyst\n",
        ))
        .expect("rows parse");

        let slots = rows[0].experience_slots();
        assert_eq!(slots[0].months, 18.0);
        assert_eq!(slots[0].company, Some("Google"));
        assert_eq!(slots[2].months, 18.0);
        assert_eq!(slots[2].designation, Some("Analyst"));
    }
}
