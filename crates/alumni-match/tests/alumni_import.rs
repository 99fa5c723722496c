use alumni_match::import::{AlumniImporter, ImportSummary};
use alumni_match::matching::{aggregate, AdmittedYearWindow, ApplicantProfile};

fn sample() -> alumni_match::import::AlumniImport {
    let data = include_bytes!("fixtures/alumni_sample.csv");
    AlumniImporter::new("VJTI, Mumbai")
        .from_reader(&data[..])
        .expect("sample sheet imports")
}

#[test]
fn sample_sheet_imports_with_counts() {
    let imported = sample();

    assert_eq!(
        imported.summary,
        ImportSummary {
            imported: 7,
            updated: 1,
            skipped: 1
        }
    );
    assert_eq!(imported.records.len(), 6);

    let asha = &imported.records[0];
    assert_eq!(asha.university, "University of California San Diego");
    assert_eq!(asha.location.as_deref(), Some("California, USA"));
    assert_eq!(asha.work_experience, 3.0);

    let rohan = imported
        .records
        .iter()
        .find(|record| record.name == "Rohan Mehta")
        .expect("rohan imported");
    assert_eq!(rohan.cgpa, 8.5);
    assert_eq!(rohan.company_sector.as_deref(), Some("Consulting"));

    let isha = imported
        .records
        .iter()
        .find(|record| record.name == "Isha Nair")
        .expect("isha imported");
    assert_eq!(isha.location.as_deref(), Some("Germany"));
    assert_eq!(isha.work_experience, 3.0);
    assert_eq!(isha.company_sector.as_deref(), Some("Manufacturing"));

    let dev = imported
        .records
        .iter()
        .find(|record| record.name == "Dev Patil")
        .expect("dev imported");
    assert_eq!(dev.college, "COEP, Pune");
}

#[test]
fn imported_sheet_feeds_the_aggregator() {
    let applicant = ApplicantProfile {
        college: "VJTI, Mumbai".to_string(),
        bachelors_branch: "Computer Science".to_string(),
        masters_programs: vec!["MS CS".to_string()],
        work_experience: 3.0,
        cgpa: 8.5,
        tenth_percentage: None,
        twelfth_percentage: None,
        company_sector: None,
        designation: None,
        research_papers: None,
        publications: None,
    };

    let records = sample()
        .records
        .into_iter()
        .filter(|record| record.college == applicant.college)
        .collect();
    let groups = aggregate(&applicant, records, AdmittedYearWindow::for_year(2025));

    assert!(groups
        .iter()
        .all(|group| !group.university.contains("IIIT")));
    assert!(groups.iter().any(|group| group.university == "Stony Brook University"
        && group.admitted_year_range.min.is_none()));
    assert!(groups
        .windows(2)
        .all(|pair| pair[0].match_percentage >= pair[1].match_percentage));
}
