use crate::infra::{InMemoryAlumniRepository, InMemorySearchLog};
use alumni_match::config::DataConfig;
use alumni_match::error::AppError;
use alumni_match::import::{AlumniImport, AlumniImporter};
use alumni_match::matching::{MatchRequest, MatchService, MatchedGroup};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Groups under this percentage are hidden from CLI output by default.
const DEFAULT_MIN_MATCH: u8 = 40;

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Alumni CSV export to score against
    #[arg(long)]
    pub(crate) alumni_csv: PathBuf,
    /// Applicant's undergraduate college
    #[arg(long, default_value = DataConfig::DEFAULT_COLLEGE)]
    pub(crate) college: String,
    /// Applicant's bachelor's branch
    #[arg(long)]
    pub(crate) branch: String,
    /// Desired master's program; repeat for several
    #[arg(long = "program", required = true)]
    pub(crate) programs: Vec<String>,
    /// Work experience in years
    #[arg(long, default_value_t = 0.0)]
    pub(crate) experience: f64,
    /// CGPA on a 10-point scale
    #[arg(long)]
    pub(crate) cgpa: f64,
    #[arg(long)]
    pub(crate) tenth: Option<f64>,
    #[arg(long)]
    pub(crate) twelfth: Option<f64>,
    #[arg(long)]
    pub(crate) sector: Option<String>,
    #[arg(long)]
    pub(crate) designation: Option<String>,
    /// Hide programs scoring below this percentage
    #[arg(long, default_value_t = DEFAULT_MIN_MATCH)]
    pub(crate) min_match: u8,
    /// Print the contributing seniors under each program
    #[arg(long)]
    pub(crate) seniors: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// Alumni CSV export to validate
    #[arg(long)]
    pub(crate) alumni_csv: PathBuf,
    /// College assigned to rows with no College column
    #[arg(long, default_value = DataConfig::DEFAULT_COLLEGE)]
    pub(crate) default_college: String,
}

pub(crate) fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let imported = AlumniImporter::new(args.default_college).from_path(&args.alumni_csv)?;
    println!("Alumni import: {}", args.alumni_csv.display());
    render_import_summary(&imported);
    Ok(())
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let imported = AlumniImporter::new(args.college.clone()).from_path(&args.alumni_csv)?;
    let service = MatchService::new(
        Arc::new(InMemoryAlumniRepository::with_records(imported.records)),
        Arc::new(InMemorySearchLog::default()),
    );

    let request = MatchRequest {
        college: Some(args.college),
        bachelors_branch: Some(args.branch),
        masters_programs: Some(args.programs),
        work_experience: Some(args.experience),
        cgpa: Some(args.cgpa),
        tenth_percentage: args.tenth,
        twelfth_percentage: args.twelfth,
        company_sector: args.sector,
        designation: args.designation,
        ..MatchRequest::default()
    };
    let profile = request.into_profile()?;

    println!(
        "Matches for {} ({}, CGPA {:.2}, {:.1} yrs)",
        profile.college, profile.bachelors_branch, profile.cgpa, profile.work_experience
    );

    if args.seniors {
        let groups = service.compute_detailed_matches(&profile)?;
        let visible: Vec<_> = groups
            .into_iter()
            .filter(|detail| detail.group.match_percentage >= args.min_match)
            .collect();
        if visible.is_empty() {
            println!("- no programs at or above {}%", args.min_match);
        }
        for detail in &visible {
            print_group(&detail.group);
            for senior in &detail.seniors {
                println!(
                    "    - {} ({}, CGPA {:.2}, {:.1} yrs) {}%",
                    senior.name,
                    senior.branch,
                    senior.cgpa,
                    senior.work_experience,
                    senior.match_score
                );
            }
        }
    } else {
        let visible: Vec<_> = service
            .compute_matches(&profile)?
            .into_iter()
            .filter(|group| group.match_percentage >= args.min_match)
            .collect();
        if visible.is_empty() {
            println!("- no programs at or above {}%", args.min_match);
        }
        for group in &visible {
            print_group(group);
        }
    }

    Ok(())
}

fn render_import_summary(imported: &AlumniImport) {
    let summary = imported.summary;
    println!(
        "- {} rows imported ({} replaced earlier rows) | {} skipped",
        summary.imported, summary.updated, summary.skipped
    );
    println!("- {} distinct alumni", imported.records.len());

    let mut universities: Vec<&str> = imported
        .records
        .iter()
        .map(|record| record.university.as_str())
        .collect();
    universities.sort_unstable();
    universities.dedup();
    println!("- {} destination universities", universities.len());
}

fn print_group(group: &MatchedGroup) {
    let years = match (group.admitted_year_range.min, group.admitted_year_range.max) {
        (Some(min), Some(max)) if min == max => format!("{min}"),
        (Some(min), Some(max)) => format!("{min}-{max}"),
        _ => "n/a".to_string(),
    };
    println!(
        "- {}% {} | {} | {} | {} alumni | admitted {}",
        group.match_percentage,
        group.university,
        group.course.as_deref().unwrap_or("-"),
        group.location.as_deref().unwrap_or("-"),
        group.alumni_count,
        years
    );
}
