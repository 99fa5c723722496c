use serde::{Deserialize, Serialize};

use super::domain::{ApplicantProfile, HistoricalRecord};
use super::normalize::{aliases_match, is_substring_match, normalize_term};

/// Upper bound of a match score.
pub const MAX_SCORE: u8 = 100;

/// Degree-type abbreviations that count as a program match when both sides mention them.
const PROGRAM_TYPE_MARKERS: [&str; 3] = ["ms", "mem", "mba"];

/// Profile attributes compared between an applicant and an alumnus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFactor {
    Cgpa,
    WorkExperience,
    BachelorsBranch,
    MastersProgram,
    TenthPercentage,
    TwelfthPercentage,
    CompanySector,
    Designation,
}

impl MatchFactor {
    pub const fn weight(self) -> f64 {
        match self {
            MatchFactor::Cgpa => 30.0,
            MatchFactor::WorkExperience => 25.0,
            MatchFactor::BachelorsBranch => 20.0,
            MatchFactor::MastersProgram => 10.0,
            MatchFactor::TenthPercentage
            | MatchFactor::TwelfthPercentage
            | MatchFactor::CompanySector
            | MatchFactor::Designation => 5.0,
        }
    }
}

/// Points earned on one factor, kept for audits and debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: MatchFactor,
    pub points: f64,
    pub notes: String,
}

/// Full trail behind a single record's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub components: Vec<ScoreComponent>,
    pub raw_points: f64,
    pub accumulated_weight: f64,
    pub score: u8,
}

/// Compatibility of `record` with `applicant`, 0 to 100.
pub fn score(applicant: &ApplicantProfile, record: &HistoricalRecord) -> u8 {
    score_breakdown(applicant, record).score
}

pub fn score_breakdown(applicant: &ApplicantProfile, record: &HistoricalRecord) -> ScoreBreakdown {
    let mut tally = Tally::default();

    let cgpa_diff = (applicant.cgpa - record.cgpa).abs();
    tally.add(
        MatchFactor::Cgpa,
        banded_proximity(cgpa_diff, 0.5, MatchFactor::Cgpa.weight()),
        format!("cgpa differs by {cgpa_diff:.2}"),
    );

    let experience_diff = (applicant.work_experience - record.work_experience).abs();
    tally.add(
        MatchFactor::WorkExperience,
        banded_proximity(experience_diff, 1.0, MatchFactor::WorkExperience.weight()),
        format!("work experience differs by {experience_diff:.1} years"),
    );

    let (branch_points, branch_notes) =
        branch_points(&applicant.bachelors_branch, &record.branch);
    tally.add(MatchFactor::BachelorsBranch, branch_points, branch_notes);

    let (program_points, program_notes) =
        program_points(&applicant.masters_programs, record.course.as_deref());
    tally.add(MatchFactor::MastersProgram, program_points, program_notes);

    for (factor, user, alumni) in [
        (
            MatchFactor::TenthPercentage,
            applicant.tenth_percentage,
            record.tenth_percentage,
        ),
        (
            MatchFactor::TwelfthPercentage,
            applicant.twelfth_percentage,
            record.twelfth_percentage,
        ),
    ] {
        if let (Some(user), Some(alumni)) = (provided_percentage(user), provided_percentage(alumni))
        {
            let diff = (user - alumni).abs();
            tally.add(
                factor,
                banded_proximity(diff, 5.0, factor.weight()),
                format!("percentage differs by {diff:.1}"),
            );
        }
    }

    if let (Some(user), Some(alumni)) = (
        provided_text(applicant.company_sector.as_deref()),
        provided_text(record.company_sector.as_deref()),
    ) {
        let same = user.to_lowercase() == alumni.to_lowercase();
        tally.add(
            MatchFactor::CompanySector,
            if same { MatchFactor::CompanySector.weight() } else { 0.0 },
            if same {
                format!("both in {alumni}")
            } else {
                format!("{user} vs {alumni}")
            },
        );
    }

    if let (Some(user), Some(alumni)) = (
        provided_text(applicant.designation.as_deref()),
        provided_text(record.designation.as_deref()),
    ) {
        let (points, notes) = designation_points(user, alumni);
        tally.add(MatchFactor::Designation, points, notes);
    }

    tally.finish()
}

#[derive(Default)]
struct Tally {
    components: Vec<ScoreComponent>,
    points: f64,
    weight: f64,
}

impl Tally {
    fn add(&mut self, factor: MatchFactor, points: f64, notes: String) {
        self.points += points;
        self.weight += factor.weight();
        self.components.push(ScoreComponent {
            factor,
            points,
            notes,
        });
    }

    fn finish(self) -> ScoreBreakdown {
        // Optional factors only rescale once they push the weight past 100.
        let scaled = if self.weight > 100.0 {
            self.points * 100.0 / self.weight
        } else {
            self.points
        };
        let score = scaled.round().clamp(0.0, f64::from(MAX_SCORE)) as u8;

        ScoreBreakdown {
            components: self.components,
            raw_points: self.points,
            accumulated_weight: self.weight,
            score,
        }
    }
}

/// Full points fall off linearly to zero across `band`; a second band of the
/// same width falls off from half points.
fn banded_proximity(diff: f64, band: f64, full_points: f64) -> f64 {
    if diff <= band {
        full_points * (1.0 - diff / band)
    } else if diff <= band * 2.0 {
        full_points / 2.0 * (1.0 - (diff - band) / band)
    } else {
        0.0
    }
}

fn provided_percentage(value: Option<f64>) -> Option<f64> {
    value.filter(|value| value.is_finite() && *value > 0.0)
}

fn provided_text(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn long_words(value: &str) -> impl Iterator<Item = &str> {
    value
        .split_whitespace()
        .filter(|word| word.chars().count() > 3)
}

fn branch_points(user_branch: &str, alumni_branch: &str) -> (f64, String) {
    let user = normalize_term(user_branch);
    let alumni = normalize_term(alumni_branch);

    if user.is_empty() || alumni.is_empty() {
        return (0.0, "branch missing".to_string());
    }
    if user == alumni {
        return (20.0, format!("same branch {alumni}"));
    }
    if is_substring_match(&user, &alumni) {
        return (15.0, format!("{user} overlaps {alumni}"));
    }
    if aliases_match(&user, &alumni) {
        return (15.0, format!("{user} is an alias of {alumni}"));
    }

    let alumni_words: Vec<&str> = alumni.split_whitespace().collect();
    if long_words(&user).any(|word| alumni_words.contains(&word)) {
        return (10.0, format!("{user} shares a word with {alumni}"));
    }

    (0.0, format!("{user} unrelated to {alumni}"))
}

fn program_points(programs: &[String], alumni_course: Option<&str>) -> (f64, String) {
    let programs: Vec<String> = programs
        .iter()
        .map(|program| normalize_term(program))
        .filter(|program| !program.is_empty())
        .collect();
    let course = alumni_course.map(normalize_term).unwrap_or_default();

    if programs.is_empty() || course.is_empty() {
        return (0.0, "no comparable program".to_string());
    }

    let matched = programs.iter().find(|program| {
        is_substring_match(program, &course)
            || aliases_match(program, &course)
            || PROGRAM_TYPE_MARKERS
                .iter()
                .any(|marker| program.contains(marker) && course.contains(marker))
    });

    match matched {
        Some(program) => (10.0, format!("{program} matches {course}")),
        None => (5.0, format!("admitted to {course}")),
    }
}

fn designation_points(user: &str, alumni: &str) -> (f64, String) {
    let user = user.to_lowercase();
    let alumni = alumni.to_lowercase();
    if user == alumni {
        return (5.0, format!("same designation {alumni}"));
    }

    let alumni_words: Vec<&str> = alumni.split_whitespace().collect();
    let shared: Vec<&str> = user
        .split_whitespace()
        .filter(|word| alumni_words.contains(word))
        .collect();

    match shared.as_slice() {
        words if words.len() >= 2 => (3.0, format!("{user} close to {alumni}")),
        [word] if word.chars().count() > 3 => (1.5, format!("{user} shares '{word}'")),
        _ => (0.0, format!("{user} unlike {alumni}")),
    }
}
