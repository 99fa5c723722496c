use std::collections::HashMap;

use super::domain::{ApplicantProfile, HistoricalRecord, MatchedGroup, YearRange};
use super::policy::{screen_records, AdmittedYearWindow};
use super::scoring::score;

/// Individual records scoring below this never contribute to a group.
pub const RECORD_SCORE_FLOOR: u8 = 50;

/// A cleaned record with the score it earned against the applicant.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub record: HistoricalRecord,
    pub score: u8,
}

/// A ranked group together with its contributing records.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedMatch {
    pub group: MatchedGroup,
    pub members: Vec<ScoredRecord>,
}

/// Ranks destination programs for `applicant`.
pub fn aggregate(
    applicant: &ApplicantProfile,
    records: Vec<HistoricalRecord>,
    window: AdmittedYearWindow,
) -> Vec<MatchedGroup> {
    aggregate_with_members(applicant, records, window)
        .into_iter()
        .map(|grouped| grouped.group)
        .collect()
}

pub fn aggregate_with_members(
    applicant: &ApplicantProfile,
    records: Vec<HistoricalRecord>,
    window: AdmittedYearWindow,
) -> Vec<GroupedMatch> {
    let scored = screen_records(records, window)
        .into_iter()
        .map(|record| {
            let score = score(applicant, &record);
            ScoredRecord { record, score }
        })
        .filter(|scored| scored.score >= RECORD_SCORE_FLOOR);

    let mut grouped = group_by_destination(scored)
        .into_iter()
        .map(|members| GroupedMatch {
            group: summarize(&members),
            members,
        })
        .collect::<Vec<_>>();

    // Stable: equal keys keep first-seen order.
    grouped.sort_by(|a, b| {
        b.group
            .match_percentage
            .cmp(&a.group.match_percentage)
            .then_with(|| b.group.is_abroad().cmp(&a.group.is_abroad()))
    });

    grouped
}

/// Buckets by (university, course); a missing course is its own bucket.
fn group_by_destination<I>(scored: I) -> Vec<Vec<ScoredRecord>>
where
    I: IntoIterator<Item = ScoredRecord>,
{
    let mut index: HashMap<(String, Option<String>), usize> = HashMap::new();
    let mut groups: Vec<Vec<ScoredRecord>> = Vec::new();

    for entry in scored {
        let key = (
            entry.record.university.clone(),
            entry.record.course.clone(),
        );
        match index.get(&key) {
            Some(&position) => groups[position].push(entry),
            None => {
                index.insert(key, groups.len());
                groups.push(vec![entry]);
            }
        }
    }

    groups
}

fn summarize(members: &[ScoredRecord]) -> MatchedGroup {
    let first = &members[0].record;
    let total: u32 = members.iter().map(|member| u32::from(member.score)).sum();
    let average = (f64::from(total) / members.len() as f64).round() as u8;

    MatchedGroup {
        university: first.university.clone(),
        course: first.course.clone(),
        location: first.location.clone(),
        match_percentage: average,
        alumni_count: members.len(),
        admitted_year_range: YearRange::from_years(
            members.iter().filter_map(|member| member.record.admitted_year),
        ),
    }
}
