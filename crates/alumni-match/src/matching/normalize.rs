//! Comparison helpers for free-text branch and program names.
//!
//! Sheet values are typed by hand ("CS", "Comp Engg", "Computer Science &
//! Engineering"), so every comparison goes through [`normalize_term`] and the
//! alias table below.

use std::sync::OnceLock;

/// Canonical field name with the variants that should compare equal to it.
struct FieldAliases {
    canonical: &'static str,
    aliases: &'static [&'static str],
}

const FIELD_ALIASES: &[FieldAliases] = &[
    FieldAliases {
        canonical: "Computer Science",
        aliases: &[
            "CS",
            "CSE",
            "Computer Engineering",
            "Computer Science and Engineering",
            "Software Engineering",
            "Comp Engg",
        ],
    },
    FieldAliases {
        canonical: "Information Technology",
        aliases: &["IT", "Info Tech", "Information Systems", "MIS"],
    },
    FieldAliases {
        canonical: "Mechanical Engineering",
        aliases: &["Mechanical", "ME", "Mech"],
    },
    FieldAliases {
        canonical: "Civil Engineering",
        aliases: &["Civil", "CE"],
    },
    FieldAliases {
        canonical: "Artificial Intelligence",
        aliases: &["AI", "Machine Learning", "ML", "Data Science"],
    },
    FieldAliases {
        canonical: "Management Studies",
        aliases: &["Management", "MBA", "Business Administration"],
    },
    FieldAliases {
        canonical: "Electronics & Communication",
        aliases: &[
            "Electronics",
            "ECE",
            "EXTC",
            "Electronics Engineering",
            "Electronics and Telecommunication",
            "Communication",
        ],
    },
    FieldAliases {
        canonical: "Electrical Engineering",
        aliases: &["EE", "Electrical"],
    },
    FieldAliases {
        canonical: "Data Science",
        aliases: &["DS", "Machine Learning", "AI", "Analytics"],
    },
    FieldAliases {
        canonical: "MBA",
        aliases: &["Management", "Business Administration"],
    },
    FieldAliases {
        canonical: "Finance",
        aliases: &["Financial Engineering", "MBA"],
    },
    FieldAliases {
        canonical: "Engineering Management",
        aliases: &["MEM", "Management Science and Engineering"],
    },
    FieldAliases {
        canonical: "Chemical Engineering",
        aliases: &["Chemical", "Chem"],
    },
    FieldAliases {
        canonical: "Instrumentation Engineering",
        aliases: &["Instrumentation", "Instru"],
    },
    FieldAliases {
        canonical: "Production Engineering",
        aliases: &["Production", "Industrial Engineering"],
    },
];

/// One alias group after normalization: every variant as a token sequence.
type AliasGroup = Vec<Vec<String>>;

fn alias_groups() -> &'static [AliasGroup] {
    static GROUPS: OnceLock<Vec<AliasGroup>> = OnceLock::new();
    GROUPS.get_or_init(|| {
        FIELD_ALIASES
            .iter()
            .map(|entry| {
                std::iter::once(entry.canonical)
                    .chain(entry.aliases.iter().copied())
                    .map(tokens)
                    .collect()
            })
            .collect()
    })
}

/// Lower-cases, trims and collapses internal whitespace.
pub fn normalize_term(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn tokens(value: &str) -> Vec<String> {
    normalize_term(value)
        .split(|c: char| !c.is_alphanumeric() && c != '&')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn contains_sequence(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty()
        && haystack.len() >= needle.len()
        && haystack
            .windows(needle.len())
            .any(|window| window == needle)
}

/// Whether `a` and `b` contain each other, after normalization.
///
/// Empty terms never match; `"".contains` would otherwise match everything.
pub(crate) fn is_substring_match(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

/// Whether both terms belong to the same alias group.
///
/// A term belongs to a group when one of the group's variants appears in it as a
/// whole-word sequence, so "MS CS" belongs to Computer Science but "Physics" does
/// not pick up the "CS" alias.
pub fn aliases_match(user_term: &str, historical_term: &str) -> bool {
    let user = tokens(user_term);
    let historical = tokens(historical_term);
    if user.is_empty() || historical.is_empty() {
        return false;
    }

    alias_groups().iter().any(|group| {
        let user_in = group.iter().any(|variant| contains_sequence(&user, variant));
        user_in
            && group
                .iter()
                .any(|variant| contains_sequence(&historical, variant))
    })
}

/// Symmetric predicate: substring in either direction, else an alias hit.
pub fn fields_match(user_term: &str, historical_term: &str) -> bool {
    let user = normalize_term(user_term);
    let historical = normalize_term(historical_term);
    is_substring_match(&user, &historical) || aliases_match(&user, &historical)
}
