pub(crate) const DEFAULT_COUNTRY: &str = "USA";

const US_STATES: [(&str, &str); 10] = [
    ("California", "CA"),
    ("New York", "NY"),
    ("Texas", "TX"),
    ("Massachusetts", "MA"),
    ("Pennsylvania", "PA"),
    ("Illinois", "IL"),
    ("Washington", "WA"),
    ("Georgia", "GA"),
    ("Arizona", "AZ"),
    ("North Carolina", "NC"),
];

/// "<state>, <country>" when the university name names a known state, else the country.
pub(crate) fn derive_location(university: &str, country: Option<&str>) -> String {
    let country = country
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_COUNTRY);

    let words: Vec<&str> = university
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    for (state, abbreviation) in US_STATES {
        if university.contains(state) {
            return format!("{state}, {country}");
        }
        if words.contains(&abbreviation) {
            return format!("{abbreviation}, {country}");
        }
    }

    country.to_string()
}
