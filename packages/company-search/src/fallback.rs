//! Deterministic, offline query resolution.
//!
//! Used whenever the model path is unavailable or its answer cannot be
//! trusted. Never fails.

use chrono::Datelike;
use lazy_static::lazy_static;
use regex::Regex;

use crate::synonyms::{CATEGORY_SYNONYMS, COUNTRY_ALIASES};
use crate::types::filter::{StructuredFilter, YearRange};
use crate::whitelist::WhitelistSet;

/// Lower bound used for open-ended "before YEAR" phrases.
pub const EARLIEST_FOUNDING_YEAR: i32 = 1800;

lazy_static! {
    // "between 2015 and 2020", "from 2015 to 2020"
    static ref YEAR_SPAN: Regex = Regex::new(
        r"\b(?:between\s+(\d{4})\s+and\s+(\d{4})|from\s+(\d{4})\s+(?:to|until|through)\s+(\d{4}))\b"
    ).expect("year span regex");

    // "2015-2020", only counted next to a founding cue
    static ref YEAR_SPAN_BARE: Regex =
        Regex::new(r"\b(\d{4})\s*(?:-|–|to)\s*(\d{4})\b").expect("bare year span regex");

    static ref FOUNDING_CUE: Regex =
        Regex::new(r"\b(?:founded|established|started|launched|incorporated)\b").expect("founding cue regex");

    // "since 2018", "after 2018", "before 2010"
    static ref YEAR_BOUND: Regex =
        Regex::new(r"\b(since|after|before)\s+(\d{4})\b").expect("year bound regex");

    // "founded in 2019", "established 2019", "in 2019"
    static ref YEAR_EXACT: Regex =
        Regex::new(r"\b(?:founded|established|started|launched|in)\s+(?:in\s+)?(\d{4})\b")
            .expect("year exact regex");
}

/// Resolve a query with keyword, synonym and substring heuristics.
///
/// - Synonym table hits add their whitelisted categories.
/// - Country alias hits add their whitelisted canonical countries.
/// - Whitelisted states and cities whose names occur in the query are added.
/// - An explicit year phrase sets the founding-year range.
/// - `keywords` is always the single, unmodified query.
pub fn fallback_resolve(query: &str, whitelist: &WhitelistSet) -> StructuredFilter {
    let lower = query.to_lowercase();

    let mut categories: Vec<String> = Vec::new();
    for entry in CATEGORY_SYNONYMS {
        if entry.mode.matches(&lower, entry.keyword) {
            for category in entry.resolve(whitelist) {
                push_unique(&mut categories, category);
            }
        }
    }

    let mut countries: Vec<String> = Vec::new();
    for entry in COUNTRY_ALIASES {
        if entry.mode.matches(&lower, entry.alias) {
            for country in entry.resolve(whitelist) {
                push_unique(&mut countries, country);
            }
        }
    }

    let states = named_in_query(&lower, whitelist.states.iter());
    let cities = named_in_query(&lower, whitelist.cities.iter());

    StructuredFilter {
        categories,
        countries,
        states,
        cities,
        founded_year_range: parse_year_range(&lower),
        keywords: vec![query.to_string()],
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

/// Whitelist values whose lower-cased name is a substring of the query.
fn named_in_query<'a>(lower: &str, names: impl Iterator<Item = &'a String>) -> Vec<String> {
    names
        .filter(|name| lower.contains(&name.to_lowercase()))
        .cloned()
        .collect()
}

/// Extract an explicit founding-year constraint from a lower-cased query.
///
/// Returns `None` when the query has no time phrase. Spans and exact years
/// must be plausible founding years (1800 up to the current year), so counts
/// like "1000-5000 employees" never become a range. Open upper bounds end
/// at the current year.
pub fn parse_year_range(lower: &str) -> Option<YearRange> {
    let current_year = chrono::Utc::now().year();
    let year = |m: Option<regex::Match<'_>>| m.and_then(|m| m.as_str().parse::<i32>().ok());
    let plausible = |y: i32| (EARLIEST_FOUNDING_YEAR..=current_year).contains(&y);

    if let Some(caps) = YEAR_SPAN.captures(lower) {
        let pair = [(1, 2), (3, 4)]
            .into_iter()
            .find_map(|(a, b)| Some((year(caps.get(a))?, year(caps.get(b))?)));
        if let Some((a, b)) = pair.filter(|(a, b)| plausible(*a) && plausible(*b)) {
            return Some(YearRange::new(a, b));
        }
    }

    if FOUNDING_CUE.is_match(lower) {
        let bare = YEAR_SPAN_BARE
            .captures_iter(lower)
            .filter_map(|caps| Some((year(caps.get(1))?, year(caps.get(2))?)))
            .find(|(a, b)| plausible(*a) && plausible(*b));
        if let Some((a, b)) = bare {
            return Some(YearRange::new(a, b));
        }
    }

    if let Some(caps) = YEAR_BOUND.captures(lower) {
        let y = year(caps.get(2))?;
        return match &caps[1] {
            "since" => Some(YearRange::new(y, current_year.max(y))),
            "after" => Some(YearRange::new(y + 1, current_year.max(y + 1))),
            _ => {
                let floor = if y - 1 >= EARLIEST_FOUNDING_YEAR { EARLIEST_FOUNDING_YEAR } else { 0 };
                Some(YearRange::new(floor, y - 1))
            }
        };
    }

    YEAR_EXACT
        .captures_iter(lower)
        .filter_map(|caps| year(caps.get(1)))
        .find(|y| plausible(*y))
        .map(|y| YearRange::new(y, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::company::CompanyRecord;

    fn whitelist() -> WhitelistSet {
        WhitelistSet::from_companies(&[
            CompanyRecord::new("1", "A")
                .with_category("Financial Services")
                .with_country("India")
                .with_state("Karnataka")
                .with_city("Bengaluru"),
            CompanyRecord::new("2", "B")
                .with_category("Healthcare & Medical Diagnostics")
                .with_country("US")
                .with_state("California")
                .with_city("San Francisco"),
            CompanyRecord::new("3", "C")
                .with_category("AI/ML")
                .with_country("US")
                .with_state("Indiana"),
            CompanyRecord::new("4", "D").with_category("Customer Service & Engagement"),
        ])
    }

    #[test]
    fn test_fintech_query() {
        let filter = fallback_resolve("Show me fintech companies", &whitelist());
        assert_eq!(
            filter,
            StructuredFilter {
                categories: vec!["Financial Services".into()],
                keywords: vec!["Show me fintech companies".into()],
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_country_query() {
        let filter = fallback_resolve("Companies in India", &whitelist());
        assert_eq!(
            filter,
            StructuredFilter {
                countries: vec!["India".into()],
                keywords: vec!["Companies in India".into()],
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_synonyms_map_to_whitelisted_categories_only() {
        let filter = fallback_resolve("medical and health startups", &whitelist());
        // "Healthcare" is a table target but not in this whitelist
        assert_eq!(filter.categories, vec!["Healthcare & Medical Diagnostics"]);

        let filter = fallback_resolve("customer support tools", &whitelist());
        assert_eq!(filter.categories, vec!["Customer Service & Engagement"]);
    }

    #[test]
    fn test_country_aliases_dedupe() {
        let filter = fallback_resolve("USA and America based, in the US", &whitelist());
        assert_eq!(filter.countries, vec!["US"]);
    }

    #[test]
    fn test_short_tokens_need_word_boundaries() {
        let filter = fallback_resolve("email tools for business", &whitelist());
        assert!(filter.categories.is_empty());
        assert!(filter.countries.is_empty());

        let filter = fallback_resolve("AI companies", &whitelist());
        assert_eq!(filter.categories, vec!["AI/ML"]);
    }

    #[test]
    fn test_states_and_cities_match_by_name() {
        let filter = fallback_resolve("Startups in San Francisco, California", &whitelist());
        assert_eq!(filter.states, vec!["California"]);
        assert_eq!(filter.cities, vec!["San Francisco"]);

        // Substring semantics: "Indiana" names the state, "india" alone does not
        let filter = fallback_resolve("companies in indiana", &whitelist());
        assert_eq!(filter.states, vec!["Indiana"]);
        assert!(filter.countries.is_empty());
    }

    #[test]
    fn test_keywords_always_hold_raw_query() {
        for query in ["  Fintech in Bengaluru ", "zzz", "AI/ML"] {
            let filter = fallback_resolve(query, &whitelist());
            assert_eq!(filter.keywords, vec![query.to_string()]);
        }
    }

    #[test]
    fn test_nothing_matches_leaves_keywords_only() {
        let filter = fallback_resolve("quantum widgets", &whitelist());
        assert_eq!(filter, StructuredFilter::keywords_only(["quantum widgets"]));
    }

    #[test]
    fn test_year_phrases() {
        let now = chrono::Utc::now().year();

        assert_eq!(parse_year_range("founded between 2015 and 2020"), Some(YearRange::new(2015, 2020)));
        assert_eq!(parse_year_range("from 2012 to 2014"), Some(YearRange::new(2012, 2014)));
        assert_eq!(parse_year_range("startups founded 2018-2021"), Some(YearRange::new(2018, 2021)));
        assert_eq!(parse_year_range("ai since 2019"), Some(YearRange::new(2019, now)));
        assert_eq!(parse_year_range("founded after 2019"), Some(YearRange::new(2020, now)));
        assert_eq!(parse_year_range("before 2010"), Some(YearRange::new(EARLIEST_FOUNDING_YEAR, 2009)));
        assert_eq!(parse_year_range("founded in 2016"), Some(YearRange::new(2016, 2016)));
        assert_eq!(parse_year_range("fintech companies"), None);
        assert_eq!(parse_year_range("top 100 companies"), None);
    }

    #[test]
    fn test_numbers_without_time_cue_are_not_years() {
        assert_eq!(parse_year_range("companies with 1000-5000 employees"), None);
        assert_eq!(parse_year_range("startups 2018-2021"), None);
        assert_eq!(parse_year_range("between 1000 and 5000 employees"), None);
        assert_eq!(parse_year_range("teams in 2500 offices"), None);
        assert_eq!(parse_year_range("founded in 1200"), None);
    }

    #[test]
    fn test_numeric_ranges_keep_keyword_gating() {
        let wl = whitelist();
        let companies = [
            CompanyRecord::new("1", "A").with_country("India").with_founded(2016),
            CompanyRecord::new("2", "B").with_country("US"),
        ];

        let filter = fallback_resolve("companies with 1000-5000 employees", &wl);
        assert_eq!(filter.founded_year_range, None);
        assert!(!filter.has_structured_constraints());
        assert!(crate::engine::apply_filter(&filter, &companies).is_empty());
    }

    #[test]
    fn test_before_early_year_is_open_ended() {
        assert_eq!(parse_year_range("founded before 1750"), Some(YearRange::new(0, 1749)));
        assert_eq!(parse_year_range("before 1801"), Some(YearRange::new(EARLIEST_FOUNDING_YEAR, 1800)));
    }

    #[test]
    fn test_year_phrase_in_full_resolution() {
        let filter = fallback_resolve("Fintech founded between 2015 and 2020", &whitelist());
        assert_eq!(filter.categories, vec!["Financial Services"]);
        assert_eq!(filter.founded_year_range, Some(YearRange::new(2015, 2020)));
    }
}
