//! Shared synonym and alias tables.
//!
//! The prompt builder renders these tables into the model instructions and
//! the heuristic matcher evaluates them directly, so both resolution paths
//! map "fintech", "USA" and friends the same way.

use crate::types::filter::Field;
use crate::whitelist::WhitelistSet;

/// How a table keyword is looked up in a lower-cased query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Anywhere in the query ("health" matches "healthcare").
    Substring,

    /// Only as a standalone word. Used for tokens short enough to occur
    /// inside unrelated words ("ai" in "email", "us" in "business").
    Word,
}

impl MatchMode {
    /// Whether `keyword` (lower-case) occurs in `query` (lower-case).
    pub fn matches(self, query: &str, keyword: &str) -> bool {
        match self {
            MatchMode::Substring => query.contains(keyword),
            MatchMode::Word => contains_word(query, keyword),
        }
    }
}

/// A query keyword and the canonical category names it stands for.
#[derive(Debug, Clone, Copy)]
pub struct CategorySynonym {
    pub keyword: &'static str,
    pub mode: MatchMode,
    pub categories: &'static [&'static str],
}

/// A country alias and the canonical spellings it may resolve to.
///
/// Several spellings are listed because collections disagree on the
/// canonical form ("US" vs "United States"). Whichever are present in the
/// whitelist are used.
#[derive(Debug, Clone, Copy)]
pub struct CountryAlias {
    pub alias: &'static str,
    pub mode: MatchMode,
    pub countries: &'static [&'static str],
}

const FINANCIAL: &[&str] = &["Financial Services"];
const HEALTH: &[&str] = &["Healthcare & Medical Diagnostics", "Healthcare"];
const MEDICAL: &[&str] = &["Healthcare & Medical Diagnostics"];
const MARKETING: &[&str] = &["Marketing, Sales & Customer Engagement"];
const CUSTOMER: &[&str] = &[
    "Marketing, Sales & Customer Engagement",
    "Customer Service & Engagement",
];
const AI_ML: &[&str] = &["AI/ML"];
const PEOPLE: &[&str] = &["Recruitment, HR, Training & EdTech"];
const SECURITY: &[&str] = &["Cybersecurity"];
const LANGUAGE: &[&str] = &["Language, Communication & Voice"];
const INDUSTRY: &[&str] = &["Industry, Robotics, and IoT"];

/// Domain keyword → canonical category table.
///
/// Keywords match as substrings, except two- and three-letter tokens, which
/// must stand alone as words so that "email" never implies AI/ML.
pub const CATEGORY_SYNONYMS: &[CategorySynonym] = &[
    CategorySynonym { keyword: "financial", mode: MatchMode::Substring, categories: FINANCIAL },
    CategorySynonym { keyword: "fintech", mode: MatchMode::Substring, categories: FINANCIAL },
    CategorySynonym { keyword: "finance", mode: MatchMode::Substring, categories: FINANCIAL },
    CategorySynonym { keyword: "healthcare", mode: MatchMode::Substring, categories: HEALTH },
    CategorySynonym { keyword: "health", mode: MatchMode::Substring, categories: HEALTH },
    CategorySynonym { keyword: "medical", mode: MatchMode::Substring, categories: MEDICAL },
    CategorySynonym { keyword: "marketing", mode: MatchMode::Substring, categories: MARKETING },
    CategorySynonym { keyword: "sales", mode: MatchMode::Substring, categories: MARKETING },
    CategorySynonym { keyword: "customer", mode: MatchMode::Substring, categories: CUSTOMER },
    CategorySynonym { keyword: "ai", mode: MatchMode::Word, categories: AI_ML },
    CategorySynonym { keyword: "ml", mode: MatchMode::Word, categories: AI_ML },
    CategorySynonym { keyword: "artificial intelligence", mode: MatchMode::Substring, categories: AI_ML },
    CategorySynonym { keyword: "machine learning", mode: MatchMode::Substring, categories: AI_ML },
    CategorySynonym { keyword: "edtech", mode: MatchMode::Substring, categories: PEOPLE },
    CategorySynonym { keyword: "education", mode: MatchMode::Substring, categories: PEOPLE },
    CategorySynonym { keyword: "hr", mode: MatchMode::Word, categories: PEOPLE },
    CategorySynonym { keyword: "recruitment", mode: MatchMode::Substring, categories: PEOPLE },
    CategorySynonym { keyword: "hiring", mode: MatchMode::Substring, categories: PEOPLE },
    CategorySynonym { keyword: "cybersecurity", mode: MatchMode::Substring, categories: SECURITY },
    CategorySynonym { keyword: "security", mode: MatchMode::Substring, categories: SECURITY },
    CategorySynonym { keyword: "language", mode: MatchMode::Substring, categories: LANGUAGE },
    CategorySynonym { keyword: "communication", mode: MatchMode::Substring, categories: LANGUAGE },
    CategorySynonym { keyword: "voice", mode: MatchMode::Substring, categories: LANGUAGE },
    CategorySynonym { keyword: "industry", mode: MatchMode::Substring, categories: INDUSTRY },
    CategorySynonym { keyword: "robotics", mode: MatchMode::Substring, categories: INDUSTRY },
    CategorySynonym { keyword: "iot", mode: MatchMode::Word, categories: INDUSTRY },
];

const UNITED_STATES: &[&str] = &["US", "USA", "United States", "United States of America"];
const INDIA: &[&str] = &["India"];
const UNITED_KINGDOM: &[&str] = &["UK", "United Kingdom"];

/// Country alias → canonical country table.
///
/// Short aliases and "india"/"indian" match only as whole words ("us" inside
/// "business", "india" inside "indiana").
pub const COUNTRY_ALIASES: &[CountryAlias] = &[
    CountryAlias { alias: "us", mode: MatchMode::Word, countries: UNITED_STATES },
    CountryAlias { alias: "usa", mode: MatchMode::Word, countries: UNITED_STATES },
    CountryAlias { alias: "u.s.", mode: MatchMode::Substring, countries: UNITED_STATES },
    CountryAlias { alias: "united states", mode: MatchMode::Substring, countries: UNITED_STATES },
    CountryAlias { alias: "america", mode: MatchMode::Substring, countries: UNITED_STATES },
    CountryAlias { alias: "india", mode: MatchMode::Word, countries: INDIA },
    CountryAlias { alias: "indian", mode: MatchMode::Word, countries: INDIA },
    CountryAlias { alias: "uk", mode: MatchMode::Word, countries: UNITED_KINGDOM },
    CountryAlias { alias: "united kingdom", mode: MatchMode::Substring, countries: UNITED_KINGDOM },
    CountryAlias { alias: "britain", mode: MatchMode::Substring, countries: UNITED_KINGDOM },
];

impl CategorySynonym {
    /// Mapped categories that exist in the whitelist, in table order.
    pub fn resolve<'w>(&self, whitelist: &'w WhitelistSet) -> Vec<&'w str> {
        whitelisted(self.categories, whitelist, Field::Category)
    }
}

impl CountryAlias {
    /// Canonical spellings that exist in the whitelist, in table order.
    pub fn resolve<'w>(&self, whitelist: &'w WhitelistSet) -> Vec<&'w str> {
        whitelisted(self.countries, whitelist, Field::Country)
    }
}

fn whitelisted<'w>(
    candidates: &[&str],
    whitelist: &'w WhitelistSet,
    field: Field,
) -> Vec<&'w str> {
    candidates
        .iter()
        .filter_map(|c| whitelist.values(field).get(*c).map(String::as_str))
        .collect()
}

/// Whole-word containment: `word` must not touch alphanumerics on either side.
pub fn contains_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }

    haystack.match_indices(word).any(|(start, _)| {
        let end = start + word.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}
