//! The structured filter produced by query resolution.

use serde::{Deserialize, Serialize};

/// The four whitelist-backed fields of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Category,
    Country,
    State,
    City,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Category, Field::Country, Field::State, Field::City];

    /// JSON key of this field in the wire format.
    pub fn key(self) -> &'static str {
        match self {
            Field::Category => "categories",
            Field::Country => "countries",
            Field::State => "states",
            Field::City => "cities",
        }
    }
}

/// Inclusive founding-year range. Always ordered (`min <= max`).
///
/// Serialized as a two-element array `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct YearRange {
    min: i32,
    max: i32,
}

impl YearRange {
    /// Build a range from two bounds in either order.
    pub fn new(a: i32, b: i32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

impl From<(i32, i32)> for YearRange {
    fn from((a, b): (i32, i32)) -> Self {
        Self::new(a, b)
    }
}

impl From<YearRange> for (i32, i32) {
    fn from(range: YearRange) -> Self {
        (range.min, range.max)
    }
}

/// Validated, schema-conformant result of resolving a query.
///
/// Whitelist fields only ever hold values present in the collection the
/// filter was resolved against. A filter is built once per search and then
/// only replaced, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredFilter {
    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default)]
    pub countries: Vec<String>,

    #[serde(default)]
    pub states: Vec<String>,

    #[serde(default)]
    pub cities: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founded_year_range: Option<YearRange>,

    /// Free-text tokens for case-insensitive substring search
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl StructuredFilter {
    /// The "no filtering" filter.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A filter that only carries keywords.
    pub fn keywords_only<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn values(&self, field: Field) -> &[String] {
        match field {
            Field::Category => &self.categories,
            Field::Country => &self.countries,
            Field::State => &self.states,
            Field::City => &self.cities,
        }
    }

    /// True when any whitelist field or the year range constrains records.
    pub fn has_structured_constraints(&self) -> bool {
        Field::ALL.iter().any(|f| !self.values(*f).is_empty()) || self.founded_year_range.is_some()
    }

    /// Keywords that actually constrain anything (trimmed, lower-cased, non-blank).
    pub fn effective_keywords(&self) -> Vec<String> {
        self.keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect()
    }

    /// True when applying this filter is the identity.
    pub fn is_empty(&self) -> bool {
        !self.has_structured_constraints() && self.effective_keywords().is_empty()
    }
}
