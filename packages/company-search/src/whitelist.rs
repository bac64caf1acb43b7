//! Field values a resolved filter is allowed to contain.
//!
//! The whitelist is a projection of the current collection. It holds no state
//! of its own and is recomputed for every resolution.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{company::CompanyRecord, filter::Field};

/// Valid category/country/state/city values, deduplicated and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AvailableData")]
pub struct WhitelistSet {
    pub categories: BTreeSet<String>,
    pub countries: BTreeSet<String>,
    pub states: BTreeSet<String>,
    pub cities: BTreeSet<String>,
}

/// Wire shape of a whitelist (`availableData` in search requests).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailableData {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub cities: Vec<String>,
}

impl From<AvailableData> for WhitelistSet {
    fn from(data: AvailableData) -> Self {
        fn collect(values: Vec<String>) -> BTreeSet<String> {
            values.into_iter().filter(|v| !v.trim().is_empty()).collect()
        }

        Self {
            categories: collect(data.categories),
            countries: collect(data.countries),
            states: collect(data.states),
            cities: collect(data.cities),
        }
    }
}

impl WhitelistSet {
    /// Project the whitelist out of a company collection.
    pub fn from_companies(companies: &[CompanyRecord]) -> Self {
        let mut whitelist = Self::default();
        for company in companies {
            insert(&mut whitelist.categories, company.category.as_deref());
            insert(&mut whitelist.countries, company.country.as_deref());
            insert(&mut whitelist.states, company.state.as_deref());
            insert(&mut whitelist.cities, company.city.as_deref());
        }
        whitelist
    }

    pub fn values(&self, field: Field) -> &BTreeSet<String> {
        match field {
            Field::Category => &self.categories,
            Field::Country => &self.countries,
            Field::State => &self.states,
            Field::City => &self.cities,
        }
    }

    pub fn contains(&self, field: Field, value: &str) -> bool {
        self.values(field).contains(value)
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.values(*f).is_empty())
    }
}

fn insert(set: &mut BTreeSet<String>, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        if !set.contains(value) {
            set.insert(value.to_string());
        }
    }
}
