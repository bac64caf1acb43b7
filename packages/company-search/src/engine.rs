//! Applying a resolved filter to the company collection.
//!
//! All functions here are pure and preserve collection order.

use crate::types::company::CompanyRecord;
use crate::types::filter::{Field, StructuredFilter};

/// Select the records visible under `filter`.
///
/// Structured constraints (the four whitelist fields and the year range)
/// decide when present. Keywords gate the result when there are no
/// structured constraints, and otherwise serve as an OR-fallback over the
/// whole collection when the structured selection comes back empty.
pub fn select<'a>(filter: &StructuredFilter, companies: &'a [CompanyRecord]) -> Vec<&'a CompanyRecord> {
    let keywords = filter.effective_keywords();

    if !filter.has_structured_constraints() {
        if keywords.is_empty() {
            return companies.iter().collect();
        }
        return by_keywords(&keywords, companies);
    }

    let structured: Vec<&CompanyRecord> = companies
        .iter()
        .filter(|c| matches_structured(filter, c))
        .collect();

    if structured.is_empty() && !keywords.is_empty() {
        return by_keywords(&keywords, companies);
    }
    structured
}

/// Owned variant of [`select`].
pub fn apply_filter(filter: &StructuredFilter, companies: &[CompanyRecord]) -> Vec<CompanyRecord> {
    select(filter, companies).into_iter().cloned().collect()
}

/// Plain case-insensitive substring search over the search haystack.
///
/// A blank query returns everything.
pub fn search_text<'a>(query: &str, companies: &'a [CompanyRecord]) -> Vec<&'a CompanyRecord> {
    select(&StructuredFilter::keywords_only([query.trim()]), companies)
}

/// Whether `company` satisfies every structured constraint of `filter`.
///
/// Keywords are not considered.
pub fn matches_structured(filter: &StructuredFilter, company: &CompanyRecord) -> bool {
    let fields_match = Field::ALL.into_iter().all(|field| {
        let allowed = filter.values(field);
        allowed.is_empty()
            || field_value(company, field).is_some_and(|v| allowed.iter().any(|a| a == v))
    });

    let year_matches = match (filter.founded_year_range, company.founded) {
        (Some(range), Some(year)) => range.contains(year),
        _ => true,
    };

    fields_match && year_matches
}

fn field_value(company: &CompanyRecord, field: Field) -> Option<&str> {
    match field {
        Field::Category => company.category.as_deref(),
        Field::Country => company.country.as_deref(),
        Field::State => company.state.as_deref(),
        Field::City => company.city.as_deref(),
    }
}

fn by_keywords<'a>(keywords: &[String], companies: &'a [CompanyRecord]) -> Vec<&'a CompanyRecord> {
    companies
        .iter()
        .filter(|c| {
            let haystack = c.search_haystack();
            keywords.iter().any(|k| haystack.contains(k.as_str()))
        })
        .collect()
}
