//! Coercion of raw model text into a whitelisted [`StructuredFilter`].
//!
//! Only syntactic conformance is enforced. Values outside the whitelist are
//! silently dropped, wrong-typed fields are treated as absent.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::error::{ResolveError, Result};
use crate::types::filter::{Field, StructuredFilter, YearRange};
use crate::whitelist::WhitelistSet;

/// Locate the first balanced `{...}` span in `text`.
///
/// Braces inside JSON string literals are ignored, so prose before or after
/// the object (or a markdown fence around it) does not matter.
pub fn extract_json_object(text: &str) -> Option<&str> {
    text.match_indices('{')
        .find_map(|(start, _)| balanced_end(&text[start..]).map(|end| &text[start..start + end]))
}

/// Byte length of the balanced object starting at `text[0] == '{'`.
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse and validate a model response against the whitelist.
///
/// Fails only with [`ResolveError::NoJsonFound`] or
/// [`ResolveError::MalformedJson`]. A well-formed object with nothing usable
/// in it yields an empty filter.
pub fn validate_response(raw: &str, whitelist: &WhitelistSet) -> Result<StructuredFilter> {
    let span = extract_json_object(raw).ok_or(ResolveError::NoJsonFound)?;

    let parsed: Map<String, Value> =
        serde_json::from_str(span).map_err(|e| ResolveError::MalformedJson(e.to_string()))?;

    let field = |f: Field| whitelisted(parsed.get(f.key()), whitelist.values(f));

    Ok(StructuredFilter {
        categories: field(Field::Category),
        countries: field(Field::Country),
        states: field(Field::State),
        cities: field(Field::City),
        founded_year_range: year_range(parsed.get("foundedYearRange")),
        keywords: keywords(parsed.get("keywords")),
    })
}

/// String elements of `value` that are whitelist members, first occurrence kept.
fn whitelisted(value: Option<&Value>, allowed: &BTreeSet<String>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    let mut out: Vec<String> = Vec::new();
    for item in items {
        if let Value::String(s) = item {
            if allowed.contains(s) && !out.contains(s) {
                out.push(s.clone());
            }
        }
    }
    out
}

/// A two-element numeric array, else `None`.
fn year_range(value: Option<&Value>) -> Option<YearRange> {
    match value {
        Some(Value::Array(items)) if items.len() == 2 => {
            let a = as_year(&items[0])?;
            let b = as_year(&items[1])?;
            Some(YearRange::new(a, b))
        }
        _ => None,
    }
}

fn as_year(value: &Value) -> Option<i32> {
    if let Some(year) = value.as_i64() {
        return i32::try_from(year).ok();
    }
    let year = value.as_f64()?;
    if year.is_finite() && year.abs() <= i32::MAX as f64 {
        Some(year.trunc() as i32)
    } else {
        None
    }
}

/// String elements of an array, blanks dropped. Anything else is empty.
fn keywords(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
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
                .with_state("California"),
        ])
    }

    #[test]
    fn test_extract_json_object_skips_prose() {
        let text = "Sure! Here is the filter:\n```json\n{\"a\": {\"b\": 1}}\n```\nHope that helps {";
        assert_eq!(extract_json_object(text), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_extract_json_object_ignores_braces_in_strings() {
        let text = r#"{"keywords": ["}", "{x"], "cities": []} trailing }"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"keywords": ["}", "{x"], "cities": []}"#)
        );

        let escaped = r#"{"keywords": ["say \"}\" loudly"]}"#;
        assert_eq!(extract_json_object(escaped), Some(escaped));
    }

    #[test]
    fn test_extract_json_object_takes_first_balanced_span() {
        assert_eq!(extract_json_object("{ never closed {\"a\":1}"), Some("{\"a\":1}"));
        assert_eq!(extract_json_object("{\"a\":1} {\"b\":2}"), Some("{\"a\":1}"));
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("{\"truncated\": [1, 2"), None);
    }

    #[test]
    fn test_validate_keeps_only_whitelisted_strings() {
        let raw = r#"{
            "categories": ["Financial Services", "Crypto", 42, "Financial Services"],
            "countries": ["india", "India"],
            "states": "Karnataka",
            "cities": ["Bengaluru", null],
            "foundedYearRange": null,
            "keywords": ["fintech", 3, "  "]
        }"#;

        let filter = validate_response(raw, &whitelist()).unwrap();
        assert_eq!(filter.categories, vec!["Financial Services"]);
        assert_eq!(filter.countries, vec!["India"]);
        assert!(filter.states.is_empty());
        assert_eq!(filter.cities, vec!["Bengaluru"]);
        assert_eq!(filter.founded_year_range, None);
        assert_eq!(filter.keywords, vec!["fintech"]);
    }

    #[test]
    fn test_year_range_shapes() {
        let wl = whitelist();
        let range = |json: &str| {
            validate_response(&format!(r#"{{"foundedYearRange": {}}}"#, json), &wl)
                .unwrap()
                .founded_year_range
        };

        assert_eq!(range("[2015, 2020]"), Some(YearRange::new(2015, 2020)));
        assert_eq!(range("[2020, 2015]"), Some(YearRange::new(2015, 2020)));
        assert_eq!(range("[2015.0, 2020.9]"), Some(YearRange::new(2015, 2020)));
        assert_eq!(range("[2015]"), None);
        assert_eq!(range("[2015, 2016, 2017]"), None);
        assert_eq!(range("[\"2015\", 2020]"), None);
        assert_eq!(range("\"2015-2020\""), None);
    }

    #[test]
    fn test_empty_object_is_valid_empty_filter() {
        let filter = validate_response("{}", &whitelist()).unwrap();
        assert_eq!(filter, StructuredFilter::empty());
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            validate_response("I could not find anything.", &whitelist()),
            Err(ResolveError::NoJsonFound)
        );
        assert!(matches!(
            validate_response("{categories: [Financial Services]}", &whitelist()),
            Err(ResolveError::MalformedJson(_))
        ));
    }
}
