//! LLM prompt for turning a search query into a structured filter.

use std::collections::BTreeSet;

use crate::synonyms::{CATEGORY_SYNONYMS, COUNTRY_ALIASES};
use crate::whitelist::WhitelistSet;

/// Instruction template. Placeholders are substituted by [`format_search_prompt`].
pub const SEARCH_PROMPT: &str = r#"You are an AI assistant helping users search through a database of AI/tech companies.

User query: "{query}"

Available data to filter by:
- Categories: {categories}
- Countries: {countries}
- States: {states}
- Cities: {cities}

Please analyze the user's query and return a JSON object with the following structure:
{
  "categories": ["exact category names that match the query"],
  "countries": ["exact country names that match the query"],
  "states": ["exact state names that match the query"],
  "cities": ["exact city names that match the query"],
  "foundedYearRange": [startYear, endYear] or null,
  "keywords": ["relevant keywords for general search"]
}

Rules:
1. Only include values that appear exactly in the available data lists above. Never invent categories or locations.
2. {synonym_rule}
3. {country_rule}
4. Only include foundedYearRange if the query explicitly mentions a time constraint (e.g. "founded after 2018"). Otherwise use null.
5. If nothing in the query maps cleanly to the lists, leave those fields empty and put the important words in "keywords".

Return only valid JSON, no additional text.

Examples:
- "Show me fintech companies" → {"categories": ["Financial Services"], "countries": [], "states": [], "cities": [], "foundedYearRange": null, "keywords": ["fintech", "financial"]}
- "Companies in India" → {"categories": [], "countries": ["India"], "states": [], "cities": [], "foundedYearRange": null, "keywords": []}
- "Healthcare startups in California" → {"categories": ["Healthcare & Medical Diagnostics"], "countries": [], "states": ["California"], "cities": [], "foundedYearRange": null, "keywords": ["healthcare", "startups"]}
- "Robotics companies founded between 2015 and 2020" → {"categories": ["Industry, Robotics, and IoT"], "countries": [], "states": [], "cities": [], "foundedYearRange": [2015, 2020], "keywords": ["robotics"]}"#;

const GENERIC_SYNONYM_RULE: &str = "Be flexible with synonyms: map industry shorthand (e.g. \"fintech\", \"healthcare\") to the matching category name from the list.";

const GENERIC_COUNTRY_RULE: &str = "Be smart about location variations: map country abbreviations and demonyms (e.g. \"US\", \"USA\", \"America\") to the matching country name from the list.";

/// Render the search prompt for a query against a whitelist.
///
/// Whitelist lists are rendered in full. Synonym and alias rules list only
/// the table entries whose targets exist in this whitelist, which is
/// exactly what the heuristic matcher would apply.
pub fn format_search_prompt(query: &str, whitelist: &WhitelistSet) -> String {
    // Query goes last so that text inside it is never treated as a placeholder.
    SEARCH_PROMPT
        .replace("{categories}", &join(&whitelist.categories))
        .replace("{countries}", &join(&whitelist.countries))
        .replace("{states}", &join(&whitelist.states))
        .replace("{cities}", &join(&whitelist.cities))
        .replace("{synonym_rule}", &synonym_rule(whitelist))
        .replace("{country_rule}", &country_rule(whitelist))
        .replace("{query}", query)
}

fn join(values: &BTreeSet<String>) -> String {
    if values.is_empty() {
        return "(none)".to_string();
    }
    values.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

fn synonym_rule(whitelist: &WhitelistSet) -> String {
    let mappings: Vec<String> = CATEGORY_SYNONYMS
        .iter()
        .filter_map(|entry| {
            let targets = entry.resolve(whitelist);
            (!targets.is_empty()).then(|| mapping(entry.keyword, &targets))
        })
        .collect();

    if mappings.is_empty() {
        GENERIC_SYNONYM_RULE.to_string()
    } else {
        format!(
            "Be flexible with synonyms. Apply these mappings: {}",
            mappings.join("; ")
        )
    }
}

fn country_rule(whitelist: &WhitelistSet) -> String {
    let mappings: Vec<String> = COUNTRY_ALIASES
        .iter()
        .filter_map(|entry| {
            let targets = entry.resolve(whitelist);
            (!targets.is_empty()).then(|| mapping(entry.alias, &targets))
        })
        .collect();

    if mappings.is_empty() {
        GENERIC_COUNTRY_RULE.to_string()
    } else {
        format!(
            "Normalize country aliases. Apply these mappings: {}",
            mappings.join("; ")
        )
    }
}

fn mapping(keyword: &str, targets: &[&str]) -> String {
    let targets: Vec<String> = targets.iter().map(|t| format!("\"{}\"", t)).collect();
    format!("\"{}\" → {}", keyword, targets.join(" / "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::company::CompanyRecord;

    fn whitelist() -> WhitelistSet {
        WhitelistSet::from_companies(&[
            CompanyRecord::new("1", "A")
                .with_category("Financial Services")
                .with_country("US")
                .with_state("California")
                .with_city("San Francisco"),
            CompanyRecord::new("2", "B")
                .with_category("Cybersecurity")
                .with_country("India")
                .with_city("Pune"),
        ])
    }

    #[test]
    fn test_prompt_embeds_query_and_full_lists() {
        let prompt = format_search_prompt("fintech in the bay area", &whitelist());

        assert!(prompt.contains("User query: \"fintech in the bay area\""));
        assert!(prompt.contains("- Categories: Cybersecurity, Financial Services"));
        assert!(prompt.contains("- Countries: India, US"));
        assert!(prompt.contains("- States: California"));
        assert!(prompt.contains("- Cities: Pune, San Francisco"));
        assert!(prompt.contains("\"foundedYearRange\": [startYear, endYear] or null"));
        for placeholder in ["{query}", "{categories}", "{synonym_rule}", "{country_rule}"] {
            assert!(!prompt.contains(placeholder), "unreplaced {}", placeholder);
        }
    }

    #[test]
    fn test_rules_render_shared_tables() {
        let prompt = format_search_prompt("anything", &whitelist());

        assert!(prompt.contains("\"fintech\" → \"Financial Services\""));
        assert!(prompt.contains("\"security\" → \"Cybersecurity\""));
        assert!(prompt.contains("\"usa\" → \"US\""));
        assert!(prompt.contains("\"indian\" → \"India\""));
        // Not in this whitelist
        assert!(!prompt.contains("\"voice\" →"));
        assert!(!prompt.contains("\"uk\" →"));
    }

    #[test]
    fn test_has_five_rules_and_examples() {
        let prompt = format_search_prompt("x", &whitelist());
        for rule in ["1. ", "2. ", "3. ", "4. ", "5. "] {
            assert!(prompt.contains(rule), "missing rule {}", rule);
        }
        assert!(prompt.matches(" → {").count() >= 3);
    }

    #[test]
    fn test_empty_whitelist_uses_generic_rules() {
        let prompt = format_search_prompt("x", &WhitelistSet::default());
        assert!(prompt.contains("- Categories: (none)"));
        assert!(prompt.contains(GENERIC_SYNONYM_RULE));
        assert!(prompt.contains(GENERIC_COUNTRY_RULE));
    }

    #[test]
    fn test_placeholder_text_in_query_is_literal() {
        let prompt = format_search_prompt("{categories}", &whitelist());
        assert!(prompt.contains("User query: \"{categories}\""));
    }

    #[test]
    fn test_is_deterministic() {
        assert_eq!(
            format_search_prompt("ai in pune", &whitelist()),
            format_search_prompt("ai in pune", &whitelist())
        );
    }
}
