//! Loading the company directory from its raw JSON export.
//!
//! The export is an array of objects with capitalized keys (`Name`,
//! `Founded`, `Category`, ...). Entries that don't fit the shape are skipped
//! with a warning, the rest are sanitized and turned into [`CompanyRecord`]s.

use std::path::Path;

use anyhow::{Context, Result};
use company_search::CompanyRecord;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

/// Primary category used when an entry has none.
pub const DEFAULT_CATEGORY: &str = "Other";

lazy_static! {
    static ref SCRIPT_TAG: Regex = Regex::new(r"(?is)<script\b.*?</script>").expect("script regex");
    static ref JS_SCHEME: Regex = Regex::new(r"(?i)javascript:").expect("scheme regex");
    static ref INLINE_HANDLER: Regex = Regex::new(r"(?i)on\w+\s*=").expect("handler regex");
}

/// Ids come as numbers in older exports and strings in newer ones.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

/// `Founders` is a comma-separated string, occasionally already a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawList {
    Joined(String),
    Items(Vec<String>),
}

impl RawList {
    fn into_items(self) -> Vec<String> {
        match self {
            RawList::Joined(s) => split_commas(&s),
            RawList::Items(items) => items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawCompany {
    uuid: RawId,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Founded", default)]
    founded: Option<i32>,
    #[serde(rename = "Founders", default)]
    founders: Option<RawList>,
    #[serde(rename = "Website", default)]
    website: String,
    #[serde(rename = "Category", default)]
    category: String,
    #[serde(rename = "Tags", default)]
    tags: Vec<String>,
    #[serde(rename = "Country", default)]
    country: String,
    #[serde(rename = "State", default)]
    state: String,
    #[serde(rename = "City", default)]
    city: String,
    #[serde(rename = "Logo", default)]
    logo: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Linkedin Profile URL", default)]
    linkedin_profile: String,
}

/// Read and transform the directory file at `path`.
pub fn load_companies(path: impl AsRef<Path>) -> Result<Vec<CompanyRecord>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read companies file {}", path.display()))?;

    let companies = parse_companies(&raw)
        .with_context(|| format!("Invalid companies file {}", path.display()))?;

    info!(path = %path.display(), companies = companies.len(), "Company directory loaded");
    Ok(companies)
}

/// Parse the raw export. Fails only if the document isn't a JSON array.
pub fn parse_companies(raw: &str) -> Result<Vec<CompanyRecord>> {
    let entries: Vec<Value> =
        serde_json::from_str(raw).context("Expected a JSON array of companies")?;

    let companies = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<RawCompany>(entry) {
            Ok(raw) => Some(transform(raw)),
            Err(e) => {
                warn!(index, error = %e, "Skipping invalid company entry");
                None
            }
        })
        .collect();

    Ok(companies)
}

fn transform(raw: RawCompany) -> CompanyRecord {
    let id = match raw.uuid {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    };

    let mut parts = split_commas(&raw.category).into_iter();
    let category = parts.next().unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let mut tags: Vec<String> = parts.collect();
    for tag in raw.tags {
        let tag = tag.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }

    let founders = raw
        .founders
        .map(RawList::into_items)
        .unwrap_or_default()
        .into_iter()
        .map(|f| sanitize(&f))
        .collect::<Vec<_>>();

    let mut company = CompanyRecord::new(id, sanitize(&raw.name))
        .with_category(category)
        .with_tags(tags)
        .with_country(raw.country)
        .with_state(raw.state)
        .with_city(raw.city)
        .with_description(sanitize(&raw.description))
        .with_founders(founders)
        .with_website(with_scheme(&raw.website))
        .with_linkedin_profile(with_scheme(&raw.linkedin_profile))
        .with_logo_url(raw.logo);
    company.founded = raw.founded;
    company
}

fn split_commas(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip script tags, `javascript:` and inline event handlers.
pub fn sanitize(s: &str) -> String {
    let s = SCRIPT_TAG.replace_all(s, "");
    let s = JS_SCHEME.replace_all(&s, "");
    INLINE_HANDLER.replace_all(&s, "").into_owned()
}

/// Prefix `https://` unless the URL already has an http(s) scheme. Blank stays blank.
fn with_scheme(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() || url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}
