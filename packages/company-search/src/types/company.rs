//! Company records as handed over by the ingestion layer.

use serde::{Deserialize, Serialize};

/// One entry of the company directory.
///
/// Location and category fields are either a non-empty string or `None`.
/// The `with_*` setters enforce this by mapping blank input to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub id: String,
    pub name: String,

    /// Primary label
    #[serde(default)]
    pub category: Option<String>,

    /// Secondary labels
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub founded: Option<i32>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub founders: Vec<String>,

    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub linkedin_profile: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl CompanyRecord {
    /// Create a record with only an id and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            tags: Vec::new(),
            country: None,
            state: None,
            city: None,
            founded: None,
            description: String::new(),
            founders: Vec::new(),
            website: None,
            linkedin_profile: None,
            logo_url: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = non_empty(category);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags
            .into_iter()
            .map(Into::into)
            .filter(|t: &String| !t.trim().is_empty())
            .collect();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = non_empty(country);
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = non_empty(state);
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = non_empty(city);
        self
    }

    pub fn with_founded(mut self, year: i32) -> Self {
        self.founded = Some(year);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_founders<I, S>(mut self, founders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.founders = founders.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = non_empty(website);
        self
    }

    pub fn with_linkedin_profile(mut self, url: impl Into<String>) -> Self {
        self.linkedin_profile = non_empty(url);
        self
    }

    pub fn with_logo_url(mut self, url: impl Into<String>) -> Self {
        self.logo_url = non_empty(url);
        self
    }

    /// Lower-cased text used for keyword matching.
    ///
    /// Covers name, description, category, tags and the three location
    /// fields, space separated.
    pub fn search_haystack(&self) -> String {
        let mut parts: Vec<&str> = vec![self.name.as_str(), self.description.as_str()];
        parts.extend(self.category.as_deref());
        parts.extend(self.tags.iter().map(String::as_str));
        parts.extend(self.city.as_deref());
        parts.extend(self.state.as_deref());
        parts.extend(self.country.as_deref());

        parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}
