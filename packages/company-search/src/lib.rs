//! Natural-Language Company Search
//!
//! Turns a free-text query ("fintech startups in Bengaluru founded after
//! 2018") into a structured filter over a company directory, then applies
//! that filter to the in-memory collection.
//!
//! # Design
//!
//! - The set of allowed field values (the whitelist) is always projected
//!   from the live collection, never hard-coded
//! - The language model is asked first, and its answer is only trusted after
//!   validation against the whitelist
//! - When the model is missing, slow or wrong, a deterministic matcher
//!   answers instead. Search never fails.
//!
//! # Usage
//!
//! ```rust,ignore
//! use company_search::{apply_filter, Resolver};
//! use company_search::testing::MockModel;
//!
//! let resolver = Resolver::new(Arc::new(MockModel::new()));
//! let resolution = resolver.resolve("Companies in India", &companies).await;
//! let visible = apply_filter(&resolution.filter, &companies);
//! ```
//!
//! # Modules
//!
//! - [`types`] - Company records, filters and configuration
//! - [`whitelist`] - Allowed field values projected from the collection
//! - [`synonyms`] - Shared synonym and country-alias tables
//! - [`prompts`] - Model instruction template
//! - [`validate`] - Model output extraction and validation
//! - [`fallback`] - Offline heuristic resolution
//! - [`resolver`] - Model-then-fallback orchestration
//! - [`engine`] - Filter application
//! - [`session`] - Last-submitted-wins search state
//! - [`testing`] - Mock model for tests

pub mod ai;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod prompts;
pub mod resolver;
pub mod security;
pub mod session;
pub mod synonyms;
pub mod testing;
pub mod traits;
pub mod types;
pub mod validate;
pub mod whitelist;

pub use engine::{apply_filter, matches_structured, search_text, select};
pub use error::ResolveError;
pub use fallback::fallback_resolve;
pub use prompts::format_search_prompt;
pub use resolver::{Resolution, ResolvedVia, Resolver};
pub use security::{ModelCredentials, SecretString};
pub use session::SearchSession;
pub use traits::model::ModelClient;
pub use types::{
    company::CompanyRecord,
    config::{GenerationSettings, ResolverConfig},
    filter::{Field, StructuredFilter, YearRange},
};
pub use validate::validate_response;
pub use whitelist::{AvailableData, WhitelistSet};

#[cfg(feature = "gemini")]
pub use ai::GeminiModel;
