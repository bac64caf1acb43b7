//! Query resolution: model first, heuristics when the model can't answer.
//!
//! ```text
//! query ──► empty? ──yes──► EmptyQuery (no filtering)
//!             │no
//!             ▼
//!        whitelist = project(collection)
//!             │
//!   model configured? ──no──► fallback_resolve ──► Heuristic { ModelUnavailable }
//!             │yes
//!             ▼
//!   invoke (deadline) ─► validate ──ok──► Model
//!             │ any error
//!             ▼
//!   fallback_resolve ──► Heuristic { cause }
//! ```
//!
//! No path returns an error to the caller.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{ResolveError, Result};
use crate::fallback::fallback_resolve;
use crate::prompts::format_search_prompt;
use crate::traits::model::ModelClient;
use crate::types::{company::CompanyRecord, config::ResolverConfig, filter::StructuredFilter};
use crate::validate::validate_response;
use crate::whitelist::WhitelistSet;

/// Which path produced a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedVia {
    /// The model answered and its output validated.
    Model,

    /// The heuristic matcher answered. `cause` says why the model didn't.
    Heuristic { cause: ResolveError },

    /// Blank query; nothing was run.
    EmptyQuery,
}

impl ResolvedVia {
    pub fn label(&self) -> &'static str {
        match self {
            ResolvedVia::Model => "model",
            ResolvedVia::Heuristic { .. } => "heuristic",
            ResolvedVia::EmptyQuery => "empty_query",
        }
    }

    pub fn fallback_cause(&self) -> Option<&ResolveError> {
        match self {
            ResolvedVia::Heuristic { cause } => Some(cause),
            _ => None,
        }
    }
}

/// Outcome of one resolution. Both model and heuristic outcomes are valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub filter: StructuredFilter,
    pub via: ResolvedVia,
}

impl Resolution {
    pub fn empty() -> Self {
        Self {
            filter: StructuredFilter::empty(),
            via: ResolvedVia::EmptyQuery,
        }
    }
}

/// Turns free-text queries into structured filters.
#[derive(Clone)]
pub struct Resolver {
    model: Option<Arc<dyn ModelClient>>,
    config: ResolverConfig,
}

impl Resolver {
    /// Resolver that tries `model` before falling back.
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self {
            model: Some(model),
            config: ResolverConfig::default(),
        }
    }

    /// Resolver with no model. Every query goes to the heuristic matcher.
    pub fn heuristic_only() -> Self {
        Self {
            model: None,
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Whether a resolution would attempt the model call.
    pub fn model_configured(&self) -> bool {
        self.model.as_ref().is_some_and(|m| m.is_configured())
    }

    /// Resolve `query` against the current collection.
    pub async fn resolve(&self, query: &str, companies: &[CompanyRecord]) -> Resolution {
        if query.trim().is_empty() {
            return Resolution::empty();
        }

        let whitelist = WhitelistSet::from_companies(companies);
        self.resolve_with_whitelist(query, &whitelist).await
    }

    /// Resolve `query` against an explicit whitelist.
    pub async fn resolve_with_whitelist(&self, query: &str, whitelist: &WhitelistSet) -> Resolution {
        if query.trim().is_empty() {
            return Resolution::empty();
        }

        let model = match &self.model {
            Some(model) if model.is_configured() => model,
            _ => {
                debug!("No model configured, using heuristic matcher");
                return heuristic(query, whitelist, ResolveError::ModelUnavailable);
            }
        };

        match self.resolve_via_model(model.as_ref(), query, whitelist).await {
            Ok(filter) => {
                info!(
                    categories = filter.categories.len(),
                    countries = filter.countries.len(),
                    states = filter.states.len(),
                    cities = filter.cities.len(),
                    keywords = filter.keywords.len(),
                    "Query resolved by model"
                );
                Resolution {
                    filter,
                    via: ResolvedVia::Model,
                }
            }
            Err(cause) => {
                warn!(cause = cause.kind(), error = %cause, "Model resolution failed, using heuristic matcher");
                heuristic(query, whitelist, cause)
            }
        }
    }

    async fn resolve_via_model(
        &self,
        model: &dyn ModelClient,
        query: &str,
        whitelist: &WhitelistSet,
    ) -> Result<StructuredFilter> {
        let prompt = format_search_prompt(query, whitelist);

        let raw = tokio::time::timeout(self.config.model_timeout, model.invoke(&prompt))
            .await
            .map_err(|_| {
                ResolveError::ModelCallFailed(format!(
                    "timed out after {}ms",
                    self.config.model_timeout.as_millis()
                ))
            })??;

        validate_response(&raw, whitelist)
    }
}

fn heuristic(query: &str, whitelist: &WhitelistSet, cause: ResolveError) -> Resolution {
    Resolution {
        filter: fallback_resolve(query, whitelist),
        via: ResolvedVia::Heuristic { cause },
    }
}
