//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use company_search::{CompanyRecord, GeminiModel, Resolver};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::routes::{companies_handler, health_handler, search_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
    pub companies: Arc<Vec<CompanyRecord>>,
}

impl AppState {
    pub fn new(resolver: Resolver, companies: Vec<CompanyRecord>) -> Self {
        Self {
            resolver,
            companies: Arc::new(companies),
        }
    }
}

/// Build the resolver described by `config`.
///
/// Without a Gemini key every query goes to the heuristic matcher.
pub fn build_resolver(config: &Config) -> Resolver {
    let resolver = match &config.gemini {
        Some(credentials) => {
            tracing::info!(model = %config.generation.model, "Gemini model configured");
            Resolver::new(Arc::new(GeminiModel::new(
                credentials.clone(),
                config.generation.clone(),
            )))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set, queries will use the heuristic matcher");
            Resolver::heuristic_only()
        }
    };

    resolver.with_config(config.resolver_config())
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    // CORS configuration - allow any origin, the API is read-only
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/search", post(search_handler))
        .route("/api/companies", get(companies_handler))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
