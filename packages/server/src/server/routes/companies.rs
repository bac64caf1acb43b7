use axum::{
    extract::{Extension, Query},
    Json,
};
use company_search::{apply_filter, CompanyRecord, Resolution, StructuredFilter};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct CompaniesQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CompaniesResponse {
    pub filter: StructuredFilter,
    pub via: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_cause: Option<&'static str>,
    pub total: usize,
    pub companies: Vec<CompanyRecord>,
}

/// List the directory, narrowed by `q` when given.
pub async fn companies_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<CompaniesQuery>,
) -> Json<CompaniesResponse> {
    let resolution = match params.q.as_deref() {
        Some(q) => state.resolver.resolve(q, &state.companies).await,
        None => Resolution::empty(),
    };

    let companies = apply_filter(&resolution.filter, &state.companies);
    tracing::debug!(
        via = resolution.via.label(),
        matched = companies.len(),
        "Directory query served"
    );

    Json(CompaniesResponse {
        via: resolution.via.label(),
        fallback_cause: resolution.via.fallback_cause().map(|e| e.kind()),
        total: state.companies.len(),
        filter: resolution.filter,
        companies,
    })
}
