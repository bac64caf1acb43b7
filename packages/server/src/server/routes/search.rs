use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::HeaderValue,
    response::{IntoResponse, Response},
    Json,
};
use company_search::{AvailableData, WhitelistSet};
use serde::Deserialize;

use crate::server::app::AppState;
use crate::server::error::ApiError;

/// Header naming the path that produced the filter (`model` or `heuristic`).
pub const RESOLVED_VIA_HEADER: &str = "x-resolved-via";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub available_data: Option<AvailableData>,
}

/// Resolve a query against a caller-supplied whitelist.
///
/// Responds with the bare filter. Any body that lacks a non-blank `query`
/// or an `availableData` object is a 400.
pub async fn search_handler(
    Extension(state): Extension<AppState>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body.map_err(|e| {
        tracing::debug!(error = %e, "Rejected search body");
        ApiError::MissingInput
    })?;

    let (query, available) = match (request.query, request.available_data) {
        (Some(query), Some(available)) if !query.trim().is_empty() => (query, available),
        _ => return Err(ApiError::MissingInput),
    };

    let whitelist = WhitelistSet::from(available);
    let resolution = state.resolver.resolve_with_whitelist(&query, &whitelist).await;

    let mut response = Json(resolution.filter).into_response();
    response.headers_mut().insert(
        RESOLVED_VIA_HEADER,
        HeaderValue::from_static(resolution.via.label()),
    );
    Ok(response)
}
