use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use med_guide_domain::entities::{MedicationRecord, MedicationSuggestion};
use med_guide_domain::presentation::MedicationSections;
use med_guide_domain::services::MedicationServiceError;

use crate::api::AppState;
use crate::entities::common::{ApiError, ErrorResponse};

pub const QUERY_TOO_SHORT: &str = "Search query must be at least 2 characters";
pub const NO_MATCHES: &str = "No medications found. Try a different search term.";
pub const RATE_LIMITED: &str = "Too many requests to the FDA database. Please try again later.";
pub const SEARCH_FAILED: &str = "Failed to fetch medication information from FDA database";
pub const DRUG_NOT_FOUND: &str = "Medication not found";
pub const DRUG_NOT_FOUND_UPSTREAM: &str = "Medication not found in FDA database";
pub const DETAIL_FAILED: &str = "Failed to fetch medication details from FDA database";
pub const SUGGESTIONS_FAILED: &str = "Failed to fetch medication suggestions from FDA database";

/// Query parameters for name lookups
#[derive(Debug, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct DrugQueryParams {
    /// Generic, brand or substance name (at least 2 characters)
    #[serde(default)]
    #[validate(length(min = 2, message = "Search query must be at least 2 characters"))]
    pub q: String,
}

impl DrugQueryParams {
    /// Unwrap the extracted query, turning malformed query strings into a 400
    fn from_query(query: Result<Query<Self>, QueryRejection>) -> Result<Self, ApiError> {
        let Query(params) = query.map_err(|rejection| {
            let message = rejection.body_text();
            warn!("Rejected query string: {}", message);
            ApiError::BadRequest(message)
        })?;
        Ok(params)
    }

    fn validated_term(&self) -> Result<&str, ApiError> {
        self.validate()
            .map_err(|_| ApiError::BadRequest(QUERY_TOO_SHORT.to_string()))?;
        Ok(&self.q)
    }
}

fn rate_limited() -> ApiError {
    warn!("openFDA rate limit passed through to client");
    ApiError::RateLimited(RATE_LIMITED.to_string())
}

fn map_search_error(err: MedicationServiceError) -> ApiError {
    match err {
        MedicationServiceError::InvalidQuery(_) => ApiError::BadRequest(QUERY_TOO_SHORT.to_string()),
        MedicationServiceError::NoMatches(_) => ApiError::NotFound(NO_MATCHES.to_string()),
        MedicationServiceError::RateLimited => rate_limited(),
        other => {
            error!("Error searching medications: {}", other);
            ApiError::Internal(SEARCH_FAILED.to_string())
        }
    }
}

fn map_detail_error(err: MedicationServiceError) -> ApiError {
    match err {
        MedicationServiceError::InvalidQuery(message) => ApiError::BadRequest(message),
        MedicationServiceError::NotFound(_) => ApiError::NotFound(DRUG_NOT_FOUND.to_string()),
        MedicationServiceError::NotFoundUpstream(_) => {
            ApiError::NotFound(DRUG_NOT_FOUND_UPSTREAM.to_string())
        }
        MedicationServiceError::RateLimited => rate_limited(),
        other => {
            error!("Error fetching medication details: {}", other);
            ApiError::Internal(DETAIL_FAILED.to_string())
        }
    }
}

fn map_suggestions_error(err: MedicationServiceError) -> ApiError {
    match err {
        MedicationServiceError::InvalidQuery(_) => ApiError::BadRequest(QUERY_TOO_SHORT.to_string()),
        MedicationServiceError::RateLimited => rate_limited(),
        other => {
            error!("Error fetching medication suggestions: {}", other);
            ApiError::Internal(SUGGESTIONS_FAILED.to_string())
        }
    }
}

/// Search drug labels by name
#[utoipa::path(
    get,
    path = "/api/drugs/search",
    params(DrugQueryParams),
    responses(
        (status = 200, description = "Matching medications", body = [MedicationRecord]),
        (status = 400, description = "Search term too short", body = ErrorResponse),
        (status = 404, description = "No medications matched", body = ErrorResponse),
        (status = 429, description = "openFDA rate limit reached", body = ErrorResponse),
        (status = 500, description = "openFDA request failed", body = ErrorResponse),
    ),
    tag = "drugs"
)]
#[instrument(skip(state))]
pub async fn search_drugs(
    State(state): State<AppState>,
    query: Result<Query<DrugQueryParams>, QueryRejection>,
) -> Result<Json<Vec<MedicationRecord>>, ApiError> {
    let params = DrugQueryParams::from_query(query)?;
    let term = params.validated_term()?;
    info!("Searching medications for '{}'", term);

    let records = state.medication.search(term).await.map_err(map_search_error)?;
    Ok(Json(records))
}

/// Autocomplete suggestions for a partial name
#[utoipa::path(
    get,
    path = "/api/drugs/suggestions",
    params(DrugQueryParams),
    responses(
        (status = 200, description = "Suggestions, possibly empty", body = [MedicationSuggestion]),
        (status = 400, description = "Search term too short", body = ErrorResponse),
        (status = 429, description = "openFDA rate limit reached", body = ErrorResponse),
        (status = 500, description = "openFDA request failed", body = ErrorResponse),
    ),
    tag = "drugs"
)]
#[instrument(skip(state))]
pub async fn drug_suggestions(
    State(state): State<AppState>,
    query: Result<Query<DrugQueryParams>, QueryRejection>,
) -> Result<Json<Vec<MedicationSuggestion>>, ApiError> {
    let params = DrugQueryParams::from_query(query)?;
    let term = params.validated_term()?;
    info!("Fetching suggestions for '{}'", term);

    let suggestions = state
        .medication
        .suggestions(term)
        .await
        .map_err(map_suggestions_error)?;
    Ok(Json(suggestions))
}

/// Get one drug label by id
#[utoipa::path(
    get,
    path = "/api/drugs/{id}",
    params(
        ("id" = String, Path, description = "openFDA label id")
    ),
    responses(
        (status = 200, description = "Medication found", body = MedicationRecord),
        (status = 404, description = "Medication not found", body = ErrorResponse),
        (status = 429, description = "openFDA rate limit reached", body = ErrorResponse),
        (status = 500, description = "openFDA request failed", body = ErrorResponse),
    ),
    tag = "drugs"
)]
#[instrument(skip(state))]
pub async fn get_drug(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MedicationRecord>, ApiError> {
    info!("Fetching medication {}", id);

    let record = state.medication.get_by_id(&id).await.map_err(map_detail_error)?;
    Ok(Json(record))
}

/// Plain-language sections for one drug label
#[utoipa::path(
    get,
    path = "/api/drugs/{id}/sections",
    params(
        ("id" = String, Path, description = "openFDA label id")
    ),
    responses(
        (status = 200, description = "Sections built", body = MedicationSections),
        (status = 404, description = "Medication not found", body = ErrorResponse),
        (status = 429, description = "openFDA rate limit reached", body = ErrorResponse),
        (status = 500, description = "openFDA request failed", body = ErrorResponse),
    ),
    tag = "drugs"
)]
#[instrument(skip(state))]
pub async fn get_drug_sections(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MedicationSections>, ApiError> {
    info!("Building sections for medication {}", id);

    let sections = state.medication.sections(&id).await.map_err(map_detail_error)?;
    Ok(Json(sections))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_validation() {
        let short = DrugQueryParams { q: "a".to_string() };
        assert_eq!(
            short.validated_term(),
            Err(ApiError::BadRequest(QUERY_TOO_SHORT.to_string()))
        );

        let missing = DrugQueryParams { q: String::new() };
        assert!(missing.validated_term().is_err());

        let ok = DrugQueryParams { q: "ad".to_string() };
        assert_eq!(ok.validated_term(), Ok("ad"));
    }

    #[test]
    fn test_detail_error_messages() {
        assert_eq!(
            map_detail_error(MedicationServiceError::NotFound("x".to_string())),
            ApiError::NotFound(DRUG_NOT_FOUND.to_string())
        );
        assert_eq!(
            map_detail_error(MedicationServiceError::NotFoundUpstream("x".to_string())),
            ApiError::NotFound(DRUG_NOT_FOUND_UPSTREAM.to_string())
        );
        assert_eq!(
            map_detail_error(MedicationServiceError::Upstream("timeout".to_string())),
            ApiError::Internal(DETAIL_FAILED.to_string())
        );
    }

    #[test]
    fn test_rate_limit_passes_through_everywhere() {
        let expected = ApiError::RateLimited(RATE_LIMITED.to_string());
        assert_eq!(map_search_error(MedicationServiceError::RateLimited), expected);
        assert_eq!(map_detail_error(MedicationServiceError::RateLimited), expected);
        assert_eq!(map_suggestions_error(MedicationServiceError::RateLimited), expected);
    }
}
