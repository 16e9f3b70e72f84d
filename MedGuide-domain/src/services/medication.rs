use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use med_guide_data::cache::{cache_key, TtlCache, DEFAULT_CACHE_TTL};
use med_guide_data::fda::{FdaError, LabelQuery, LabelSourceTrait, OpenFdaClient, OpenFdaConfig};
use med_guide_data::models::RawLabel;

use crate::entities::conversions::{convert_to_domain_record, convert_to_domain_suggestion};
use crate::entities::{MedicationRecord, MedicationSuggestion};
use crate::presentation::MedicationSections;

/// Shortest accepted search term, in characters
pub const MIN_QUERY_CHARS: usize = 2;

pub const DEFAULT_SEARCH_LIMIT: u32 = 10;
pub const DEFAULT_SUGGESTION_LIMIT: u32 = 5;

/// Medication service errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MedicationServiceError {
    /// Term too short or id missing
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Upstream reported no label matching the search term
    #[error("No medications matched: {0}")]
    NoMatches(String),

    /// Upstream answered successfully without a label for the id
    #[error("Medication not found: {0}")]
    NotFound(String),

    /// Upstream answered 404 for the id
    #[error("Medication not found upstream: {0}")]
    NotFoundUpstream(String),

    #[error("Upstream rate limit exceeded")]
    RateLimited,

    #[error("Upstream error: {0}")]
    Upstream(String),
}

/// Entry counts of the response caches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub search_entries: usize,
    pub detail_entries: usize,
    pub suggestion_entries: usize,
}

impl CacheStats {
    pub fn total(&self) -> usize {
        self.search_entries + self.detail_entries + self.suggestion_entries
    }
}

/// Tunables of the medication service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MedicationServiceConfig {
    pub search_limit: u32,
    pub suggestion_limit: u32,
    pub cache_ttl: Duration,
}

impl Default for MedicationServiceConfig {
    fn default() -> Self {
        Self {
            search_limit: DEFAULT_SEARCH_LIMIT,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// Trait for medication lookup operations
#[async_trait]
pub trait MedicationServiceTrait: Send + Sync {
    /// Search labels by generic, brand or substance name
    async fn search(&self, term: &str) -> Result<Vec<MedicationRecord>, MedicationServiceError>;

    /// Fetch one label by its document id
    async fn get_by_id(&self, id: &str) -> Result<MedicationRecord, MedicationServiceError>;

    /// Lightweight autocomplete entries for a partial name
    async fn suggestions(
        &self,
        term: &str,
    ) -> Result<Vec<MedicationSuggestion>, MedicationServiceError>;

    /// Plain-language detail view for one label
    async fn sections(&self, id: &str) -> Result<MedicationSections, MedicationServiceError> {
        let record = self.get_by_id(id).await?;
        Ok(MedicationSections::from_record(&record))
    }

    fn cache_stats(&self) -> CacheStats;

    /// Evict expired cache entries, returning how many expired since the last sweep
    fn purge_expired(&self) -> usize;

    /// Message of the most recent upstream failure, cleared by the next success
    fn last_upstream_failure(&self) -> Option<String>;
}

/// Check the minimum term length
pub fn validate_term(term: &str) -> Result<(), MedicationServiceError> {
    if term.chars().count() < MIN_QUERY_CHARS {
        return Err(MedicationServiceError::InvalidQuery(format!(
            "Search query must be at least {} characters",
            MIN_QUERY_CHARS
        )));
    }
    Ok(())
}

/// Medication service with cache-aside lookups against a label source
pub struct MedicationService<S: LabelSourceTrait> {
    source: S,
    config: MedicationServiceConfig,
    search_cache: TtlCache<Vec<MedicationRecord>>,
    detail_cache: TtlCache<MedicationRecord>,
    suggestion_cache: TtlCache<Vec<MedicationSuggestion>>,
    last_failure: Arc<RwLock<Option<String>>>,
}

impl<S: LabelSourceTrait> MedicationService<S> {
    /// Create a new medication service with default limits
    pub fn new(source: S) -> Self {
        Self::with_config(source, MedicationServiceConfig::default())
    }

    pub fn with_config(source: S, config: MedicationServiceConfig) -> Self {
        Self {
            source,
            config,
            search_cache: TtlCache::new(config.cache_ttl),
            detail_cache: TtlCache::new(config.cache_ttl),
            suggestion_cache: TtlCache::new(config.cache_ttl),
            last_failure: Arc::new(RwLock::new(None)),
        }
    }

    pub fn config(&self) -> MedicationServiceConfig {
        self.config
    }

    /// Call upstream and remember whether it failed
    async fn fetch(&self, query: &LabelQuery) -> Result<Vec<RawLabel>, FdaError> {
        let result = self.source.fetch_labels(query).await;
        let failure = match &result {
            // A 404 is a valid answer, not an outage
            Ok(_) | Err(FdaError::NotFound) => None,
            Err(err) => Some(err.to_string()),
        };
        if let Ok(mut last) = self.last_failure.write() {
            *last = failure;
        }
        result
    }

    /// Map upstream errors other than 404 to service errors
    fn map_fda_error(&self, err: FdaError) -> MedicationServiceError {
        match err {
            FdaError::RateLimited => {
                warn!("openFDA rate limit reached");
                MedicationServiceError::RateLimited
            }
            other => {
                warn!("openFDA request failed: {}", other);
                MedicationServiceError::Upstream(other.to_string())
            }
        }
    }
}

#[async_trait]
impl<S: LabelSourceTrait> MedicationServiceTrait for MedicationService<S> {
    #[instrument(skip(self))]
    async fn search(&self, term: &str) -> Result<Vec<MedicationRecord>, MedicationServiceError> {
        validate_term(term)?;

        let key = cache_key("search", term);
        if let Some(records) = self.search_cache.get(&key) {
            debug!("Serving search results from cache");
            return Ok(records);
        }

        let query = LabelQuery::by_name(term, self.config.search_limit);
        let labels = match self.fetch(&query).await {
            Ok(labels) => labels,
            Err(FdaError::NotFound) => {
                info!("No labels matched search term");
                return Err(MedicationServiceError::NoMatches(term.to_string()));
            }
            Err(err) => return Err(self.map_fda_error(err)),
        };

        let records: Vec<MedicationRecord> =
            labels.into_iter().map(convert_to_domain_record).collect();
        info!(count = records.len(), "Fetched search results from openFDA");

        self.search_cache.insert(key, records.clone());
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<MedicationRecord, MedicationServiceError> {
        if id.trim().is_empty() {
            return Err(MedicationServiceError::InvalidQuery(
                "Drug ID is required".to_string(),
            ));
        }

        // Ids are case-sensitive; the key keeps the id verbatim
        let key = format!("drug-{}", id);
        if let Some(record) = self.detail_cache.get(&key) {
            debug!("Serving label from cache");
            return Ok(record);
        }

        let labels = match self.fetch(&LabelQuery::by_id(id)).await {
            Ok(labels) => labels,
            Err(FdaError::NotFound) => {
                return Err(MedicationServiceError::NotFoundUpstream(id.to_string()))
            }
            Err(err) => return Err(self.map_fda_error(err)),
        };

        let record = labels
            .into_iter()
            .next()
            .map(convert_to_domain_record)
            .ok_or_else(|| MedicationServiceError::NotFound(id.to_string()))?;

        self.detail_cache.insert(key, record.clone());
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn suggestions(
        &self,
        term: &str,
    ) -> Result<Vec<MedicationSuggestion>, MedicationServiceError> {
        validate_term(term)?;

        let key = cache_key("suggestions", term);
        if let Some(suggestions) = self.suggestion_cache.get(&key) {
            debug!("Serving suggestions from cache");
            return Ok(suggestions);
        }

        let query = LabelQuery::by_name(term, self.config.suggestion_limit);
        let labels = match self.fetch(&query).await {
            Ok(labels) => labels,
            // No match is an empty list, and is not cached
            Err(FdaError::NotFound) => return Ok(Vec::new()),
            Err(err) => return Err(self.map_fda_error(err)),
        };

        let suggestions: Vec<MedicationSuggestion> =
            labels.into_iter().map(convert_to_domain_suggestion).collect();
        self.suggestion_cache.insert(key, suggestions.clone());
        Ok(suggestions)
    }

    fn cache_stats(&self) -> CacheStats {
        CacheStats {
            search_entries: self.search_cache.len(),
            detail_entries: self.detail_cache.len(),
            suggestion_entries: self.suggestion_cache.len(),
        }
    }

    fn purge_expired(&self) -> usize {
        self.search_cache.purge_expired()
            + self.detail_cache.purge_expired()
            + self.suggestion_cache.purge_expired()
    }

    fn last_upstream_failure(&self) -> Option<String> {
        self.last_failure.read().ok().and_then(|last| last.clone())
    }
}

/// Create a medication service backed by the live openFDA client
pub fn create_default_medication_service(
    fda_config: OpenFdaConfig,
    config: MedicationServiceConfig,
) -> Result<MedicationService<OpenFdaClient>, FdaError> {
    let client = OpenFdaClient::new(fda_config)?;
    Ok(MedicationService::with_config(client, config))
}

/// Create a mock medication service for testing
/// This function is only available when the mock feature is enabled
#[cfg(feature = "mock")]
pub fn create_mock_medication_service() -> crate::testing::MockMedicationService {
    crate::testing::MockMedicationService::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use med_guide_data::fda::testing::{sample_label, MockFailure, MockLabelSource};

    fn service_with(source: MockLabelSource) -> MedicationService<MockLabelSource> {
        MedicationService::new(source)
    }

    fn sample_source() -> MockLabelSource {
        MockLabelSource::with_labels(vec![
            sample_label("ibu-1", "IBUPROFEN", "Advil"),
            sample_label("ibu-2", "IBUPROFEN", "Motrin"),
            sample_label("apap-1", "ACETAMINOPHEN", "Tylenol"),
        ])
    }

    #[tokio::test]
    async fn test_search_rejects_short_terms() {
        let source = sample_source();
        let service = service_with(source.clone());

        for term in ["", "a"] {
            let result = service.search(term).await;
            assert!(matches!(result, Err(MedicationServiceError::InvalidQuery(_))));
        }
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_is_cached_case_insensitively() {
        let source = sample_source();
        let service = service_with(source.clone());

        let first = service.search("ibuprofen").await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].generic_name, "IBUPROFEN");

        let second = service.search("IBUPROFEN").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(source.call_count(), 1);
        assert_eq!(service.cache_stats().search_entries, 1);
    }

    #[tokio::test]
    async fn test_search_uses_configured_limit() {
        let source = sample_source();
        let config = MedicationServiceConfig {
            search_limit: 1,
            ..Default::default()
        };
        let service = MedicationService::with_config(source.clone(), config);

        let results = service.search("ibuprofen").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(source.calls_for(&LabelQuery::by_name("ibuprofen", 1)), 1);
    }

    #[tokio::test]
    async fn test_search_maps_upstream_errors() {
        let service = service_with(sample_source());
        assert_eq!(
            service.search("zzz").await,
            Err(MedicationServiceError::NoMatches("zzz".to_string()))
        );
        assert_eq!(service.cache_stats().search_entries, 0);

        let service = service_with(MockLabelSource::new().with_failure(MockFailure::RateLimited));
        assert_eq!(service.search("aspirin").await, Err(MedicationServiceError::RateLimited));

        let service = service_with(MockLabelSource::new().with_failure(MockFailure::Status(500)));
        assert!(matches!(
            service.search("aspirin").await,
            Err(MedicationServiceError::Upstream(_))
        ));
        assert!(service.last_upstream_failure().is_some());
    }

    #[tokio::test]
    async fn test_empty_search_success_is_cached() {
        let source = MockLabelSource::new().with_empty_success();
        let service = service_with(source.clone());

        assert!(service.search("nothing").await.unwrap().is_empty());
        assert!(service.search("nothing").await.unwrap().is_empty());
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_get_by_id_and_cache() {
        let source = sample_source();
        let service = service_with(source.clone());

        let record = service.get_by_id("apap-1").await.unwrap();
        assert_eq!(record.generic_name, "ACETAMINOPHEN");
        assert_eq!(record.id.as_deref(), Some("apap-1"));

        service.get_by_id("apap-1").await.unwrap();
        assert_eq!(source.call_count(), 1);
        assert_eq!(service.cache_stats().detail_entries, 1);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_variants() {
        let service = service_with(sample_source());
        assert_eq!(
            service.get_by_id("missing").await,
            Err(MedicationServiceError::NotFoundUpstream("missing".to_string()))
        );

        let service = service_with(MockLabelSource::new().with_empty_success());
        assert_eq!(
            service.get_by_id("missing").await,
            Err(MedicationServiceError::NotFound("missing".to_string()))
        );

        assert_eq!(
            service.get_by_id("  ").await,
            Err(MedicationServiceError::InvalidQuery("Drug ID is required".to_string()))
        );
    }

    #[tokio::test]
    async fn test_suggestions_not_found_is_empty_and_uncached() {
        let source = sample_source();
        let service = service_with(source.clone());

        assert!(service.suggestions("zzz").await.unwrap().is_empty());
        assert!(service.suggestions("zzz").await.unwrap().is_empty());
        assert_eq!(source.call_count(), 2);
        assert_eq!(service.cache_stats().suggestion_entries, 0);
        assert!(service.last_upstream_failure().is_none());
    }

    #[tokio::test]
    async fn test_suggestions_are_cached() {
        let source = sample_source();
        let service = service_with(source.clone());

        let suggestions = service.suggestions("Tyl").await.unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].brand_name, "Tylenol");
        assert_eq!(suggestions[0].purpose, "Pain reliever/fever reducer");

        service.suggestions("tyl").await.unwrap();
        assert_eq!(source.call_count(), 1);
        assert_eq!(source.calls_for(&LabelQuery::by_name("Tyl", DEFAULT_SUGGESTION_LIMIT)), 1);
    }

    #[tokio::test]
    async fn test_suggestions_rate_limited() {
        let service = service_with(MockLabelSource::new().with_failure(MockFailure::RateLimited));
        assert_eq!(service.suggestions("ad").await, Err(MedicationServiceError::RateLimited));
    }

    #[tokio::test]
    async fn test_sections_build_from_record() {
        let service = service_with(sample_source());
        let sections = service.sections("ibu-2").await.unwrap();
        assert_eq!(sections.id.as_deref(), Some("ibu-2"));
        assert_eq!(sections.overview.brand_names, "Motrin");
        assert_eq!(sections.overview.purpose, "Pain reliever/fever reducer");
        assert!(!sections.overview.prescription_only);
    }

    #[tokio::test]
    async fn test_purge_expired_after_ttl() {
        let config = MedicationServiceConfig {
            cache_ttl: Duration::from_millis(10),
            ..Default::default()
        };
        let source = sample_source();
        let service = MedicationService::with_config(source.clone(), config);

        service.search("advil").await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(service.purge_expired(), 1);
        assert_eq!(service.cache_stats().total(), 0);

        service.search("advil").await.unwrap();
        assert_eq!(source.call_count(), 2);
    }
}
