use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::client::LabelSourceTrait;
use super::errors::FdaError;
use super::query::LabelQuery;
use crate::models::label::RawLabel;

/// Canned failure a mock source answers with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    NotFound,
    RateLimited,
    Status(u16),
}

impl MockFailure {
    fn to_error(self) -> FdaError {
        match self {
            MockFailure::NotFound => FdaError::NotFound,
            MockFailure::RateLimited => FdaError::RateLimited,
            MockFailure::Status(code) => FdaError::Status(code),
        }
    }
}

/// Mock implementation of LabelSourceTrait for testing.
///
/// Name lookups match labels whose generic, brand or substance name contains
/// the term (case-insensitive); id lookups match on the label id. A lookup
/// with no match answers `NotFound`, like openFDA does.
#[derive(Debug, Clone, Default)]
pub struct MockLabelSource {
    labels: Arc<RwLock<Vec<RawLabel>>>,
    failure: Option<MockFailure>,
    empty_success: bool,
    calls: Arc<AtomicUsize>,
    queries: Arc<RwLock<HashMap<String, usize>>>,
}

impl MockLabelSource {
    /// Create a new empty mock source
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock source with predefined labels
    pub fn with_labels(labels: Vec<RawLabel>) -> Self {
        Self {
            labels: Arc::new(RwLock::new(labels)),
            ..Self::default()
        }
    }

    /// Configure the mock to fail every lookup
    pub fn with_failure(mut self, failure: MockFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Answer lookups without matches with an empty success instead of 404
    pub fn with_empty_success(mut self) -> Self {
        self.empty_success = true;
        self
    }

    /// Number of lookups made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of times a given query string was requested
    pub fn calls_for(&self, query: &LabelQuery) -> usize {
        self.queries
            .read()
            .map(|q| q.get(&query.to_query_string()).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    fn matches(label: &RawLabel, query: &LabelQuery) -> bool {
        match query {
            LabelQuery::ById(id) => label.id.as_deref() == Some(id.as_str()),
            LabelQuery::ByName { term, .. } => {
                let term = term.to_lowercase();
                label.openfda.as_ref().is_some_and(|openfda| {
                    openfda
                        .generic_name
                        .iter()
                        .chain(openfda.brand_name.iter())
                        .chain(openfda.substance_name.iter())
                        .any(|name| name.to_lowercase().contains(&term))
                })
            }
        }
    }
}

#[async_trait]
impl LabelSourceTrait for MockLabelSource {
    async fn fetch_labels(&self, query: &LabelQuery) -> Result<Vec<RawLabel>, FdaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut queries) = self.queries.write() {
            *queries.entry(query.to_query_string()).or_insert(0) += 1;
        }

        if let Some(failure) = self.failure {
            return Err(failure.to_error());
        }

        let labels = self
            .labels
            .read()
            .map_err(|e| FdaError::Decode(e.to_string()))?;
        let limit = query.limit().map(|l| l as usize).unwrap_or(usize::MAX);
        let found: Vec<RawLabel> = labels
            .iter()
            .filter(|label| Self::matches(label, query))
            .take(limit)
            .cloned()
            .collect();

        if found.is_empty() && !self.empty_success {
            return Err(FdaError::NotFound);
        }

        Ok(found)
    }
}

/// Build a minimal label for tests
pub fn sample_label(id: &str, generic_name: &str, brand_name: &str) -> RawLabel {
    RawLabel {
        id: Some(id.to_string()),
        set_id: Some(format!("set-{}", id)),
        effective_time: Some("20240101".to_string()),
        openfda: Some(crate::models::label::RawOpenFda {
            generic_name: vec![generic_name.to_string()],
            brand_name: vec![brand_name.to_string()],
            product_type: vec!["HUMAN OTC DRUG".to_string()],
            ..Default::default()
        }),
        purpose: vec!["Pain reliever/fever reducer".to_string()],
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_matches_names_and_counts_calls() {
        let source = MockLabelSource::with_labels(vec![
            sample_label("1", "IBUPROFEN", "Advil"),
            sample_label("2", "ACETAMINOPHEN", "Tylenol"),
        ]);

        let query = LabelQuery::by_name("advil", 10);
        let found = source.fetch_labels(&query).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.as_deref(), Some("1"));

        let err = source.fetch_labels(&LabelQuery::by_id("missing")).await.unwrap_err();
        assert!(matches!(err, FdaError::NotFound));

        assert_eq!(source.call_count(), 2);
        assert_eq!(source.calls_for(&query), 1);
    }

    #[tokio::test]
    async fn test_mock_failure_and_empty_success() {
        let failing = MockLabelSource::new().with_failure(MockFailure::RateLimited);
        let err = failing.fetch_labels(&LabelQuery::by_id("x")).await.unwrap_err();
        assert!(matches!(err, FdaError::RateLimited));

        let empty = MockLabelSource::new().with_empty_success();
        let found = empty.fetch_labels(&LabelQuery::by_name("none", 5)).await.unwrap();
        assert!(found.is_empty());
    }
}
