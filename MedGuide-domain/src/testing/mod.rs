// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

// Re-export useful test mocks from the data layer
pub use med_guide_data::fda::testing::{sample_label, MockFailure, MockLabelSource};

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::entities::{MedicationRecord, MedicationSuggestion};
use crate::health::{ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth, SystemStatus};
use crate::services::{validate_term, CacheStats, MedicationServiceError, MedicationServiceTrait};

/// Mock implementation of the MedicationServiceTrait for testing.
///
/// Records are matched by case-insensitive substring of generic or brand
/// name. A configured failure is returned by every lookup after term
/// validation.
#[derive(Clone, Default)]
pub struct MockMedicationService {
    records: Arc<RwLock<Vec<MedicationRecord>>>,
    failure: Option<MedicationServiceError>,
    calls: Arc<AtomicUsize>,
}

impl MockMedicationService {
    /// Create a new empty mock service
    pub fn new() -> Self {
        Self::default()
    }

    /// Add pre-defined records to the mock
    pub fn with_records(self, records: Vec<MedicationRecord>) -> Self {
        if let Ok(mut stored) = self.records.write() {
            stored.extend(records);
        }
        self
    }

    /// Configure the mock to fail every lookup
    pub fn with_failure(mut self, failure: MedicationServiceError) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Number of lookups that passed validation
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), MedicationServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }

    fn matching(&self, term: &str) -> Vec<MedicationRecord> {
        let term = term.to_lowercase();
        self.records
            .read()
            .map(|records| {
                records
                    .iter()
                    .filter(|r| {
                        r.generic_name.to_lowercase().contains(&term)
                            || r.brand_name.to_lowercase().contains(&term)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl MedicationServiceTrait for MockMedicationService {
    async fn search(&self, term: &str) -> Result<Vec<MedicationRecord>, MedicationServiceError> {
        validate_term(term)?;
        self.check_failure()?;

        let found = self.matching(term);
        if found.is_empty() {
            return Err(MedicationServiceError::NoMatches(term.to_string()));
        }
        Ok(found)
    }

    async fn get_by_id(&self, id: &str) -> Result<MedicationRecord, MedicationServiceError> {
        if id.trim().is_empty() {
            return Err(MedicationServiceError::InvalidQuery("Drug ID is required".to_string()));
        }
        self.check_failure()?;

        self.records
            .read()
            .ok()
            .and_then(|records| records.iter().find(|r| r.id.as_deref() == Some(id)).cloned())
            .ok_or_else(|| MedicationServiceError::NotFoundUpstream(id.to_string()))
    }

    async fn suggestions(
        &self,
        term: &str,
    ) -> Result<Vec<MedicationSuggestion>, MedicationServiceError> {
        validate_term(term)?;
        self.check_failure()?;

        Ok(self
            .matching(term)
            .into_iter()
            .map(|r| MedicationSuggestion {
                id: r.id,
                generic_name: r.generic_name,
                brand_name: r.brand_name,
                purpose: r.purpose.into_iter().next().unwrap_or_default(),
            })
            .collect())
    }

    fn cache_stats(&self) -> CacheStats {
        CacheStats::default()
    }

    fn purge_expired(&self) -> usize {
        0
    }

    fn last_upstream_failure(&self) -> Option<String> {
        self.failure
            .as_ref()
            .filter(|f| {
                matches!(
                    f,
                    MedicationServiceError::RateLimited | MedicationServiceError::Upstream(_)
                )
            })
            .map(|f| f.to_string())
    }
}

/// Mock implementation of health services for testing system health
#[derive(Debug, Clone)]
pub struct MockHealthService {
    system_status: SystemStatus,
    components: HashMap<String, HealthComponent>,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    /// Create a healthy mock health service
    pub fn new() -> Self {
        let healthy = HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        };
        Self {
            system_status: SystemStatus::Healthy,
            components: vec![
                ("api".to_string(), healthy.clone()),
                ("cache".to_string(), healthy),
            ]
            .into_iter()
            .collect(),
        }
    }

    /// Mark the upstream API as degraded
    pub fn with_degraded_api(mut self) -> Self {
        self.system_status = SystemStatus::Degraded;
        self.components.insert(
            "api".to_string(),
            HealthComponent {
                status: ComponentStatus::Degraded,
                details: Some("Last openFDA request failed".to_string()),
            },
        );
        self
    }

    /// Override the overall status
    pub fn with_system_status(mut self, status: SystemStatus) -> Self {
        self.system_status = status;
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        SystemHealth {
            status: self.system_status,
            components: self.components.clone(),
        }
    }
}
