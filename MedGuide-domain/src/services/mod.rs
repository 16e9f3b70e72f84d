pub mod medication;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and factory functions
pub use medication::{
    create_default_medication_service, validate_term, CacheStats, MedicationService,
    MedicationServiceConfig, MedicationServiceError, MedicationServiceTrait,
    DEFAULT_SEARCH_LIMIT, DEFAULT_SUGGESTION_LIMIT, MIN_QUERY_CHARS,
};

// Re-export mock service factory functions when the mock feature is enabled
#[cfg(feature = "mock")]
pub use medication::create_mock_medication_service;
