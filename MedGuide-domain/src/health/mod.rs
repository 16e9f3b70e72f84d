//! Domain layer health check functionality
//! Reports on the upstream label API and the response caches

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::services::MedicationServiceTrait;

/// System health status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone, PartialEq)]
pub struct HealthComponent {
    pub status: ComponentStatus,
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

impl SystemHealth {
    /// Derive the overall status from the worst component
    pub fn from_components(components: HashMap<String, HealthComponent>) -> Self {
        let statuses: Vec<ComponentStatus> = components.values().map(|c| c.status).collect();
        let status = if statuses.contains(&ComponentStatus::Unhealthy) {
            SystemStatus::Unhealthy
        } else if statuses.contains(&ComponentStatus::Degraded) {
            SystemStatus::Degraded
        } else {
            SystemStatus::Healthy
        };

        Self { status, components }
    }
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;
}

/// Health service reading state from the medication service
pub struct HealthService {
    medication: Arc<dyn MedicationServiceTrait>,
}

impl HealthService {
    pub fn new(medication: Arc<dyn MedicationServiceTrait>) -> Self {
        Self { medication }
    }

    fn api_component(&self) -> HealthComponent {
        match self.medication.last_upstream_failure() {
            None => HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
            Some(failure) => HealthComponent {
                status: ComponentStatus::Degraded,
                details: Some(format!("Last openFDA request failed: {}", failure)),
            },
        }
    }

    fn cache_component(&self) -> HealthComponent {
        let stats = self.medication.cache_stats();
        HealthComponent {
            status: ComponentStatus::Healthy,
            details: Some(format!(
                "{} search, {} detail, {} suggestion entries",
                stats.search_entries, stats.detail_entries, stats.suggestion_entries
            )),
        }
    }
}

#[async_trait]
impl HealthServiceTrait for HealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let components = vec![
            ("api".to_string(), self.api_component()),
            ("cache".to_string(), self.cache_component()),
        ]
        .into_iter()
        .collect();

        SystemHealth::from_components(components)
    }
}
