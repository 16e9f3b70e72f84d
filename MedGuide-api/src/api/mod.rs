pub mod handlers;
pub mod routes;

use std::sync::Arc;

use axum::Router;

use med_guide_domain::health::{HealthService, HealthServiceTrait};
use med_guide_domain::services::MedicationServiceTrait;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub medication: Arc<dyn MedicationServiceTrait>,
    pub health: Arc<dyn HealthServiceTrait>,
    /// Deployment environment reported by the health check
    pub environment: String,
}

impl AppState {
    /// Build state whose health report reads from the medication service
    pub fn new(medication: Arc<dyn MedicationServiceTrait>, environment: impl Into<String>) -> Self {
        let health = Arc::new(HealthService::new(medication.clone()));
        Self {
            medication,
            health,
            environment: environment.into(),
        }
    }

    /// Replace the health service
    pub fn with_health(mut self, health: Arc<dyn HealthServiceTrait>) -> Self {
        self.health = health;
        self
    }
}

/// Create the application router
pub fn create_application(state: AppState) -> Router {
    routes::create_app(state)
}
