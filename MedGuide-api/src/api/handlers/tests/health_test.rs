#[cfg(test)]
mod health_tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use med_guide_domain::health::SystemStatus;
    use med_guide_domain::testing::{MockHealthService, MockMedicationService};

    use super::super::get_json;
    use crate::api::{create_application, AppState};

    fn state_with(health: MockHealthService) -> AppState {
        AppState::new(Arc::new(MockMedicationService::new()), "test")
            .with_health(Arc::new(health))
    }

    #[tokio::test]
    async fn test_health_ok() {
        let app = create_application(state_with(MockHealthService::new()));
        let (status, body) = get_json(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["environment"], "test");
        assert_eq!(body["components"]["api"]["status"], "ok");
        assert_eq!(body["components"]["cache"]["status"], "ok");
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    async fn test_health_degraded_is_503() {
        let app = create_application(state_with(MockHealthService::new().with_degraded_api()));
        let (status, body) = get_json(app, "/health").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["components"]["api"]["status"], "degraded");
        assert!(body["components"]["api"]["message"].is_string());
    }

    #[tokio::test]
    async fn test_health_unhealthy_is_500() {
        let health = MockHealthService::new().with_system_status(SystemStatus::Unhealthy);
        let app = create_application(state_with(health));
        let (status, body) = get_json(app, "/health").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_default_health_reads_medication_service() {
        let service = MockMedicationService::new();
        let app = create_application(AppState::new(Arc::new(service), "development"));
        let (status, body) = get_json(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["components"]["cache"]["message"],
            "0 search, 0 detail, 0 suggestion entries"
        );
    }
}
