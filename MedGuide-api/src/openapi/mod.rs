use axum::Json;
use utoipa::OpenApi;

/// Serve the generated OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Drug label endpoints
        crate::api::handlers::drugs::search_drugs,
        crate::api::handlers::drugs::drug_suggestions,
        crate::api::handlers::drugs::get_drug,
        crate::api::handlers::drugs::get_drug_sections,

        // Glossary
        crate::api::handlers::glossary::get_glossary
    ),
    components(
        schemas(
            // Domain entities
            med_guide_domain::entities::MedicationRecord,
            med_guide_domain::entities::ActiveIngredient,
            med_guide_domain::entities::MedicationSuggestion,
            med_guide_domain::text::GlossaryEntry,

            // Detail view
            med_guide_domain::presentation::MedicationSections,
            med_guide_domain::presentation::OverviewSection,
            med_guide_domain::presentation::WarningsSection,
            med_guide_domain::presentation::UsageSection,
            med_guide_domain::presentation::DosageSection,
            med_guide_domain::presentation::SideEffectsSection,
            med_guide_domain::presentation::InteractionsSection,

            // API entities
            crate::entities::common::ErrorResponse,
            crate::api::handlers::drugs::DrugQueryParams,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "drugs", description = "openFDA drug label search and detail"),
        (name = "glossary", description = "Plain-language medical glossary")
    ),
    info(
        title = "MedGuide API",
        version = "0.1.0",
        description = "Plain-language drug label lookup backed by openFDA",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
