use axum::Json;
use tracing::{debug, instrument};

use med_guide_domain::text::{glossary_entries, GlossaryEntry};

/// Medical terms and the plain-language wording substituted for them
#[utoipa::path(
    get,
    path = "/api/glossary",
    responses(
        (status = 200, description = "Glossary in substitution order", body = [GlossaryEntry])
    ),
    tag = "glossary"
)]
#[instrument]
pub async fn get_glossary() -> Json<Vec<GlossaryEntry>> {
    debug!("Glossary requested");
    Json(glossary_entries())
}
