use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use serde::Serialize;
#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Medical terms and their plain-language equivalents, in application order
pub const MEDICAL_TERMS: [(&str, &str); 22] = [
    ("hypertension", "high blood pressure"),
    ("hypotension", "low blood pressure"),
    ("myocardial infarction", "heart attack"),
    ("angina pectoris", "chest pain"),
    ("dyspnea", "shortness of breath"),
    ("edema", "swelling"),
    ("pruritus", "itching"),
    ("erythema", "skin redness"),
    ("tachycardia", "rapid heart rate"),
    ("bradycardia", "slow heart rate"),
    ("syncope", "fainting"),
    ("vertigo", "dizziness"),
    ("nausea", "feeling sick"),
    ("emesis", "vomiting"),
    ("pyrexia", "fever"),
    ("anorexia", "loss of appetite"),
    ("insomnia", "trouble sleeping"),
    ("somnolence", "drowsiness"),
    ("dyspepsia", "indigestion"),
    ("arthralgia", "joint pain"),
    ("myalgia", "muscle pain"),
    ("cephalalgia", "headache"),
];

struct Replacement {
    pattern: Regex,
    text: String,
}

static REPLACEMENTS: Lazy<Vec<Replacement>> = Lazy::new(|| {
    MEDICAL_TERMS
        .iter()
        .map(|(medical, plain)| Replacement {
            pattern: Regex::new(&format!(r"(?i)\b{}\b", regex::escape(medical)))
                .expect("glossary terms are valid patterns"),
            text: format!("{} ({})", plain, medical),
        })
        .collect()
});

/// Replace each whole-word, case-insensitive medical term with
/// `<plain> (<medical>)`.
///
/// Terms are applied in declaration order. Text without any listed term is
/// returned unchanged.
pub fn simplify_medical_terms(text: &str) -> String {
    let mut simplified = text.to_string();
    for replacement in REPLACEMENTS.iter() {
        if replacement.pattern.is_match(&simplified) {
            simplified = replacement
                .pattern
                .replace_all(&simplified, NoExpand(&replacement.text))
                .into_owned();
        }
    }
    simplified
}

/// One glossary row as served to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct GlossaryEntry {
    pub medical: String,
    pub plain: String,
}

/// The full glossary, in application order
pub fn glossary_entries() -> Vec<GlossaryEntry> {
    MEDICAL_TERMS
        .iter()
        .map(|(medical, plain)| GlossaryEntry {
            medical: medical.to_string(),
            plain: plain.to_string(),
        })
        .collect()
}
