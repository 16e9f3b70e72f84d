// Label text processing: markup cleanup, paragraph splitting, plain-language
// substitutions and keyword classification
pub mod classify;
pub mod format;
pub mod glossary;

pub use classify::{DosageGroup, InteractionCategory, SideEffectSeverity, UsageCategory, WarningCategory};
pub use format::{first_present, first_text, format_paragraphs, sanitize_html};
pub use glossary::{glossary_entries, simplify_medical_terms, GlossaryEntry, MEDICAL_TERMS};
