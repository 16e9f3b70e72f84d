pub mod drugs;
pub mod glossary;
pub mod health;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use drugs::{drug_suggestions, get_drug, get_drug_sections, search_drugs};
pub use glossary::get_glossary;
pub use health::health_check;
