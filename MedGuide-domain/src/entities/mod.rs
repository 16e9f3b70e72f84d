// Domain entities and value objects
pub mod medication;
pub mod conversions;

// Re-export common types for easier imports
pub use medication::{ActiveIngredient, MedicationRecord, MedicationSuggestion};
