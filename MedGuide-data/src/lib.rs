// MedGuide Data
// This crate handles data access and external service interactions

// openFDA drug-label client
pub mod fda;

// Time-bounded response cache
pub mod cache;

// Data storage models
pub mod models;
