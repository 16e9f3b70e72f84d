// MedGuide-api lib.rs
//
// This is the main library file for the MedGuide API.
// It re-exports the APIs from the various modules.

// Public modules
pub mod api;
pub mod config;
pub mod entities;
pub mod openapi;
pub mod tasks;

pub use api::{create_application, AppState};
pub use config::AppConfig;
