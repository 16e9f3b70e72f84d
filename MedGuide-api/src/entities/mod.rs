// Public entities for the MedGuide API
// This module contains data structures that are shared across the application boundary

// Common entities for error handling
pub mod common;

pub use common::{ApiError, ErrorResponse};
