// MedGuide Domain
// This crate contains the business logic for the MedGuide application

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Label text processing
pub mod text;

// Plain-language detail view
pub mod presentation;

// Health checks and system status
pub mod health;

// Testing utilities - only available with mock feature
#[cfg(feature = "mock")]
pub mod testing;
