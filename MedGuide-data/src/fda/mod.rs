// openFDA drug-label access
pub mod errors;
mod client;
mod query;

#[cfg(any(test, feature = "mock"))]
pub mod testing;

// Re-export commonly used types
pub use client::{
    LabelSourceTrait, OpenFdaClient, OpenFdaConfig, DEFAULT_FDA_API_BASE_URL,
    DEFAULT_REQUEST_TIMEOUT,
};
pub use errors::FdaError;
pub use query::LabelQuery;
