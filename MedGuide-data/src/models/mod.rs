// Data storage models
pub mod label;

pub use label::{LabelResponse, RawLabel, RawOpenFda};
