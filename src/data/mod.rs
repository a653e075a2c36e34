//! # Data Module
//!
//! Review rows, dataset loading and text cleanup.

pub mod loader;
mod preprocessing;
mod review;

pub use loader::{load_dataset, write_json};
pub use preprocessing::TextPreprocessor;
pub use review::{Dataset, ReviewRow, UserSummary, UserType};
