//! TruthLens core: an offline, multilingual content-authenticity classifier
//! and the collaborators around it (history store, remote model, CLI config).

pub mod config;
pub mod database;
pub mod detector;
pub mod error;
pub mod fs_manager;
pub mod models;
pub mod remote;
pub mod telemetry;

pub use detector::{AuthenticityAnalyzer, Classification, ClassificationResult, LanguageTag};
pub use error::AppError;

#[cfg(test)]
mod tests;
