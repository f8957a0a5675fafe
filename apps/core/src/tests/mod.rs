//! Test Module
//!
//! Crate-level test suite for the TruthLens core.
//!
//! ## Test Categories
//! - `detector_tests`: end-to-end classification scenarios and properties
//! - `database_tests`: history store retention, ordering and analytics
//! - `remote_tests`: remote model over a mock HTTP server, hybrid fallback
//! - `integration_tests`: classifier, rule files and history together

pub mod detector_tests;
pub mod integration_tests;
