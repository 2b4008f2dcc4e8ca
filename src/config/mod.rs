//! Configuration loading and management for the Salary Engine.
//!
//! This module provides the immutable rule set the engine computes against:
//! insurance rates, net to gross resolver settings, and one tax law per year
//! (deductions, bracket table, comparison year, regional minimum wages).
//!
//! # Example
//!
//! ```
//! use salary_engine::config::ConfigLoader;
//! use salary_engine::models::TaxYear;
//!
//! let loader = ConfigLoader::builtin().unwrap();
//! assert_eq!(loader.law(TaxYear::Y2025).unwrap().brackets.len(), 7);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, GrossResolverConfig, InsuranceConfig, InsuranceRates, TaxLawConfig};
