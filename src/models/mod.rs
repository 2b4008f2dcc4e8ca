//! Core data models for the Salary Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod breakdown;
mod salary_input;
mod tax_bracket;

pub use breakdown::{
    AuditStep, AuditTrace, AuditWarning, InsuranceContributions, LawComparison, SalaryBreakdown,
};
pub use salary_input::{Region, SalaryInput, SalaryType, TaxYear};
pub use tax_bracket::{BracketContribution, TaxBracket};
