//! Salary Engine for Vietnam personal income tax
//!
//! This crate computes monthly salary breakdowns under Vietnamese personal
//! income tax law: compulsory insurance, family deductions, progressive tax,
//! net take-home pay, employer cost, and a comparison against the previous
//! law year. Net salaries are resolved back to gross by bounded iteration.
//!
//! ```
//! use salary_engine::calculation::compute_breakdown_builtin;
//! use salary_engine::models::{Region, SalaryInput, SalaryType, TaxYear};
//! use rust_decimal::Decimal;
//!
//! let breakdown = compute_breakdown_builtin(&SalaryInput {
//!     salary: Decimal::from(30_000_000),
//!     salary_type: SalaryType::Gross,
//!     region: Region::I,
//!     dependents: 0,
//!     year: TaxYear::Y2026,
//! })
//! .unwrap();
//!
//! assert_eq!(breakdown.taxable_income, Decimal::from(11_350_000));
//! assert!(breakdown.comparison.unwrap().tax_savings > Decimal::ZERO);
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
