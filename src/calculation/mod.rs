//! Calculation logic for the Salary Engine.
//!
//! This module contains the calculation functions for a monthly salary,
//! including family deductions, employee and employer insurance, progressive
//! income tax over a bracket table, net to gross resolution, comparison
//! against an alternate law year, and the breakdown assembler that runs them
//! in order.

mod breakdown;
mod comparison;
mod deductions;
mod gross_resolver;
mod insurance;
mod progressive_tax;

pub use breakdown::{
    BELOW_MINIMUM_WAGE, GROSS_NOT_CONVERGED, compute_breakdown, compute_breakdown_builtin,
};
pub use comparison::{ComparisonResult, compare_with_law};
pub use deductions::{DeductionResult, calculate_deductions, taxable_income};
pub use gross_resolver::{GrossResolution, forward_net_salary, resolve_gross};
pub use insurance::{InsuranceParty, InsuranceResult, calculate_insurance, insurance_contributions};
pub use progressive_tax::{PitResult, TaxEvaluation, calculate_pit, evaluate_tax};
