//! Salary breakdown models for the Salary Engine.
//!
//! This module contains the [`SalaryBreakdown`] type and its associated
//! structures that capture every derived amount of a salary calculation,
//! including insurance contributions, the per-bracket tax split, the
//! cross-law comparison, and an audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BracketContribution, SalaryInput, TaxYear};

/// Compulsory insurance contributions computed from gross salary.
///
/// Used for both the employee's withholdings and the employer's
/// contributions; only the rates differ.
///
/// # Example
///
/// ```
/// use salary_engine::models::InsuranceContributions;
/// use rust_decimal::Decimal;
///
/// let employee = InsuranceContributions {
///     social: Decimal::from(800_000),
///     health: Decimal::from(150_000),
///     unemployment: Decimal::from(100_000),
///     total: Decimal::from(1_050_000),
/// };
/// assert_eq!(employee.social + employee.health + employee.unemployment, employee.total);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceContributions {
    /// Social insurance.
    pub social: Decimal,
    /// Health insurance.
    pub health: Decimal,
    /// Unemployment insurance.
    pub unemployment: Decimal,
    /// Sum of the three components.
    pub total: Decimal,
}

impl InsuranceContributions {
    /// Returns a contribution set where every component is zero.
    pub fn zero() -> Self {
        Self {
            social: Decimal::ZERO,
            health: Decimal::ZERO,
            unemployment: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// Tax outcome of the same taxable income under an alternate law year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawComparison {
    /// The law year compared against.
    pub compared_year: TaxYear,
    /// Income tax the alternate law would levy.
    pub old_law_pit: Decimal,
    /// Net salary under the alternate law.
    pub old_law_net_salary: Decimal,
    /// `old_law_pit - pit`; positive when the requested law taxes less.
    pub tax_savings: Decimal,
    /// Relative change of net salary against the alternate law, in percent.
    /// Zero when the alternate net salary is not positive.
    pub net_percentage_change: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag conditions that don't prevent calculation but may need a
/// caller's attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// The trace is derived purely from the input and configuration, so two
/// identical calculations produce identical traces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Returns true if a warning with the given code was recorded.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// The complete result of a salary calculation.
///
/// Every field is derived from the echoed [`SalaryInput`] and the active
/// configuration. Amounts are unrounded VND.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// The input the breakdown was computed from.
    pub input: SalaryInput,
    /// Gross salary, resolved from a net figure when necessary.
    pub gross_salary: Decimal,
    /// Insurance withheld from the employee.
    pub employee_insurance: InsuranceContributions,
    /// Gross salary minus employee insurance.
    pub income_after_insurance: Decimal,
    /// Flat personal deduction of the selected law year.
    pub personal_deduction: Decimal,
    /// Per-dependent deduction multiplied by the dependent count.
    pub dependent_deduction: Decimal,
    /// Personal plus dependent deduction.
    pub total_deductions: Decimal,
    /// Income subject to tax, never negative.
    pub taxable_income: Decimal,
    /// Personal income tax.
    pub pit: Decimal,
    /// Tax contributed by each bracket that taxed some income.
    pub pit_breakdown: Vec<BracketContribution>,
    /// Take-home salary.
    pub net_salary: Decimal,
    /// Insurance paid by the employer on top of gross salary.
    pub employer_insurance: InsuranceContributions,
    /// Gross salary plus employer insurance.
    pub total_employer_cost: Decimal,
    /// Comparison against the alternate law, when the law year defines one.
    pub comparison: Option<LawComparison>,
    /// Record of every calculation step.
    pub audit_trace: AuditTrace,
}
