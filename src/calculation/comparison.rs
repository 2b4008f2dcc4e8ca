//! Cross-law comparison.
//!
//! Re-taxes the same taxable income under an alternate law year so callers
//! can show what a law change means for take-home pay. Deductions and
//! insurance are not recomputed; only the bracket table changes.

use rust_decimal::Decimal;

use crate::config::TaxLawConfig;
use crate::models::{AuditStep, LawComparison};

use super::progressive_tax::evaluate_tax;

/// The result of a law comparison, including the audit step.
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    /// The comparison figures.
    pub comparison: LawComparison,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Compares the current tax outcome against an alternate law.
///
/// # Arguments
///
/// * `taxable_income` - Taxable income already computed for the current law
/// * `income_after_insurance` - Gross salary minus employee insurance
/// * `pit` - Income tax under the current law
/// * `net_salary` - Net salary under the current law
/// * `alternate_law` - The law to compare against
/// * `step_number` - The step number for audit trail sequencing
///
/// The percentage change is reported as zero when the alternate net salary
/// is not positive.
pub fn compare_with_law(
    taxable_income: Decimal,
    income_after_insurance: Decimal,
    pit: Decimal,
    net_salary: Decimal,
    alternate_law: &TaxLawConfig,
    step_number: u32,
) -> ComparisonResult {
    let old_law_pit = evaluate_tax(taxable_income, &alternate_law.brackets).total_tax;
    let old_law_net_salary = income_after_insurance - old_law_pit;
    let tax_savings = old_law_pit - pit;

    let net_percentage_change = if old_law_net_salary > Decimal::ZERO {
        (net_salary - old_law_net_salary) / old_law_net_salary * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "law_comparison".to_string(),
        rule_name: "Alternate Law Comparison".to_string(),
        input: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "compared_year": alternate_law.year.value(),
            "pit": pit.normalize().to_string(),
            "net_salary": net_salary.normalize().to_string()
        }),
        output: serde_json::json!({
            "old_law_pit": old_law_pit.normalize().to_string(),
            "old_law_net_salary": old_law_net_salary.normalize().to_string(),
            "tax_savings": tax_savings.normalize().to_string(),
            "net_percentage_change": net_percentage_change.round_dp(4).normalize().to_string()
        }),
        reasoning: format!(
            "{} law tax {} - current tax {} = savings {}",
            alternate_law.year,
            old_law_pit.normalize(),
            pit.normalize(),
            tax_savings.normalize()
        ),
    };

    ComparisonResult {
        comparison: LawComparison {
            compared_year: alternate_law.year,
            old_law_pit,
            old_law_net_salary,
            tax_savings,
            net_percentage_change,
        },
        audit_step,
    }
}
