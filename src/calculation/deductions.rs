//! Family circumstance deductions and taxable income.
//!
//! Each taxpayer receives a flat personal deduction plus a fixed amount per
//! registered dependent. Both amounts depend on the law year.

use rust_decimal::Decimal;

use crate::config::TaxLawConfig;
use crate::models::AuditStep;

/// The result of the deduction step, including the audit step.
#[derive(Debug, Clone)]
pub struct DeductionResult {
    /// The flat personal deduction.
    pub personal: Decimal,
    /// The per-dependent deduction multiplied by the dependent count.
    pub dependent: Decimal,
    /// Personal plus dependent deduction.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the deductions for a law year and dependent count.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_deductions;
/// use salary_engine::config::ConfigLoader;
/// use salary_engine::models::TaxYear;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let law = loader.law(TaxYear::Y2026).unwrap();
///
/// let result = calculate_deductions(law, 2, 1);
/// assert_eq!(result.total, Decimal::from(27_900_000));
/// ```
pub fn calculate_deductions(law: &TaxLawConfig, dependents: u32, step_number: u32) -> DeductionResult {
    let personal = law.personal_deduction;
    let dependent = law.dependent_deduction * Decimal::from(dependents);
    let total = personal + dependent;

    let audit_step = AuditStep {
        step_number,
        rule_id: "family_deductions".to_string(),
        rule_name: "Family Circumstance Deductions".to_string(),
        input: serde_json::json!({
            "year": law.year.value(),
            "dependents": dependents,
            "personal_deduction": personal.normalize().to_string(),
            "dependent_deduction_per_head": law.dependent_deduction.normalize().to_string()
        }),
        output: serde_json::json!({
            "personal": personal.normalize().to_string(),
            "dependent": dependent.normalize().to_string(),
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "{} + {} x {} = {}",
            personal.normalize(),
            law.dependent_deduction.normalize(),
            dependents,
            total.normalize()
        ),
    };

    DeductionResult {
        personal,
        dependent,
        total,
        audit_step,
    }
}

/// Returns income subject to tax, floored at zero.
///
/// A worker whose deductions exceed their income after insurance owes no tax.
pub fn taxable_income(income_after_insurance: Decimal, total_deductions: Decimal) -> Decimal {
    (income_after_insurance - total_deductions).max(Decimal::ZERO)
}
