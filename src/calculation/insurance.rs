//! Compulsory insurance contribution calculation.
//!
//! Social, health, and unemployment insurance are flat percentages of gross
//! salary. The employee's share is withheld from pay; the employer's share is
//! paid on top of gross salary.

use rust_decimal::Decimal;

use crate::config::InsuranceRates;
use crate::models::{AuditStep, InsuranceContributions};

/// Which side of the employment relationship pays the contributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsuranceParty {
    /// Withheld from the employee's gross salary.
    Employee,
    /// Paid by the employer in addition to gross salary.
    Employer,
}

impl InsuranceParty {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Employer => "employer",
        }
    }
}

/// The result of an insurance calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct InsuranceResult {
    /// The computed contributions.
    pub contributions: InsuranceContributions,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies insurance rates to a gross salary without recording a step.
pub fn insurance_contributions(gross_salary: Decimal, rates: &InsuranceRates) -> InsuranceContributions {
    let social = gross_salary * rates.social;
    let health = gross_salary * rates.health;
    let unemployment = gross_salary * rates.unemployment;

    InsuranceContributions {
        social,
        health,
        unemployment,
        total: social + health + unemployment,
    }
}

/// Calculates insurance contributions for one party.
///
/// # Arguments
///
/// * `gross_salary` - The resolved gross salary
/// * `rates` - The contribution rates for `party`
/// * `party` - Whether these are employee or employer contributions
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::{InsuranceParty, calculate_insurance};
/// use salary_engine::config::InsuranceRates;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = InsuranceRates {
///     social: Decimal::from_str("0.08").unwrap(),
///     health: Decimal::from_str("0.015").unwrap(),
///     unemployment: Decimal::from_str("0.01").unwrap(),
/// };
///
/// let result = calculate_insurance(Decimal::from(10_000_000), &rates, InsuranceParty::Employee, 1);
/// assert_eq!(result.contributions.total, Decimal::from(1_050_000));
/// ```
pub fn calculate_insurance(
    gross_salary: Decimal,
    rates: &InsuranceRates,
    party: InsuranceParty,
    step_number: u32,
) -> InsuranceResult {
    let contributions = insurance_contributions(gross_salary, rates);

    let (rule_id, rule_name) = match party {
        InsuranceParty::Employee => ("employee_insurance", "Employee Insurance Withholding"),
        InsuranceParty::Employer => ("employer_insurance", "Employer Insurance Contribution"),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "party": party.as_str(),
            "social_rate": rates.social.normalize().to_string(),
            "health_rate": rates.health.normalize().to_string(),
            "unemployment_rate": rates.unemployment.normalize().to_string()
        }),
        output: serde_json::json!({
            "social": contributions.social.normalize().to_string(),
            "health": contributions.health.normalize().to_string(),
            "unemployment": contributions.unemployment.normalize().to_string(),
            "total": contributions.total.normalize().to_string()
        }),
        reasoning: format!(
            "{} x {} = {}",
            gross_salary.normalize(),
            rates.total_rate().normalize(),
            contributions.total.normalize()
        ),
    };

    InsuranceResult {
        contributions,
        audit_step,
    }
}
