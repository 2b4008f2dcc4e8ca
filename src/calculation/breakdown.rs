//! Salary breakdown assembly.
//!
//! Orchestrates the calculation steps in a fixed order, since each step reads
//! values derived by the ones before it:
//!
//! 1. Family deductions for the law year
//! 2. Gross resolution (net input only)
//! 3. Employee insurance
//! 4. Taxable income and progressive income tax
//! 5. Employer insurance and total employer cost
//! 6. Comparison against the law's alternate year, if it defines one

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{ConfigLoader, EngineConfig};
use crate::error::EngineResult;
use crate::models::{AuditTrace, AuditWarning, SalaryBreakdown, SalaryInput, SalaryType};

use super::comparison::compare_with_law;
use super::deductions::{DeductionResult, calculate_deductions, taxable_income};
use super::gross_resolver::resolve_gross;
use super::insurance::{InsuranceParty, calculate_insurance};
use super::progressive_tax::calculate_pit;

/// Warning code emitted when the net to gross iteration hit its limit.
pub const GROSS_NOT_CONVERGED: &str = "GROSS_NOT_CONVERGED";

/// Warning code emitted when gross salary is below the regional minimum wage.
pub const BELOW_MINIMUM_WAGE: &str = "BELOW_MINIMUM_WAGE";

/// Computes the full salary breakdown for an input.
///
/// # Returns
///
/// The breakdown, or an error if:
/// - The input fails [`SalaryInput::validate`] (`InvalidInput`)
/// - The input's year or its comparison year has no law (`LawNotConfigured`)
///
/// A net salary that cannot be inverted within the resolver's iteration limit is not
/// an error; the breakdown carries a `GROSS_NOT_CONVERGED` warning instead.
///
/// `config` is trusted as given. Obtain it from a [`ConfigLoader`], which
/// validates bracket tables and rates, rather than from an unchecked
/// [`EngineConfig::new`].
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::compute_breakdown;
/// use salary_engine::config::ConfigLoader;
/// use salary_engine::models::{Region, SalaryInput, SalaryType, TaxYear};
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::builtin().unwrap().config();
/// let input = SalaryInput {
///     salary: Decimal::from(10_000_000),
///     salary_type: SalaryType::Gross,
///     region: Region::I,
///     dependents: 0,
///     year: TaxYear::Y2026,
/// };
///
/// let breakdown = compute_breakdown(&input, config).unwrap();
/// assert_eq!(breakdown.employee_insurance.total, Decimal::from(1_050_000));
/// assert_eq!(breakdown.pit, Decimal::ZERO);
/// assert_eq!(breakdown.net_salary, Decimal::from(8_950_000));
/// ```
pub fn compute_breakdown(input: &SalaryInput, config: &EngineConfig) -> EngineResult<SalaryBreakdown> {
    input.validate()?;
    let law = config.law(input.year)?;

    debug!(
        salary = %input.salary,
        salary_type = input.salary_type.as_str(),
        region = input.region.as_str(),
        dependents = input.dependents,
        year = input.year.value(),
        "Computing salary breakdown"
    );

    let mut trace = AuditTrace::default();
    let mut step_number: u32 = 1;

    let DeductionResult {
        personal: personal_deduction,
        dependent: dependent_deduction,
        total: total_deductions,
        audit_step,
    } = calculate_deductions(law, input.dependents, step_number);
    trace.steps.push(audit_step);
    step_number += 1;

    let gross_salary = match input.salary_type {
        SalaryType::Gross => input.salary,
        SalaryType::Net => {
            let resolution =
                resolve_gross(input.salary, total_deductions, input.year, config, step_number)?;
            step_number += 1;
            if !resolution.converged {
                trace.warnings.push(AuditWarning {
                    code: GROSS_NOT_CONVERGED.to_string(),
                    message: format!(
                        "Gross salary for net {} is an approximation after {} iteration(s)",
                        input.salary.normalize(),
                        resolution.iterations
                    ),
                    severity: "medium".to_string(),
                });
            }
            trace.steps.push(resolution.audit_step);
            resolution.gross_salary
        }
    };

    let employee = calculate_insurance(
        gross_salary,
        &config.insurance().employee,
        InsuranceParty::Employee,
        step_number,
    );
    trace.steps.push(employee.audit_step);
    step_number += 1;
    let employee_insurance = employee.contributions;

    let income_after_insurance = gross_salary - employee_insurance.total;
    let taxable = taxable_income(income_after_insurance, total_deductions);

    let pit_result = calculate_pit(taxable, law, step_number);
    trace.steps.push(pit_result.audit_step);
    step_number += 1;
    let pit = pit_result.evaluation.total_tax;
    let pit_breakdown = pit_result.evaluation.contributions;

    let net_salary = income_after_insurance - pit;

    let employer = calculate_insurance(
        gross_salary,
        &config.insurance().employer,
        InsuranceParty::Employer,
        step_number,
    );
    trace.steps.push(employer.audit_step);
    step_number += 1;
    let employer_insurance = employer.contributions;
    let total_employer_cost = gross_salary + employer_insurance.total;

    let comparison = match law.compare_with {
        Some(alternate_year) => {
            let alternate_law = config.law(alternate_year)?;
            let result = compare_with_law(
                taxable,
                income_after_insurance,
                pit,
                net_salary,
                alternate_law,
                step_number,
            );
            trace.steps.push(result.audit_step);
            Some(result.comparison)
        }
        None => None,
    };

    if let Some(minimum_wage) = config.minimum_wage(input.region, input.year)
        && gross_salary > Decimal::ZERO
        && gross_salary < minimum_wage
    {
        trace.warnings.push(AuditWarning {
            code: BELOW_MINIMUM_WAGE.to_string(),
            message: format!(
                "Gross salary {} is below the region {} minimum wage of {} for {}",
                gross_salary.round_dp(0),
                input.region.as_str(),
                minimum_wage,
                input.year
            ),
            severity: "low".to_string(),
        });
    }

    debug!(
        gross_salary = %gross_salary,
        pit = %pit,
        net_salary = %net_salary,
        warnings = trace.warnings.len(),
        "Salary breakdown computed"
    );

    Ok(SalaryBreakdown {
        input: input.clone(),
        gross_salary,
        employee_insurance,
        income_after_insurance,
        personal_deduction,
        dependent_deduction,
        total_deductions,
        taxable_income: taxable,
        pit,
        pit_breakdown,
        net_salary,
        employer_insurance,
        total_employer_cost,
        comparison,
        audit_trace: trace,
    })
}

/// Computes a breakdown against the built-in configuration.
pub fn compute_breakdown_builtin(input: &SalaryInput) -> EngineResult<SalaryBreakdown> {
    compute_breakdown(input, ConfigLoader::builtin()?.config())
}
