//! Progressive income tax calculation functionality.
//!
//! This module applies a marginal bracket table to a taxable income. Each
//! bracket taxes only the slice of income that falls inside it, so a higher
//! rate never applies to income below its own threshold.

use rust_decimal::Decimal;

use crate::config::TaxLawConfig;
use crate::models::{AuditStep, BracketContribution, TaxBracket};

/// The outcome of evaluating a bracket table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxEvaluation {
    /// Total tax across all brackets.
    pub total_tax: Decimal,
    /// One entry per bracket that taxed some income, lowest bracket first.
    pub contributions: Vec<BracketContribution>,
}

/// The result of the personal income tax step, including the audit step.
#[derive(Debug, Clone)]
pub struct PitResult {
    /// The evaluated tax.
    pub evaluation: TaxEvaluation,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies a marginal bracket table to a taxable income.
///
/// Brackets are walked in ascending order. A bracket contributes only when
/// `taxable_income` exceeds its lower bound; brackets entirely above the
/// income are skipped and do not appear in the contribution list.
///
/// The caller must not pass a negative income. With the top bracket
/// unbounded the evaluation covers every non-negative amount.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::evaluate_tax;
/// use salary_engine::models::TaxBracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let brackets = vec![
///     TaxBracket {
///         lower_bound: Decimal::ZERO,
///         upper_bound: Some(Decimal::from(10_000_000)),
///         rate: Decimal::from_str("0.05").unwrap(),
///     },
///     TaxBracket {
///         lower_bound: Decimal::from(10_000_001),
///         upper_bound: None,
///         rate: Decimal::from_str("0.10").unwrap(),
///     },
/// ];
///
/// let evaluation = evaluate_tax(Decimal::from(8_000_000), &brackets);
/// assert_eq!(evaluation.total_tax, Decimal::from(400_000));
/// assert_eq!(evaluation.contributions.len(), 1);
/// ```
pub fn evaluate_tax(taxable_income: Decimal, brackets: &[TaxBracket]) -> TaxEvaluation {
    let mut total_tax = Decimal::ZERO;
    let mut contributions = Vec::new();

    for (index, bracket) in brackets.iter().enumerate() {
        if taxable_income <= bracket.lower_bound {
            continue;
        }

        let income = bracket.income_in_bracket(taxable_income);
        let tax = income * bracket.rate;
        total_tax += tax;

        contributions.push(BracketContribution {
            bracket: index as u32 + 1,
            income,
            rate: bracket.rate,
            tax,
        });
    }

    TaxEvaluation {
        total_tax,
        contributions,
    }
}

/// Calculates personal income tax under a law year and records the step.
///
/// # Arguments
///
/// * `taxable_income` - Income after insurance and deductions, floored at zero
/// * `law` - The law year whose bracket table applies
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_pit(taxable_income: Decimal, law: &TaxLawConfig, step_number: u32) -> PitResult {
    let evaluation = evaluate_tax(taxable_income, &law.brackets);

    let brackets_json: Vec<serde_json::Value> = evaluation
        .contributions
        .iter()
        .map(|c| {
            serde_json::json!({
                "bracket": c.bracket,
                "income": c.income.normalize().to_string(),
                "rate": c.rate.normalize().to_string(),
                "tax": c.tax.normalize().to_string()
            })
        })
        .collect();

    let reasoning = if evaluation.contributions.is_empty() {
        "No taxable income - no tax due".to_string()
    } else {
        let parts: Vec<String> = evaluation
            .contributions
            .iter()
            .map(|c| format!("{} x {}", c.income.normalize(), c.rate.normalize()))
            .collect();
        format!(
            "{} = {} under the {} law",
            parts.join(" + "),
            evaluation.total_tax.normalize(),
            law.year
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "progressive_tax".to_string(),
        rule_name: "Progressive Income Tax".to_string(),
        input: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "year": law.year.value()
        }),
        output: serde_json::json!({
            "pit": evaluation.total_tax.normalize().to_string(),
            "brackets": brackets_json
        }),
        reasoning,
    };

    PitResult {
        evaluation,
        audit_step,
    }
}
