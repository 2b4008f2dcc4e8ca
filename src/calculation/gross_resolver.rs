//! Net to gross salary resolution.
//!
//! The gross to net function is monotonic but piecewise (insurance, floored
//! deductions, marginal brackets), so it has no closed-form inverse. The
//! resolver instead runs a bounded fixed-point iteration with proportional
//! correction:
//!
//! 1. Seed with `net / seed_ratio`.
//! 2. Evaluate the implied net of the current estimate. Stop as soon as it is
//!    within `tolerance` of the target.
//! 3. Otherwise rescale the estimate by `target / implied` and repeat, up to
//!    `max_iterations` evaluations.
//!
//! Running out of iterations is not an error: the last estimate is returned
//! with `converged == false`.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::{EngineConfig, InsuranceRates, TaxLawConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, TaxYear};

use super::deductions::taxable_income;
use super::insurance::insurance_contributions;
use super::progressive_tax::evaluate_tax;

/// The result of resolving a gross salary from a net salary.
#[derive(Debug, Clone)]
pub struct GrossResolution {
    /// The resolved gross salary estimate.
    pub gross_salary: Decimal,
    /// Number of forward evaluations performed.
    pub iterations: u32,
    /// Whether the implied net came within tolerance of the target.
    pub converged: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes take-home pay for a gross salary.
///
/// This is the forward function the resolver inverts: employee insurance,
/// then deductions floored at zero, then progressive tax.
pub fn forward_net_salary(
    gross_salary: Decimal,
    total_deductions: Decimal,
    law: &TaxLawConfig,
    employee_rates: &InsuranceRates,
) -> Decimal {
    let insurance = insurance_contributions(gross_salary, employee_rates);
    let income_after_insurance = gross_salary - insurance.total;
    let taxable = taxable_income(income_after_insurance, total_deductions);
    income_after_insurance - evaluate_tax(taxable, &law.brackets).total_tax
}

/// Finds the gross salary whose take-home pay matches `net_salary`.
///
/// # Arguments
///
/// * `net_salary` - The target take-home pay
/// * `total_deductions` - Personal plus dependent deductions for the year
/// * `year` - The law year whose brackets apply
/// * `config` - Engine configuration supplying rates and resolver settings
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// The best estimate found. Fails if `year` has no configured law, if
/// `seed_ratio` is not positive, or if `net_salary / seed_ratio` overflows.
/// A correction that would overflow ends the iteration early with
/// `converged == false`.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::resolve_gross;
/// use salary_engine::config::ConfigLoader;
/// use salary_engine::models::TaxYear;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::builtin().unwrap().config();
///
/// // 8,950,000 net is below the tax threshold: only insurance separates it from gross.
/// let resolution = resolve_gross(
///     Decimal::from(8_950_000),
///     Decimal::from(15_500_000),
///     TaxYear::Y2026,
///     config,
///     1,
/// )
/// .unwrap();
///
/// assert!(resolution.converged);
/// assert!((resolution.gross_salary - Decimal::from(10_000_000)).abs() < Decimal::ONE);
/// ```
pub fn resolve_gross(
    net_salary: Decimal,
    total_deductions: Decimal,
    year: TaxYear,
    config: &EngineConfig,
    step_number: u32,
) -> EngineResult<GrossResolution> {
    let law = config.law(year)?;
    let rates = &config.insurance().employee;
    let settings = config.resolver();

    if settings.seed_ratio <= Decimal::ZERO {
        return Err(EngineError::InvalidConfig {
            field: "resolver.seed_ratio".to_string(),
            message: "must be positive".to_string(),
        });
    }
    let seed = net_salary
        .checked_div(settings.seed_ratio)
        .ok_or_else(|| EngineError::InvalidInput {
            field: "salary".to_string(),
            message: format!(
                "net salary {} is too large to seed with ratio {}",
                net_salary, settings.seed_ratio
            ),
        })?;

    let mut gross = seed;
    let mut implied_net = Decimal::ZERO;
    let mut iterations = 0;
    let mut converged = false;

    while iterations < settings.max_iterations {
        iterations += 1;
        implied_net = forward_net_salary(gross, total_deductions, law, rates);
        debug!(
            iteration = iterations,
            gross = %gross,
            implied_net = %implied_net,
            "Gross resolver iteration"
        );

        if (implied_net - net_salary).abs() < settings.tolerance {
            converged = true;
            break;
        }

        // Degenerate guard only: a zero net gives no usable correction ratio.
        let divisor = if implied_net.is_zero() {
            Decimal::ONE
        } else {
            implied_net
        };
        match net_salary
            .checked_div(divisor)
            .and_then(|ratio| gross.checked_mul(ratio))
        {
            Some(next) => gross = next,
            None => break,
        }
    }

    if !converged {
        warn!(
            net_salary = %net_salary,
            gross = %gross,
            iterations,
            "Gross resolver did not converge; returning last estimate"
        );
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_resolution".to_string(),
        rule_name: "Net to Gross Resolution".to_string(),
        input: serde_json::json!({
            "net_salary": net_salary.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string(),
            "year": year.value(),
            "seed": seed.normalize().to_string(),
            "tolerance": settings.tolerance.normalize().to_string(),
            "max_iterations": settings.max_iterations
        }),
        output: serde_json::json!({
            "gross_salary": gross.normalize().to_string(),
            "implied_net": implied_net.normalize().to_string(),
            "iterations": iterations,
            "converged": converged
        }),
        reasoning: if converged {
            format!(
                "Converged after {} iteration(s): implied net {} is within {} of {}",
                iterations,
                implied_net.round_dp(2).normalize(),
                settings.tolerance.normalize(),
                net_salary.normalize()
            )
        } else {
            format!(
                "Did not converge within {} iteration(s); using last estimate {}",
                iterations,
                gross.round_dp(2).normalize()
            )
        },
    };

    Ok(GrossResolution {
        gross_salary: gross,
        iterations,
        converged,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigLoader, GrossResolverConfig, InsuranceConfig};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn builtin_config() -> EngineConfig {
        ConfigLoader::builtin().unwrap().config().clone()
    }

    fn within(actual: Decimal, expected: Decimal, tolerance: &str) -> bool {
        (actual - expected).abs() < dec(tolerance)
    }

    #[test]
    fn test_forward_net_below_tax_threshold() {
        let config = builtin_config();
        let law = config.law(TaxYear::Y2026).unwrap();

        let net = forward_net_salary(
            dec("10000000"),
            dec("15500000"),
            law,
            &config.insurance().employee,
        );

        assert_eq!(net, dec("8950000"));
    }

    #[test]
    fn test_forward_net_with_tax() {
        let config = builtin_config();
        let law = config.law(TaxYear::Y2026).unwrap();

        let net = forward_net_salary(
            dec("30000000"),
            dec("15500000"),
            law,
            &config.insurance().employee,
        );

        assert_eq!(net, dec("26215000.1"));
    }

    #[test]
    fn test_resolves_gross_within_tolerance() {
        let config = builtin_config();

        let resolution =
            resolve_gross(dec("26215000.1"), dec("15500000"), TaxYear::Y2026, &config, 1).unwrap();

        assert!(resolution.converged);
        assert!(resolution.iterations <= 10);
        assert!(within(resolution.gross_salary, dec("30000000"), "100"));
    }

    #[test]
    fn test_resolved_gross_reproduces_target_net() {
        let config = builtin_config();
        let law = config.law(TaxYear::Y2025).unwrap();
        let target = dec("40000000");

        let resolution =
            resolve_gross(target, dec("15400000"), TaxYear::Y2025, &config, 1).unwrap();
        let implied = forward_net_salary(
            resolution.gross_salary,
            dec("15400000"),
            law,
            &config.insurance().employee,
        );

        assert!(resolution.converged);
        assert!(within(implied, target, "100"));
    }

    #[test]
    fn test_zero_net_resolves_to_zero_gross() {
        let config = builtin_config();

        let resolution =
            resolve_gross(Decimal::ZERO, dec("15500000"), TaxYear::Y2026, &config, 1).unwrap();

        assert!(resolution.converged);
        assert_eq!(resolution.iterations, 1);
        assert_eq!(resolution.gross_salary, Decimal::ZERO);
    }

    #[test]
    fn test_exhausted_iterations_return_last_estimate() {
        let config = builtin_config().with_resolver(GrossResolverConfig {
            max_iterations: 1,
            ..GrossResolverConfig::default()
        });

        let resolution =
            resolve_gross(dec("26215000.1"), dec("15500000"), TaxYear::Y2026, &config, 1).unwrap();

        assert!(!resolution.converged);
        assert_eq!(resolution.iterations, 1);
        // One proportional correction moves the seed much closer to 30,000,000.
        let seed = dec("26215000.1") / dec("0.85");
        assert!(
            (resolution.gross_salary - dec("30000000")).abs()
                < (seed - dec("30000000")).abs()
        );
        assert_eq!(resolution.audit_step.output["converged"], false);
    }

    #[test]
    fn test_more_iterations_never_worsen_the_estimate() {
        let target = dec("76800000.6");
        let errors: Vec<Decimal> = [1, 2, 3]
            .into_iter()
            .map(|max_iterations| {
                let config = builtin_config().with_resolver(GrossResolverConfig {
                    max_iterations,
                    ..GrossResolverConfig::default()
                });
                let resolution =
                    resolve_gross(target, dec("15500000"), TaxYear::Y2026, &config, 1).unwrap();
                (resolution.gross_salary - dec("100000000")).abs()
            })
            .collect();

        assert!(errors[1] <= errors[0]);
        assert!(errors[2] <= errors[1]);
    }

    #[test]
    fn test_zero_implied_net_uses_unit_divisor() {
        // Insurance consuming the whole gross leaves an implied net of zero.
        let base = builtin_config();
        let laws: Vec<TaxLawConfig> = base.laws().cloned().collect();
        let confiscatory = InsuranceRates {
            social: Decimal::ONE,
            health: Decimal::ZERO,
            unemployment: Decimal::ZERO,
        };
        let config = EngineConfig::new(
            InsuranceConfig {
                employee: confiscatory.clone(),
                employer: confiscatory,
            },
            GrossResolverConfig {
                max_iterations: 2,
                ..GrossResolverConfig::default()
            },
            laws,
        );

        let resolution = resolve_gross(dec("1000"), Decimal::ZERO, TaxYear::Y2026, &config, 1).unwrap();

        assert!(!resolution.converged);
        let seed = dec("1000") / dec("0.85");
        assert_eq!(resolution.gross_salary, seed * dec("1000") * dec("1000"));
    }

    #[test]
    fn test_zero_seed_ratio_is_rejected() {
        let config = builtin_config().with_resolver(GrossResolverConfig {
            seed_ratio: Decimal::ZERO,
            ..GrossResolverConfig::default()
        });

        let result = resolve_gross(dec("1000"), Decimal::ZERO, TaxYear::Y2026, &config, 1);

        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_negative_seed_ratio_is_rejected() {
        let config = builtin_config().with_resolver(GrossResolverConfig {
            seed_ratio: dec("-0.85"),
            ..GrossResolverConfig::default()
        });

        let result = resolve_gross(dec("1000"), Decimal::ZERO, TaxYear::Y2026, &config, 1);

        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_seed_overflow_blames_salary_not_config() {
        let config = builtin_config().with_resolver(GrossResolverConfig {
            seed_ratio: Decimal::new(1, 28),
            ..GrossResolverConfig::default()
        });

        let result = resolve_gross(dec("1000000000000000000"), Decimal::ZERO, TaxYear::Y2026, &config, 1);

        match result {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "salary"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_correction_stops_without_panic() {
        // Insurance consuming the whole gross keeps multiplying the estimate by the net.
        let base = builtin_config();
        let laws: Vec<TaxLawConfig> = base.laws().cloned().collect();
        let confiscatory = InsuranceRates {
            social: Decimal::ONE,
            health: Decimal::ZERO,
            unemployment: Decimal::ZERO,
        };
        let config = EngineConfig::new(
            InsuranceConfig {
                employee: confiscatory.clone(),
                employer: confiscatory,
            },
            GrossResolverConfig::default(),
            laws,
        );

        let resolution =
            resolve_gross(dec("1000000000000000000"), Decimal::ZERO, TaxYear::Y2026, &config, 1)
                .unwrap();

        assert!(!resolution.converged);
        assert!(resolution.iterations < 10);
    }

    #[test]
    fn test_audit_step_records_convergence() {
        let config = builtin_config();

        let resolution =
            resolve_gross(dec("8950000"), dec("15500000"), TaxYear::Y2026, &config, 2).unwrap();

        assert_eq!(resolution.audit_step.step_number, 2);
        assert_eq!(resolution.audit_step.rule_id, "gross_resolution");
        assert_eq!(resolution.audit_step.output["converged"], true);
        assert_eq!(
            resolution.audit_step.output["iterations"].as_u64().unwrap(),
            u64::from(resolution.iterations)
        );
        assert!(resolution.audit_step.reasoning.starts_with("Converged after"));
    }
}
