//! Configuration types for salary calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::{EngineError, EngineResult};
use crate::models::{Region, TaxBracket, TaxYear};

/// Insurance contribution rates, as fractions of gross salary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InsuranceRates {
    /// Social insurance rate.
    pub social: Decimal,
    /// Health insurance rate.
    pub health: Decimal,
    /// Unemployment insurance rate.
    pub unemployment: Decimal,
}

impl InsuranceRates {
    /// Returns the combined rate of all three components.
    pub fn total_rate(&self) -> Decimal {
        self.social + self.health + self.unemployment
    }
}

/// Insurance configuration from insurance.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InsuranceConfig {
    /// Rates withheld from the employee.
    pub employee: InsuranceRates,
    /// Rates paid by the employer.
    pub employer: InsuranceRates,
}

/// Settings for the net to gross fixed-point iteration, from resolver.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GrossResolverConfig {
    /// Initial guess divisor: the first estimate is `net / seed_ratio`.
    pub seed_ratio: Decimal,
    /// Maximum number of forward evaluations.
    pub max_iterations: u32,
    /// Absolute net-salary difference accepted as converged.
    pub tolerance: Decimal,
}

impl Default for GrossResolverConfig {
    fn default() -> Self {
        Self {
            seed_ratio: Decimal::new(85, 2),
            max_iterations: 10,
            tolerance: Decimal::from(100),
        }
    }
}

/// The rule set of one tax law year, from laws/<year>.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxLawConfig {
    /// The law year.
    pub year: TaxYear,
    /// Human-readable name of the law.
    pub name: String,
    /// Flat monthly deduction for the taxpayer.
    pub personal_deduction: Decimal,
    /// Monthly deduction per registered dependent.
    pub dependent_deduction: Decimal,
    /// Progressive brackets, lowest first.
    pub brackets: Vec<TaxBracket>,
    /// Law year to compare results against, if any.
    #[serde(default)]
    pub compare_with: Option<TaxYear>,
    /// Regional monthly minimum wage in force under this law year.
    #[serde(default)]
    pub minimum_wages: BTreeMap<Region, Decimal>,
}

/// The complete engine configuration.
///
/// Aggregates the insurance rates, resolver settings, and every configured
/// law year. Built once and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    insurance: InsuranceConfig,
    resolver: GrossResolverConfig,
    laws: BTreeMap<TaxYear, TaxLawConfig>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    ///
    /// Laws are keyed by their own `year`; a later entry for the same year
    /// replaces an earlier one.
    ///
    /// The result is unchecked. A bracket table whose last bracket is bounded
    /// leaves income above it untaxed, so pass hand-built configurations
    /// through [`ConfigLoader::from_config`](super::ConfigLoader::from_config)
    /// before computing with them.
    pub fn new(
        insurance: InsuranceConfig,
        resolver: GrossResolverConfig,
        laws: Vec<TaxLawConfig>,
    ) -> Self {
        let laws = laws.into_iter().map(|law| (law.year, law)).collect();
        Self {
            insurance,
            resolver,
            laws,
        }
    }

    /// Returns a copy of this configuration with different resolver settings.
    ///
    /// Unchecked, like [`EngineConfig::new`].
    pub fn with_resolver(mut self, resolver: GrossResolverConfig) -> Self {
        self.resolver = resolver;
        self
    }

    /// Returns the insurance configuration.
    pub fn insurance(&self) -> &InsuranceConfig {
        &self.insurance
    }

    /// Returns the gross resolver settings.
    pub fn resolver(&self) -> &GrossResolverConfig {
        &self.resolver
    }

    /// Returns all configured laws, oldest first.
    pub fn laws(&self) -> impl Iterator<Item = &TaxLawConfig> {
        self.laws.values()
    }

    /// Gets the law configured for a year.
    pub fn law(&self, year: TaxYear) -> EngineResult<&TaxLawConfig> {
        self.laws
            .get(&year)
            .ok_or(EngineError::LawNotConfigured { year: year.value() })
    }

    /// Gets the regional minimum wage for a law year.
    ///
    /// Informational only; the tax math never reads it.
    pub fn minimum_wage(&self, region: Region, year: TaxYear) -> Option<Decimal> {
        self.laws
            .get(&year)
            .and_then(|law| law.minimum_wages.get(&region).copied())
    }
}
