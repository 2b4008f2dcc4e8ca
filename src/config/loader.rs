//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax law
//! configurations from YAML files, either from a directory on disk or from
//! the copy compiled into the crate.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Region, TaxYear};

use super::types::{
    EngineConfig, GrossResolverConfig, InsuranceConfig, InsuranceRates, TaxLawConfig,
};

const BUILTIN_INSURANCE: &str = include_str!("../../config/vietnam/insurance.yaml");
const BUILTIN_RESOLVER: &str = include_str!("../../config/vietnam/resolver.yaml");
const BUILTIN_LAWS: [(&str, &str); 2] = [
    (
        "laws/2025.yaml",
        include_str!("../../config/vietnam/laws/2025.yaml"),
    ),
    (
        "laws/2026.yaml",
        include_str!("../../config/vietnam/laws/2026.yaml"),
    ),
];

static BUILTIN: OnceLock<EngineResult<ConfigLoader>> = OnceLock::new();

/// Loads, validates, and provides access to engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/vietnam/
/// ├── insurance.yaml   # Employee and employer insurance rates
/// ├── resolver.yaml    # Net to gross iteration settings
/// └── laws/
///     ├── 2025.yaml    # One file per law year
///     └── 2026.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
/// use salary_engine::models::TaxYear;
///
/// let loader = ConfigLoader::load("./config/vietnam").unwrap();
/// let law = loader.law(TaxYear::Y2026).unwrap();
/// println!("{} has {} brackets", law.name, law.brackets.len());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The loaded values fail validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let insurance = Self::load_yaml::<InsuranceConfig>(&path.join("insurance.yaml"))?;
        let resolver = Self::load_yaml::<GrossResolverConfig>(&path.join("resolver.yaml"))?;
        let laws = Self::load_laws(&path.join("laws"))?;

        let loader = Self::from_config(EngineConfig::new(insurance, resolver, laws))?;
        info!(path = %path.display(), "Loaded salary engine configuration");
        Ok(loader)
    }

    /// Returns the shipped configuration compiled into the crate.
    ///
    /// The embedded files are parsed and validated on first use; later calls
    /// return the same instance.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_engine::config::ConfigLoader;
    /// use salary_engine::models::TaxYear;
    ///
    /// let loader = ConfigLoader::builtin().unwrap();
    /// assert_eq!(loader.law(TaxYear::Y2026).unwrap().brackets.len(), 5);
    /// ```
    pub fn builtin() -> EngineResult<&'static ConfigLoader> {
        BUILTIN
            .get_or_init(Self::parse_builtin)
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        validate(&config)?;
        Ok(Self { config })
    }

    fn parse_builtin() -> EngineResult<Self> {
        let insurance = Self::parse_yaml::<InsuranceConfig>("insurance.yaml", BUILTIN_INSURANCE)?;
        let resolver = Self::parse_yaml::<GrossResolverConfig>("resolver.yaml", BUILTIN_RESOLVER)?;
        let laws = BUILTIN_LAWS
            .iter()
            .map(|(name, content)| Self::parse_yaml::<TaxLawConfig>(name, content))
            .collect::<EngineResult<Vec<_>>>()?;

        let loader = Self::from_config(EngineConfig::new(insurance, resolver, laws))?;
        info!("Loaded built-in salary engine configuration");
        Ok(loader)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse_yaml(&path_str, &content)
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(path: &str, content: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Loads all law files from the laws directory.
    fn load_laws(laws_dir: &Path) -> EngineResult<Vec<TaxLawConfig>> {
        let laws_dir_str = laws_dir.display().to_string();

        let entries = fs::read_dir(laws_dir).map_err(|_| EngineError::ConfigNotFound {
            path: laws_dir_str.clone(),
        })?;

        let mut laws = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: laws_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                laws.push(Self::load_yaml::<TaxLawConfig>(&path)?);
            }
        }

        if laws.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no law files found)", laws_dir_str),
            });
        }

        Ok(laws)
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Gets the law configured for a year.
    pub fn law(&self, year: TaxYear) -> EngineResult<&TaxLawConfig> {
        self.config.law(year)
    }

    /// Gets the regional minimum wage for a law year.
    pub fn minimum_wage(&self, region: Region, year: TaxYear) -> Option<Decimal> {
        self.config.minimum_wage(region, year)
    }
}

fn validate(config: &EngineConfig) -> EngineResult<()> {
    validate_rates("insurance.employee", &config.insurance().employee)?;
    validate_rates("insurance.employer", &config.insurance().employer)?;
    validate_resolver(config.resolver())?;

    for law in config.laws() {
        validate_law(law)?;
        if let Some(other) = law.compare_with {
            if other == law.year {
                return Err(EngineError::InvalidConfig {
                    field: format!("laws.{}.compare_with", law.year),
                    message: "a law cannot be compared with itself".to_string(),
                });
            }
            config.law(other)?;
        }
    }

    Ok(())
}

fn validate_rates(field: &str, rates: &InsuranceRates) -> EngineResult<()> {
    let components = [
        ("social", rates.social),
        ("health", rates.health),
        ("unemployment", rates.unemployment),
    ];
    for (name, rate) in components {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(EngineError::InvalidConfig {
                field: format!("{}.{}", field, name),
                message: format!("rate {} must be between 0 and 1", rate),
            });
        }
    }
    Ok(())
}

fn validate_resolver(resolver: &GrossResolverConfig) -> EngineResult<()> {
    if resolver.seed_ratio <= Decimal::ZERO {
        return Err(EngineError::InvalidConfig {
            field: "resolver.seed_ratio".to_string(),
            message: "must be positive".to_string(),
        });
    }
    if resolver.tolerance <= Decimal::ZERO {
        return Err(EngineError::InvalidConfig {
            field: "resolver.tolerance".to_string(),
            message: "must be positive".to_string(),
        });
    }
    if resolver.max_iterations == 0 {
        return Err(EngineError::InvalidConfig {
            field: "resolver.max_iterations".to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_law(law: &TaxLawConfig) -> EngineResult<()> {
    if law.personal_deduction < Decimal::ZERO || law.dependent_deduction < Decimal::ZERO {
        return Err(EngineError::InvalidConfig {
            field: format!("laws.{}", law.year),
            message: "deductions must not be negative".to_string(),
        });
    }

    let table_error = |message: String| EngineError::InvalidBracketTable {
        year: law.year.value(),
        message,
    };

    let brackets = &law.brackets;
    let Some(first) = brackets.first() else {
        return Err(table_error("no brackets defined".to_string()));
    };
    if !first.lower_bound.is_zero() {
        return Err(table_error(format!(
            "first bracket must start at 0, not {}",
            first.lower_bound
        )));
    }

    for (i, pair) in brackets.windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);
        let Some(upper) = current.upper_bound else {
            return Err(table_error(format!(
                "bracket {} is unbounded but is not the last bracket",
                i + 1
            )));
        };
        if upper < current.lower_bound {
            return Err(table_error(format!(
                "bracket {} ends below its start",
                i + 1
            )));
        }
        if next.lower_bound != upper + Decimal::ONE {
            return Err(table_error(format!(
                "bracket {} must start at {}, not {}",
                i + 2,
                upper + Decimal::ONE,
                next.lower_bound
            )));
        }
        if next.rate <= current.rate {
            return Err(table_error(format!(
                "bracket {} rate {} does not exceed bracket {} rate {}",
                i + 2,
                next.rate,
                i + 1,
                current.rate
            )));
        }
    }

    for (i, bracket) in brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(table_error(format!(
                "bracket {} rate {} must be between 0 and 1",
                i + 1,
                bracket.rate
            )));
        }
    }

    if brackets.last().is_some_and(|b| !b.is_unbounded()) {
        return Err(table_error("last bracket must be unbounded".to_string()));
    }

    Ok(())
}
