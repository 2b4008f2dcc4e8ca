//! Salary input model and related types.
//!
//! This module defines the [`SalaryInput`] record supplied by callers along
//! with the closed enums that describe how the salary figure is stated,
//! which region the employee works in, and which tax law applies.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// How the salary figure in a [`SalaryInput`] is stated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryType {
    /// Salary before insurance and tax withholding.
    Gross,
    /// Take-home salary after insurance and tax withholding.
    Net,
}

impl SalaryType {
    /// Returns the serialized name of the salary type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gross => "gross",
            Self::Net => "net",
        }
    }
}

/// Minimum-wage region of the workplace.
///
/// The region selects a regional minimum wage for informational purposes.
/// It does not take part in insurance or tax arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Region I (large urban districts).
    #[serde(rename = "I")]
    I,
    /// Region II.
    #[serde(rename = "II")]
    II,
    /// Region III.
    #[serde(rename = "III")]
    III,
    /// Region IV (rural areas).
    #[serde(rename = "IV")]
    IV,
}

impl Region {
    /// Returns the roman numeral identifying the region.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
            Self::IV => "IV",
        }
    }
}

/// The tax law year selecting bracket tables and deduction amounts.
///
/// Serialized as a plain number so that both YAML configuration and JSON
/// input can write `2026`.
///
/// # Example
///
/// ```
/// use salary_engine::models::TaxYear;
///
/// assert_eq!(TaxYear::try_from(2026).unwrap(), TaxYear::Y2026);
/// assert_eq!(u16::from(TaxYear::Y2025), 2025);
/// assert!(TaxYear::try_from(2019).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum TaxYear {
    /// The legacy seven-bracket law.
    Y2025,
    /// The five-bracket law in force from 2026.
    Y2026,
}

impl TaxYear {
    /// All supported law years, oldest first.
    pub const ALL: [TaxYear; 2] = [TaxYear::Y2025, TaxYear::Y2026];

    /// Returns the calendar year of the law.
    pub fn value(&self) -> u16 {
        match self {
            Self::Y2025 => 2025,
            Self::Y2026 => 2026,
        }
    }
}

impl TryFrom<u16> for TaxYear {
    type Error = EngineError;

    fn try_from(year: u16) -> Result<Self, Self::Error> {
        match year {
            2025 => Ok(Self::Y2025),
            2026 => Ok(Self::Y2026),
            _ => Err(EngineError::UnsupportedYear { year }),
        }
    }
}

impl From<TaxYear> for u16 {
    fn from(year: TaxYear) -> Self {
        year.value()
    }
}

impl fmt::Display for TaxYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Caller-supplied salary figure and circumstances.
///
/// # Example
///
/// ```
/// use salary_engine::models::{Region, SalaryInput, SalaryType, TaxYear};
/// use rust_decimal::Decimal;
///
/// let input = SalaryInput {
///     salary: Decimal::from(30_000_000),
///     salary_type: SalaryType::Gross,
///     region: Region::I,
///     dependents: 1,
///     year: TaxYear::Y2026,
/// };
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInput {
    /// The monthly salary in VND, interpreted according to `salary_type`.
    pub salary: Decimal,
    /// Whether `salary` is a gross or a net figure.
    pub salary_type: SalaryType,
    /// The minimum-wage region of the workplace.
    pub region: Region,
    /// Number of registered dependents.
    #[serde(default)]
    pub dependents: u32,
    /// The tax law year to apply.
    pub year: TaxYear,
}

impl SalaryInput {
    /// Largest accepted monthly salary: 10^18 VND.
    ///
    /// Keeps employer cost and the net to gross rescaling far inside the
    /// range of [`Decimal`].
    pub const MAX_SALARY: Decimal = Decimal::from_parts(2_808_348_672, 232_830_643, 0, false, 0);

    /// Checks the input against the engine's accepted domain.
    ///
    /// A negative salary or one above [`Self::MAX_SALARY`] is rejected.
    /// Zero is accepted and yields a zero-valued breakdown.
    pub fn validate(&self) -> EngineResult<()> {
        if self.salary < Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: "salary".to_string(),
                message: format!("must not be negative (got {})", self.salary),
            });
        }
        if self.salary > Self::MAX_SALARY {
            return Err(EngineError::InvalidInput {
                field: "salary".to_string(),
                message: format!(
                    "must not exceed {} (got {})",
                    Self::MAX_SALARY,
                    self.salary
                ),
            });
        }
        Ok(())
    }
}
